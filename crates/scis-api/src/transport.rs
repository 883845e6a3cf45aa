// Shared transport configuration and the pooled HTTP client built from it.
//
// One `Transport` is built at startup and handed to every domain client as
// an `Arc<dyn HttpExecutor>`. reqwest's client is internally pooled and safe
// to use from many tasks at once, so no extra locking is needed here.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::tls::Version;
use tracing::{debug, error};
use url::Url;

use crate::dispatch::{ExecuteFuture, HttpExecutor};
use crate::error::Error;
use crate::request::{CONTENT_TYPE, PreparedRequest};

pub const DEFAULT_TLS_VERSION: &str = "TLSv1.2";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("scis-api/", env!("CARGO_PKG_VERSION"));

/// Immutable TLS + timeout settings for the process-wide transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Protocol name as the TLS layer spells it, e.g. `TLSv1.2`.
    pub tls_version: String,
    pub connect_timeout: Duration,
    /// Upper bound on a whole request, including waiting for a pooled connection.
    pub request_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls_version: DEFAULT_TLS_VERSION.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Map a protocol name onto the version reqwest understands.
pub fn parse_tls_version(name: &str) -> Result<Version, Error> {
    match name {
        "TLSv1" | "TLSv1.0" => Ok(Version::TLS_1_0),
        "TLSv1.1" => Ok(Version::TLS_1_1),
        "TLSv1.2" => Ok(Version::TLS_1_2),
        "TLSv1.3" => Ok(Version::TLS_1_3),
        other => Err(Error::Tls(format!("unsupported TLS protocol '{other}'"))),
    }
}

impl TransportConfig {
    /// All three timeouts must be non-zero.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("connect_timeout", self.connect_timeout),
            ("request_timeout", self.request_timeout),
            ("read_timeout", self.read_timeout),
        ] {
            if value.is_zero() {
                return Err(Error::InvalidConfig(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    fn builder(&self) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .timeout(self.request_timeout)
            .user_agent(USER_AGENT)
    }

    /// Build a `reqwest::Client` pinned to `tls_version`.
    ///
    /// If the protocol is unknown or the TLS backend refuses it, the failure
    /// is logged and a client with the default TLS context is built instead.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.validate()?;

        let pinned = parse_tls_version(&self.tls_version).and_then(|version| {
            self.builder()
                .min_tls_version(version)
                .max_tls_version(version)
                .build()
                .map_err(|e| Error::Tls(e.to_string()))
        });

        match pinned {
            Ok(client) => Ok(client),
            Err(e) => {
                error!(tls_version = %self.tls_version, "{e}; falling back to default TLS context");
                self.builder()
                    .build()
                    .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
            }
        }
    }
}

/// The shared, pooled HTTP transport.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self { http })
    }

    fn to_reqwest(&self, request: PreparedRequest) -> Result<reqwest::RequestBuilder, Error> {
        let url = Url::parse(&request.url).map_err(|source| Error::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in request.headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: name.to_owned(),
                    message: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: name.to_owned(),
                message: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self.http.request(request.method, url);
        if let Some(body) = request.body {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    HeaderValue::from_static(body.content_type),
                );
            }
            builder = builder.body(body.content);
        }
        Ok(builder.headers(headers))
    }
}

/// Statuses that never carry a response entity.
fn has_entity(status: StatusCode) -> bool {
    !matches!(
        status,
        StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT | StatusCode::NOT_MODIFIED
    )
}

impl HttpExecutor for Transport {
    fn execute(&self, request: PreparedRequest) -> ExecuteFuture<'_> {
        Box::pin(async move {
            let builder = self.to_reqwest(request)?;
            let resp = builder.send().await?;
            let status = resp.status();
            if !has_entity(status) {
                return Err(Error::ResponseBody {
                    message: format!("response {status} carried no entity"),
                });
            }
            let body = resp.text().await?;
            debug!(%status, bytes = body.len(), "response body read");
            Ok(body)
        })
    }
}
