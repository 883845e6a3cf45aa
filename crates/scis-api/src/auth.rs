// Authentication header construction
//
// Two remote service families speak basic auth plus a CSRF token, but name
// the token header differently. Work-item and query services use a client
// id / secret pair instead. Every helper writes straight into the request.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;
use crate::request::PreparedRequest;

pub const AUTHORIZATION: &str = "Authorization";
pub const IBM_CSRF_TOKEN: &str = "IBM-CSRF-TOKEN";
pub const BPM_CSRF_TOKEN: &str = "bpmcsrftoken";

pub const X_IBM_CLIENT_ID: &str = "X-IBM-Client-Id";
pub const X_IBM_CLIENT_SECRET: &str = "X-IBM-Client-Secret";
pub const X_TENANT_ID: &str = "X-Tenant-Id";

/// Which CSRF header a remote service family expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfConvention {
    /// User management services: `IBM-CSRF-TOKEN`.
    IbmStyle,
    /// Process server user/group sync services: `bpmcsrftoken`.
    BpmStyle,
}

impl CsrfConvention {
    pub fn header_name(self) -> &'static str {
        match self {
            Self::IbmStyle => IBM_CSRF_TOKEN,
            Self::BpmStyle => BPM_CSRF_TOKEN,
        }
    }
}

/// Functional-user credentials, supplied per call and never stored by a client.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Accepts any input, including empty strings.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Like [`new`](Self::new), but refuses an empty username or password.
    pub fn validated(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let creds = Self::new(username, password);
        if creds.username.is_empty() {
            return Err(Error::InvalidCredentials("username is empty".into()));
        }
        if creds.password.expose_secret().is_empty() {
            return Err(Error::InvalidCredentials("password is empty".into()));
        }
        Ok(creds)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn basic_auth_header(&self) -> String {
        basic_auth_header(&self.username, self.password.expose_secret())
    }
}

/// `"Basic " + base64(username ":" password)`.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{username}:{password}").as_bytes());
    format!("Basic {encoded}")
}

/// Set the `Authorization` header on `request`.
pub fn apply_basic_auth(request: &mut PreparedRequest, credentials: &Credentials) {
    request.set_header(AUTHORIZATION, credentials.basic_auth_header());
}

/// Set `Authorization` plus the CSRF header named by `convention`.
pub fn apply_basic_auth_with_token(
    request: &mut PreparedRequest,
    credentials: &Credentials,
    token: &str,
    convention: CsrfConvention,
) {
    apply_basic_auth(request, credentials);
    request.set_header(convention.header_name(), token);
}

/// Platform client id / secret pair for the work-item and query services.
#[derive(Debug, Clone)]
pub struct ClientKeys {
    client_id: String,
    client_secret: SecretString,
}

impl ClientKeys {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Set `X-IBM-Client-Id` and `X-IBM-Client-Secret` on `request`.
pub fn apply_client_keys(request: &mut PreparedRequest, keys: &ClientKeys) {
    request.set_header(X_IBM_CLIENT_ID, keys.client_id.as_str());
    request.set_header(X_IBM_CLIENT_SECRET, keys.client_secret.expose_secret());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn decode(header: &str) -> String {
        let encoded = header.strip_prefix("Basic ").unwrap();
        String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
    }

    #[test]
    fn basic_header_round_trips_through_base64() {
        for (user, pass) in [
            ("testUsername", "testPassword"),
            ("user", "pa:ss"),
            ("ünïcode", "пароль"),
            ("", ""),
        ] {
            let header = basic_auth_header(user, pass);
            assert!(header.starts_with("Basic "));
            assert_eq!(decode(&header), format!("{user}:{pass}"));
        }
    }

    #[test]
    fn basic_header_known_vector() {
        assert_eq!(basic_auth_header("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn empty_credentials_still_produce_a_header() {
        let creds = Credentials::new("", "");
        assert_eq!(creds.basic_auth_header(), "Basic Og==");
    }

    #[test]
    fn validated_rejects_empty_fields() {
        assert!(matches!(
            Credentials::validated("", "secret"),
            Err(Error::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::validated("user", ""),
            Err(Error::InvalidCredentials(_))
        ));
        assert_eq!(
            Credentials::validated("user", "secret").unwrap().username(),
            "user"
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials::new("user", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn ibm_and_bpm_conventions_use_different_headers() {
        let creds = Credentials::new("user", "pass");

        let mut ibm = PreparedRequest::get("https://host/users");
        apply_basic_auth_with_token(&mut ibm, &creds, "tok", CsrfConvention::IbmStyle);
        assert_eq!(ibm.header("IBM-CSRF-TOKEN"), Some("tok"));
        assert_eq!(ibm.header("bpmcsrftoken"), None);
        assert_eq!(ibm.header("authorization"), Some("Basic dXNlcjpwYXNz"));

        let mut bpm = PreparedRequest::get("https://host/sync");
        apply_basic_auth_with_token(&mut bpm, &creds, "tok", CsrfConvention::BpmStyle);
        assert_eq!(bpm.header("bpmcsrftoken"), Some("tok"));
        assert_eq!(bpm.header("IBM-CSRF-TOKEN"), None);
    }

    #[test]
    fn client_keys_set_id_and_secret() {
        let mut req = PreparedRequest::post("https://host/workitems");
        apply_client_keys(&mut req, &ClientKeys::new("id-1", "secret-1"));
        assert_eq!(req.header(X_IBM_CLIENT_ID), Some("id-1"));
        assert_eq!(req.header(X_IBM_CLIENT_SECRET), Some("secret-1"));
        assert_eq!(req.header(AUTHORIZATION), None);
    }
}
