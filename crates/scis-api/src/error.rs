use thiserror::Error;

/// Top-level error type for the `scis-api` crate.
///
/// The `Display` text of a variant is what ends up inside an error envelope,
/// so transport and body-read failures render the underlying message as-is.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, body decode).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The target URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value is not representable on the wire.
    #[error("invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    /// The response arrived but its body could not be read.
    #[error("{message}")]
    ResponseBody { message: String },

    /// TLS context could not be established.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Configuration ───────────────────────────────────────────────
    /// Transport settings violate an invariant (e.g. a zero timeout).
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// Rejected by the strict credential constructor.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl Error {
    /// Returns `true` if the request timed out (connect, read, or overall).
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the remote host could not be reached.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn response_body_error_displays_bare_message() {
        let err = Error::ResponseBody {
            message: "Error occurred".into(),
        };
        assert_eq!(err.to_string(), "Error occurred");
        assert!(!err.is_timeout());
        assert!(!err.is_connect());
    }

    #[test]
    fn invalid_url_names_the_url() {
        let source = url::Url::parse("testUrl").unwrap_err();
        let err = Error::InvalidUrl {
            url: "testUrl".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid URL 'testUrl'"));
    }
}
