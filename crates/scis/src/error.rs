//! CLI error types with miette diagnostics.
//!
//! Maps `ConfigError` and `scis_api::Error` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use scis_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Requests ─────────────────────────────────────────────────────
    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(scis::timeout),
        help("Raise defaults.request_timeout_ms or the profile's request_timeout_ms.")
    )]
    Timeout {
        url: String,
        #[source]
        source: scis_api::Error,
    },

    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(scis::connection_failed),
        help("Check that the service is reachable and the URL in your profile is correct.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: scis_api::Error,
    },

    #[error("Request to {url} failed")]
    #[diagnostic(code(scis::request_failed))]
    Request {
        url: String,
        #[source]
        source: scis_api::Error,
    },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(scis::no_credentials),
        help(
            "Add it to the profile, point {what}_env at an environment variable,\n\
             or store it in the system keyring under service 'scis'."
        )
    )]
    NoCredentials { profile: String, what: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(scis::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Run: scis config path  to locate the config file"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Profile '{profile}' has no {endpoint}")]
    #[diagnostic(
        code(scis::missing_endpoint),
        help("Set {endpoint} under [profiles.{profile}] in the config file.")
    )]
    MissingEndpoint { profile: String, endpoint: String },

    #[error(transparent)]
    #[diagnostic(code(scis::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(scis::validation))]
    Validation { field: String, reason: String },

    #[error("No request body given")]
    #[diagnostic(
        code(scis::missing_payload),
        help("Pass --data '<json>' or --data-file <path> (use '-' for stdin).")
    )]
    MissingPayload,

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile, what } => Self::NoCredentials { profile, what },
            ConfigError::MissingEndpoint { profile, endpoint } => {
                Self::MissingEndpoint { profile, endpoint }
            }
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}

impl CliError {
    /// Classify a failed request against `url`.
    pub fn request(url: &str, source: scis_api::Error) -> Self {
        let url = url.to_owned();
        if source.is_timeout() {
            Self::Timeout { url, source }
        } else if source.is_connect() {
            Self::ConnectionFailed { url, source }
        } else {
            Self::Request { url, source }
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::MissingEndpoint { .. } | Self::Validation { .. } | Self::MissingPayload => {
                exit_code::USAGE
            }
            Self::Request { .. } | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}
