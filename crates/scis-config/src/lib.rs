//! Shared configuration for the `scis` CLI.
//!
//! TOML profiles (one per environment), secret resolution (env + keyring +
//! plaintext), and translation into `scis_api` transport and credential
//! types. The API crate never reads configuration itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scis_api::csrf::DEFAULT_TOKEN_LIFETIME_SECS;
use scis_api::transport::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TLS_VERSION,
};
use scis_api::{ClientKeys, Credentials, TransportConfig};

const KEYRING_SERVICE: &str = "scis";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {what} configured for profile '{profile}'")]
    NoCredentials { profile: String, what: String },

    #[error("profile '{profile}' has no {endpoint} configured")]
    MissingEndpoint { profile: String, endpoint: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    /// Transport and token defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named environment profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_tls_version")]
    pub tls_version: String,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            tls_version: default_tls_version(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            token_lifetime_secs: default_token_lifetime(),
        }
    }
}

fn default_tls_version() -> String {
    DEFAULT_TLS_VERSION.into()
}
fn default_connect_timeout_ms() -> u64 {
    millis(DEFAULT_CONNECT_TIMEOUT)
}
fn default_request_timeout_ms() -> u64 {
    millis(DEFAULT_REQUEST_TIMEOUT)
}
fn default_read_timeout_ms() -> u64 {
    millis(DEFAULT_READ_TIMEOUT)
}
fn default_token_lifetime() -> u32 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// One deployment's endpoints and identities.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// User management API base, e.g. `https://host/usermgmt/v1/users`.
    pub user_manage_url: Option<String>,

    /// Token endpoint for the user management family (`IBM-CSRF-TOKEN`).
    pub ibm_csrf_url: Option<String>,

    /// Token endpoint for the process server family (`bpmcsrftoken`).
    pub bpm_csrf_url: Option<String>,

    pub users_sync_url: Option<String>,
    pub groups_sync_url: Option<String>,
    pub work_item_url: Option<String>,
    pub query_url: Option<String>,

    /// Functional user for basic auth.
    pub username: Option<String>,

    /// Password (plaintext; prefer keyring or `password_env`).
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    pub client_id: Option<String>,

    /// Client secret (plaintext; prefer keyring or `client_secret_env`).
    pub client_secret: Option<String>,

    /// Environment variable holding the client secret.
    pub client_secret_env: Option<String>,

    /// Tenant for InfoHub queries; defaults to `client_id`.
    pub tenant_id: Option<String>,

    /// Override `defaults.request_timeout_ms`.
    pub request_timeout_ms: Option<u64>,

    /// Override `defaults.token_lifetime_secs`.
    pub token_lifetime_secs: Option<u32>,
}

/// The endpoints a profile can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    UserManage,
    IbmCsrf,
    BpmCsrf,
    UsersSync,
    GroupsSync,
    WorkItem,
    Query,
}

impl Endpoint {
    /// The TOML key for this endpoint.
    pub fn key(self) -> &'static str {
        match self {
            Self::UserManage => "user_manage_url",
            Self::IbmCsrf => "ibm_csrf_url",
            Self::BpmCsrf => "bpm_csrf_url",
            Self::UsersSync => "users_sync_url",
            Self::GroupsSync => "groups_sync_url",
            Self::WorkItem => "work_item_url",
            Self::Query => "query_url",
        }
    }
}

impl Profile {
    fn endpoint_value(&self, endpoint: Endpoint) -> Option<&str> {
        let value = match endpoint {
            Endpoint::UserManage => &self.user_manage_url,
            Endpoint::IbmCsrf => &self.ibm_csrf_url,
            Endpoint::BpmCsrf => &self.bpm_csrf_url,
            Endpoint::UsersSync => &self.users_sync_url,
            Endpoint::GroupsSync => &self.groups_sync_url,
            Endpoint::WorkItem => &self.work_item_url,
            Endpoint::Query => &self.query_url,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// The configured URL for `endpoint`, with any trailing `/` removed.
    pub fn endpoint(&self, endpoint: Endpoint, profile_name: &str) -> Result<&str, ConfigError> {
        self.endpoint_value(endpoint)
            .map(|url| url.trim_end_matches('/'))
            .ok_or_else(|| ConfigError::MissingEndpoint {
                profile: profile_name.into(),
                endpoint: endpoint.key().into(),
            })
    }
}

impl Config {
    /// Pick the profile: explicit name, then `default_profile`, then `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }

    /// Token lifetime for `profile`, falling back to the global default.
    pub fn token_lifetime(&self, profile: &Profile) -> u32 {
        profile
            .token_lifetime_secs
            .unwrap_or(self.defaults.token_lifetime_secs)
    }

    /// Build the transport settings, applying the profile's timeout override.
    pub fn transport_config(&self, profile: &Profile) -> Result<TransportConfig, ConfigError> {
        let d = &self.defaults;
        let request_ms = profile.request_timeout_ms.unwrap_or(d.request_timeout_ms);

        for (field, value) in [
            ("connect_timeout_ms", d.connect_timeout_ms),
            ("request_timeout_ms", request_ms),
            ("read_timeout_ms", d.read_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be a positive number of milliseconds".into(),
                });
            }
        }

        Ok(TransportConfig {
            tls_version: d.tls_version.clone(),
            connect_timeout: Duration::from_millis(d.connect_timeout_ms),
            request_timeout: Duration::from_millis(request_ms),
            read_timeout: Duration::from_millis(d.read_timeout_ms),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "scis", "scis").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("scis");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` (or the platform default) + `SCIS_` env vars.
///
/// Nested keys use `__`, e.g. `SCIS_DEFAULTS__TLS_VERSION=TLSv1.3`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SCIS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Secret resolution ───────────────────────────────────────────────

/// Env var named by the profile, then the system keyring, then plaintext.
fn resolve_secret(
    env_name: Option<&str>,
    keyring_key: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return Some(SecretString::from(val));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, keyring_key) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    plaintext.map(|p| SecretString::from(p.to_owned()))
}

/// Functional-user credentials for the basic-auth service families.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    let no_creds = |what: &str| ConfigError::NoCredentials {
        profile: profile_name.into(),
        what: what.into(),
    };

    let username = profile.username.clone().ok_or_else(|| no_creds("username"))?;
    let password = resolve_secret(
        profile.password_env.as_deref(),
        &format!("{profile_name}/password"),
        profile.password.as_deref(),
    )
    .ok_or_else(|| no_creds("password"))?;

    Ok(Credentials::new(username, password.expose_secret()))
}

/// Client id / secret for the work-item and query services.
pub fn resolve_client_keys(profile: &Profile, profile_name: &str) -> Result<ClientKeys, ConfigError> {
    let no_creds = |what: &str| ConfigError::NoCredentials {
        profile: profile_name.into(),
        what: what.into(),
    };

    let client_id = profile.client_id.clone().ok_or_else(|| no_creds("client_id"))?;
    let secret = resolve_secret(
        profile.client_secret_env.as_deref(),
        &format!("{profile_name}/client-secret"),
        profile.client_secret.as_deref(),
    )
    .ok_or_else(|| no_creds("client_secret"))?;

    Ok(ClientKeys::new(client_id, secret.expose_secret()))
}

/// Tenant id for queries: explicit `tenant_id`, else the client id.
pub fn resolve_tenant_id(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .tenant_id
        .clone()
        .or_else(|| profile.client_id.clone())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
            what: "tenant_id".into(),
        })
}
