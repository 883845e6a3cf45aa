//! Command dispatch: bridges CLI args -> domain clients -> output.

pub mod config_cmd;
pub mod query;
pub mod sync;
pub mod token;
pub mod users;
pub mod util;
pub mod work_items;

use std::sync::Arc;

use scis_api::{HttpExecutor, Transport};
use scis_config::{Config, Endpoint, Profile};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Everything a service command needs: the active profile and one shared transport.
pub struct Session {
    pub profile_name: String,
    pub profile: Profile,
    pub token_lifetime_secs: u32,
    pub executor: Arc<dyn HttpExecutor>,
}

impl Session {
    /// Resolve the active profile from `config` and build the transport for it.
    pub fn open(config: &Config, global: &GlobalOpts) -> Result<Self, CliError> {
        let profile_name = config.active_profile_name(global.profile.as_deref());
        let profile = config.profile(&profile_name)?.clone();
        let transport_config = config.transport_config(&profile)?;
        let transport = Transport::new(transport_config).map_err(|e| CliError::Validation {
            field: "transport".into(),
            reason: e.to_string(),
        })?;

        tracing::debug!(profile = %profile_name, "session opened");
        Ok(Self {
            token_lifetime_secs: config.token_lifetime(&profile),
            profile_name,
            profile,
            executor: Arc::new(transport),
        })
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> Result<&str, CliError> {
        Ok(self.profile.endpoint(endpoint, &self.profile_name)?)
    }

    pub fn credentials(&self) -> Result<scis_api::Credentials, CliError> {
        Ok(scis_config::resolve_credentials(&self.profile, &self.profile_name)?)
    }

    pub fn client_keys(&self) -> Result<scis_api::ClientKeys, CliError> {
        Ok(scis_config::resolve_client_keys(&self.profile, &self.profile_name)?)
    }
}

/// Dispatch a service command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Token(args) => token::handle(session, args, global).await,
        Command::Users(args) => users::handle(session, args, global).await,
        Command::Sync(args) => sync::handle(session, args, global).await,
        Command::WorkItems(args) => work_items::handle(session, args, global).await,
        Command::Query(args) => query::handle(session, args, global).await,
        // Handled in main before a session exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
