//! Config subcommand handlers.

use scis_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

/// Copy of `cfg` with every plaintext secret masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        for secret in [&mut profile.password, &mut profile.client_secret] {
            if secret.is_some() {
                *secret = Some(REDACTED.into());
            }
        }
    }
    cfg
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(scis_config::config_path);
            output::print_output(&path.display().to_string());
        }
        ConfigCommand::Show => {
            let cfg = scis_config::load_config(global.config.as_deref())?;
            let text = toml::to_string_pretty(&redacted(&cfg)).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?;
            output::print_output(text.trim_end());
        }
    }
    Ok(())
}
