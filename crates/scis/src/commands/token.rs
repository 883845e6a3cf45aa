//! `scis token ibm|bpm`

use scis_api::{UserGroupSyncClient, UserManageClient};
use scis_config::Endpoint;

use crate::cli::{GlobalOpts, TokenArgs, TokenFamily};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: TokenArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let credentials = session.credentials()?;
    let lifetime = args.lifetime.unwrap_or(session.token_lifetime_secs);

    let body = match args.family {
        TokenFamily::Ibm => {
            let url = session.endpoint(Endpoint::IbmCsrf)?;
            UserManageClient::new(session.executor.clone())
                .csrf_token(url, &credentials, lifetime)
                .await
        }
        TokenFamily::Bpm => {
            let url = session.endpoint(Endpoint::BpmCsrf)?;
            UserGroupSyncClient::new(session.executor.clone())
                .csrf_token(url, &credentials, lifetime)
                .await
        }
    };

    util::emit(&body, global);
    Ok(())
}
