//! `scis sync users|groups|result`

use scis_api::UserGroupSyncClient;
use scis_config::Endpoint;

use crate::cli::{GlobalOpts, SyncArgs, SyncCommand};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: SyncArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let credentials = session.credentials()?;
    let client = UserGroupSyncClient::new(session.executor.clone());

    let body = match args.command {
        SyncCommand::Users { token, payload } => {
            let url = session.endpoint(Endpoint::UsersSync)?;
            let users = util::read_payload(&payload)?;
            client.sync_users(url, &credentials, &token.token, &users).await
        }
        SyncCommand::Groups { token, payload } => {
            let url = session.endpoint(Endpoint::GroupsSync)?;
            let groups = util::read_payload(&payload)?;
            client
                .sync_groups(url, &credentials, &token.token, &groups)
                .await
        }
        SyncCommand::Result { token, url } => {
            let url = match url {
                Some(url) => url,
                None => session.endpoint(Endpoint::UsersSync)?.to_owned(),
            };
            client.sync_result(&url, &credentials, &token.token).await
        }
    };

    util::emit(&body, global);
    Ok(())
}
