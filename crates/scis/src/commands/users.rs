//! `scis users add|update|find`

use scis_api::UserManageClient;
use scis_config::Endpoint;

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let url = session.endpoint(Endpoint::UserManage)?;
    let credentials = session.credentials()?;
    let client = UserManageClient::new(session.executor.clone());

    let body = match args.command {
        UsersCommand::Add { token, payload } => {
            let user = util::read_payload(&payload)?;
            client.add_user(url, &credentials, &token.token, &user).await
        }
        UsersCommand::Update { id, token, payload } => {
            let user = util::read_payload(&payload)?;
            client
                .update_user(url, &credentials, &token.token, &id, &user)
                .await
        }
        UsersCommand::Find { id, token } => {
            client.find_user(url, &credentials, &token.token, &id).await
        }
    };

    util::emit(&body, global);
    Ok(())
}
