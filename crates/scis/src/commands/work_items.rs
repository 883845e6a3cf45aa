//! `scis work-items create|update`

use scis_api::WorkItemClient;
use scis_config::Endpoint;

use crate::cli::{GlobalOpts, WorkItemsArgs, WorkItemsCommand};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(
    session: &Session,
    args: WorkItemsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let url = session.endpoint(Endpoint::WorkItem)?;
    let keys = session.client_keys()?;
    let client = WorkItemClient::new(session.executor.clone());

    let body = match args.command {
        WorkItemsCommand::Create { payload } => {
            let item = util::read_payload(&payload)?;
            client.create_work_item(url, &keys, &item).await
        }
        WorkItemsCommand::Update { id, payload } => {
            let partial = util::read_payload(&payload)?;
            client.update_work_item(url, &id, &keys, &partial).await
        }
    };

    util::emit(&body, global);
    Ok(())
}
