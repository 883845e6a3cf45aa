//! `scis query`
//!
//! The only command whose transport failures become a non-zero exit
//! instead of an error envelope on stdout.

use scis_api::InfoHubQueryClient;
use scis_config::Endpoint;

use crate::cli::{GlobalOpts, QueryArgs};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: QueryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let url = session.endpoint(Endpoint::Query)?;
    let keys = session.client_keys()?;
    let tenant = match args.tenant {
        Some(tenant) => tenant,
        None => scis_config::resolve_tenant_id(&session.profile, &session.profile_name)?,
    };
    let query = util::read_payload(&args.payload)?;

    let body = InfoHubQueryClient::new(session.executor.clone())
        .execute_query(url, &query, &keys, &tenant)
        .await
        .map_err(|e| CliError::request(url, e))?;

    util::emit(&body, global);
    Ok(())
}
