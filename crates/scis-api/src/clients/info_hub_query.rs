// InfoHub business object query
//
// Unlike every other call in this crate, a query surfaces transport
// failures as `Err` so its caller can tell "the network broke" apart from
// a service response that happens to contain an error.

use std::sync::Arc;

use tracing::debug;

use crate::auth::{ClientKeys, X_TENANT_ID, apply_client_keys};
use crate::dispatch::{Dispatcher, HttpExecutor};
use crate::error::Error;
use crate::request::PreparedRequest;

#[derive(Clone)]
pub struct InfoHubQueryClient {
    dispatcher: Dispatcher,
}

impl InfoHubQueryClient {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            dispatcher: Dispatcher::new(executor),
        }
    }

    /// `POST {endpoint}` with the raw query as body.
    pub fn query_request(
        endpoint: &str,
        query: &str,
        keys: &ClientKeys,
        tenant_id: &str,
    ) -> PreparedRequest {
        let mut request = PreparedRequest::post(endpoint).with_json_body(query);
        apply_client_keys(&mut request, keys);
        request.set_header(X_TENANT_ID, tenant_id);
        request
    }

    /// Run a business object query and return the result text.
    pub async fn execute_query(
        &self,
        endpoint: &str,
        query: &str,
        keys: &ClientKeys,
        tenant_id: &str,
    ) -> Result<String, Error> {
        debug!(payload = query, "executing InfoHub query");
        let request = Self::query_request(endpoint, query, keys, tenant_id);
        self.dispatcher.dispatch_propagating_errors(request).await
    }
}
