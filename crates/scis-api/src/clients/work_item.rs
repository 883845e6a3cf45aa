// Work item endpoints
//
// Creates and updates work item definitions. Authenticates with a platform
// client id / secret pair, not basic auth, and sets the content type header
// explicitly.

use std::sync::Arc;

use tracing::debug;

use crate::auth::{ClientKeys, apply_client_keys};
use crate::dispatch::{Dispatcher, HttpExecutor};
use crate::request::{CONTENT_TYPE, CONTENT_TYPE_JSON, PreparedRequest};

#[derive(Clone)]
pub struct WorkItemClient {
    dispatcher: Dispatcher,
}

impl WorkItemClient {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            dispatcher: Dispatcher::new(executor),
        }
    }

    fn with_headers(mut request: PreparedRequest, keys: &ClientKeys, payload: &str) -> PreparedRequest {
        apply_client_keys(&mut request, keys);
        request.set_header(CONTENT_TYPE, CONTENT_TYPE_JSON);
        request.with_json_body(payload)
    }

    /// `POST {url}`
    pub fn create_request(url: &str, keys: &ClientKeys, work_item: &str) -> PreparedRequest {
        Self::with_headers(PreparedRequest::post(url), keys, work_item)
    }

    /// `PUT {url}/{work_item_id}`
    pub fn update_request(
        url: &str,
        work_item_id: &str,
        keys: &ClientKeys,
        partial: &str,
    ) -> PreparedRequest {
        Self::with_headers(PreparedRequest::put(format!("{url}/{work_item_id}")), keys, partial)
    }

    /// Create a work item. The response normally carries the new item's id.
    pub async fn create_work_item(&self, url: &str, keys: &ClientKeys, work_item: &str) -> String {
        debug!(payload = work_item, "creating work item");
        let request = Self::create_request(url, keys, work_item);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }

    /// Apply a partial update to an existing work item.
    pub async fn update_work_item(
        &self,
        url: &str,
        work_item_id: &str,
        keys: &ClientKeys,
        partial: &str,
    ) -> String {
        debug!(work_item_id, payload = partial, "updating work item");
        let request = Self::update_request(url, work_item_id, keys, partial);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::Method;

    use super::*;
    use crate::dispatch::testing::StubExecutor;

    fn keys() -> ClientKeys {
        ClientKeys::new("testClientId", "testClientSecret")
    }

    #[test]
    fn create_sets_client_keys_and_content_type_without_basic_auth() {
        let req = WorkItemClient::create_request("https://h/workitems", &keys(), "{\"a\":1}");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url, "https://h/workitems");
        assert_eq!(req.header("X-IBM-Client-Id"), Some("testClientId"));
        assert_eq!(req.header("X-IBM-Client-Secret"), Some("testClientSecret"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.body_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn update_appends_id() {
        let req = WorkItemClient::update_request("https://h/workitems", "wi-9", &keys(), "{}");
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.url, "https://h/workitems/wi-9");
    }

    #[tokio::test]
    async fn create_returns_body_and_update_swallows_failure() {
        let ok = WorkItemClient::new(StubExecutor::body(r#"{"id":"wi-1"}"#));
        assert_eq!(ok.create_work_item("https://h/w", &keys(), "{}").await, r#"{"id":"wi-1"}"#);

        let failing = WorkItemClient::new(StubExecutor::failing("Error occurred"));
        assert_eq!(
            failing.update_work_item("https://h/w", "wi-1", &keys(), "{}").await,
            r#"{"error":"Error occurred"}"#
        );
    }
}
