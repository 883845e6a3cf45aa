// Request dispatch and error normalization
//
// Every call site chooses one of two contracts: swallow failures into an
// `{"error": ...}` envelope, or hand the error back to its caller. Status
// codes are never consulted; a 500 body is returned exactly like a 200 body.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error};

use crate::error::Error;
use crate::request::PreparedRequest;

/// Boxed future returned by [`HttpExecutor::execute`].
pub type ExecuteFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// Executes a prepared request and yields the full response body as text.
///
/// [`Transport`](crate::transport::Transport) is the network-backed
/// implementation; tests substitute a stub.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: PreparedRequest) -> ExecuteFuture<'_>;
}

/// Build the single-field error envelope `{"error":"<message>"}`.
pub fn error_envelope(message: &str) -> String {
    json!({ "error": message }).to_string()
}

/// Runs prepared requests against a shared executor.
#[derive(Clone)]
pub struct Dispatcher {
    executor: Arc<dyn HttpExecutor>,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self { executor }
    }

    /// Return the response body, or an error envelope if anything failed.
    pub async fn dispatch_swallowing_errors(&self, request: PreparedRequest) -> String {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!("{} {}", method, url);

        match self.executor.execute(request).await {
            Ok(body) => {
                debug!(body = %body, "response received");
                body
            }
            Err(e) => {
                error!(%method, %url, "{e}");
                error_envelope(&e.to_string())
            }
        }
    }

    /// Return the response body, or the failure itself after logging it.
    pub async fn dispatch_propagating_errors(
        &self,
        request: PreparedRequest,
    ) -> Result<String, Error> {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!("{} {}", method, url);

        self.executor.execute(request).await.inspect_err(|e| {
            error!(%method, %url, "{e}");
        })
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::testing::StubExecutor;
    use super::*;

    #[test]
    fn envelope_is_compact_single_field_json() {
        assert_eq!(error_envelope("Error occurred"), r#"{"error":"Error occurred"}"#);
    }

    #[test]
    fn envelope_escapes_quotes() {
        let text = error_envelope(r#"bad "thing" happened"#);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["error"], r#"bad "thing" happened"#);
    }

    #[tokio::test]
    async fn swallowing_returns_body_verbatim() {
        let stub = StubExecutor::body("not json at all");
        let dispatcher = Dispatcher::new(stub.clone());

        let out = dispatcher
            .dispatch_swallowing_errors(PreparedRequest::get("https://host/x"))
            .await;
        assert_eq!(out, "not json at all");
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn swallowing_converts_failure_into_envelope() {
        let dispatcher = Dispatcher::new(StubExecutor::failing("Error occurred"));

        let out = dispatcher
            .dispatch_swallowing_errors(PreparedRequest::get("https://host/x"))
            .await;
        assert_eq!(out, r#"{"error":"Error occurred"}"#);
    }

    #[tokio::test]
    async fn propagating_returns_the_error_unchanged() {
        let dispatcher = Dispatcher::new(StubExecutor::failing("Error occurred"));

        let err = dispatcher
            .dispatch_propagating_errors(PreparedRequest::get("https://host/x"))
            .await
            .unwrap_err();
        assert!(matches!(&err, Error::ResponseBody { message } if message == "Error occurred"));
    }

    #[tokio::test]
    async fn propagating_passes_error_shaped_bodies_through() {
        let dispatcher = Dispatcher::new(StubExecutor::body(r#"{"error":"errorMessage"}"#));

        let out = dispatcher
            .dispatch_propagating_errors(PreparedRequest::get("https://host/x"))
            .await
            .unwrap();
        assert_eq!(out, r#"{"error":"errorMessage"}"#);
    }
}
