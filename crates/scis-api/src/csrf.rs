// CSRF token acquisition
//
// `POST <token_url>` with basic auth and `{"requested_lifetime": n}`. The
// response is handed back untouched; pulling the token value out of it is
// the caller's job. Nothing is cached and nothing is retried.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::auth::{Credentials, apply_basic_auth};
use crate::dispatch::{Dispatcher, HttpExecutor};
use crate::request::PreparedRequest;

/// Lifetime the workflow platform requests when it has no preference.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u32 = 7200;

#[derive(Clone)]
pub struct CsrfTokenService {
    dispatcher: Dispatcher,
}

impl CsrfTokenService {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            dispatcher: Dispatcher::new(executor),
        }
    }

    pub fn token_request(
        token_url: &str,
        credentials: &Credentials,
        requested_lifetime_secs: u32,
    ) -> PreparedRequest {
        let body = json!({ "requested_lifetime": requested_lifetime_secs }).to_string();
        let mut request = PreparedRequest::post(token_url).with_json_body(body);
        apply_basic_auth(&mut request, credentials);
        request
    }

    /// Request a fresh token. Returns the service response or an error envelope.
    pub async fn acquire_token(
        &self,
        token_url: &str,
        credentials: &Credentials,
        requested_lifetime_secs: u32,
    ) -> String {
        debug!(
            user = credentials.username(),
            requested_lifetime_secs, "requesting CSRF token"
        );
        let request = Self::token_request(token_url, credentials, requested_lifetime_secs);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }
}
