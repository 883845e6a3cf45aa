// User and group synchronization endpoints
//
// Pushes user/group arrays into the process server's directory and polls
// the resulting sync job. Calls carry basic auth plus a `bpmcsrftoken`
// header.

use std::sync::Arc;

use tracing::debug;

use crate::auth::{Credentials, CsrfConvention, apply_basic_auth_with_token};
use crate::csrf::CsrfTokenService;
use crate::dispatch::{Dispatcher, HttpExecutor};
use crate::request::PreparedRequest;

const CONVENTION: CsrfConvention = CsrfConvention::BpmStyle;

#[derive(Clone)]
pub struct UserGroupSyncClient {
    dispatcher: Dispatcher,
    tokens: CsrfTokenService,
}

impl UserGroupSyncClient {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&executor)),
            tokens: CsrfTokenService::new(executor),
        }
    }

    /// Acquire a BPM-style CSRF token. See [`CsrfTokenService::acquire_token`].
    pub async fn csrf_token(
        &self,
        token_url: &str,
        credentials: &Credentials,
        requested_lifetime_secs: u32,
    ) -> String {
        self.tokens
            .acquire_token(token_url, credentials, requested_lifetime_secs)
            .await
    }

    /// `POST {url}?add_to_db=true&sync_user_state=true`
    pub fn sync_users_request(
        url: &str,
        credentials: &Credentials,
        token: &str,
        users: &str,
    ) -> PreparedRequest {
        let endpoint = format!("{url}?add_to_db=true&sync_user_state=true");
        let mut request = PreparedRequest::post(endpoint).with_json_body(users);
        apply_basic_auth_with_token(&mut request, credentials, token, CONVENTION);
        request
    }

    /// `POST {url}?add_users_to_db=true&sync_group_state=true`
    pub fn sync_groups_request(
        url: &str,
        credentials: &Credentials,
        token: &str,
        groups: &str,
    ) -> PreparedRequest {
        let endpoint = format!("{url}?add_users_to_db=true&sync_group_state=true");
        let mut request = PreparedRequest::post(endpoint).with_json_body(groups);
        apply_basic_auth_with_token(&mut request, credentials, token, CONVENTION);
        request
    }

    /// `GET {url}`, typically the status URL returned by a sync submission.
    pub fn sync_result_request(url: &str, credentials: &Credentials, token: &str) -> PreparedRequest {
        let mut request = PreparedRequest::get(url);
        apply_basic_auth_with_token(&mut request, credentials, token, CONVENTION);
        request
    }

    pub async fn sync_users(
        &self,
        url: &str,
        credentials: &Credentials,
        token: &str,
        users: &str,
    ) -> String {
        debug!(payload = users, "submitting user sync");
        let request = Self::sync_users_request(url, credentials, token, users);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }

    pub async fn sync_groups(
        &self,
        url: &str,
        credentials: &Credentials,
        token: &str,
        groups: &str,
    ) -> String {
        debug!(payload = groups, "submitting group sync");
        let request = Self::sync_groups_request(url, credentials, token, groups);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }

    pub async fn sync_result(&self, url: &str, credentials: &Credentials, token: &str) -> String {
        debug!(endpoint = url, "polling sync result");
        let request = Self::sync_result_request(url, credentials, token);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }
}
