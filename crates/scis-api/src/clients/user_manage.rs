// User management endpoints
//
// Provisioning calls against the platform's user API. All three calls carry
// basic auth plus an `IBM-CSRF-TOKEN` header.

use std::sync::Arc;

use tracing::debug;

use crate::auth::{Credentials, CsrfConvention, apply_basic_auth_with_token};
use crate::csrf::CsrfTokenService;
use crate::dispatch::{Dispatcher, HttpExecutor};
use crate::request::PreparedRequest;

const CONVENTION: CsrfConvention = CsrfConvention::IbmStyle;

#[derive(Clone)]
pub struct UserManageClient {
    dispatcher: Dispatcher,
    tokens: CsrfTokenService,
}

impl UserManageClient {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&executor)),
            tokens: CsrfTokenService::new(executor),
        }
    }

    /// Acquire an IBM-style CSRF token. See [`CsrfTokenService::acquire_token`].
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

    /// `POST {url}?skip_email=true&activate_automatically=true`
    pub fn add_user_request(
        url: &str,
        credentials: &Credentials,
        token: &str,
        user_info: &str,
    ) -> PreparedRequest {
        let endpoint = format!("{url}?skip_email=true&activate_automatically=true");
        let mut request = PreparedRequest::post(endpoint).with_json_body(user_info);
        apply_basic_auth_with_token(&mut request, credentials, token, CONVENTION);
        request
    }

    /// `PUT {url}/{user_id}?update_mode=merge`
    pub fn update_user_request(
        url: &str,
        credentials: &Credentials,
        token: &str,
        user_id: &str,
        user_info: &str,
    ) -> PreparedRequest {
        let endpoint = format!("{url}/{user_id}?update_mode=merge");
        let mut request = PreparedRequest::put(endpoint).with_json_body(user_info);
        apply_basic_auth_with_token(&mut request, credentials, token, CONVENTION);
        request
    }

    /// `GET {url}?optional_parts=details,groups&search_term={user_id}`
    ///
    /// `user_id` is inserted as given; only the transport's own URL
    /// normalization applies.
    pub fn find_user_request(
        url: &str,
        credentials: &Credentials,
        token: &str,
        user_id: &str,
    ) -> PreparedRequest {
        let endpoint = format!("{url}?optional_parts=details,groups&search_term={user_id}");
        let mut request = PreparedRequest::get(endpoint);
        apply_basic_auth_with_token(&mut request, credentials, token, CONVENTION);
        request
    }

    /// Create a user, skipping the welcome email and activating immediately.
    pub async fn add_user(
        &self,
        url: &str,
        credentials: &Credentials,
        token: &str,
        user_info: &str,
    ) -> String {
        debug!(payload = user_info, "adding user");
        let request = Self::add_user_request(url, credentials, token, user_info);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }

    /// Merge `user_info` into an existing user record.
    pub async fn update_user(
        &self,
        url: &str,
        credentials: &Credentials,
        token: &str,
        user_id: &str,
        user_info: &str,
    ) -> String {
        debug!(user_id, payload = user_info, "updating user");
        let request = Self::update_user_request(url, credentials, token, user_id, user_info);
        self.dispatcher.dispatch_swallowing_errors(request).await
    }

    /// Look a user up by id, including details and group membership.
    pub async fn find_user(
        &self,
        url: &str,
        credentials: &Credentials,
        token: &str,
        user_id: &str,
    ) -> String {
        let request = Self::find_user_request(url, credentials, token, user_id);
        debug!(endpoint = %request.url, "looking up user");
        self.dispatcher.dispatch_swallowing_errors(request).await
    }
}
