// scis-api: authenticated REST clients for Sterling supply chain services
//
// One shared `Transport`, two basic-auth header strategies (plain and
// plain + CSRF token), CSRF token acquisition, and a dispatcher that turns
// every response into opaque text. The domain clients under `clients` are
// thin URL/payload wrappers over that core.

pub mod auth;
pub mod clients;
pub mod csrf;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod transport;

pub use auth::{ClientKeys, Credentials, CsrfConvention};
pub use clients::{InfoHubQueryClient, UserGroupSyncClient, UserManageClient, WorkItemClient};
pub use csrf::CsrfTokenService;
pub use dispatch::{Dispatcher, HttpExecutor, error_envelope};
pub use error::Error;
pub use request::{PreparedRequest, RequestBody};
pub use transport::{Transport, TransportConfig};
