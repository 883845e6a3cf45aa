// Domain clients
//
// Each client builds its endpoint URL, copies the caller's payload into the
// body untouched, attaches the header set its service family expects, and
// hands the request to the dispatcher. None of them look at the response.

pub mod info_hub_query;
pub mod user_group_sync;
pub mod user_manage;
pub mod work_item;

pub use info_hub_query::InfoHubQueryClient;
pub use user_group_sync::UserGroupSyncClient;
pub use user_manage::UserManageClient;
pub use work_item::WorkItemClient;
