pub mod address_list_sync_hook;
pub mod reconcile_address_list;
pub mod refresh_watch_patterns;

pub use address_list_sync_hook::AddressListSyncHook;
pub use reconcile_address_list::{ReconcileAddressListUseCase, RetryPolicy};
pub use refresh_watch_patterns::RefreshWatchPatternsUseCase;
