pub mod sync;

pub use sync::{
    AddressListSyncHook, ReconcileAddressListUseCase, RefreshWatchPatternsUseCase, RetryPolicy,
};
