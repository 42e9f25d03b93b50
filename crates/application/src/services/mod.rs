mod expiry_cache;
mod hook_runner;
mod pattern_store;
mod rule_watcher;

pub use expiry_cache::{CacheKey, ExpiryCache};
pub use hook_runner::{DispatchOutcome, HookRunner};
pub use pattern_store::PatternStore;
pub use rule_watcher::RuleWatcher;
