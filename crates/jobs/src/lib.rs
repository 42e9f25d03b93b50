pub mod expiry_purge;
pub mod hook_daemon;
pub mod runner;

pub use expiry_purge::ExpiryPurgeJob;
pub use hook_daemon::HookDaemonJob;
pub use runner::JobRunner;
