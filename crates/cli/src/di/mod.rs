mod sync;

pub use sync::SyncServices;
