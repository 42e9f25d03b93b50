pub mod errors;
pub mod logging;
pub mod root;
pub mod router;
pub mod server;
pub mod sync;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use router::RouterConfig;
pub use server::ServerConfig;
pub use sync::SyncConfig;
pub use upstream::UpstreamConfig;
