pub mod duration;
pub mod rest;

pub use duration::parse_routeros_duration;
pub use rest::RouterOsRestClient;
