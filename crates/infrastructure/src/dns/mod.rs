pub mod forwarding;
pub mod server;
pub mod transport;
pub mod wire_response;

pub use forwarding::{ForwardedResponse, UpstreamForwarder};
pub use server::DnsProxyHandler;
