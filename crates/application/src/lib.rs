//! dnslist application layer: ports, synchronization use cases and the
//! post-resolution hook machinery.
pub mod ports;
pub mod services;
pub mod use_cases;
