//! Adapters: DNS forwarding over UDP and the RouterOS REST client.
pub mod dns;
pub mod router;
