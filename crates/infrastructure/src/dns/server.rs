use super::forwarding::UpstreamForwarder;
use super::wire_response;
use dnslist_application::services::HookRunner;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Forwards one client datagram and holds the reply until the hooks are done.
pub struct DnsProxyHandler {
    forwarder: Arc<UpstreamForwarder>,
    hooks: Arc<HookRunner>,
}

impl DnsProxyHandler {
    pub fn new(forwarder: Arc<UpstreamForwarder>, hooks: Arc<HookRunner>) -> Self {
        Self { forwarder, hooks }
    }

    /// Bytes to send back to `client`, or `None` when the datagram is dropped.
    ///
    /// The upstream reply is returned unmodified. When every upstream fails
    /// the client gets a SERVFAIL instead.
    pub async fn handle_datagram(&self, query: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        if !wire_response::is_query(query) {
            debug!(client = %client, len = query.len(), "Dropping non-query datagram");
            return None;
        }

        match self.forwarder.forward(query).await {
            Ok(response) => {
                if !response.answers.is_empty() {
                    let outcome = self.hooks.dispatch(Arc::from(response.answers)).await;
                    debug!(
                        client = %client,
                        server = %response.server,
                        effective_hooks = outcome.effective_hooks,
                        timed_out = outcome.timed_out,
                        "Hooks completed"
                    );
                }
                Some(response.bytes)
            }
            Err(e) => {
                warn!(client = %client, error = %e, "All forwarders failed, answering SERVFAIL");
                wire_response::build_servfail(query)
            }
        }
    }
}
