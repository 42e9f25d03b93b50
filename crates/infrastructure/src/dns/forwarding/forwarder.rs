use super::answer_parser::parse_answer;
use crate::dns::transport::{DnsTransport, UdpTransport};
use dnslist_domain::{AnswerRecord, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct ForwardedResponse {
    /// Upstream reply exactly as received.
    pub bytes: Vec<u8>,
    pub answers: Vec<AnswerRecord>,
    pub server: SocketAddr,
}

/// Sends a query to the configured upstreams in order until one answers.
pub struct UpstreamForwarder {
    upstreams: Vec<Arc<dyn DnsTransport>>,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(upstreams: Vec<Arc<dyn DnsTransport>>, timeout: Duration) -> Self {
        Self { upstreams, timeout }
    }

    pub fn udp(servers: &[SocketAddr], timeout: Duration) -> Self {
        let upstreams = servers
            .iter()
            .map(|addr| Arc::new(UdpTransport::new(*addr)) as Arc<dyn DnsTransport>)
            .collect();
        Self::new(upstreams, timeout)
    }

    pub fn upstream_count(&self) -> usize {
        self.upstreams.len()
    }

    /// A reply counts as successful when it parses and carries the query's
    /// ID; its rcode is passed through untouched.
    pub async fn forward(&self, query: &[u8]) -> Result<ForwardedResponse, DomainError> {
        for upstream in &self.upstreams {
            let server = upstream.server_addr();

            let response = match upstream.send(query, self.timeout).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(server = %server, error = %e, "Upstream exchange failed");
                    continue;
                }
            };

            if response.bytes.get(..2) != query.get(..2) {
                warn!(server = %server, "Upstream reply ID mismatch");
                continue;
            }

            match parse_answer(&response.bytes) {
                Ok(answers) => {
                    debug!(server = %server, answers = answers.len(), "Upstream answered");
                    return Ok(ForwardedResponse {
                        bytes: response.bytes,
                        answers,
                        server,
                    });
                }
                Err(e) => {
                    warn!(server = %server, error = %e, "Discarding malformed upstream reply");
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }
}
