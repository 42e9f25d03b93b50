//! Plain UDP exchange (RFC 1035 §4.2.1). Messages are sent as-is, no framing.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnslist_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {e}")))?;

        // Connected sockets only accept datagrams from the upstream itself.
        socket.connect(self.server_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to connect to {}: {e}", self.server_addr))
        })?;

        let exchange = async {
            let bytes_sent = socket.send(message_bytes).await?;
            debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            let bytes_received = socket.recv(&mut recv_buf).await?;
            recv_buf.truncate(bytes_received);
            Ok::<_, std::io::Error>(recv_buf)
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| {
                warn!(server = %self.server_addr, "UDP query timed out");
                DomainError::QueryTimeout
            })?
            .map_err(|e| {
                DomainError::IoError(format!("UDP exchange with {} failed: {e}", self.server_addr))
            })?;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes,
            server: self.server_addr,
        })
    }

    fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }
}
