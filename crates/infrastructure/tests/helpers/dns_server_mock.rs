use super::builders::push_name;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Answer record served by the mock. `owner: None` points at the question name.
#[derive(Debug, Clone)]
pub enum MockRecord {
    A {
        owner: Option<String>,
        ttl: u32,
        address: Ipv4Addr,
    },
    Cname {
        owner: Option<String>,
        ttl: u32,
        target: String,
    },
}

impl MockRecord {
    pub fn a(ttl: u32, address: [u8; 4]) -> Self {
        Self::A {
            owner: None,
            ttl,
            address: Ipv4Addr::from(address),
        }
    }

    pub fn a_for(owner: &str, ttl: u32, address: [u8; 4]) -> Self {
        Self::A {
            owner: Some(owner.to_string()),
            ttl,
            address: Ipv4Addr::from(address),
        }
    }

    pub fn cname(ttl: u32, target: &str) -> Self {
        Self::Cname {
            owner: None,
            ttl,
            target: target.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Answer(Vec<MockRecord>),
    /// Never replies.
    Silent,
    /// Replies with bytes that do not parse as DNS.
    Garbage,
    /// Replies with a valid message carrying a different ID.
    WrongId,
}

/// Loopback UDP server answering every query the same way.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicU64>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicU64::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = queries.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], &behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_response(query: &[u8], behavior: &MockBehavior) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let records = match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::Garbage => return Some(vec![query[0], query[1], 0xFF]),
            MockBehavior::WrongId => Vec::new(),
            MockBehavior::Answer(records) => records.clone(),
        };

        let mut response = Vec::with_capacity(512);

        if matches!(behavior, MockBehavior::WrongId) {
            response.extend_from_slice(&[query[0] ^ 0xFF, query[1]]);
        } else {
            response.extend_from_slice(&query[0..2]);
        }
        response.push(0x81);
        response.push(0x80);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&(records.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..]);

        for record in &records {
            match record {
                MockRecord::A {
                    owner,
                    ttl,
                    address,
                } => {
                    push_owner(&mut response, owner.as_deref());
                    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
                    response.extend_from_slice(&ttl.to_be_bytes());
                    response.extend_from_slice(&[0x00, 0x04]);
                    response.extend_from_slice(&address.octets());
                }
                MockRecord::Cname { owner, ttl, target } => {
                    push_owner(&mut response, owner.as_deref());
                    response.extend_from_slice(&[0x00, 0x05, 0x00, 0x01]);
                    response.extend_from_slice(&ttl.to_be_bytes());
                    let mut rdata = Vec::new();
                    push_name(&mut rdata, target);
                    response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
                    response.extend_from_slice(&rdata);
                }
            }
        }

        Some(response)
    }
}

fn push_owner(buf: &mut Vec<u8>, owner: Option<&str>) {
    match owner {
        Some(name) => push_name(buf, name),
        None => buf.extend_from_slice(&[0xC0, 0x0C]),
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
