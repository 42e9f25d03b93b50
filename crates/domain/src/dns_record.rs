use std::net::Ipv4Addr;

/// A single resource record taken from the answer section of an upstream
/// response. Only the variants the matcher understands carry data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRecord {
    A {
        name: String,
        ttl: u32,
        address: Ipv4Addr,
    },
    Cname {
        name: String,
        ttl: u32,
        target: String,
    },
    Other {
        name: String,
    },
}

impl AnswerRecord {
    pub fn a(name: impl Into<String>, ttl: u32, address: Ipv4Addr) -> Self {
        Self::A {
            name: name.into(),
            ttl,
            address,
        }
    }

    pub fn cname(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self::Cname {
            name: name.into(),
            ttl,
            target: target.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::A { name, .. } | Self::Cname { name, .. } | Self::Other { name } => name,
        }
    }
}
