#![allow(dead_code)]
use dnslist_domain::AnswerRecord;
use std::net::Ipv4Addr;

/// Builds answer sections the way an upstream resolver would return them:
/// fully qualified names with the trailing root dot.
pub struct AnswerBuilder {
    records: Vec<AnswerRecord>,
}

impl AnswerBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn a(mut self, name: &str, ttl: u32, address: &str) -> Self {
        let address: Ipv4Addr = address.parse().unwrap();
        self.records.push(AnswerRecord::a(name, ttl, address));
        self
    }

    pub fn cname(mut self, name: &str, target: &str) -> Self {
        self.records.push(AnswerRecord::cname(name, 300, target));
        self
    }

    pub fn other(mut self, name: &str) -> Self {
        self.records.push(AnswerRecord::Other {
            name: name.to_string(),
        });
        self
    }

    pub fn build(self) -> Vec<AnswerRecord> {
        self.records
    }
}
