//! Pure matching of DNS answers against watch patterns.
//!
//! A pattern may name any point of a CNAME chain: the A record owner, the
//! name the client asked for, or any alias in between. Matching therefore
//! tests the A record name and every alias that (transitively) points at it.

use crate::dns_record::AnswerRecord;
use crate::watch_pattern::{PatternSet, WatchPattern};
use std::collections::{HashMap, HashSet, VecDeque};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub pattern: WatchPattern,
    pub address: Ipv4Addr,
    pub ttl: u32,
}

impl MatchResult {
    pub fn new(pattern: WatchPattern, address: Ipv4Addr, ttl: u32) -> Self {
        Self {
            pattern,
            address,
            ttl,
        }
    }
}

/// Strips the root label dot and lowercases, so `WWW.Example.com.` compares
/// equal to `www.example.com`.
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Returns every `(pattern, address)` satisfied by `answer`.
///
/// Each pattern yields at most one result per A record. Alias cycles end the
/// walk silently.
pub fn match_answer(answer: &[AnswerRecord], patterns: &PatternSet) -> Vec<MatchResult> {
    let mut results = Vec::new();
    if patterns.is_empty() {
        return results;
    }

    let aliases = reverse_alias_index(answer);

    for record in answer {
        let AnswerRecord::A { name, ttl, address } = record else {
            continue;
        };

        let chain = alias_chain(&aliases, normalize_name(name));

        for pattern in patterns.iter() {
            if chain.iter().any(|candidate| pattern.matches(candidate)) {
                results.push(MatchResult::new(pattern.clone(), *address, *ttl));
            }
        }
    }

    results
}

/// `target -> [alias, ...]` for every CNAME in the answer.
fn reverse_alias_index(answer: &[AnswerRecord]) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for record in answer {
        match record {
            AnswerRecord::Cname { name, target, .. } => {
                index
                    .entry(normalize_name(target))
                    .or_default()
                    .push(normalize_name(name));
            }
            AnswerRecord::A { .. } | AnswerRecord::Other { .. } => {}
        }
    }
    index
}

/// The A record name followed by every alias reachable backwards from it.
fn alias_chain(aliases: &HashMap<String, Vec<String>>, start: String) -> Vec<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut chain = Vec::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(next) = aliases.get(&current) {
            queue.extend(next.iter().filter(|n| !visited.contains(n.as_str())).cloned());
        }
        chain.push(current);
    }

    chain
}
