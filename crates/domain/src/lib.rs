//! dnslist domain layer
pub mod address_list;
pub mod config;
pub mod dns_match;
pub mod dns_record;
pub mod errors;
pub mod watch_pattern;

pub use address_list::AddressListEntry;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_match::{match_answer, normalize_name, MatchResult};
pub use dns_record::AnswerRecord;
pub use errors::DomainError;
pub use watch_pattern::{PatternKind, PatternSet, WatchPattern};
