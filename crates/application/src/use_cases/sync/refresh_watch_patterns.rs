use crate::ports::RouterApi;
use crate::services::PatternStore;
use dnslist_domain::{normalize_name, DomainError, PatternSet, WatchPattern};
use hickory_proto::rr::Name;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const WILDCARD_PREFIX: &str = "*.";

/// Use case: rebuild the watched patterns from the router's firewall rules.
pub struct RefreshWatchPatternsUseCase {
    router: Arc<dyn RouterApi>,
    store: Arc<PatternStore>,
}

impl RefreshWatchPatternsUseCase {
    pub fn new(router: Arc<dyn RouterApi>, store: Arc<PatternStore>) -> Self {
        Self { router, store }
    }

    /// Installs the fresh set and returns its size. On error the current set
    /// is left untouched.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<usize, DomainError> {
        let lists = self.router.list_rule_address_lists().await?;
        let patterns = build_pattern_set(&lists);
        let count = patterns.len();

        if *self.store.snapshot() != patterns {
            info!(patterns = count, "Watch patterns updated");
        }
        self.store.replace(patterns);

        Ok(count)
    }
}

/// Address-list names that do not normalize to a domain name are skipped.
pub fn build_pattern_set(lists: &[String]) -> PatternSet {
    lists
        .iter()
        .filter_map(|list| match to_watch_pattern(list) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                debug!(list = %list, error = %e, "Ignoring address-list");
                None
            }
        })
        .collect()
}

fn to_watch_pattern(list: &str) -> Result<WatchPattern, DomainError> {
    let (prefix, body) = match list.strip_prefix(WILDCARD_PREFIX) {
        Some(rest) => (WILDCARD_PREFIX, rest),
        None => ("", list),
    };

    let ascii = Name::from_utf8(body)
        .map_err(|e| DomainError::InvalidDomainName(format!("{list}: {e}")))?
        .to_ascii();

    WatchPattern::with_list(list, &format!("{prefix}{}", normalize_name(&ascii)))
}
