use super::ReconcileAddressListUseCase;
use crate::ports::ResolutionHook;
use crate::services::{PatternStore, RuleWatcher};
use async_trait::async_trait;
use dnslist_domain::{match_answer, AnswerRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Pushes every watched address in an answer to the router's address-lists.
pub struct AddressListSyncHook {
    patterns: Arc<PatternStore>,
    reconcile: Arc<ReconcileAddressListUseCase>,
    grace_ttl_secs: u32,
    watcher: Option<Arc<RuleWatcher>>,
}

impl AddressListSyncHook {
    pub fn new(patterns: Arc<PatternStore>, reconcile: Arc<ReconcileAddressListUseCase>) -> Self {
        Self {
            patterns,
            reconcile,
            grace_ttl_secs: 0,
            watcher: None,
        }
    }

    /// Seconds added to every answer TTL before it becomes an entry timeout.
    pub fn with_grace_ttl(mut self, grace_ttl_secs: u32) -> Self {
        self.grace_ttl_secs = grace_ttl_secs;
        self
    }

    pub fn with_watcher(mut self, watcher: Arc<RuleWatcher>) -> Self {
        self.watcher = Some(watcher);
        self
    }
}

#[async_trait]
impl ResolutionHook for AddressListSyncHook {
    fn name(&self) -> &'static str {
        "address-list-sync"
    }

    async fn process(&self, answer: &[AnswerRecord]) -> bool {
        let patterns = self.patterns.snapshot();
        let matches = match_answer(answer, &patterns);

        let mut effective = false;
        for m in matches {
            let ttl = m.ttl.saturating_add(self.grace_ttl_secs);
            let list = m.pattern.shared_list();
            if self.reconcile.execute(&list, m.address, ttl).await {
                effective = true;
            }
        }
        effective
    }

    async fn run(&self, shutdown: CancellationToken) {
        match &self.watcher {
            Some(watcher) => watcher.run(shutdown).await,
            None => shutdown.cancelled().await,
        }
    }
}
