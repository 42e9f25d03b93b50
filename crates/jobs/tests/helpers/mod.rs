#![allow(dead_code)]

use async_trait::async_trait;
use dnslist_application::ports::ResolutionHook;
use dnslist_domain::AnswerRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Hook whose background task only counts starts and stops.
#[derive(Clone, Default)]
pub struct MockDaemonHook {
    started: Arc<AtomicU64>,
    stopped: Arc<AtomicU64>,
}

impl MockDaemonHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> u64 {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolutionHook for MockDaemonHook {
    fn name(&self) -> &'static str {
        "mock-daemon"
    }

    async fn process(&self, _answer: &[AnswerRecord]) -> bool {
        false
    }

    async fn run(&self, shutdown: CancellationToken) {
        self.started.fetch_add(1, Ordering::SeqCst);
        shutdown.cancelled().await;
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}
