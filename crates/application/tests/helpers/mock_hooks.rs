use async_trait::async_trait;
use dnslist_application::ports::ResolutionHook;
use dnslist_domain::AnswerRecord;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Hook with a scripted effect, latency and optional panic.
pub struct MockHook {
    effect: bool,
    latency: Duration,
    panics: bool,
    calls: Arc<AtomicU64>,
    finished: Arc<AtomicU64>,
    last_answer_len: Arc<AtomicUsize>,
}

impl MockHook {
    pub fn new(effect: bool) -> Self {
        Self {
            effect,
            latency: Duration::ZERO,
            panics: false,
            calls: Arc::new(AtomicU64::new(0)),
            finished: Arc::new(AtomicU64::new(0)),
            last_answer_len: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn panicking() -> Self {
        let mut hook = Self::new(true);
        hook.panics = true;
        hook
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> u64 {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn last_answer_len(&self) -> usize {
        self.last_answer_len.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolutionHook for MockHook {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn process(&self, answer: &[AnswerRecord]) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_answer_len.store(answer.len(), Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.panics {
            panic!("mock hook failure");
        }

        self.finished.fetch_add(1, Ordering::SeqCst);
        self.effect
    }
}
