use async_trait::async_trait;
use dnslist_domain::AnswerRecord;
use tokio_util::sync::CancellationToken;

/// Observer invoked with every upstream answer before it is released to the
/// requesting client.
#[async_trait]
pub trait ResolutionHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns true when processing changed external state, which makes the
    /// runner hold the answer for the propagation delay.
    async fn process(&self, answer: &[AnswerRecord]) -> bool;

    /// Long-running companion task, started once at startup.
    async fn run(&self, shutdown: CancellationToken) {
        shutdown.cancelled().await;
    }
}
