use dnslist_application::ports::ResolutionHook;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Starts the background task of every resolution hook.
pub struct HookDaemonJob {
    hooks: Vec<Arc<dyn ResolutionHook>>,
    shutdown: CancellationToken,
}

impl HookDaemonJob {
    pub fn new(hooks: Vec<Arc<dyn ResolutionHook>>) -> Self {
        Self {
            hooks,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(hooks = self.hooks.len(), "Starting hook daemons");

        for hook in &self.hooks {
            let hook = Arc::clone(hook);
            let shutdown = self.shutdown.clone();
            tokio::spawn(async move {
                let name = hook.name();
                hook.run(shutdown).await;
                info!(hook = name, "Hook daemon stopped");
            });
        }
    }
}
