use crate::ports::ResolutionHook;
use dnslist_domain::AnswerRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Hooks that reported a change of external state.
    pub effective_hooks: usize,
    /// The deadline elapsed before every hook finished.
    pub timed_out: bool,
}

impl DispatchOutcome {
    pub fn had_effect(&self) -> bool {
        self.effective_hooks > 0
    }
}

/// Runs every registered hook for an upstream answer and holds the caller
/// until all of them are done.
///
/// The caller must not release the answer to the client before `dispatch`
/// returns: when a hook changed router state, `dispatch` additionally waits
/// the propagation delay so dependent firewall rules are active by the time
/// the client connects.
pub struct HookRunner {
    hooks: Vec<Arc<dyn ResolutionHook>>,
    propagation_delay: Duration,
    timeout: Option<Duration>,
}

impl HookRunner {
    pub fn new(hooks: Vec<Arc<dyn ResolutionHook>>, propagation_delay: Duration) -> Self {
        Self {
            hooks,
            propagation_delay,
            timeout: None,
        }
    }

    /// Bounds the wait for hooks. Past the deadline the answer is released and
    /// unfinished hooks keep running detached.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn hooks(&self) -> &[Arc<dyn ResolutionHook>] {
        &self.hooks
    }

    pub async fn dispatch(&self, answer: Arc<[AnswerRecord]>) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if self.hooks.is_empty() {
            return outcome;
        }

        let mut tasks = JoinSet::new();
        for hook in &self.hooks {
            let hook = Arc::clone(hook);
            let answer = Arc::clone(&answer);
            tasks.spawn(async move {
                let effective = hook.process(&answer).await;
                (hook.name(), effective)
            });
        }

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);

        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, tasks.join_next()).await
                {
                    Ok(next) => next,
                    Err(_) => {
                        outcome.timed_out = true;
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            let Some(joined) = next else {
                break;
            };

            match joined {
                Ok((name, true)) => {
                    debug!(hook = name, "Resolution hook reported an effect");
                    outcome.effective_hooks += 1;
                }
                Ok((_, false)) => {}
                Err(e) => {
                    error!(error = %e, "Resolution hook task failed");
                }
            }
        }

        if outcome.timed_out {
            warn!(
                pending = tasks.len(),
                "Resolution hooks exceeded their deadline, releasing answer"
            );
            tasks.detach_all();
        }

        if outcome.had_effect() && !self.propagation_delay.is_zero() {
            tokio::time::sleep(self.propagation_delay).await;
        }

        outcome
    }
}
