use arc_swap::ArcSwap;
use dnslist_domain::PatternSet;
use std::sync::Arc;

/// Publishes the current `PatternSet`. Readers get a whole snapshot; the
/// watcher replaces it in one swap.
pub struct PatternStore {
    current: ArcSwap<PatternSet>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::with_patterns(PatternSet::empty())
    }

    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(patterns),
        }
    }

    pub fn snapshot(&self) -> Arc<PatternSet> {
        self.current.load_full()
    }

    pub fn replace(&self, patterns: PatternSet) {
        self.current.store(Arc::new(patterns));
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}
