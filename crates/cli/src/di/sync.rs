use dnslist_application::ports::{ResolutionHook, RouterApi};
use dnslist_application::services::{ExpiryCache, HookRunner, PatternStore, RuleWatcher};
use dnslist_application::use_cases::{
    AddressListSyncHook, ReconcileAddressListUseCase, RefreshWatchPatternsUseCase, RetryPolicy,
};
use dnslist_domain::Config;
use dnslist_infrastructure::dns::{DnsProxyHandler, UpstreamForwarder};
use dnslist_infrastructure::router::RouterOsRestClient;
use std::sync::Arc;
use tracing::info;

pub struct SyncServices {
    pub handler: Arc<DnsProxyHandler>,
    pub hooks: Vec<Arc<dyn ResolutionHook>>,
    pub cache: Arc<ExpiryCache>,
}

impl SyncServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let router: Arc<dyn RouterApi> = Arc::new(RouterOsRestClient::new(&config.router));
        let patterns = Arc::new(PatternStore::new());
        let cache = Arc::new(ExpiryCache::new());

        let refresh = Arc::new(RefreshWatchPatternsUseCase::new(
            router.clone(),
            patterns.clone(),
        ));
        let watcher = Arc::new(
            RuleWatcher::new(refresh, router.clone())
                .with_interval(config.sync.refresh_interval())
                .with_dns_cache_flush(config.router.flush_dns_cache_on_start),
        );

        let reconcile = Arc::new(
            ReconcileAddressListUseCase::new(router, cache.clone()).with_retry(RetryPolicy {
                attempts: config.sync.retry_attempts,
                delay: config.sync.retry_delay(),
            }),
        );

        let sync_hook = AddressListSyncHook::new(patterns, reconcile)
            .with_grace_ttl(config.sync.grace_ttl_secs)
            .with_watcher(watcher);
        let hooks: Vec<Arc<dyn ResolutionHook>> = vec![Arc::new(sync_hook)];

        let runner = HookRunner::new(hooks.clone(), config.sync.propagation_delay())
            .with_timeout(config.sync.hook_timeout());

        let forwarders = config.upstream.forwarder_addrs()?;
        info!(forwarders = ?forwarders, "Upstream forwarders configured");
        let forwarder = UpstreamForwarder::udp(&forwarders, config.upstream.query_timeout());

        let handler = DnsProxyHandler::new(Arc::new(forwarder), Arc::new(runner));

        Ok(Self {
            handler: Arc::new(handler),
            hooks,
            cache,
        })
    }
}
