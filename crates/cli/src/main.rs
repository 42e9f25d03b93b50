use clap::Parser;
use dnslist_domain::CliOverrides;
use dnslist_jobs::{ExpiryPurgeJob, HookDaemonJob, JobRunner};
use std::net::{IpAddr, SocketAddr};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "dnslist")]
#[command(version)]
#[command(about = "DNS forwarder that keeps RouterOS address-lists in sync with resolved domains")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS listen port
    #[arg(short = 'p', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream forwarder (ip or ip:port), repeatable, tried in order
    #[arg(short = 'f', long = "forwarder", value_name = "ADDR")]
    forwarders: Vec<String>,

    /// RouterOS REST base URL, e.g. https://192.168.88.1
    #[arg(long)]
    router_address: Option<String>,

    #[arg(long)]
    router_username: Option<String>,

    #[arg(long)]
    router_password: Option<String>,

    /// Skip TLS certificate verification for the router
    #[arg(long)]
    insecure_tls: bool,

    /// Seconds added to every DNS TTL
    #[arg(long)]
    grace_ttl: Option<u32>,

    /// Delay before releasing an answer after a router update, in milliseconds
    #[arg(long)]
    propagation_delay_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dns_port: self.dns_port,
            bind_address: self.bind.clone(),
            forwarders: (!self.forwarders.is_empty()).then(|| self.forwarders.clone()),
            router_address: self.router_address.clone(),
            router_username: self.router_username.clone(),
            router_password: self.router_password.clone(),
            insecure_tls: self.insecure_tls,
            grace_ttl_secs: self.grace_ttl,
            propagation_delay_ms: self.propagation_delay_ms,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match bootstrap::load_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dnslist: {e:#}");
            std::process::exit(1);
        }
    };

    bootstrap::init_logging(&config.logging);

    info!("Starting dnslist v{}", env!("CARGO_PKG_VERSION"));
    info!(
        dns_port = config.server.dns_port,
        forwarders = config.upstream.forwarders.len(),
        router = %config.router.address,
        hook_timeout_ms = config.sync.hook_timeout_ms,
        "Configuration loaded"
    );

    let services = di::SyncServices::new(&config)?;
    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_hook_daemon(HookDaemonJob::new(services.hooks.clone()))
        .with_expiry_purge(
            ExpiryPurgeJob::new(services.cache.clone())
                .with_interval(config.sync.purge_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);

    let server = tokio::spawn(server::start_dns_server(
        dns_addr,
        services.handler.clone(),
        shutdown.clone(),
    ));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        result = server => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = %e, "DNS server error"),
                Err(e) => error!(error = %e, "DNS server task failed"),
            }
        }
    }

    shutdown.cancel();
    info!("Server shutdown complete");
    Ok(())
}
