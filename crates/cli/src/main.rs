use clap::Parser;
use nns_dns_domain::CliOverrides;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "nns-dns")]
#[command(version)]
#[command(about = "NNS DNS - answers DNS queries from the Neo Name Service contract")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Neo RPC endpoint, e.g. http://localhost:30333
    #[arg(short = 'e', long)]
    endpoint: Option<String>,

    /// NNS contract hash, or "-" to look it up by its well-known id
    #[arg(long)]
    contract: Option<String>,

    /// NNS domain substituted for the served DNS zone
    #[arg(long)]
    nns_domain: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        endpoint: cli.endpoint.clone(),
        contract: cli.contract.clone(),
        nns_domain: cli.nns_domain.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting NNS DNS Server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config = cli
            .config
            .clone()
            .or_else(nns_dns_domain::Config::get_config_path)
            .as_deref()
            .unwrap_or("<defaults>"),
        endpoint = %config.rpc.endpoint,
        dns_domain = %config.mapping.dns_domain,
        nns_domain = %config.mapping.nns_domain,
        "Configuration loaded"
    );

    let client = Arc::new(bootstrap::build_rpc_client(
        &config.rpc.endpoint,
        Duration::from_secs(config.rpc.timeout_secs),
    )?);
    let contract_hash = bootstrap::resolve_contract(&client, &config.rpc).await?;

    let dns_services = di::DnsServices::new(&config, client, contract_hash);

    let dns_addr = socket_address(&config.server.bind_address, config.server.dns_port);
    let workers = config.server.workers;

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_services.handler, workers) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

fn socket_address(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
