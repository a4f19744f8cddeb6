//! OpenFX server binary.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openfx_server::latency::LatencyConfig;
use openfx_server::{api, AppState, ServerConfig};

/// OpenFX transfer demo server
#[derive(Parser, Debug)]
#[command(name = "openfx-server")]
#[command(about = "Simulated foreign-exchange transfer service")]
struct Args {
    /// Listen address
    #[arg(long)]
    listen_addr: Option<String>,

    /// Listen port
    #[arg(long)]
    listen_port: Option<u16>,

    /// Probability that a payment is rejected by the simulated rail
    #[arg(long)]
    pay_failure_rate: Option<f64>,

    /// Probability that a created transaction is doomed to fail
    #[arg(long)]
    transaction_failure_rate: Option<f64>,

    /// Hold each request for a random span, mimicking network latency
    #[arg(long)]
    simulate_latency: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(addr) = args.listen_addr {
        config.listen_addr = addr;
    }
    if let Some(port) = args.listen_port {
        config.listen_port = port;
    }
    if let Some(rate) = args.pay_failure_rate {
        config.pay_failure_rate = rate;
    }
    if let Some(rate) = args.transaction_failure_rate {
        config.transaction_failure_rate = rate;
    }
    if args.simulate_latency {
        config.latency = Some(LatencyConfig::default());
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate().map_err(anyhow::Error::msg)?;

    info!("Starting OpenFX server");
    info!("Pay failure rate: {}", config.pay_failure_rate);
    info!(
        "Transaction failure rate: {}",
        config.transaction_failure_rate
    );
    info!("Simulated latency: {}", config.latency.is_some());

    let state = Arc::new(AppState::from_config(&config));
    let app = api::app(state);

    let listener =
        tokio::net::TcpListener::bind((config.listen_addr.as_str(), config.listen_port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
