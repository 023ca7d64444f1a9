mod cli;
mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

use height_relay_core::provider::{HeightProvider, HttpProvider};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    // Connect to the store before binding anything; a bad URI or an
    // unreadable document aborts startup.
    let store = height_relay_core::store::open_store(&args.database_url)
        .await
        .wrap_err_with(|| format!("while connecting to height store `{}`", args.database_url))?;
    tracing::info!(uri = %args.database_url, "connected to height store");

    let provider: Arc<dyn HeightProvider> = Arc::new(
        HttpProvider::new(
            &args.provider_url,
            Duration::from_secs(args.provider_timeout_secs),
        )
        .wrap_err("build upstream provider client")?,
    );

    let config = server::ServerConfig {
        bind: args.bind.clone(),
        port: args.port,
        public_dir: args.public_dir.clone(),
    };
    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0 and reachable from the network");
    }

    let running = server::start(&config, server::AppState { store, provider }).await?;
    tracing::debug!(state = ?running.state(), "server started");
    println!();
    println!("  height-relay is running:");
    println!("    URL:       http://{}", running.local_addr());
    println!();

    tokio::signal::ctrl_c()
        .await
        .wrap_err("listen for shutdown signal")?;
    tracing::info!("shutdown signal received");

    let states = running.subscribe();
    running.shutdown().await?;
    tracing::info!(state = ?*states.borrow(), "server stopped");
    Ok(())
}
