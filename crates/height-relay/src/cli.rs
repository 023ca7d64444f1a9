use std::path::PathBuf;

use clap::Parser;

/// height-relay — stores the current block height and relays chain-data
/// queries to an upstream provider.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, default_value = "8080", env = "PORT")]
    pub port: u16,

    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1", env = "BIND")]
    pub bind: String,

    /// Height store connection URI: `memory://`, `file://<path>`, or a bare path.
    #[arg(long, default_value = "file://data/block-height.json", env = "DATABASE_URL")]
    pub database_url: String,

    /// Base URL of the upstream chain-data provider.
    #[arg(long, default_value = "https://blockchain.info", env = "PROVIDER_URL")]
    pub provider_url: String,

    /// Timeout for each upstream request, in seconds.
    #[arg(
        long,
        default_value = "30",
        env = "PROVIDER_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub provider_timeout_secs: u64,

    /// Directory of static assets served ahead of the API routes.
    #[arg(long, default_value = "public", env = "PUBLIC_DIR")]
    pub public_dir: PathBuf,
}
