mod routes;

use aggregator::{Aggregator, AggregatorConfig, RESULT_CAP};
use clap::Parser;
use dotenv::dotenv;
use job_sources::{config::DEFAULT_CACHE_TTL, SourcesConfig};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
enum Error {
    #[error("Server IO failed, error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: '{0}'")]
    Config(String),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address the HTTP server listens on
    #[clap(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Seconds a provider response is reused, 0 turns the cache off
    #[clap(long, default_value_t = DEFAULT_CACHE_TTL.as_secs())]
    cache_ttl: u64,

    /// Most offers returned by one search
    #[clap(long, default_value_t = RESULT_CAP)]
    result_cap: usize,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    if args.result_cap == 0 {
        return Err(Error::Config("--result-cap must be at least 1".to_owned()));
    }

    let sources = SourcesConfig::from_env().with_cache_ttl(Duration::from_secs(args.cache_ttl));
    let enabled = sources.enabled();
    if enabled.is_empty() {
        log::warn!("No provider credentials configured, every search will use the fallback offers");
    } else {
        log::info!("Enabled providers: {:?}", enabled);
    }
    let aggregator = Aggregator::from_config(
        &sources,
        AggregatorConfig {
            result_cap: args.result_cap,
            ..Default::default()
        },
    );

    let app = routes::build_router(Arc::new(aggregator));
    let listener = TcpListener::bind(args.bind).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
