use anyhow::{Context, Result};
use house_price_rs::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` wins over `server.logs.level`; only plain level names are accepted.
fn resolve_log_level(configured: &str) -> Result<String> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());
    level.parse::<LevelFilter>().with_context(|| {
        format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })?;
    Ok(level)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is not up yet, so startup problems go to stderr
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = match resolve_log_level(&config.server.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level)?)
        .json()
        .init();

    info!("Starting house price server with log level: {}", log_level);
    info!("Serving artifacts from {}", config.artifacts.dir.display());

    server::run(config)
        .await
        .context("House price server failed")?;

    Ok(())
}
