mod types;

pub use types::*;

use crate::Result;
use std::{env, path::PathBuf};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;

    if let Ok(dir) = env::var("ARTIFACTS_DIR") {
        config.artifacts.dir = PathBuf::from(dir);
    }

    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty file deserializes to `null`, which serde_yaml rejects for a struct.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    if config.server.cors.allowed_origins.is_empty() {
        return Err(crate::Error::config(
            "server.cors.allowed_origins must not be empty",
        ));
    }
    Ok(config)
}
