use serde::Deserialize;

/// Runtime configuration, loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Maximum accepted document text size, in bytes.
    pub max_text_bytes: usize,
    /// TTL for cached extraction results, in seconds.
    pub cache_ttl_secs: u64,
    /// Maximum number of cached extraction results.
    pub cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            max_text_bytes: std::env::var("MAX_TEXT_BYTES")
                .unwrap_or_else(|_| "2097152".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_TEXT_BYTES must be a valid byte count"))
                .and_then(|n: usize| {
                    if n == 0 {
                        anyhow::bail!("MAX_TEXT_BYTES cannot be zero");
                    }
                    Ok(n)
                })?,
            cache_ttl_secs: std::env::var("EXTRACTION_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("EXTRACTION_CACHE_TTL_SECS must be a valid number"))?,
            cache_capacity: std::env::var("EXTRACTION_CACHE_CAPACITY")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("EXTRACTION_CACHE_CAPACITY must be a valid number"))?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Max text size: {} bytes", config.max_text_bytes);
        tracing::debug!(
            "Extraction cache: {} entries, {}s TTL",
            config.cache_capacity,
            config.cache_ttl_secs
        );

        Ok(config)
    }
}
