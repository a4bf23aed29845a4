use crate::error::{ApiError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// TTL for the query-analysis cache, in seconds
    pub cache_ttl_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ApiError::ConfigError("PORT must be a valid port number".to_string()))?;

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|_| {
                ApiError::ConfigError("CACHE_TTL_SECONDS must be a number of seconds".to_string())
            })?;

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            cache_ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_env_is_unset() {
        env::remove_var("PORT");
        env::remove_var("HOST");
        env::remove_var("CACHE_TTL_SECONDS");

        let config = Config::load().expect("defaults load");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_ttl_seconds, 3600);
    }
}
