// src/config.rs
use anyhow::{Context, Result};
use log::{info, warn};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.boomberg.xyz";
pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub port: u16,
}

impl Config {
    /// Reads `API_URL` and `PORT`, falling back to the public API host and port 3030.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let api_base_url = match env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_API_URL.to_string(),
        };

        let port = match env::var("PORT") {
            Ok(port_str) => port_str
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", port_str))?,
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let config = Config::new(&api_base_url, port);
        info!("Using API base URL: {}", config.api_base_url);
        Ok(config)
    }

    pub fn new(api_base_url: &str, port: u16) -> Self {
        Config {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            port,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_API_URL, DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = Config::new("http://localhost:8000//", 8080);
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn default_points_at_public_api() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
