use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_calculate_per_min: u32,

    /// JSON rate schedule replacing the built-in one
    pub rates_file: Option<String>,
    pub log_dir: String,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{key}={raw} is not valid, using the default");
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            rate_calculate_per_min: env_or("RATE_CALCULATE_PER_MIN", 600),
            rates_file: env::var("RATES_FILE").ok().filter(|p| !p.trim().is_empty()),
            log_dir: Self::log_dir_from_env(),
        }
    }

    /// `LOG_DIR` alone, read before logging exists.
    pub fn log_dir_from_env() -> String {
        env::var("LOG_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "logs".to_string())
    }
}
