// src/config.rs
use log::warn;
use std::env;

use crate::services::source::DataSource;

/// Service configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cache_ttl_secs: u64,
    pub refresh_delay_secs: u64,
    pub refresh_period_secs: u64,
    pub api_timeout_secs: u64,
    pub data_source: DataSource,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            port: env_u16("PORT", 3030),
            cache_ttl_secs: env_u64("TREASURYVIZ_CACHE_TTL_SECS", 300),
            refresh_delay_secs: env_u64("TREASURYVIZ_REFRESH_DELAY_SECS", 60),
            refresh_period_secs: env_u64("TREASURYVIZ_REFRESH_PERIOD_SECS", 300),
            api_timeout_secs: env_u64("TREASURYVIZ_API_TIMEOUT_SECS", 30),
            data_source: data_source_from_env(),
        }
    }
}

fn env_u16(name: &str, default: u16) -> u16 {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} is not a number, defaulting to {}", name, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} is not a number, defaulting to {}", name, default);
            default
        }),
        Err(_) => default,
    }
}

fn data_source_from_env() -> DataSource {
    match env::var("TREASURYVIZ_DATA_SOURCE") {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "demo" | "" => DataSource::Demo,
            "treasury" => DataSource::Treasury,
            other => {
                warn!("Unknown TREASURYVIZ_DATA_SOURCE '{}', defaulting to demo", other);
                DataSource::Demo
            }
        },
        Err(_) => DataSource::Demo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(env_u16("TREASURYVIZ_TEST_UNSET_PORT", 3030), 3030);
        assert_eq!(env_u64("TREASURYVIZ_TEST_UNSET_TTL", 300), 300);
    }
}
