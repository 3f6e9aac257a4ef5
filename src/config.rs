use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::refresh::RefreshSettings;
use crate::scrapers::SearchParams;
use crate::storage::FilterPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub refresh_enabled: bool,
    pub refresh: RefreshSettings,
    pub filter_policy: FilterPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy = FilterPolicy::default();
        let defaults = SearchParams::default();

        let refresh = RefreshSettings {
            interval: Duration::from_secs(parse_or(&lookup, "REFRESH_INTERVAL_SECS", 120)?),
            initial_delay: Duration::from_secs(parse_or(
                &lookup,
                "REFRESH_INITIAL_DELAY_SECS",
                30,
            )?),
            generator_timeout: Duration::from_secs(parse_or(
                &lookup,
                "GENERATOR_TIMEOUT_SECS",
                30,
            )?),
            defaults: SearchParams {
                city: lookup("DEFAULT_CITY").unwrap_or(defaults.city),
                max_price: parse_or(&lookup, "DEFAULT_MAX_PRICE", defaults.max_price)?,
                min_area: parse_or(&lookup, "DEFAULT_MIN_AREA", defaults.min_area)?,
            },
        };
        if refresh.interval.is_zero() {
            anyhow::bail!("REFRESH_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
            refresh_enabled: parse_or(&lookup, "REFRESH_ENABLED", true)?,
            refresh,
            filter_policy: FilterPolicy {
                price_tolerance: parse_or(
                    &lookup,
                    "FILTER_PRICE_TOLERANCE",
                    policy.price_tolerance,
                )?,
                size_relaxation: parse_or(
                    &lookup,
                    "FILTER_SIZE_RELAXATION",
                    policy.size_relaxation,
                )?,
                size_floor: parse_or(&lookup, "FILTER_SIZE_FLOOR", policy.size_floor)?,
                min_accepted: parse_or(&lookup, "FILTER_MIN_ACCEPTED", policy.min_accepted)?,
                min_results: parse_or(&lookup, "FILTER_MIN_RESULTS", policy.min_results)?,
                min_backfill: parse_or(&lookup, "FILTER_MIN_BACKFILL", policy.min_backfill)?,
                small_store_cap: parse_or(
                    &lookup,
                    "FILTER_SMALL_STORE_CAP",
                    policy.small_store_cap,
                )?,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got {:?}", key, raw)),
        None => Ok(default),
    }
}
