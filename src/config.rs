// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::wait::{CSV_POLL_INTERVAL_MS, INSTALL_TIMEOUT_SECS, POLL_INTERVAL_MS};
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Installer tuning loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Deadline for the whole install, shared by every wait
    pub install_timeout: Duration,
    /// Interval for catalog source and install plan polling
    pub poll_interval: Duration,
    pub csv_poll_interval: Duration,
    /// Wait for the catalog source connection to report READY before continuing.
    /// OLM is slow to propagate this state, so it is off unless asked for.
    pub wait_for_catalog_source: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            install_timeout: Duration::from_secs(INSTALL_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            csv_poll_interval: Duration::from_millis(CSV_POLL_INTERVAL_MS),
            wait_for_catalog_source: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let parse_u64 = |key: &str| -> Result<Option<u64>> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .with_context(|| format!("{} must be a positive integer, got '{}'", key, v))
                })
                .transpose()
        };

        let install_timeout = parse_u64("OLM_INSTALL_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.install_timeout);
        let poll_interval = parse_u64("OLM_POLL_INTERVAL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);
        let csv_poll_interval = parse_u64("OLM_CSV_POLL_INTERVAL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.csv_poll_interval);
        let wait_for_catalog_source: bool = lookup("OLM_WAIT_FOR_CATALOG_SOURCE")
            .unwrap_or("false".to_string())
            .parse()
            .unwrap_or(false);

        if poll_interval.is_zero() || csv_poll_interval.is_zero() {
            anyhow::bail!("poll intervals must be greater than zero");
        }

        Ok(Config {
            install_timeout,
            poll_interval,
            csv_poll_interval,
            wait_for_catalog_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.install_timeout, Duration::from_secs(120));
        assert_eq!(config.poll_interval, Duration::from_millis(200));
        assert_eq!(config.csv_poll_interval, Duration::from_secs(1));
        assert!(!config.wait_for_catalog_source);
    }

    #[test]
    fn test_overrides_from_env() {
        let config = Config::from_lookup(lookup_from(&[
            ("OLM_INSTALL_TIMEOUT_SECS", "300"),
            ("OLM_POLL_INTERVAL_MS", "50"),
            ("OLM_WAIT_FOR_CATALOG_SOURCE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.install_timeout, Duration::from_secs(300));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert!(config.wait_for_catalog_source);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = Config::from_lookup(lookup_from(&[("OLM_INSTALL_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("OLM_INSTALL_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("OLM_POLL_INTERVAL_MS", "0")])).is_err());
    }

    #[test]
    fn test_unparseable_bool_falls_back_to_false() {
        let config =
            Config::from_lookup(lookup_from(&[("OLM_WAIT_FOR_CATALOG_SOURCE", "yes")])).unwrap();
        assert!(!config.wait_for_catalog_source);
    }
}
