// SPDX-License-Identifier: Apache-2.0

use linesight_core::{
    MachineError, ENV_LINESIGHT_BIND, ENV_LINESIGHT_DATASET_PATH, ENV_LINESIGHT_LOG_JSON,
    ENV_LINESIGHT_MAX_BODY_BYTES, ENV_LINESIGHT_PAGE_SIZE, ENV_LINESIGHT_SHUTDOWN_DRAIN_MS,
};
use linesight_query::DEFAULT_PAGE_SIZE;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SHUTDOWN_DRAIN_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub log_json: bool,
    /// JSON dataset to serve; seed fixtures are used when unset.
    pub dataset_path: Option<PathBuf>,
    pub page_size: usize,
    pub max_body_bytes: usize,
    pub shutdown_drain: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_json: true,
            dataset_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_body_bytes: 64 * 1024,
            shutdown_drain: Duration::from_millis(DEFAULT_SHUTDOWN_DRAIN_MS),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any key lookup. Unparseable values fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = EnvReader { lookup };
        let defaults = Self::default();
        Self {
            bind_addr: env.string(ENV_LINESIGHT_BIND).unwrap_or(defaults.bind_addr),
            log_json: env.bool(ENV_LINESIGHT_LOG_JSON, defaults.log_json),
            dataset_path: env.string(ENV_LINESIGHT_DATASET_PATH).map(PathBuf::from),
            page_size: env.usize(ENV_LINESIGHT_PAGE_SIZE, defaults.page_size),
            max_body_bytes: env.usize(ENV_LINESIGHT_MAX_BODY_BYTES, defaults.max_body_bytes),
            shutdown_drain: Duration::from_millis(
                env.u64(ENV_LINESIGHT_SHUTDOWN_DRAIN_MS, DEFAULT_SHUTDOWN_DRAIN_MS),
            ),
        }
    }

    pub fn validate(&self) -> Result<SocketAddr, MachineError> {
        if self.page_size == 0 {
            return Err(MachineError::new("config_invalid", "page size must be positive")
                .with_detail("env", ENV_LINESIGHT_PAGE_SIZE));
        }
        if self.max_body_bytes == 0 {
            return Err(MachineError::new("config_invalid", "body limit must be positive")
                .with_detail("env", ENV_LINESIGHT_MAX_BODY_BYTES));
        }
        self.bind_addr.parse::<SocketAddr>().map_err(|e| {
            MachineError::new("config_invalid", &format!("invalid bind address: {e}"))
                .with_detail("env", ENV_LINESIGHT_BIND)
                .with_detail("value", &self.bind_addr)
        })
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<F> {
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn bool(&self, name: &str, default: bool) -> bool {
        self.string(name)
            .and_then(|v| match v.as_str() {
                "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
                "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }

    fn u64(&self, name: &str, default: u64) -> u64 {
        self.string(name)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(default)
    }

    fn usize(&self, name: &str, default: usize) -> usize {
        self.string(name)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.page_size, 25);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn overrides_and_bad_values() {
        let cfg = config(&[
            ("LINESIGHT_BIND", "127.0.0.1:9000"),
            ("LINESIGHT_LOG_JSON", "no"),
            ("LINESIGHT_PAGE_SIZE", "ten"),
            ("LINESIGHT_SHUTDOWN_DRAIN_MS", "0"),
            ("LINESIGHT_DATASET_PATH", "data/line.json"),
        ]);
        assert!(!cfg.log_json);
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.shutdown_drain, Duration::ZERO);
        assert_eq!(cfg.dataset_path, Some(PathBuf::from("data/line.json")));
        assert_eq!(cfg.validate().expect("valid bind").port(), 9000);
    }

    #[test]
    fn invalid_bind_is_a_config_error() {
        let err = config(&[("LINESIGHT_BIND", "localhost")])
            .validate()
            .expect_err("bind");
        assert_eq!(err.code, "config_invalid");
        assert_eq!(
            err.details.get("env").map(String::as_str),
            Some("LINESIGHT_BIND")
        );
    }
}
