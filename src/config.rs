use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub(crate) const DEFAULT_LEDGER: &str = "expenses.csv";
pub(crate) const DEFAULT_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    /// Backing file. `.db`/`.sqlite`/`.sqlite3` select the SQLite store.
    pub(crate) ledger_path: PathBuf,
    pub(crate) bind_addr: SocketAddr,
}

impl Config {
    /// Read `EXPENSES_FILE` and `EXPENSES_ADDR`, after loading `.env` if
    /// one is present.
    pub(crate) fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ledger_path = get("EXPENSES_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER));

        let addr = get("EXPENSES_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .trim()
            .parse()
            .with_context(|| format!("EXPENSES_ADDR is not a socket address: {addr}"))?;

        Ok(Self {
            ledger_path,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("expenses.csv"));
        assert_eq!(config.bind_addr, "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("EXPENSES_FILE", "/tmp/ledger.db"),
            ("EXPENSES_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/ledger.db"));
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("EXPENSES_FILE", "  "), ("EXPENSES_ADDR", "")]).unwrap();
        assert_eq!(config.ledger_path, PathBuf::from(DEFAULT_LEDGER));
        assert_eq!(config.bind_addr.port(), 5000);
    }

    #[test]
    fn test_bad_address() {
        assert!(config_from(&[("EXPENSES_ADDR", "localhost")]).is_err());
    }
}
