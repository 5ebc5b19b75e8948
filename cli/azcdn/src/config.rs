//! Process-level configuration read from the environment.

use std::str::FromStr;

use anyhow::{bail, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human-readable records.
    #[default]
    Compact,
    /// One JSON object per record.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => bail!("Invalid AZCDN_LOG_FORMAT '{other}', expected 'compact' or 'json'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("AZCDN_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        let log_format = match lookup("AZCDN_LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            log_level,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(|key| match key {
            "AZCDN_LOG_LEVEL" => Some("azcdn_migration=debug".to_string()),
            "AZCDN_LOG_FORMAT" => Some("JSON".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.log_level, "azcdn_migration=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Config::from_lookup(|key| {
            (key == "AZCDN_LOG_FORMAT").then(|| "xml".to_string())
        });
        assert!(result.is_err());
    }
}
