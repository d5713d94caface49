//! Engine configuration, loadable from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Controls which per-parse services a [`ParseSession`](crate::session::ParseSession) attaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Attach a memo table to every parse
    #[serde(default = "default_true")]
    pub memoize: bool,

    /// Attach a trace log to every parse
    #[serde(default)]
    pub trace: bool,

    /// Maximum number of trace entries kept per parse
    #[serde(default)]
    pub trace_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memoize: default_true(),
            trace: false,
            trace_limit: None,
        }
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Memoization off, tracing off.
    pub fn plain() -> Self {
        Self {
            memoize: false,
            ..Self::default()
        }
    }

    pub fn with_trace(self, trace: bool) -> Self {
        Self { trace, ..self }
    }

    pub fn with_memoize(self, memoize: bool) -> Self {
        Self { memoize, ..self }
    }

    pub fn with_trace_limit(self, limit: Option<usize>) -> Self {
        Self {
            trace_limit: limit,
            ..self
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_engine_config_serde() {
        let config = EngineConfig::default().with_trace(true).with_trace_limit(Some(64));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = EngineConfig::from_json_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();

        assert!(config.memoize);
        assert!(!config.trace);
        assert_eq!(config.trace_limit, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "memoize": false, "trace": true }}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(!config.memoize);
        assert!(config.trace);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let error = EngineConfig::from_json_str("{ memoize: ").unwrap_err();
        assert!(matches!(error, ConfigError::Json(_)));
    }
}
