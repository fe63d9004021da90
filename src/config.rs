use std::collections::HashMap;
use std::env;
use std::fs;

use thiserror::Error;

use crate::time_utils::{detect_user_zone, parse_zone};

pub const DEFAULT_DB_LOCATION: &str = "./data";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },
}

/// `KEY=VALUE` settings file. Values found here win over the environment.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let value = value.trim();
            let value = strip_quotes(value).unwrap_or(value);
            values.insert(key.trim().to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value, then process environment.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }

    pub fn db_location(&self) -> String {
        self.lookup("DB_LOCATION")
            .unwrap_or_else(|| DEFAULT_DB_LOCATION.to_string())
    }

    /// `DEFAULT_TIMEZONE` when it names a known zone, otherwise the detected one.
    pub fn viewer_zone(&self) -> String {
        match self.lookup("DEFAULT_TIMEZONE") {
            Some(zone) if parse_zone(&zone).is_ok() => zone,
            Some(zone) => {
                tracing::warn!(zone = %zone, "ignoring unknown DEFAULT_TIMEZONE");
                detect_user_zone()
            }
            None => detect_user_zone(),
        }
    }

    pub fn log_level(&self) -> String {
        self.lookup("LOG_LEVEL")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

fn strip_quotes(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}
