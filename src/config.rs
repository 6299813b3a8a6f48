//! Checker configuration
//!
//! Holds the ordered wordlist locations and the display palette. Built once
//! at startup and handed to [`PasswordChecker::new`](crate::PasswordChecker::new).

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the wordlist paths, separated like `PATH`.
pub const ENV_WORDLIST_PATHS: &str = "PWD_WORDLIST_PATHS";
/// Environment variable holding the per-file size cap in bytes.
pub const ENV_MAX_SOURCE_BYTES: &str = "PWD_MAX_SOURCE_BYTES";
/// Environment variable enabling preloaded line indexes.
pub const ENV_INDEX_WORDLISTS: &str = "PWD_INDEX_WORDLISTS";
/// Environment variable holding the response delay in milliseconds.
pub const ENV_RESPONSE_DELAY_MS: &str = "PWD_RESPONSE_DELAY_MS";

const DEFAULT_WORDLIST_PATHS: [&str; 3] = [
    "wordlists/wordlists/rockyou.txt",
    "wordlists/wordlists/SecLists",
    "wordlists/wordlists/Weakpass.txt",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Color tokens attached to each verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub danger: String,
    pub weak: String,
    pub warning: String,
    pub average: String,
    pub success: String,
    pub excellent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            danger: "#ff4757".to_string(),
            weak: "#ff6633".to_string(),
            warning: "#ffa502".to_string(),
            average: "#ffff00".to_string(),
            success: "#23ac5c".to_string(),
            excellent: "#00f7ff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Files or directories scanned in this order. Missing entries are fine.
    pub wordlist_paths: Vec<PathBuf>,
    /// Files larger than this are skipped.
    pub max_source_bytes: Option<u64>,
    /// Preload every source into a line set instead of rescanning per check.
    pub index_wordlists: bool,
    /// Pause applied by `evaluate_tx` before answering.
    pub response_delay: Duration,
    pub palette: Palette,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            wordlist_paths: DEFAULT_WORDLIST_PATHS.iter().map(PathBuf::from).collect(),
            max_source_bytes: None,
            index_wordlists: false,
            response_delay: Duration::ZERO,
            palette: Palette::default(),
        }
    }
}

impl CheckerConfig {
    /// Builds a configuration from the environment.
    ///
    /// Priority for every field:
    /// 1. The matching `PWD_*` environment variable
    /// 2. The default value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric or boolean
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(paths) = std::env::var_os(ENV_WORDLIST_PATHS) {
            config.wordlist_paths = std::env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Some(raw) = read_var(ENV_MAX_SOURCE_BYTES) {
            let limit = raw
                .parse::<u64>()
                .map_err(|_| invalid(ENV_MAX_SOURCE_BYTES, &raw))?;
            config.max_source_bytes = Some(limit);
        }

        if let Some(raw) = read_var(ENV_INDEX_WORDLISTS) {
            config.index_wordlists = match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid(ENV_INDEX_WORDLISTS, &raw)),
            };
        }

        if let Some(raw) = read_var(ENV_RESPONSE_DELAY_MS) {
            let millis = raw
                .parse::<u64>()
                .map_err(|_| invalid(ENV_RESPONSE_DELAY_MS, &raw))?;
            config.response_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_wordlist_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.wordlist_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_source_bytes(mut self, limit: u64) -> Self {
        self.max_source_bytes = Some(limit);
        self
    }

    pub fn with_index(mut self, enabled: bool) -> Self {
        self.index_wordlists = enabled;
        self
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

fn read_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    }
}
