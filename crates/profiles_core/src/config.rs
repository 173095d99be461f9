//! Process configuration loaded from the environment.
//!
//! # Invariants
//! - Loading never fails: missing or invalid values fall back to defaults.
//! - Every fallback is logged.
//! - Log settings are readable on their own, so callers can start logging
//!   before the full load emits its fallback messages.

use crate::logging::default_log_level;
use log::{info, warn};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

pub const PORT_ENV: &str = "PORT";
pub const DB_PATH_ENV: &str = "PROFILES_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PROFILES_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PROFILES_LOG_DIR";
pub const SIMULATE_LATENCY_ENV: &str = "PROFILES_SIMULATE_LATENCY";

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DB_PATH: &str = "profiles.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listener port of the HTTP backend.
    pub port: u16,
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    pub simulate_latency: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            simulate_latency: true,
        }
    }
}

/// The subset of configuration needed to start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// File logging is disabled when unset.
    pub dir: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads only the log variables; nothing is logged.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup_non_empty(&lookup, LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
            dir: lookup_non_empty(&lookup, LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

impl AppConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let log = LogSettings::from_lookup(&lookup);
        Self {
            port: try_load(&lookup, PORT_ENV, defaults.port),
            db_path: lookup_non_empty(&lookup, DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: log.level,
            log_dir: log.dir,
            simulate_latency: try_load(&lookup, SIMULATE_LATENCY_ENV, defaults.simulate_latency),
        }
    }
}

fn lookup_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup_non_empty(lookup, key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.parse().unwrap_or_else(|err| {
        warn!("Invalid {key} value `{raw}`: {err}; using default: {default}");
        default
    })
}
