//! Validated runtime configuration.

use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use clap::ValueEnum;
use thiserror::Error;

use crate::context::MIN_THRESHOLD_DAYS;

/// Default monitor bind address.
pub const DEFAULT_ADDR: &str = "127.0.0.1";
/// Default monitor port.
pub const DEFAULT_PORT: u16 = 2237;
/// Default receive timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 16;
/// Default recency threshold in days.
pub const DEFAULT_THRESHOLD_DAYS: u32 = 7;
/// Default backing store file name.
pub const DEFAULT_STORE_FILE: &str = "logdata.csv";

/// When to regenerate the backing store from the historical log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RebuildPolicy {
    /// Only when the store does not exist.
    #[default]
    Never,
    /// When the log was modified after the store.
    IfNewer,
    /// On every start.
    Always,
}

impl RebuildPolicy {
    /// Decides whether to rebuild given the store and log modification times.
    ///
    /// A missing store always rebuilds. With [`RebuildPolicy::IfNewer`] an
    /// unknown log time keeps the existing store.
    pub fn should_rebuild(self, store_mtime: Option<SystemTime>, log_mtime: Option<SystemTime>) -> bool {
        let Some(store_mtime) = store_mtime else {
            return true;
        };
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::IfNewer => log_mtime.is_some_and(|log| store_mtime < log),
        }
    }
}

/// Configuration rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Threshold below the minimum.
    #[error("recency threshold must be at least 2 days, got {0}")]
    ThresholdTooSmall(u32),
    /// Server address is not an IP address.
    #[error("invalid server address {0:?}")]
    BadAddress(String),
    /// Zero-second timeout.
    #[error("server timeout must be at least one second")]
    ZeroTimeout,
}

/// Everything the process needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Monitor bind address.
    pub server: SocketAddr,
    /// Receive timeout.
    pub timeout: Duration,
    /// Backing store rebuild policy.
    pub rebuild: RebuildPolicy,
    /// Recency threshold in days, at least [`MIN_THRESHOLD_DAYS`].
    pub threshold_days: u32,
    /// Debug-level diagnostics.
    pub verbose: bool,
    /// Historical ADIF log.
    pub log_path: PathBuf,
    /// Backing store file.
    pub store_path: PathBuf,
}

/// Unvalidated settings, as gathered from the command line.
#[derive(Debug, Clone)]
pub struct RawConfig {
    /// Bind address text.
    pub addr: String,
    /// Bind port.
    pub port: u16,
    /// Receive timeout in seconds.
    pub timeout_secs: u64,
    /// Rebuild policy.
    pub rebuild: RebuildPolicy,
    /// Recency threshold in days.
    pub threshold_days: u32,
    /// Debug-level diagnostics.
    pub verbose: bool,
    /// Log override.
    pub log_path: Option<PathBuf>,
    /// Store override.
    pub store_path: Option<PathBuf>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            rebuild: RebuildPolicy::Never,
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            verbose: false,
            log_path: None,
            store_path: None,
        }
    }
}

impl RawConfig {
    /// Checks values and fills in default paths.
    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.threshold_days < MIN_THRESHOLD_DAYS {
            return Err(ConfigError::ThresholdTooSmall(self.threshold_days));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let ip: IpAddr = self
            .addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::BadAddress(self.addr.clone()))?;

        Ok(Config {
            server: SocketAddr::new(ip, self.port),
            timeout: Duration::from_secs(self.timeout_secs),
            rebuild: self.rebuild,
            threshold_days: self.threshold_days,
            verbose: self.verbose,
            log_path: self.log_path.unwrap_or_else(default_log_path),
            store_path: self.store_path.unwrap_or_else(default_store_path),
        })
    }
}

/// `<app data>/WSJT-X/wsjtx_log.adi`.
pub fn default_log_path() -> PathBuf {
    app_data_dir().join("WSJT-X").join("wsjtx_log.adi")
}

fn app_data_dir() -> PathBuf {
    let var = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from);
    var("LOCALAPPDATA")
        .or_else(|| var("XDG_DATA_HOME"))
        .or_else(|| var("HOME").map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `logdata.csv` beside the running executable, else in the working directory.
pub fn default_store_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .map(|dir| dir.join(DEFAULT_STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
}
