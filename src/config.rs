use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const APP_DIR: &str = "node-inventory";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Inventory domains, in the order a full collection runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Kernel,
    Cpu,
    Memory,
    Network,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Kernel, Domain::Cpu, Domain::Memory, Domain::Network];
}

/// Which occurrence of a repeated label ends up in the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMatch {
    /// Every match overwrites, so the last one in traversal order wins.
    #[default]
    Last,
    First,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub lscpu: String,
    pub lshw: String,
    pub devlink: String,
    pub kdump_config: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            lscpu: "lscpu".to_string(),
            lshw: "lshw".to_string(),
            devlink: "devlink".to_string(),
            kdump_config: "kdump-config".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolPaths,
    #[serde(deserialize_with = "non_zero_secs")]
    pub command_timeout_secs: u64,
    pub sysfs_net_root: PathBuf,
    pub label_match: LabelMatch,
    pub domains: Vec<Domain>,
    pub log: LogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolPaths::default(),
            command_timeout_secs: 30,
            sysfs_net_root: PathBuf::from("/sys/class/net"),
            label_match: LabelMatch::Last,
            domains: Domain::ALL.to_vec(),
            log: LogSettings::default(),
        }
    }
}

impl Config {
    /// Loads `path` if given, otherwise the per-user config file when one
    /// exists. Without either, built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

fn non_zero_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match u64::deserialize(deserializer)? {
        0 => Err(de::Error::invalid_value(
            de::Unexpected::Unsigned(0),
            &"a timeout of at least one second",
        )),
        secs => Ok(secs),
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
