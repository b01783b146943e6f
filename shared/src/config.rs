use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const APP_NAME: &str = "Curtains";

pub const DEFAULT_ABOUT_URL: &str = "https://github.com/curtains-app/curtains";

/// Application configuration stored in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
    pub log_to_file: bool,
    /// Keep the intensity in this JSON file instead of the system preference store
    pub preferences_file: Option<PathBuf>,
    /// Link shown in the About dialog
    pub about_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_to_file: true,
            preferences_file: None,
            about_url: DEFAULT_ABOUT_URL.into(),
        }
    }
}

impl AppConfig {
    /// Parsed `log_level`, falling back to Info for anything unrecognised.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME)
}

pub fn config_path() -> PathBuf {
    app_dir(dirs::config_dir()).join("config.json")
}

pub fn log_file_path() -> PathBuf {
    app_dir(dirs::cache_dir()).join("curtains.log")
}

/// Read the config at `path`. A missing file is not an error.
pub fn try_load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
