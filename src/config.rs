//! Runtime settings resolved from flags, environment and XDG defaults.

use std::path::PathBuf;

/// Overrides the history file location.
pub const HISTORY_ENV: &str = "CHROMASET_HISTORY";
/// Overrides the base URL used for share links.
pub const BASE_URL_ENV: &str = "CHROMASET_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://chromaset.app/";
pub const HISTORY_FILE_NAME: &str = "history.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_path: PathBuf,
    pub base_url: String,
}

impl Config {
    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(history_flag: Option<PathBuf>, base_url_flag: Option<String>) -> Self {
        let history_path = history_flag
            .or_else(|| env_nonempty(HISTORY_ENV).map(PathBuf::from))
            .unwrap_or_else(default_history_path);
        let base_url = base_url_flag
            .or_else(|| env_nonempty(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            history_path,
            base_url,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `$XDG_CONFIG_HOME/chromaset/history.json`, falling back to `~/.config`.
pub fn default_history_path() -> PathBuf {
    config_dir().join(HISTORY_FILE_NAME)
}

fn config_dir() -> PathBuf {
    let config_home = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            PathBuf::from(home).join(".config")
        });
    config_home.join("chromaset")
}
