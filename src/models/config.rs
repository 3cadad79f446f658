//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Derived index settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Archive browsing settings
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// HTTP settings for fetching problem pages
    #[serde(default)]
    pub http: HttpConfig,

    /// Dashboard display settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.archive.recent_limit == 0 {
            return Err(AppError::validation("archive.recent_limit must be > 0"));
        }
        if self.archive.recent_display > self.archive.recent_limit {
            return Err(AppError::validation(
                "archive.recent_display must not exceed archive.recent_limit",
            ));
        }
        if self.archive.highlight_ms == 0 {
            return Err(AppError::validation("archive.highlight_ms must be > 0"));
        }
        Ok(())
    }

    /// Path of the ordering file relative to `base`.
    pub fn ordering_path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.ordering_file)
    }

    /// Directory holding archive subjects relative to `base`.
    pub fn archive_path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.archive_dir)
    }

    /// Directory holding user data relative to `base`.
    pub fn user_data_path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.user_data_dir)
    }
}

/// Data file locations, relative to the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::ordering_file")]
    pub ordering_file: String,

    #[serde(default = "defaults::archive_dir")]
    pub archive_dir: String,

    #[serde(default = "defaults::user_data_dir")]
    pub user_data_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ordering_file: defaults::ordering_file(),
            archive_dir: defaults::archive_dir(),
            user_data_dir: defaults::user_data_dir(),
        }
    }
}

/// What to do when a module ID appears in more than one chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later declaration replaces the earlier one
    #[default]
    LastWriteWins,
    /// Building the index fails
    Reject,
}

/// Derived index settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Archive browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// How long a breadcrumb highlight stays visible
    #[serde(default = "defaults::highlight_ms")]
    pub highlight_ms: u64,

    /// Quiet period before a typed search term is applied
    #[serde(default = "defaults::search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Recently viewed items kept
    #[serde(default = "defaults::recent_limit")]
    pub recent_limit: usize,

    /// Recently viewed items shown
    #[serde(default = "defaults::recent_display")]
    pub recent_display: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            highlight_ms: defaults::highlight_ms(),
            search_debounce_ms: defaults::search_debounce_ms(),
            recent_limit: defaults::recent_limit(),
            recent_display: defaults::recent_display(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Dashboard display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// List ignored modules among active ones
    #[serde(default)]
    pub show_ignored: bool,
}

mod defaults {
    // Path defaults
    pub fn ordering_file() -> String {
        "ordering.toml".into()
    }
    pub fn archive_dir() -> String {
        "archive".into()
    }
    pub fn user_data_dir() -> String {
        "user".into()
    }

    // Archive defaults
    pub fn highlight_ms() -> u64 {
        2000
    }
    pub fn search_debounce_ms() -> u64 {
        300
    }
    pub fn recent_limit() -> usize {
        10
    }
    pub fn recent_display() -> usize {
        5
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; curriculum/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }
}
