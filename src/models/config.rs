//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Every section falls back to built-in defaults, so an empty or partial
/// `gem-sync.toml` is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Which spreadsheet tab to export
    #[serde(default)]
    pub sheet: SheetLocator,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Local byte store and document output locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl SyncConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is not worth a warning; a malformed one is.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.sheet.spreadsheet_id.trim().is_empty() {
            return Err(AppError::validation("sheet.spreadsheet_id is empty"));
        }
        if self.sheet.gid.trim().is_empty() {
            return Err(AppError::validation("sheet.gid is empty"));
        }
        Url::parse(&self.sheet.base_url).map_err(|e| {
            AppError::validation(format!(
                "sheet.base_url '{}' is not a valid URL: {}",
                self.sheet.base_url, e
            ))
        })?;
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.paths.csv_file.as_os_str().is_empty() {
            return Err(AppError::validation("paths.csv_file is empty"));
        }
        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(AppError::validation("paths.output_dir is empty"));
        }
        Ok(())
    }
}

/// Identifies one tab of a published spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLocator {
    /// Spreadsheet identifier (the long token in the sheet URL)
    #[serde(default = "defaults::spreadsheet_id")]
    pub spreadsheet_id: String,

    /// Tab identifier (`gid` query parameter)
    #[serde(default = "defaults::gid")]
    pub gid: String,

    /// Host serving the export endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl SheetLocator {
    /// CSV export URL for this tab.
    pub fn export_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/spreadsheets/d/{}/export",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id
        ))?;
        url.query_pairs_mut()
            .append_pair("format", "csv")
            .append_pair("gid", &self.gid);
        Ok(url)
    }
}

impl Default for SheetLocator {
    fn default() -> Self {
        Self {
            spreadsheet_id: defaults::spreadsheet_id(),
            gid: defaults::gid(),
            base_url: defaults::base_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header; the export endpoint rejects non-browser agents
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where the downloaded CSV is stored and read from
    #[serde(default = "defaults::csv_file")]
    pub csv_file: PathBuf,

    /// Directory receiving one `{ID}.json` per row
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            csv_file: defaults::csv_file(),
            output_dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Sheet defaults
    pub fn spreadsheet_id() -> String {
        "1BsTCewXvYLHTEatDZbPTgQOyu0fQf9BowmycI8dI25k".into()
    }
    pub fn gid() -> String {
        "1432562920".into()
    }
    pub fn base_url() -> String {
        "https://docs.google.com".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        60
    }

    // Path defaults
    pub fn csv_file() -> PathBuf {
        PathBuf::from("metadata/raw_data/gem.csv")
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from("metadata/json")
    }
}
