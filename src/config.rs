//! Application configuration
//!
//! Read from `~/.bookdesk/config.json` unless a path is given. Every field
//! has a default, so a missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Local, Offset, Utc};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::services::amount::DEFAULT_CURRENCY;
use crate::types::{BookdeskError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_size: usize,
    /// Currency for bookings that carry no code
    pub default_currency: String,
    /// Offset used as "local time", e.g. "+05:30". Host offset when unset.
    pub utc_offset: Option<String>,
    /// Default export file for the `bookings` command
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_currency: DEFAULT_CURRENCY.to_string(),
            utc_offset: None,
            source: None,
        }
    }
}

impl AppConfig {
    /// Load from an explicit path (must exist) or the default location (may be absent)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BookdeskError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            BookdeskError::Config(format!("invalid {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.bookdesk/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| BookdeskError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".bookdesk").join("config.json"))
    }

    /// Offset to treat as local time
    pub fn offset(&self) -> Result<FixedOffset> {
        match self.utc_offset.as_deref().map(str::trim) {
            Some(raw) => parse_offset(raw),
            None => Ok(Local::now().offset().fix()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BookdeskError::Config("page_size must be positive".into()));
        }
        self.offset()?;
        Ok(())
    }
}

/// Accepts "Z", "UTC", "+05:30", "-0800"
fn parse_offset(raw: &str) -> Result<FixedOffset> {
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    raw.parse::<FixedOffset>()
        .map_err(|e| BookdeskError::Config(format!("invalid utc_offset '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.default_currency, "INR");
        assert!(config.utc_offset.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_tmp, path) = write_config(r#"{"utc_offset": "+05:30"}"#);
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(
            config.offset().unwrap(),
            FixedOffset::east_opt(19800).unwrap()
        );
    }

    #[test]
    fn test_full_file() {
        let (_tmp, path) = write_config(
            r#"{"page_size": 25, "default_currency": "USD", "utc_offset": "-0800", "source": "/data/export.json"}"#,
        );
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.default_currency, "USD");
        assert_eq!(
            config.offset().unwrap(),
            FixedOffset::west_opt(8 * 3600).unwrap()
        );
        assert_eq!(config.source, Some(PathBuf::from("/data/export.json")));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/config.json")));
        assert!(matches!(result, Err(BookdeskError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let (_tmp, path) = write_config("{page_size: ");
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(BookdeskError::Config(_))
        ));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let (_tmp, path) = write_config(r#"{"page_size": 0}"#);
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_bad_offset_rejected() {
        let (_tmp, path) = write_config(r#"{"utc_offset": "India"}"#);
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_utc_aliases() {
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("utc").unwrap().local_minus_utc(), 0);
    }
}
