//! Configuration for workbook extraction runs

use anyhow::Result;
use encoding_rs::Encoding;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::reader::resolve_encoding;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "twbextract.toml";

/// Main extraction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Text encoding label of the workbook files
    pub encoding: String,
    /// File name suffix (without the dot) of workbooks to scan
    pub extension: String,
    /// What to do when a workbook cannot be processed
    pub on_error: FailurePolicy,
    pub log_level: LogLevel,
}

impl ExtractConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ExtractConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check values that TOML parsing alone cannot reject
    pub fn validate(&self) -> Result<()> {
        if resolve_encoding(&self.encoding).is_none() {
            anyhow::bail!("Configuration error: Unknown encoding '{}'", self.encoding);
        }
        if self.extension.trim_start_matches('.').is_empty() {
            anyhow::bail!("Configuration error: 'extension' must not be empty");
        }
        Ok(())
    }

    /// The configured encoding, failing on unknown labels
    pub fn encoding(&self) -> Result<&'static Encoding> {
        resolve_encoding(&self.encoding)
            .ok_or_else(|| anyhow::anyhow!("Unknown encoding '{}'", self.encoding))
    }

    /// File name suffix including the leading dot, e.g. ".twb"
    pub fn file_suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            extension: "twb".to_string(),
            on_error: FailurePolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Handling of a workbook that fails to load, parse or extract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and continue with the next file
    #[default]
    Skip,
    /// Stop the run at the first failure
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.encoding().unwrap(), encoding_rs::UTF_8);
        assert_eq!(config.file_suffix(), ".twb");
        assert_eq!(config.on_error, FailurePolicy::Skip);
        assert_eq!(config.log_level.to_level_filter(), LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExtractConfig = toml::from_str(
            r#"
on_error = "abort"
encoding = "windows-1252"
"#,
        )
        .unwrap();
        assert_eq!(config.on_error, FailurePolicy::Abort);
        assert_eq!(config.encoding().unwrap(), encoding_rs::WINDOWS_1252);
        assert_eq!(config.extension, "twb");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "extension = \".twbx.xml\"\nlog_level = \"debug\"\n").unwrap();

        let config = ExtractConfig::from_file(&path).unwrap();
        assert_eq!(config.file_suffix(), ".twbx.xml");
        assert_eq!(config.log_level.to_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_validation() {
        let bad = ExtractConfig {
            encoding: "no-such-encoding".to_string(),
            ..ExtractConfig::default()
        };
        assert!(bad.validate().is_err());
        assert!(bad.encoding().is_err());

        let bad = ExtractConfig {
            extension: ".".to_string(),
            ..ExtractConfig::default()
        };
        assert!(bad.validate().is_err());

        assert!(toml::from_str::<ExtractConfig>("on_error = \"retry\"").is_err());
    }
}
