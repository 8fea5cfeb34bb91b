use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::LintError;

/// Application configuration module
/// This module handles loading and validating the linter configuration.
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory with flat (INI) locale files
    #[serde(default = "default_locale_dir")]
    pub locale_dir: PathBuf,

    /// Directory with nested (JSON) locale files
    #[serde(default = "default_locale_next_dir")]
    pub locale_next_dir: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// How diffs are rendered
    #[serde(default)]
    pub color: ColorMode,

    /// How the report is written
    #[serde(default)]
    pub format: OutputFormat,

    /// Additional pseudo-tags such as `<brukar>`, on top of the built-in table
    #[serde(default)]
    pub extra_pseudo_tags: Vec<String>,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level filter for the `log` facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Whether diffs use ANSI colors
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    // @mode: Colors when stdout is a terminal
    #[default]
    Auto,
    // @mode: Always colored
    Always,
    // @mode: Plain text markers
    Never,
}

/// Report output format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    // @format: File names followed by one `key: diff` line per finding
    #[default]
    Text,
    // @format: The whole report as one JSON document, with plain diffs
    Json,
}

fn default_locale_dir() -> PathBuf {
    PathBuf::from("options").join("locale")
}

fn default_locale_next_dir() -> PathBuf {
    PathBuf::from("options").join("locale_next")
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LintError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LintError::file(path, &e))?;
        serde_json::from_str(&content).map_err(|e| {
            LintError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LintError> {
        if self.locale_dir.as_os_str().is_empty() {
            return Err(LintError::Config("locale_dir must not be empty".to_string()));
        }

        if self.locale_next_dir.as_os_str().is_empty() {
            return Err(LintError::Config("locale_next_dir must not be empty".to_string()));
        }

        for tag in &self.extra_pseudo_tags {
            let well_formed = tag.len() > 2
                && tag.starts_with('<')
                && tag.ends_with('>')
                && !tag[1..tag.len() - 1].contains(['<', '>']);
            if !well_formed {
                return Err(LintError::Config(format!(
                    "extra_pseudo_tags entry must look like <word>, got '{}'",
                    tag
                )));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            locale_dir: default_locale_dir(),
            locale_next_dir: default_locale_next_dir(),
            log_level: LogLevel::default(),
            color: ColorMode::default(),
            format: OutputFormat::default(),
            extra_pseudo_tags: Vec::new(),
        }
    }
}
