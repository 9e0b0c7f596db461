use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use crate::errors::ExtractError;
use crate::subtitle_processor::DEFAULT_OUTPUT_SUFFIX;

/// Application configuration module
/// Settings are optional: every field has a default, and a config file is
/// only read when one is passed on the command line.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Appended to the input file stem when no output path is given
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// File extensions picked up by folder mode
    #[serde(default = "default_subtitle_extensions")]
    pub subtitle_extensions: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
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
    // @returns: Matching `log` filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_output_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

fn default_subtitle_extensions() -> Vec<String> {
    vec!["ass".to_string(), "ssa".to_string()]
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(ExtractError::Config("output suffix must not be empty".to_string()).into());
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(ExtractError::Config(format!(
                "output suffix must not contain path separators: {}",
                self.output_suffix
            )).into());
        }

        if self.subtitle_extensions.is_empty() {
            return Err(ExtractError::Config("at least one subtitle extension is required".to_string()).into());
        }

        if let Some(ext) = self.subtitle_extensions.iter().find(|e| e.trim_start_matches('.').is_empty()) {
            return Err(ExtractError::Config(format!("invalid subtitle extension: {:?}", ext)).into());
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_suffix: default_output_suffix(),
            subtitle_extensions: default_subtitle_extensions(),
            log_level: LogLevel::default(),
        }
    }
}
