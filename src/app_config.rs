use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::reflow::DEFAULT_REFLOW_BUFFER_SIZE;
use crate::subst::DEFAULT_SUBST_BUFFER_SIZE;
use crate::translation::{DEFAULT_BUFFER_SIZE, INTERACTIVE_BUFFER_SIZE};

/// Application configuration module
/// This module handles the application configuration including loading
/// and validating configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Listing translation settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// String substitution settings
    #[serde(default)]
    pub subst: SubstConfig,

    /// Reflow settings
    #[serde(default)]
    pub reflow: ReflowConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Listing translation configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Lines per chunk when input is piped or read from files
    #[serde(default = "default_translation_buffer_size")]
    pub buffer_size: usize,

    /// Lines per chunk when reading from a terminal
    #[serde(default = "default_interactive_buffer_size")]
    pub interactive_buffer_size: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_translation_buffer_size(),
            interactive_buffer_size: default_interactive_buffer_size(),
        }
    }
}

/// String substitution configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubstConfig {
    /// Lines per batch when input is piped or read from files
    #[serde(default = "default_subst_buffer_size")]
    pub buffer_size: usize,

    /// Lines per batch when reading from a terminal
    #[serde(default = "default_interactive_buffer_size")]
    pub interactive_buffer_size: usize,
}

impl Default for SubstConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_subst_buffer_size(),
            interactive_buffer_size: default_interactive_buffer_size(),
        }
    }
}

/// Reflow configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReflowConfig {
    /// Lines read between attempts to emit reflowed text
    #[serde(default = "default_reflow_buffer_size")]
    pub buffer_size: usize,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_reflow_buffer_size(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Equivalent filter for the `log` crate
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_translation_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_subst_buffer_size() -> usize {
    DEFAULT_SUBST_BUFFER_SIZE
}

fn default_reflow_buffer_size() -> usize {
    DEFAULT_REFLOW_BUFFER_SIZE
}

fn default_interactive_buffer_size() -> usize {
    INTERACTIVE_BUFFER_SIZE
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Default config location, `<config dir>/sanzang/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sanzang").join("config.json"))
    }

    /// Load the explicit config file if given, otherwise the default location
    /// if a file exists there, otherwise built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("translation.buffer_size", self.translation.buffer_size),
            ("translation.interactive_buffer_size", self.translation.interactive_buffer_size),
            ("subst.buffer_size", self.subst.buffer_size),
            ("subst.interactive_buffer_size", self.subst.interactive_buffer_size),
            ("reflow.buffer_size", self.reflow.buffer_size),
        ];

        for (name, value) in sizes {
            if value == 0 {
                return Err(anyhow!("{} must be greater than zero", name));
            }
        }

        Ok(())
    }
}
