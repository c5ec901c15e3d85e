//! Configuration for Roster
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Name of the backing file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Main configuration for a Roster session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// JSON document holding every student record
    pub data_file: PathBuf,

    /// How the document is replaced on each save
    pub write_mode: WriteMode,
}

/// Save strategy for the backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write a temp sibling, fsync, then rename over the target
    Atomic,

    /// Truncate and overwrite the target directly
    InPlace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            write_mode: WriteMode::Atomic,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the write mode
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
