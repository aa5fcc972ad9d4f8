//! Configuration management module
//!
//! Handles YAML configuration parsing, JSON schema validation, and the
//! defaults used when no configuration file is given

pub mod schema;
pub mod validation;
pub mod yaml;

use crate::error::TreeError;
use crate::system::System;
use serde::{Deserialize, Serialize};

/// How much diagnostic output the loader and reader produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    /// Dump parsed sections and resolved hard paths
    Debug,
}

impl Verbosity {
    #[must_use]
    #[inline]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    #[must_use]
    #[inline]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub verbosity: Verbosity,

    /// Write inactive top-level blocks commented out instead of dropping them
    pub write_inactive: bool,

    /// Top-level blocks written before all others
    pub priority_blocks: Vec<String>,

    /// Extension of the action syntax file that sits next to a YAML schema
    pub syntax_extension: String,

    /// Bind `variable` parameter options to the declared variables on read
    pub bind_variables: bool,

    /// Offer project files as options of file-name parameters in a schema
    pub project_file_options: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            write_inactive: false,
            priority_blocks: vec!["Functions".to_owned(), "Variables".to_owned()],
            syntax_extension: "syntax".to_owned(),
            bind_variables: true,
            project_file_options: true,
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid
    pub fn load_from_file(system: &dyn System, path: &str) -> Result<Self, TreeError> {
        yaml::load_config(system, path)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range
    pub fn validate(&self) -> Result<(), TreeError> {
        validation::validate_config(self)
    }
}
