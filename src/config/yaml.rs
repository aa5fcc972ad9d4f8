//! YAML configuration loading and parsing

use crate::config::Config;
use crate::error::TreeError;
use crate::system::System;
use std::path::Path;

/// Load and parse YAML configuration from file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The YAML is malformed or fails schema or logical validation
pub fn load_config(system: &dyn System, path: &str) -> Result<Config, TreeError> {
    let path_obj = Path::new(path);

    if !system.exists(path_obj).map_err(|e| TreeError::io(path, e))? {
        return Err(TreeError::configuration(format!(
            "Configuration file not found: {path}\n\
            Create a getpot.yaml file or specify a different path with --config"
        )));
    }

    let content = system
        .read_to_string(path_obj)
        .map_err(|e| TreeError::io(path, e))?;

    load_config_from_str(&content).map_err(|e| match e {
        TreeError::Configuration { message } => {
            TreeError::configuration(format!("{message} (in {path})"))
        }
        other => other,
    })
}

/// Parse and validate YAML configuration text
///
/// # Errors
///
/// Returns an error if the YAML is malformed or fails validation
pub fn load_config_from_str(content: &str) -> Result<Config, TreeError> {
    // An empty file means "all defaults"
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let raw: serde_json::Value = serde_yaml::from_str(content).map_err(|e| {
        if let Some(location) = e.location() {
            TreeError::configuration(format!(
                "Failed to parse configuration at line {}, column {}: {e}",
                location.line(),
                location.column()
            ))
        } else {
            TreeError::configuration(format!("Failed to parse configuration: {e}"))
        }
    })?;

    crate::config::schema::validate_against_schema(&raw)?;

    let config: Config = serde_json::from_value(raw)
        .map_err(|e| TreeError::configuration(format!("Invalid configuration: {e}")))?;

    config.validate()?;
    Ok(config)
}
