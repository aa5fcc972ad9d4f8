//! Configuration validation logic

use crate::config::Config;
use crate::error::TreeError;
use std::collections::HashSet;

/// Validate a complete configuration
///
/// # Errors
///
/// Returns an error if:
/// - The syntax extension is empty or contains a path separator
/// - A priority block name is empty or listed twice
#[inline]
pub fn validate_config(config: &Config) -> Result<(), TreeError> {
    validate_syntax_extension(&config.syntax_extension)?;

    let mut seen = HashSet::new();
    for (index, name) in config.priority_blocks.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(TreeError::configuration(format!(
                "Priority block #{} cannot be empty",
                index + 1
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(TreeError::configuration(format!(
                "Priority block '{name}' is listed more than once"
            )));
        }
    }

    Ok(())
}

fn validate_syntax_extension(extension: &str) -> Result<(), TreeError> {
    let extension = extension.trim();
    if extension.is_empty() {
        return Err(TreeError::configuration("Syntax extension cannot be empty"));
    }
    if extension.starts_with('.') || extension.contains(['/', '\\']) {
        return Err(TreeError::configuration(format!(
            "Invalid syntax extension '{extension}'. Give the bare extension, e.g. 'syntax'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_bad_extension() {
        for extension in ["", ".syntax", "a/b"] {
            let config = Config {
                syntax_extension: extension.to_owned(),
                ..Config::default()
            };
            assert!(validate_config(&config).is_err(), "{extension:?} should be rejected");
        }
    }

    #[test]
    fn rejects_duplicate_priority_blocks() {
        let config = Config {
            priority_blocks: vec!["Variables".to_owned(), "Variables".to_owned()],
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
