//! JSON Schema validation for getpot configuration

use crate::error::TreeError;
use jsonschema::Validator;
use serde_json::Value;

/// Get the embedded JSON schema for getpot configuration
///
/// # Errors
///
/// Returns an error if the embedded schema does not parse or compile
pub fn get_schema() -> Result<Validator, TreeError> {
    let schema_str = include_str!("../../docs/config-schema.json");
    let schema: Value = serde_json::from_str(schema_str).map_err(|e| {
        TreeError::configuration(format!("Failed to parse embedded JSON schema: {e}"))
    })?;

    jsonschema::draft7::new(&schema)
        .map_err(|e| TreeError::configuration(format!("Failed to compile JSON schema: {e}")))
}

/// Validate a configuration value against the schema
///
/// # Errors
///
/// Returns an error listing every violation found
pub fn validate_against_schema(config: &Value) -> Result<(), TreeError> {
    let schema = get_schema()?;

    let error_messages: Vec<String> = schema
        .iter_errors(config)
        .map(|e| format!("  - {e}"))
        .collect();

    if !error_messages.is_empty() {
        return Err(TreeError::configuration(format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_schema_compiles() {
        assert!(get_schema().is_ok());
    }

    #[test]
    fn accepts_full_config() {
        let config = json!({
            "verbosity": "quiet",
            "writeInactive": false,
            "priorityBlocks": ["Variables"],
            "syntaxExtension": "syntax",
            "bindVariables": true,
            "projectFileOptions": false
        });
        assert!(validate_against_schema(&config).is_ok());
    }

    #[test]
    fn rejects_unknown_verbosity() {
        let err = validate_against_schema(&json!({ "verbosity": "loud" })).unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
