//! Decoding of the YAML schema document into blocks
//!
//! Missing or null keys read as empty values; the document's shape is
//! whatever the schema generator produced, not a strict format.

use crate::error::TreeError;
use crate::model::{Block, Parameter};
use serde_yaml::Value;
use tracing::warn;

impl Block {
    /// Build a block from one YAML block map, recursing into `subblocks`.
    /// The name is the last `/` segment of the map's `name`.
    #[must_use]
    pub fn from_map(map: &Value) -> Self {
        let full_name = text(map, "name");
        let name = full_name.rsplit('/').next().unwrap_or_default();

        let mut block = Self::new(name);
        block.description = text(map, "description");
        block.block_type = text(map, "type");
        block.comment = text(map, "comment");
        if block.comment.is_empty() {
            block.comment.clone_from(&block.description);
        }

        block.parameters = list(map, "parameters")
            .iter()
            .filter(|p| p.is_mapping())
            .map(parameter_from_map)
            .filter(|p| !p.name.is_empty())
            .collect();

        block.subblocks = list(map, "subblocks")
            .iter()
            .filter(|b| b.is_mapping())
            .map(Self::from_map)
            .collect();

        block
    }
}

fn parameter_from_map(map: &Value) -> Parameter {
    let required = map.get("required").is_some_and(truthy);

    let mut comment = text(map, "description");
    if comment.is_empty() {
        comment = text(map, "comment");
    }

    let mut parameter = Parameter::new(text(map, "name"), text(map, "default"))
        .with_comment(comment)
        .with_type_hint(text(map, "cpp_type"))
        .with_options(text(map, "options"))
        .with_required(required)
        .with_enabled(required);
    parameter.group = text(map, "group_name");
    parameter
}

/// Parse a whole schema document: a list of block maps
///
/// # Errors
///
/// Returns an error if:
/// - The text is not valid YAML
/// - The top-level value is neither a list nor empty
pub fn parse_schema_document(yaml: &str) -> Result<Vec<Block>, TreeError> {
    let document: Value = serde_yaml::from_str(yaml).map_err(|e| {
        if let Some(location) = e.location() {
            TreeError::schema(format!(
                "Failed to parse YAML at line {}, column {}: {e}",
                location.line(),
                location.column()
            ))
        } else {
            TreeError::schema(format!("Failed to parse YAML: {e}"))
        }
    })?;

    match document {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(entries) => Ok(entries
            .iter()
            .filter(|entry| {
                let keep = entry.is_mapping();
                if !keep {
                    warn!("Skipping top-level schema entry that is not a map");
                }
                keep
            })
            .map(Block::from_map)
            .collect()),
        _ => Err(TreeError::schema(
            "Top-level value of a schema document must be a list of blocks",
        )),
    }
}

fn list<'a>(map: &'a Value, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Textual form of a scalar under `key`, empty when absent or null
fn text(map: &Value, key: &str) -> String {
    map.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim().to_owned())
            .unwrap_or_default(),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
