//! A single named configuration value

use serde::{Deserialize, Serialize};

/// One `name = value` entry of a block
///
/// The value is always kept as text because the target format is text; any
/// quoting must already be part of `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub value: String,
    /// Written after the value as an inline `# comment`
    pub comment: String,
    /// Native type name from the schema, documentation only
    pub type_hint: String,
    /// Free-form description of the allowed values
    pub options: String,
    pub group: String,
    /// Required parameters are always written uncommented in active blocks
    pub required: bool,
    /// Enabled parameters are written uncommented in active blocks
    pub enabled: bool,
}

impl Parameter {
    /// Create an enabled parameter. Surrounding whitespace is trimmed from
    /// the name.
    #[must_use]
    #[inline]
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into().trim().to_owned(),
            value: value.into(),
            enabled: true,
            ..Self::default()
        }
    }

    #[must_use]
    #[inline]
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    #[inline]
    pub fn with_type_hint<S: Into<String>>(mut self, type_hint: S) -> Self {
        self.type_hint = type_hint.into();
        self
    }

    #[must_use]
    #[inline]
    pub fn with_options<S: Into<String>>(mut self, options: S) -> Self {
        self.options = options.into();
        self
    }

    #[must_use]
    #[inline]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    #[inline]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Render as `name = value`, value untouched
    #[must_use]
    #[inline]
    pub fn to_getpot_fragment(&self) -> String {
        format!("{} = {}", self.name, self.value)
    }
}
