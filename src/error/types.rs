//! Custom error types with exit codes

use std::io;
use thiserror::Error;

/// Main error type for block tree operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TreeError {
    /// I/O Error - a file could not be opened, read, or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Parse Error - a section has no matching close line
    #[error("Unbalanced section '{section}' opened at line {line}: no matching close marker")]
    UnbalancedSection { section: String, line: usize },

    /// Schema Error - the YAML schema document could not be decoded
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Configuration Error - missing or invalid tool configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Edit Error - a tree edit referred to something that does not exist
    #[error("Edit error: {message}")]
    Edit { message: String },
}

impl TreeError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Io { .. } => 2,
            Self::UnbalancedSection { .. } => 3,
            Self::Schema { .. } => 4,
            Self::Edit { .. } => 5,
        }
    }

    /// True when the failure happened while touching the filesystem rather
    /// than while interpreting file contents
    #[must_use]
    #[inline]
    pub const fn is_io(&self) -> bool {
        matches!(*self, Self::Io { .. })
    }

    /// Create an I/O error for the given path
    #[inline]
    pub fn io<S: Into<String>>(path: S, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unbalanced section error
    #[inline]
    pub fn unbalanced_section<S: Into<String>>(section: S, line: usize) -> Self {
        Self::UnbalancedSection {
            section: section.into(),
            line,
        }
    }

    /// Create a schema error
    #[inline]
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an edit error
    #[inline]
    pub fn edit<S: Into<String>>(message: S) -> Self {
        Self::Edit {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_distinguishable() {
        let err = TreeError::io("/missing.i", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_io());
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("/missing.i"));

        let parse = TreeError::unbalanced_section("Kernels", 4);
        assert!(!parse.is_io());
        assert!(parse.to_string().contains("Unbalanced section 'Kernels'"));
    }
}
