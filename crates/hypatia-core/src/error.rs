//! Settings error types.

use thiserror::Error;

use crate::script::ScriptError;

/// Errors raised by the settings store and the configuration-tree contract.
///
/// All variants are synchronous contract violations surfaced directly to the
/// caller; nothing is retried internally.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An `add` found the key already present (case-insensitively).
    #[error("the key {key} already exists")]
    DuplicateKey {
        /// The key that already exists.
        key: String,
    },

    /// A direct-index read found no entry for the key.
    #[error("the key {key} was not found in settings")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },

    /// A mutation was attempted through a read-only configuration view.
    #[error("the configuration view is read-only, cannot write {key}")]
    ReadOnly {
        /// The key the caller tried to write.
        key: String,
    },

    /// A value could not be rendered as a scalar string.
    #[error("cannot convert value for {key}: {reason}")]
    Conversion {
        /// The key whose value failed to convert.
        key: String,
        /// Explanation of why the conversion failed.
        reason: String,
    },

    /// Deferred-expression evaluation failed in the scripting engine.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

impl ConfigError {
    /// Creates a new duplicate-key error.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Creates a new key-not-found error.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Creates a new read-only error.
    pub fn read_only(key: impl Into<String>) -> Self {
        Self::ReadOnly { key: key.into() }
    }

    /// Creates a new conversion error.
    pub fn conversion(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_error() {
        let err = ConfigError::duplicate_key("Title");
        assert!(err.to_string().contains("Title"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_key_not_found_error() {
        let err = ConfigError::key_not_found("Host");
        assert!(err.to_string().contains("Host"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_read_only_error() {
        let err = ConfigError::read_only("Title");
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_conversion_error() {
        let err = ConfigError::conversion("Pipelines", "cannot render map value");
        assert!(err.to_string().contains("Pipelines"));
        assert!(err.to_string().contains("cannot render map value"));
    }

    #[test]
    fn test_script_error_passthrough() {
        let err = ConfigError::from(ScriptError::new("boom"));
        assert!(err.to_string().contains("boom"));
    }
}
