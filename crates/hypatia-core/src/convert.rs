//! Scalar string conversion.
//!
//! The configuration-tree contract renders settings as strings. This module
//! is the shared conversion point: scalar values have a canonical string
//! form, while null and composite values do not and must be accessed as
//! sections instead.

use crate::error::ConfigError;
use crate::value::Value;

/// Renders a scalar value as its string form.
///
/// Returns `None` for `Null`, `Array`, and `Map` values.
///
/// # Example
///
/// ```
/// use hypatia_core::{convert, Value};
///
/// assert_eq!(convert::scalar_string(&Value::from(8080)), Some("8080".to_owned()));
/// assert_eq!(convert::scalar_string(&Value::Null), None);
/// ```
#[must_use]
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::Array(_) | Value::Map(_) => None,
    }
}

/// Renders a scalar value as its string form, failing for values that have
/// none.
///
/// # Errors
///
/// Returns [`ConfigError::Conversion`] for `Null`, `Array`, and `Map`
/// values; callers wanting a composite value must use a section lookup.
pub fn require_scalar_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    scalar_string(value).ok_or_else(|| {
        ConfigError::conversion(
            key,
            format!("{} value has no scalar string form", value.type_name()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(scalar_string(&Value::from("text")), Some("text".to_owned()));
        assert_eq!(scalar_string(&Value::from(42)), Some("42".to_owned()));
        assert_eq!(scalar_string(&Value::from(true)), Some("true".to_owned()));
        assert_eq!(scalar_string(&Value::from(2.5)), Some("2.5".to_owned()));
    }

    #[test]
    fn test_composite_values_have_no_scalar_form() {
        assert_eq!(scalar_string(&Value::Null), None);
        assert_eq!(scalar_string(&Value::Array(vec![Value::from(1)])), None);
        assert_eq!(scalar_string(&Value::Map(IndexMap::new())), None);
    }

    #[test]
    fn test_require_scalar_string_fails_for_map() {
        let err = require_scalar_string("Pipelines", &Value::Map(IndexMap::new())).unwrap_err();
        assert!(matches!(err, ConfigError::Conversion { .. }));
        assert!(err.to_string().contains("Pipelines"));
        assert!(err.to_string().contains("map"));
    }

    #[test]
    fn test_require_scalar_string_passes_for_string() {
        let rendered = require_scalar_string("Host", &Value::from("example.com")).unwrap();
        assert_eq!(rendered, "example.com");
    }
}
