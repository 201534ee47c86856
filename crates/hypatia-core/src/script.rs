//! The scripting collaborator boundary.
//!
//! Settings may hold deferred values: string literals carrying a script
//! marker that are evaluated lazily once an execution state exists. The
//! expression syntax, compilation, and evaluation all belong to the
//! scripting engine behind [`ExecutionState`]; this crate only asks it two
//! questions: "is this literal a script?" and "what does it evaluate to?".

use thiserror::Error;

use crate::value::Value;

/// The capability object a scripting engine exposes to the settings system.
///
/// Implementations are shared across threads and may block inside
/// [`evaluate`](Self::evaluate); the settings store treats evaluation as an
/// opaque synchronous call.
pub trait ExecutionState: Send + Sync {
    /// Tests whether `literal` carries the script marker syntax, returning
    /// the expression source if it does.
    ///
    /// The marker syntax is owned by the scripting engine and is opaque to
    /// the settings system.
    fn script_source(&self, literal: &str) -> Option<String>;

    /// Evaluates a qualifying expression to a value.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if evaluation fails; the settings store
    /// propagates the error unchanged to whoever read the setting.
    fn evaluate(&self, source: &str) -> Result<Value, ScriptError>;
}

/// An opaque script evaluation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("script evaluation failed: {message}")]
pub struct ScriptError {
    message: String,
}

impl ScriptError {
    /// Creates a new script error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The engine-provided failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
