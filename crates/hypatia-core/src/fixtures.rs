//! Test fixtures for Hypatia development and testing.
//!
//! This module provides a scripted-execution stub and canned configuration
//! sources that can be used in tests across the Hypatia codebase.
//!
//! # Example
//!
//! ```
//! use hypatia_core::fixtures::StubExecutionState;
//! use hypatia_core::{ExecutionState, Value};
//!
//! let state = StubExecutionState::new().with_result("1 + 1", Value::from(2));
//! let source = state.script_source("=> 1 + 1").unwrap();
//! assert_eq!(state.evaluate(&source).unwrap(), Value::from(2));
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::script::{ExecutionState, ScriptError};
use crate::source::MemorySection;
use crate::value::Value;

/// The script marker prefix the stub recognizes.
///
/// Matches the marker the real scripting engine uses, so fixtures and
/// production settings files look alike.
pub const SCRIPT_MARKER: &str = "=>";

/// An [`ExecutionState`] stub with canned results and an evaluation counter.
///
/// Expressions without a canned result echo back as
/// `evaluated:<expression>`, which is enough for most resolution tests.
#[derive(Debug, Default)]
pub struct StubExecutionState {
    results: HashMap<String, Value>,
    failure: Option<String>,
    evaluations: AtomicUsize,
}

impl StubExecutionState {
    /// Creates a stub with no canned results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canned result for an expression source.
    #[must_use]
    pub fn with_result(mut self, source: impl Into<String>, value: Value) -> Self {
        self.results.insert(source.into(), value);
        self
    }

    /// Creates a stub whose every evaluation fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// The number of evaluations performed so far.
    #[must_use]
    pub fn evaluation_count(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl ExecutionState for StubExecutionState {
    fn script_source(&self, literal: &str) -> Option<String> {
        literal
            .strip_prefix(SCRIPT_MARKER)
            .map(|source| source.trim().to_owned())
    }

    fn evaluate(&self, source: &str) -> Result<Value, ScriptError> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(ScriptError::new(message.clone()));
        }
        Ok(self
            .results
            .get(source)
            .cloned()
            .unwrap_or_else(|| Value::String(format!("evaluated:{source}"))))
    }
}

/// Builds a representative configuration source for tests: two scalars, a
/// nested section, and a zero-indexed list.
#[must_use]
pub fn site_source() -> MemorySection {
    MemorySection::root()
        .with_child(MemorySection::leaf("Host", "example.com"))
        .with_child(MemorySection::leaf("Title", "Example"))
        .with_child(
            MemorySection::branch("Site")
                .with_child(MemorySection::leaf("Theme", "dark"))
                .with_child(MemorySection::leaf("BaseUrl", "https://example.com")),
        )
        .with_child(
            MemorySection::branch("Pipelines")
                .with_child(MemorySection::leaf("0", "markdown"))
                .with_child(MemorySection::leaf("1", "razor"))
                .with_child(MemorySection::leaf("2", "minify")),
        )
}
