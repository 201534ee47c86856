//! Raw setting entries.
//!
//! Every slot in the settings store holds a [`RawValue`]: either a concrete
//! value or a deferred script expression that resolves lazily against an
//! execution state. Classification happens once, at write or binding time,
//! through the single pure predicate [`RawValue::classify`].

use parking_lot::RwLock;

use hypatia_core::{ExecutionState, ScriptError, Value};

/// A stored setting entry: concrete, or deferred until evaluation.
#[derive(Debug, Clone)]
pub enum RawValue {
    /// A value that is already final.
    Concrete(Value),
    /// A script expression evaluated on first read against the bound
    /// execution state.
    Deferred(DeferredValue),
}

impl RawValue {
    /// Wraps a value, deciding `Concrete` vs `Deferred` by syntactic
    /// inspection.
    ///
    /// A value is deferred only when it is a string, an execution state is
    /// available, and the state recognizes the script marker syntax. All
    /// other values, nested maps and lists included, are concrete.
    #[must_use]
    pub fn classify(value: Value, state: Option<&dyn ExecutionState>) -> Self {
        if let (Value::String(literal), Some(state)) = (&value, state) {
            if let Some(source) = state.script_source(literal) {
                return Self::Deferred(DeferredValue::new(literal.clone(), source));
            }
        }
        Self::Concrete(value)
    }

    /// Wraps a value as concrete without classification.
    #[must_use]
    pub fn concrete(value: Value) -> Self {
        Self::Concrete(value)
    }

    /// Returns `true` if this entry is a deferred script expression.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The unresolved form of this entry: the concrete value, or the
    /// original literal for deferred entries.
    #[must_use]
    pub fn raw_value(&self) -> Value {
        match self {
            Self::Concrete(value) => value.clone(),
            Self::Deferred(deferred) => Value::String(deferred.literal.clone()),
        }
    }

    /// Resolves this entry against an execution state.
    ///
    /// Concrete values come back unchanged. Deferred values evaluate once
    /// and cache the result; without a state they come back as their
    /// unresolved literal, never as an error.
    ///
    /// # Errors
    ///
    /// Propagates [`ScriptError`] from the execution state unchanged.
    pub fn resolve(&self, state: Option<&dyn ExecutionState>) -> Result<Value, ScriptError> {
        match self {
            Self::Concrete(value) => Ok(value.clone()),
            Self::Deferred(deferred) => deferred.resolve(state),
        }
    }
}

/// A deferred script expression with a resolve-once result cache.
///
/// Two [`DeferredValue`] instances holding the same expression resolve
/// independently; there is no cross-instance memoization.
#[derive(Debug)]
pub struct DeferredValue {
    literal: String,
    source: String,
    cached: RwLock<Option<Value>>,
}

impl DeferredValue {
    fn new(literal: String, source: String) -> Self {
        Self {
            literal,
            source,
            cached: RwLock::new(None),
        }
    }

    /// The original literal as written, marker included.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The expression source the execution state will evaluate.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` once a result has been cached.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.cached.read().is_some()
    }

    fn resolve(&self, state: Option<&dyn ExecutionState>) -> Result<Value, ScriptError> {
        if let Some(cached) = self.cached.read().as_ref() {
            return Ok(cached.clone());
        }
        let Some(state) = state else {
            // Unbound: hand back the unresolved literal without caching so
            // a later binding still evaluates.
            return Ok(Value::String(self.literal.clone()));
        };
        let value = state.evaluate(&self.source)?;
        // Two racing first resolutions may both evaluate; the later write
        // replaces the whole cached slot, so readers never see a torn value.
        *self.cached.write() = Some(value.clone());
        Ok(value)
    }
}

impl Clone for DeferredValue {
    fn clone(&self) -> Self {
        Self {
            literal: self.literal.clone(),
            source: self.source.clone(),
            cached: RwLock::new(self.cached.read().clone()),
        }
    }
}
