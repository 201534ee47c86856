//! The concurrent settings store.
//!
//! [`Settings`] is the single shared mutable resource of the configuration
//! system: a case-insensitive key/value map of [`RawValue`] entries,
//! readable and writable from any number of threads without external
//! locking. Reads resolve deferred script values transparently against the
//! bound execution state, if any.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use hypatia_core::{ConfigError, ExecutionState, ReloadToken, SourceSection, Value};

use crate::builder;
use crate::key::SettingKey;
use crate::raw::RawValue;

/// A hierarchical, concurrency-safe settings store with deferred
/// (script-valued) entries.
///
/// Keys compare case-insensitively. Single-key operations are individually
/// atomic; enumeration offers no snapshot isolation, so a concurrent writer
/// may or may not be observed by an in-flight iteration.
///
/// A store starts unbound: values written before an execution state exists
/// cannot be classified as scripts. [`with_execution_state`]
/// (Self::with_execution_state) is the deferred second pass that
/// re-classifies every entry once the scripting engine is available.
///
/// # Example
///
/// ```
/// use hypatia_settings::Settings;
/// use hypatia_core::Value;
///
/// let settings = Settings::new();
/// settings.set("Title", "My Site");
/// assert_eq!(settings.get("title").unwrap(), Some(Value::from("My Site")));
/// ```
#[derive(Default)]
pub struct Settings {
    entries: DashMap<SettingKey, RawValue>,
    state: Option<Arc<dyn ExecutionState>>,
    reload: ReloadToken,
}

impl Settings {
    /// Creates an empty, unbound store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbound store from a hierarchical configuration source.
    ///
    /// Nested sections and zero-indexed lists are flattened into composite
    /// values under their top-level keys; every entry is stored concrete
    /// because no execution state exists yet to recognize scripts.
    #[must_use]
    pub fn from_source(source: &dyn SourceSection) -> Self {
        let settings = Self::new();
        for (key, value) in builder::build_root(source) {
            settings
                .entries
                .insert(SettingKey::new(key), RawValue::concrete(value));
        }
        settings
    }

    /// Returns `true` once the store is bound to an execution state.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.state.is_some()
    }

    /// Writes a setting, overwriting any existing entry for the key.
    ///
    /// The value is classified on write: with a bound execution state, a
    /// string carrying the script marker becomes a deferred entry.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let raw = RawValue::classify(value.into(), self.state.as_deref());
        trace!(key = %key, deferred = raw.is_deferred(), "set");
        self.entries.insert(SettingKey::from(key), raw);
    }

    /// Adds a setting, failing if the key already exists
    /// (case-insensitively).
    ///
    /// The existence check and the insert are two steps, not one atomic
    /// operation: a concurrent `set` for the same key can land between
    /// them, in which case this call overwrites it without reporting a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] if the key is present.
    pub fn try_add(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), ConfigError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(ConfigError::duplicate_key(key));
        }
        self.set(key, value);
        Ok(())
    }

    /// Reads a setting, resolving deferred values against the bound
    /// execution state.
    ///
    /// Absent keys are `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Propagates script evaluation failures from the execution state.
    pub fn get(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        match self.entries.get(&SettingKey::new(key)) {
            Some(entry) => {
                let value = entry.resolve(self.state.as_deref())?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Reads a setting that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] for absent keys; use
    /// [`get`](Self::get) to probe optional settings.
    pub fn require(&self, key: &str) -> Result<Value, ConfigError> {
        self.get(key)?
            .ok_or_else(|| ConfigError::key_not_found(key))
    }

    /// Reads the unresolved form of a setting: the concrete value, or the
    /// original literal for deferred entries.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.entries
            .get(&SettingKey::new(key))
            .map(|entry| entry.raw_value())
    }

    /// Returns `true` if the key is present (case-insensitively).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&SettingKey::new(key))
    }

    /// Removes a setting, returning `true` iff an entry existed.
    pub fn remove(&self, key: &str) -> bool {
        let removed = self.entries.remove(&SettingKey::new(key)).is_some();
        if removed {
            trace!(key = %key, "removed");
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The stored keys, in backing-map iteration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.key().as_str().to_owned())
            .collect()
    }

    /// Iterates over `(key, resolved value)` pairs.
    ///
    /// Each value is resolved at iteration time, not when the iterator is
    /// created; there is no snapshot isolation with respect to concurrent
    /// writers.
    pub fn iter(&self) -> impl Iterator<Item = (String, Result<Value, ConfigError>)> + '_ {
        self.entries.iter().map(|entry| {
            let value = entry
                .value()
                .resolve(self.state.as_deref())
                .map_err(ConfigError::from);
            (entry.key().as_str().to_owned(), value)
        })
    }

    /// Iterates over `(key, unresolved value)` pairs.
    pub fn raw_iter(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key().as_str().to_owned(), entry.value().raw_value()))
    }

    /// The reload token the configuration-tree adapter hands out.
    ///
    /// Never fires; see [`ReloadToken`].
    #[must_use]
    pub fn reload(&self) -> &ReloadToken {
        &self.reload
    }

    /// Binds the store to an execution state.
    ///
    /// Binding is one-shot per store: if this store is already bound, it is
    /// returned unchanged and the new state is discarded. Otherwise a new,
    /// independent store is produced (the original stays usable and
    /// unbound) in which every existing entry has been re-classified
    /// against the new state (a string loaded from bootstrap configuration
    /// may now become deferred) and the state is installed for future
    /// writes.
    #[must_use]
    pub fn with_execution_state(self: &Arc<Self>, state: Arc<dyn ExecutionState>) -> Arc<Self> {
        if self.state.is_some() {
            return Arc::clone(self);
        }

        let entries = DashMap::new();
        let mut deferred = 0usize;
        for entry in self.entries.iter() {
            let raw = RawValue::classify(entry.value().raw_value(), Some(state.as_ref()));
            if raw.is_deferred() {
                deferred += 1;
            }
            entries.insert(entry.key().clone(), raw);
        }
        debug!(
            entries = entries.len(),
            deferred, "bound settings to execution state"
        );

        Arc::new(Self {
            entries,
            state: Some(state),
            reload: ReloadToken::never(),
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("entries", &self.entries.len())
            .field("bound", &self.state.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypatia_core::fixtures::{site_source, StubExecutionState};

    #[test]
    fn test_round_trip_without_state() {
        let settings = Settings::new();
        settings.set("Title", "My Site");
        settings.set("Count", 3);
        assert_eq!(settings.get("Title").unwrap(), Some(Value::from("My Site")));
        assert_eq!(settings.get("Count").unwrap(), Some(Value::from(3)));
    }

    #[test]
    fn test_case_insensitive_access() {
        let settings = Settings::new();
        settings.set("Foo", 1);

        assert_eq!(settings.get("foo").unwrap(), Some(Value::from(1)));
        assert_eq!(settings.get("FOO").unwrap(), Some(Value::from(1)));
        assert!(settings.contains_key("fOo"));
        assert!(settings.remove("FOO"));
        assert!(!settings.contains_key("Foo"));
    }

    #[test]
    fn test_set_overwrites_any_spelling() {
        let settings = Settings::new();
        settings.set("Foo", 1);
        settings.set("FOO", 2);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("foo").unwrap(), Some(Value::from(2)));
    }

    #[test]
    fn test_try_add_rejects_duplicates() {
        let settings = Settings::new();
        settings.try_add("k", 1).unwrap();

        let err = settings.try_add("K", 2).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKey { .. }));
        // The stored value is unchanged.
        assert_eq!(settings.get("k").unwrap(), Some(Value::from(1)));
    }

    #[test]
    fn test_require_missing_key() {
        let settings = Settings::new();
        let err = settings.require("absent").unwrap_err();
        assert!(matches!(err, ConfigError::KeyNotFound { .. }));
        // get and contains_key never fail for absent keys.
        assert_eq!(settings.get("absent").unwrap(), None);
        assert!(!settings.contains_key("absent"));
    }

    #[test]
    fn test_from_source_flattens_tree() {
        let settings = Settings::from_source(&site_source());
        assert_eq!(settings.len(), 4);
        assert_eq!(
            settings.get("host").unwrap(),
            Some(Value::from("example.com"))
        );

        let pipelines = settings.get("Pipelines").unwrap().unwrap();
        let items = pipelines.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::from("markdown"));

        let site = settings.get("Site").unwrap().unwrap();
        assert_eq!(
            site.as_map().unwrap().get("Theme"),
            Some(&Value::from("dark"))
        );
    }

    #[test]
    fn test_unbound_store_keeps_script_literals() {
        let settings = Settings::new();
        settings.set("Computed", "=> 1 + 1");
        // No execution state: the literal round-trips unchanged.
        assert_eq!(
            settings.get("Computed").unwrap(),
            Some(Value::from("=> 1 + 1"))
        );
    }

    #[test]
    fn test_binding_reclassifies_existing_entries() {
        let settings = Arc::new(Settings::new());
        settings.set("Computed", "=> 1 + 1");
        settings.set("Plain", "text");

        let state = Arc::new(StubExecutionState::new().with_result("1 + 1", Value::from(2)));
        let bound = settings.with_execution_state(state);

        assert_eq!(bound.get("Computed").unwrap(), Some(Value::from(2)));
        assert_eq!(bound.get("Plain").unwrap(), Some(Value::from("text")));
        // The original store is untouched and still unbound.
        assert!(!settings.is_bound());
        assert_eq!(
            settings.get("Computed").unwrap(),
            Some(Value::from("=> 1 + 1"))
        );
    }

    #[test]
    fn test_binding_is_one_shot() {
        let settings = Arc::new(Settings::new());
        settings.set("Computed", "=> x");

        let first = Arc::new(StubExecutionState::new().with_result("x", Value::from("first")));
        let second = Arc::new(StubExecutionState::new().with_result("x", Value::from("second")));

        let bound = settings.with_execution_state(first);
        let rebound = bound.with_execution_state(second);

        // Rebinding returns the same store; the second state is discarded.
        assert!(Arc::ptr_eq(&bound, &rebound));
        assert_eq!(rebound.get("Computed").unwrap(), Some(Value::from("first")));
    }

    #[test]
    fn test_bound_store_classifies_new_writes() {
        let settings = Arc::new(Settings::new());
        let state = Arc::new(StubExecutionState::new().with_result("now", Value::from("later")));
        let bound = settings.with_execution_state(state);

        bound.set("Computed", "=> now");
        assert_eq!(bound.get("Computed").unwrap(), Some(Value::from("later")));
    }

    #[test]
    fn test_binding_copies_are_independent() {
        let settings = Arc::new(Settings::new());
        settings.set("Shared", 1);

        let bound = settings.with_execution_state(Arc::new(StubExecutionState::new()));
        bound.set("Shared", 2);
        settings.remove("Shared");

        assert_eq!(bound.get("Shared").unwrap(), Some(Value::from(2)));
        assert_eq!(settings.get("Shared").unwrap(), None);
    }

    #[test]
    fn test_resolution_is_cached_per_entry() {
        let settings = Arc::new(Settings::new());
        settings.set("Computed", "=> x");

        let state = Arc::new(StubExecutionState::new());
        let bound = settings.with_execution_state(Arc::clone(&state) as Arc<dyn ExecutionState>);

        let first = bound.get("Computed").unwrap();
        let second = bound.get("Computed").unwrap();
        assert_eq!(first, second);
        assert_eq!(state.evaluation_count(), 1);
    }

    #[test]
    fn test_script_failure_propagates_through_get() {
        let settings = Arc::new(Settings::new());
        settings.set("Computed", "=> x");

        let bound = settings.with_execution_state(Arc::new(StubExecutionState::failing("down")));
        let err = bound.get("Computed").unwrap_err();
        assert!(matches!(err, ConfigError::Script(_)));
    }

    #[test]
    fn test_iter_resolves_values() {
        let settings = Arc::new(Settings::new());
        settings.set("A", 1);
        settings.set("B", "=> x");

        let state = Arc::new(StubExecutionState::new().with_result("x", Value::from(9)));
        let bound = settings.with_execution_state(state);

        let mut resolved: Vec<(String, Value)> = bound
            .iter()
            .map(|(key, value)| (key, value.unwrap()))
            .collect();
        resolved.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            resolved,
            [
                ("A".to_owned(), Value::from(1)),
                ("B".to_owned(), Value::from(9)),
            ]
        );
    }

    #[test]
    fn test_raw_iter_keeps_literals() {
        let settings = Arc::new(Settings::new());
        settings.set("B", "=> x");
        let bound = settings.with_execution_state(Arc::new(StubExecutionState::new()));

        let raw: Vec<(String, Value)> = bound.raw_iter().collect();
        assert_eq!(raw, [("B".to_owned(), Value::from("=> x"))]);
    }

    #[test]
    fn test_clear_and_len() {
        let settings = Settings::new();
        settings.set("a", 1);
        settings.set("b", 2);
        assert_eq!(settings.len(), 2);
        assert!(!settings.is_empty());

        settings.clear();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let settings = Arc::new(Settings::new());
        let mut handles = Vec::new();

        for worker in 0..4 {
            let settings = Arc::clone(&settings);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("key-{worker}-{i}");
                    settings.set(key.clone(), i);
                    assert_eq!(settings.get(&key).unwrap(), Some(Value::from(i)));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(settings.len(), 400);
    }
}
