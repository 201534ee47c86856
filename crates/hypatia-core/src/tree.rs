//! The nested-configuration-tree contract.
//!
//! [`ConfigTree`] is the path-addressable view consumers expect from any
//! configuration provider: colon-delimited keys, on-demand section lookup,
//! children enumeration, and a reload token. [`TreeSection`] is the section
//! object synthesized for each lookup; it is a value, not a live handle.
//!
//! Missing paths are represented, not raised: looking up a section that does
//! not exist returns a section with no value, so pipelines can probe
//! optional settings without error handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::caseless;
use crate::convert;
use crate::error::ConfigError;
use crate::value::Value;

/// A change-notification token for configuration reloads.
///
/// Tokens handed out by the settings store never fire: the store has no
/// live-reload mechanism, and the token exists only to satisfy the tree
/// contract's shape. The token is still an explicit, inspectable object,
/// so "never fires" is observable behavior rather than implicit absence.
#[derive(Debug, Clone, Default)]
pub struct ReloadToken {
    changed: Arc<AtomicBool>,
}

impl ReloadToken {
    /// Creates a token that never fires.
    #[must_use]
    pub fn never() -> Self {
        Self::default()
    }

    /// Returns `true` if the token has fired.
    ///
    /// Always `false` for tokens created with [`never`](Self::never).
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.changed.load(Ordering::Acquire)
    }
}

/// The path-addressable configuration-tree contract.
///
/// Path segments are joined with exactly `:`; there is no escaping
/// mechanism, so a key containing `:` is indistinguishable from a path.
/// Key comparison is case-insensitive throughout.
pub trait ConfigTree {
    /// Returns the scalar string form of the value at `key`, or `None` if
    /// the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Conversion`] if the value exists but has no
    /// scalar string form; use [`section`](Self::section) for composites.
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;

    /// Writes a value through the tree view.
    ///
    /// # Errors
    ///
    /// Read-only views (the settings-store adapter included) refuse with
    /// [`ConfigError::ReadOnly`].
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;

    /// Looks up a section by colon-delimited path.
    ///
    /// Always returns a section object; a missing path yields a section
    /// with no value.
    fn section(&self, path: &str) -> TreeSection;

    /// Enumerates the immediate child sections.
    fn children(&self) -> Vec<TreeSection>;

    /// Returns the reload-notification token for this tree.
    fn reload_token(&self) -> ReloadToken;
}

/// A configuration section synthesized on demand from a settings tree.
///
/// Sections are plain values: narrowing with [`section`](Self::section)
/// clones the relevant subtree rather than holding a reference into the
/// store.
#[derive(Debug, Clone)]
pub struct TreeSection {
    key: String,
    path: String,
    node: Option<Value>,
}

impl TreeSection {
    /// Creates a section from a key, full path, and optional subtree.
    pub fn new(key: impl Into<String>, path: impl Into<String>, node: Option<Value>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            node,
        }
    }

    /// The section's own name (the last path segment).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The full colon-joined path of this section from the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The scalar string form of this section's value, if it has one.
    ///
    /// `None` for missing sections and for composite values.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.node.as_ref().and_then(convert::scalar_string)
    }

    /// Returns `true` if the section corresponds to an existing value.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    /// Narrows into a nested section by colon-delimited relative path.
    ///
    /// Map children match case-insensitively; array children match by
    /// numeric index. Missing segments produce valueless sections.
    #[must_use]
    pub fn section(&self, path: &str) -> TreeSection {
        let (segment, rest) = match path.find(':') {
            Some(split) => (&path[..split], Some(&path[split + 1..])),
            None => (path, None),
        };

        let node = self.node.as_ref().and_then(|node| lookup(node, segment));
        let child = TreeSection::new(segment, join(&self.path, segment), node);
        match rest {
            Some(rest) => child.section(rest),
            None => child,
        }
    }

    /// Enumerates the immediate children of this section.
    ///
    /// Map children appear in insertion order; array children are keyed by
    /// their index. Scalar and missing sections have no children.
    #[must_use]
    pub fn children(&self) -> Vec<TreeSection> {
        match &self.node {
            Some(Value::Map(map)) => map
                .iter()
                .map(|(key, value)| {
                    TreeSection::new(key, join(&self.path, key), Some(value.clone()))
                })
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    let key = index.to_string();
                    let path = join(&self.path, &key);
                    TreeSection::new(key, path, Some(value.clone()))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

// Finds a direct child of `node` by segment name.
fn lookup(node: &Value, segment: &str) -> Option<Value> {
    match node {
        Value::Map(map) => map
            .iter()
            .find(|(key, _)| caseless::eq_ignore_case(key, segment))
            .map(|(_, value)| value.clone()),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .cloned(),
        _ => None,
    }
}

fn join(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_owned()
    } else {
        format!("{base}:{key}")
    }
}
