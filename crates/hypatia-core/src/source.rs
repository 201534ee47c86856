//! Hierarchical configuration sources.
//!
//! A [`SourceSection`] is the read-side contract the settings system expects
//! from whatever loads configuration (file parsers, environment readers,
//! command-line overrides). Each section carries a key, its colon-joined
//! path from the root, an optional directly-assigned scalar value, and its
//! children in source order.

/// A node in an external hierarchical configuration source.
///
/// A section either has a directly-assigned scalar [`value`](Self::value)
/// (a leaf) or children (a branch); the tree builder recurses into branches
/// and takes the scalar from leaves.
pub trait SourceSection {
    /// The name of this section, relative to its parent.
    fn key(&self) -> &str;

    /// The full colon-joined path of this section from the root.
    fn path(&self) -> String;

    /// The directly-assigned scalar value, if any.
    fn value(&self) -> Option<&str>;

    /// The child sections, in source order.
    fn children(&self) -> Vec<&dyn SourceSection>;
}

/// An owned, in-memory [`SourceSection`] tree.
///
/// Useful for configuration loaded programmatically and for tests. Paths are
/// maintained automatically: attaching a child rebases the child subtree
/// under the parent's path.
///
/// # Example
///
/// ```
/// use hypatia_core::{MemorySection, SourceSection};
///
/// let root = MemorySection::root()
///     .with_child(MemorySection::leaf("Host", "example.com"))
///     .with_child(
///         MemorySection::branch("Pipelines")
///             .with_child(MemorySection::leaf("0", "markdown")),
///     );
///
/// let children = root.children();
/// assert_eq!(children[1].path(), "Pipelines");
/// assert_eq!(children[1].children()[0].path(), "Pipelines:0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySection {
    key: String,
    path: String,
    value: Option<String>,
    children: Vec<MemorySection>,
}

impl MemorySection {
    /// Creates the root section (empty key and path, no value).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a leaf section with a directly-assigned scalar value.
    pub fn leaf(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            path: key.clone(),
            key,
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Creates a branch section with no directly-assigned value.
    pub fn branch(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            path: key.clone(),
            key,
            value: None,
            children: Vec::new(),
        }
    }

    /// Attaches a child section, rebasing its subtree under this section's
    /// path.
    #[must_use]
    pub fn with_child(mut self, mut child: MemorySection) -> Self {
        child.rebase(&self.path);
        self.children.push(child);
        self
    }

    // Recomputes paths after this subtree is attached under `base`.
    fn rebase(&mut self, base: &str) {
        self.path = if base.is_empty() {
            self.key.clone()
        } else {
            format!("{base}:{}", self.key)
        };
        let path = self.path.clone();
        for child in &mut self.children {
            child.rebase(&path);
        }
    }
}

impl SourceSection for MemorySection {
    fn key(&self) -> &str {
        &self.key
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn children(&self) -> Vec<&dyn SourceSection> {
        self.children
            .iter()
            .map(|child| child as &dyn SourceSection)
            .collect()
    }
}
