//! Case-insensitive setting keys.

use std::fmt;
use std::hash::{Hash, Hasher};

use hypatia_core::caseless;

/// A setting key that hashes and compares case-insensitively while
/// preserving the spelling it was created with.
///
/// Two keys are the same entry in the store iff they are equal after case
/// folding; enumeration reports whichever spelling was stored first.
///
/// # Example
///
/// ```
/// use hypatia_settings::SettingKey;
///
/// assert_eq!(SettingKey::new("OutputPath"), SettingKey::new("outputpath"));
/// assert_eq!(SettingKey::new("OutputPath").as_str(), "OutputPath");
/// ```
#[derive(Debug, Clone)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key's original spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning its original spelling.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl PartialEq for SettingKey {
    fn eq(&self, other: &Self) -> bool {
        caseless::eq_ignore_case(&self.0, &other.0)
    }
}

impl Eq for SettingKey {}

impl Hash for SettingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in caseless::fold(&self.0) {
            c.hash(state);
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SettingKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
