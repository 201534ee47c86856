//! The configuration-tree view of a settings store.
//!
//! [`Settings`] implements [`ConfigTree`] so that consumers written against
//! the generic nested-configuration contract (colon-delimited paths,
//! section enumeration, a reload token) can read settings without knowing
//! about the store. The view is read-only: mutation happens only through
//! the native [`Settings`] API.
//!
//! Section lookups use the unresolved form of each entry (a deferred
//! setting appears as its literal), matching the contract's expectation
//! that sections are cheap, synchronous, and never evaluate scripts.

use hypatia_core::{convert, ConfigError, ConfigTree, ReloadToken, TreeSection};
use tracing::trace;

use crate::store::Settings;

impl ConfigTree for Settings {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match Settings::get(self, key)? {
            Some(value) => convert::require_scalar_string(key, &value).map(Some),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), ConfigError> {
        Err(ConfigError::read_only(key))
    }

    fn section(&self, path: &str) -> TreeSection {
        let (root_key, rest) = match path.find(':') {
            Some(split) => (&path[..split], Some(&path[split + 1..])),
            None => (path, None),
        };

        let node = self.raw(root_key);
        if node.is_none() {
            trace!(path = %path, "section lookup missed");
        }
        let section = TreeSection::new(root_key, root_key, node);
        match rest {
            Some(rest) => section.section(rest),
            None => section,
        }
    }

    fn children(&self) -> Vec<TreeSection> {
        self.raw_iter()
            .map(|(key, value)| {
                let path = key.clone();
                TreeSection::new(key, path, Some(value))
            })
            .collect()
    }

    fn reload_token(&self) -> ReloadToken {
        self.reload().clone()
    }
}
