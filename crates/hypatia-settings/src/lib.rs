//! Concurrent, case-insensitive settings store with deferred script values.
//!
//! This crate provides the settings core of the Hypatia generation
//! pipeline:
//!
//! - [`Settings`] - the thread-safe key/value store; keys compare
//!   case-insensitively and values resolve transparently on read
//! - [`RawValue`] / [`DeferredValue`] - stored entries, concrete or
//!   script-valued
//! - [`builder`] - flattening of hierarchical configuration sources into
//!   scalars, mappings, and zero-indexed lists
//! - a read-only [`ConfigTree`](hypatia_core::ConfigTree) adapter for
//!   consumers of the nested-configuration contract
//! - [`keys`] - well-known setting names
//!
//! # Overview
//!
//! Configuration is loaded before a scripting engine exists, so a store
//! starts *unbound*: every entry is concrete and script-marked strings are
//! just strings. Once the engine is available, binding produces a new store
//! in which those strings become deferred values, evaluated lazily and
//! cached on first read:
//!
//! ```
//! use std::sync::Arc;
//! use hypatia_core::fixtures::StubExecutionState;
//! use hypatia_core::Value;
//! use hypatia_settings::Settings;
//!
//! let settings = Arc::new(Settings::new());
//! settings.set("Title", "My Site");
//! settings.set("Year", "=> now.year");
//!
//! let engine = StubExecutionState::new().with_result("now.year", Value::from(2026));
//! let bound = settings.with_execution_state(Arc::new(engine));
//!
//! assert_eq!(bound.get("title").unwrap(), Some(Value::from("My Site")));
//! assert_eq!(bound.get("Year").unwrap(), Some(Value::from(2026)));
//! ```

#![doc(html_root_url = "https://docs.rs/hypatia-settings/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
pub mod builder;
mod key;
pub mod keys;
mod raw;
mod store;

pub use key::SettingKey;
pub use raw::{DeferredValue, RawValue};
pub use store::Settings;
