//! # Hypatia Core
//!
//! Core types and contracts for the Hypatia generation pipeline.
//!
//! This crate provides the foundational types used throughout Hypatia:
//!
//! - [`Value`] - Dynamically typed setting value (scalars, lists, mappings)
//! - [`ExecutionState`] - The scripting-engine capability boundary
//! - [`SourceSection`] / [`MemorySection`] - Hierarchical configuration input
//! - [`ConfigTree`] / [`TreeSection`] / [`ReloadToken`] - The
//!   nested-configuration-tree contract (colon-delimited paths)
//! - [`ConfigError`] / [`ScriptError`] - Standard error types

#![doc(html_root_url = "https://docs.rs/hypatia-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod caseless;
pub mod convert;
mod error;
pub mod fixtures;
mod script;
mod source;
mod tree;
mod value;

pub use error::ConfigError;
pub use script::{ExecutionState, ScriptError};
pub use source::{MemorySection, SourceSection};
pub use tree::{ConfigTree, ReloadToken, TreeSection};
pub use value::Value;
