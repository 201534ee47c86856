//! Configuration-tree building.
//!
//! Flattens a hierarchical [`SourceSection`] tree into [`Value`] nodes. A
//! nested section becomes a list instead of a mapping when its children are
//! keyed by the exact contiguous indices `0, 1, 2, …` in source order; the
//! root section is always a mapping.

use indexmap::IndexMap;

use hypatia_core::{SourceSection, Value};

/// Builds the root mapping from a configuration source.
///
/// The root is exempt from list detection, so the result is always a
/// mapping even when every top-level key is numeric.
#[must_use]
pub fn build_root(source: &dyn SourceSection) -> IndexMap<String, Value> {
    match build_node(&source.children(), None) {
        Value::Map(map) => map,
        _ => unreachable!("list detection is disabled at the root"),
    }
}

/// Builds the node for a section's children.
///
/// A single linear pass in source order: a mapping accumulator always runs,
/// and a list accumulator runs in parallel while the children still look
/// like `0, 1, 2, …`. The first child whose key is not the expected next
/// index disqualifies the list permanently for this call: detection is
/// eager and order-sensitive, not a post-hoc check. `path` is `None` only
/// for the root, which never becomes a list.
#[must_use]
pub fn build_node(children: &[&dyn SourceSection], path: Option<&str>) -> Value {
    let mut map: IndexMap<String, Value> = IndexMap::new();
    let mut list: Option<Vec<Value>> = path.map(|_| Vec::new());

    for child in children {
        // Are we continuing the list? The expected index is exactly the
        // number of items collected so far.
        if let Some(items) = &list {
            if child.key().parse::<usize>().map_or(true, |i| i != items.len()) {
                list = None;
            }
        }

        let value = match child.value() {
            Some(scalar) => Value::String(scalar.to_owned()),
            None => {
                let child_path = child.path();
                build_node(&child.children(), Some(&child_path))
            }
        };

        if let Some(items) = &mut list {
            items.push(value.clone());
        }
        map.insert(child.key().to_owned(), value);
    }

    match list {
        Some(items) => Value::Array(items),
        None => Value::Map(map),
    }
}
