use std::collections::BTreeMap;

use crate::data::Value;
use crate::data::path::{index_path, key_path};

/// Leaf values keyed by flat path, ordered lexicographically by path.
pub type FlatMap<'a> = BTreeMap<String, &'a Value>;

/// Linearize a value tree into path-addressed leaves.
///
/// Scalars and empty containers are leaves. Empty objects and arrays are
/// kept so that `{}` and a missing key stay distinguishable. A scalar root
/// is emitted under the empty path. Traversal uses a heap stack, so depth is
/// bounded only by memory.
pub fn flatten(value: &Value) -> FlatMap<'_> {
	let mut out = BTreeMap::new();
	let mut stack: Vec<(Option<String>, &Value)> = vec![(None, value)];

	while let Some((path, node)) = stack.pop() {
		match node {
			Value::Object(object) if !object.is_empty() => {
				for (key, child) in &object.fields {
					stack.push((Some(key_path(path.as_deref(), key)), child));
				}
			}
			Value::Array(items) if !items.is_empty() => {
				for (index, child) in items.iter().enumerate() {
					stack.push((Some(index_path(path.as_deref(), index)), child));
				}
			}
			leaf => {
				out.insert(path.unwrap_or_default(), leaf);
			}
		}
	}

	out
}
