use proptest::prelude::*;

use crate::data::{ObjectValue, Value};

/// Arbitrary value trees covering every kind, awkward keys, and labels.
pub(crate) fn arb_value() -> impl Strategy<Value = Value> {
	let leaf = prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::I64),
		any::<u64>().prop_map(Value::U64),
		any::<f32>().prop_map(Value::F32),
		any::<f64>().prop_map(Value::F64),
		"[a-z .\\[\\]\\\\é]{0,8}".prop_map(|text: String| Value::string(text)),
	];

	leaf.prop_recursive(4, 64, 6, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
			(proptest::option::of("[A-Z][a-z]{0,5}"), prop::collection::btree_map("[a-z.\\[]{0,4}", inner, 0..6)).prop_map(|(name, fields)| {
				Value::Object(ObjectValue {
					name: name.map(String::into_boxed_str),
					fields,
				})
			}),
		]
	})
}
