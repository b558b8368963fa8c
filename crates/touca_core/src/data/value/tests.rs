use std::thread;

use crate::data::{ArrayBuilder, DataError, ObjectValue, Value, ValueKind};

#[test]
fn clone_produces_independent_tree() {
	let original: Value = ObjectValue::new().add("items", vec![1_i64, 2, 3]).add("name", "alex").into();
	let mut copy = original.clone();

	if let Value::Object(object) = &mut copy {
		object.insert("name", "sam");
		if let Some(Value::Array(items)) = object.fields.get_mut("items") {
			items.push(Value::I64(4));
		}
	}

	assert_eq!(original.as_object().get("name").map(Value::as_str), Some("alex"));
	assert_eq!(original.as_object().get("items").map(|items| items.as_array().len()), Some(3));
	assert_ne!(original, copy);
}

#[test]
fn insert_overwrites_existing_key() {
	let mut object = ObjectValue::named("Date");
	assert!(object.insert("year", 1961_u16).is_none());
	let previous = object.insert("year", 1962_u16);

	assert_eq!(previous, Some(Value::U64(1961)));
	assert_eq!(object.len(), 1);
	assert_eq!(object.get("year"), Some(&Value::U64(1962)));
	assert_eq!(object.name(), Some("Date"));
}

#[test]
fn object_iterates_in_key_order() {
	let object = ObjectValue::new().add("b", 2_i32).add("c", 3_i32).add("a", 1_i32);
	let keys: Vec<&str> = object.iter().map(|(key, _)| key).collect();
	assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn array_builder_keeps_order() {
	let value = ArrayBuilder::new().add(true).add("x").add(Value::Null).build();
	assert_eq!(value, Value::Array(vec![Value::Bool(true), Value::string("x"), Value::Null]));
}

#[test]
fn kind_labels_are_stable() {
	assert_eq!(Value::I64(1).kind().as_str(), "number_signed");
	assert_eq!(Value::U64(1).kind().as_str(), "number_unsigned");
	assert_eq!(Value::F32(1.0).kind().as_str(), "number_float");
	assert_eq!(Value::F64(1.0).kind().as_str(), "number_double");
	assert_eq!(ValueKind::Object.to_string(), "object");
}

#[test]
fn equality_distinguishes_numeric_kinds() {
	assert_ne!(Value::I64(1), Value::U64(1));
	assert_ne!(Value::F32(0.5), Value::F64(0.5));
	assert_ne!(Value::F64(0.0), Value::F64(-0.0));
	assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
}

#[test]
fn equality_includes_object_label() {
	let plain: Value = ObjectValue::new().add("a", 1_i64).into();
	let named: Value = ObjectValue::named("Thing").add("a", 1_i64).into();
	assert_ne!(plain, named);
}

#[test]
fn checked_accessor_reports_both_kinds() {
	let err = Value::string("1").try_as_i64().expect_err("string is not a signed integer");
	assert!(matches!(
		err,
		DataError::AccessorMisuse {
			expected: ValueKind::I64,
			got: ValueKind::String
		}
	));
}

#[test]
#[should_panic(expected = "accessor misuse: expected boolean, got number_signed")]
fn mismatched_accessor_fails_fast() {
	let _ = Value::I64(1).as_bool();
}

#[test]
fn matching_accessors_return_stored_data() {
	assert!(Value::Bool(true).as_bool());
	assert_eq!(Value::U64(u64::MAX).as_u64(), u64::MAX);
	assert_eq!(Value::F32(1.5).as_f32(), 1.5);
	assert_eq!(Value::string("hi").as_str(), "hi");
}

#[test]
fn take_leaves_null_behind() {
	let mut value = Value::string("x");
	let taken = value.take();
	assert_eq!(value, Value::Null);
	assert_eq!(taken, Value::string("x"));
}

#[test]
fn deep_tree_drops_without_recursion() {
	let handle = thread::Builder::new()
		.stack_size(256 * 1024)
		.spawn(|| {
			let mut value = Value::Null;
			for _ in 0..200_000 {
				value = Value::Array(vec![value]);
			}
			drop(value);
		})
		.expect("thread spawns");
	handle.join().expect("deep drop completes");
}

#[test]
fn deep_tree_clones_without_recursion() {
	let handle = thread::Builder::new()
		.stack_size(256 * 1024)
		.spawn(|| {
			let mut value = Value::string("leaf");
			for depth in 0..100_000 {
				value = if depth % 2 == 0 {
					Value::Array(vec![Value::Null, value])
				} else {
					ObjectValue::named("Node").add("child", value).add("id", depth).into()
				};
			}
			let copy = value.clone();
			copy == value
		})
		.expect("thread spawns");
	assert!(handle.join().expect("deep clone completes"));
}

#[test]
fn clone_keeps_labels_order_and_empty_containers() {
	let value: Value = ObjectValue::named("Person")
		.add("tags", Vec::<bool>::new())
		.add("meta", ObjectValue::named("Meta"))
		.add("list", vec![Value::F64(f64::NAN), Value::string("x"), Value::U64(3)])
		.into();

	let copy = value.clone();
	assert_eq!(copy, value);
	assert_eq!(copy.as_object().name(), Some("Person"));
	assert_eq!(copy.as_object().get("meta").map(|meta| meta.as_object().name()), Some(Some("Meta")));
}

#[test]
fn values_cross_threads() {
	let value: Value = ObjectValue::new().add("a", vec![1_u8, 2]).into();
	let copy = value.clone();
	let handle = thread::spawn(move || copy.as_object().len());
	assert_eq!(handle.join().expect("thread joins"), 1);
	assert_eq!(value.as_object().len(), 1);
}
