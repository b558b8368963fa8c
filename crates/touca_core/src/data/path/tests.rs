use crate::data::{DataError, FlatPath, ObjectValue, PathStep, Value, flatten};

#[test]
fn parses_keys_and_indices() {
	let path = FlatPath::parse("user.tags[1][0].name").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Key("user".to_owned()),
			PathStep::Key("tags".to_owned()),
			PathStep::Index(1),
			PathStep::Index(0),
			PathStep::Key("name".to_owned()),
		]
	);
}

#[test]
fn empty_path_is_root() {
	let path = FlatPath::parse("").expect("empty path parses");
	assert!(path.is_root());
	assert_eq!(Value::I64(3).lookup(&path), Some(&Value::I64(3)));
}

#[test]
fn root_array_paths_start_with_index() {
	let path = FlatPath::parse("[2].x").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Index(2), PathStep::Key("x".to_owned())]);
}

#[test]
fn rejects_malformed_paths() {
	for input in ["a[", "a[x]", "a]", "a[1]b", "a\\q", "a\\", ".b", "a.", "a\\0", "\\0b", "\\0\\0"] {
		let err = FlatPath::parse(input).expect_err("path must be rejected");
		assert!(matches!(err, DataError::InvalidFlatPath { path } if path == input));
	}
}

#[test]
fn escaped_keys_round_trip_through_flatten() {
	let value: Value = ObjectValue::new()
		.add("a.b", 1_i64)
		.add("a", ObjectValue::new().add("b", 2_i64))
		.add("odd[0]\\", 3_i64)
		.into();

	let flat = flatten(&value);
	assert_eq!(flat.len(), 3, "escaped keys must not collide");

	for (path, leaf) in &flat {
		let parsed = FlatPath::parse(path).expect("flattened path parses");
		assert_eq!(parsed.to_string(), *path);
		assert_eq!(value.lookup(&parsed), Some(*leaf));
	}
}

#[test]
fn lookup_misses_on_shape_mismatch() {
	let value: Value = ObjectValue::new().add("list", vec![1_i64]).into();
	let by_key = FlatPath::parse("list.x").expect("path parses");
	let out_of_range = FlatPath::parse("list[3]").expect("path parses");
	assert_eq!(value.lookup(&by_key), None);
	assert_eq!(value.lookup(&out_of_range), None);
}

#[test]
fn empty_keys_use_their_own_escape() {
	let value: Value = ObjectValue::new()
		.add("", ObjectValue::new().add("", 1_i64).add("x", vec![true]))
		.add("y", 2_i64)
		.into();

	let flat = flatten(&value);
	let paths: Vec<&str> = flat.keys().map(String::as_str).collect();
	assert_eq!(paths, ["\\0.\\0", "\\0.x[0]", "y"]);

	for (path, leaf) in &flat {
		let parsed = FlatPath::parse(path).expect("flattened path parses");
		assert_eq!(parsed.to_string(), *path);
		assert_eq!(value.lookup(&parsed), Some(*leaf));
	}
}

#[test]
fn empty_key_is_not_the_root() {
	let path = FlatPath::parse("\\0").expect("empty key path parses");
	assert_eq!(path.steps, vec![PathStep::Key(String::new())]);
	assert!(!path.is_root());
	assert_eq!(Value::I64(1).lookup(&path), None);
}
