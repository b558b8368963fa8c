use std::collections::{BTreeMap, btree_map};
use std::fmt;

use crate::data::{DataError, Result, ToValue};

/// Discriminant of a [`Value`] with stable lowercase labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool,
	/// Signed 64-bit integer.
	I64,
	/// Unsigned 64-bit integer.
	U64,
	/// Single-precision float.
	F32,
	/// Double-precision float.
	F64,
	/// UTF-8 text.
	String,
	/// Ordered sequence.
	Array,
	/// Keyed mapping with optional label.
	Object,
}

impl ValueKind {
	/// Render kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "boolean",
			Self::I64 => "number_signed",
			Self::U64 => "number_unsigned",
			Self::F32 => "number_float",
			Self::F64 => "number_double",
			Self::String => "string",
			Self::Array => "array",
			Self::Object => "object",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Captured datum of any supported shape.
///
/// Containers exclusively own their children: cloning copies the whole
/// subtree, moving hands it over without copying. Two values never share
/// storage. Cloning, equality and dropping walk the tree with a heap stack,
/// so nesting depth is bounded only by memory.
#[derive(Debug, Default)]
pub enum Value {
	/// Explicit null marker.
	#[default]
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar, kept apart from [`Value::I64`].
	U64(u64),
	/// 32-bit float scalar, kept apart from [`Value::F64`].
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// UTF-8 string.
	String(Box<str>),
	/// Positional sequence.
	Array(Vec<Value>),
	/// Keyed mapping.
	Object(ObjectValue),
}

impl Value {
	/// Null value.
	pub fn null() -> Self {
		Self::Null
	}

	/// String value from any text.
	pub fn string(value: impl Into<Box<str>>) -> Self {
		Self::String(value.into())
	}

	/// Return the kind tag of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::I64(_) => ValueKind::I64,
			Self::U64(_) => ValueKind::U64,
			Self::F32(_) => ValueKind::F32,
			Self::F64(_) => ValueKind::F64,
			Self::String(_) => ValueKind::String,
			Self::Array(_) => ValueKind::Array,
			Self::Object(_) => ValueKind::Object,
		}
	}

	/// Whether this value is an array or object.
	pub fn is_container(&self) -> bool {
		matches!(self, Self::Array(_) | Self::Object(_))
	}

	/// Whether flattening emits this value as-is: scalars and empty containers.
	pub fn is_leaf(&self) -> bool {
		match self {
			Self::Array(items) => items.is_empty(),
			Self::Object(object) => object.is_empty(),
			_ => true,
		}
	}

	/// Replace this value with null and return the previous content.
	pub fn take(&mut self) -> Value {
		std::mem::take(self)
	}

	/// Read a boolean, failing fast on any other kind.
	#[track_caller]
	pub fn as_bool(&self) -> bool {
		self.try_as_bool().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Read a signed integer, failing fast on any other kind.
	#[track_caller]
	pub fn as_i64(&self) -> i64 {
		self.try_as_i64().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Read an unsigned integer, failing fast on any other kind.
	#[track_caller]
	pub fn as_u64(&self) -> u64 {
		self.try_as_u64().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Read a single-precision float, failing fast on any other kind.
	#[track_caller]
	pub fn as_f32(&self) -> f32 {
		self.try_as_f32().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Read a double-precision float, failing fast on any other kind.
	#[track_caller]
	pub fn as_f64(&self) -> f64 {
		self.try_as_f64().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Borrow string content, failing fast on any other kind.
	#[track_caller]
	pub fn as_str(&self) -> &str {
		self.try_as_str().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Borrow array elements, failing fast on any other kind.
	#[track_caller]
	pub fn as_array(&self) -> &[Value] {
		self.try_as_array().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Borrow object content, failing fast on any other kind.
	#[track_caller]
	pub fn as_object(&self) -> &ObjectValue {
		self.try_as_object().unwrap_or_else(|err| accessor_misuse(err))
	}

	/// Checked boolean read.
	pub fn try_as_bool(&self) -> Result<bool> {
		match self {
			Self::Bool(value) => Ok(*value),
			other => Err(misuse(ValueKind::Bool, other)),
		}
	}

	/// Checked signed integer read.
	pub fn try_as_i64(&self) -> Result<i64> {
		match self {
			Self::I64(value) => Ok(*value),
			other => Err(misuse(ValueKind::I64, other)),
		}
	}

	/// Checked unsigned integer read.
	pub fn try_as_u64(&self) -> Result<u64> {
		match self {
			Self::U64(value) => Ok(*value),
			other => Err(misuse(ValueKind::U64, other)),
		}
	}

	/// Checked single-precision float read.
	pub fn try_as_f32(&self) -> Result<f32> {
		match self {
			Self::F32(value) => Ok(*value),
			other => Err(misuse(ValueKind::F32, other)),
		}
	}

	/// Checked double-precision float read.
	pub fn try_as_f64(&self) -> Result<f64> {
		match self {
			Self::F64(value) => Ok(*value),
			other => Err(misuse(ValueKind::F64, other)),
		}
	}

	/// Checked string borrow.
	pub fn try_as_str(&self) -> Result<&str> {
		match self {
			Self::String(value) => Ok(value),
			other => Err(misuse(ValueKind::String, other)),
		}
	}

	/// Checked array borrow.
	pub fn try_as_array(&self) -> Result<&[Value]> {
		match self {
			Self::Array(items) => Ok(items),
			other => Err(misuse(ValueKind::Array, other)),
		}
	}

	/// Checked object borrow.
	pub fn try_as_object(&self) -> Result<&ObjectValue> {
		match self {
			Self::Object(object) => Ok(object),
			other => Err(misuse(ValueKind::Object, other)),
		}
	}
}

fn misuse(expected: ValueKind, got: &Value) -> DataError {
	DataError::AccessorMisuse { expected, got: got.kind() }
}

#[cold]
#[track_caller]
fn accessor_misuse(err: DataError) -> ! {
	panic!("{err}")
}

enum CloneFrame<'a> {
	Array {
		pending: std::slice::Iter<'a, Value>,
		items: Vec<Value>,
	},
	Object {
		pending: btree_map::Iter<'a, String, Value>,
		object: ObjectValue,
		key: String,
	},
}

impl<'a> CloneFrame<'a> {
	fn attach(&mut self, value: Value) {
		match self {
			Self::Array { items, .. } => items.push(value),
			Self::Object { object, key, .. } => {
				object.fields.insert(std::mem::take(key), value);
			}
		}
	}

	fn next_child(&mut self) -> Option<&'a Value> {
		match self {
			Self::Array { pending, .. } => pending.next(),
			Self::Object { pending, key, .. } => {
				let (next_key, child) = pending.next()?;
				key.clone_from(next_key);
				Some(child)
			}
		}
	}

	fn finish(self) -> Value {
		match self {
			Self::Array { items, .. } => Value::Array(items),
			Self::Object { object, .. } => Value::Object(object),
		}
	}
}

impl Clone for Value {
	fn clone(&self) -> Self {
		let mut stack: Vec<CloneFrame<'_>> = Vec::new();
		let mut source = self;

		loop {
			let mut done = match source {
				Self::Array(items) if !items.is_empty() => {
					stack.push(CloneFrame::Array {
						pending: items.iter(),
						items: Vec::with_capacity(items.len()),
					});
					None
				}
				Self::Object(object) if !object.is_empty() => {
					stack.push(CloneFrame::Object {
						pending: object.fields.iter(),
						object: ObjectValue {
							name: object.name.clone(),
							fields: BTreeMap::new(),
						},
						key: String::new(),
					});
					None
				}
				leaf => Some(leaf.clone_leaf()),
			};

			loop {
				let Some(frame) = stack.last_mut() else {
					return done.unwrap_or_default();
				};
				if let Some(value) = done.take() {
					frame.attach(value);
				}
				if let Some(child) = frame.next_child() {
					source = child;
					break;
				}
				done = stack.pop().map(CloneFrame::finish);
			}
		}
	}
}

impl Value {
	/// Copy a scalar or an empty container.
	fn clone_leaf(&self) -> Self {
		match self {
			Self::Null => Self::Null,
			Self::Bool(v) => Self::Bool(*v),
			Self::I64(v) => Self::I64(*v),
			Self::U64(v) => Self::U64(*v),
			Self::F32(v) => Self::F32(*v),
			Self::F64(v) => Self::F64(*v),
			Self::String(v) => Self::String(v.clone()),
			Self::Array(_) => Self::Array(Vec::new()),
			Self::Object(object) => Self::Object(ObjectValue {
				name: object.name.clone(),
				fields: BTreeMap::new(),
			}),
		}
	}
}

impl PartialEq for Value {
	/// Structural equality: same kind, same data, floats by bit pattern, object labels included.
	fn eq(&self, other: &Self) -> bool {
		let mut stack = vec![(self, other)];
		while let Some((left, right)) = stack.pop() {
			match (left, right) {
				(Self::Null, Self::Null) => {}
				(Self::Bool(a), Self::Bool(b)) if a == b => {}
				(Self::I64(a), Self::I64(b)) if a == b => {}
				(Self::U64(a), Self::U64(b)) if a == b => {}
				(Self::F32(a), Self::F32(b)) if a.to_bits() == b.to_bits() => {}
				(Self::F64(a), Self::F64(b)) if a.to_bits() == b.to_bits() => {}
				(Self::String(a), Self::String(b)) if a == b => {}
				(Self::Array(a), Self::Array(b)) if a.len() == b.len() => stack.extend(a.iter().zip(b)),
				(Self::Object(a), Self::Object(b)) if a.name == b.name && a.fields.len() == b.fields.len() => {
					for ((key_a, value_a), (key_b, value_b)) in a.fields.iter().zip(&b.fields) {
						if key_a != key_b {
							return false;
						}
						stack.push((value_a, value_b));
					}
				}
				_ => return false,
			}
		}
		true
	}
}

impl Eq for Value {}

impl Drop for Value {
	fn drop(&mut self) {
		let has_nested = match self {
			Self::Array(items) => items.iter().any(has_children),
			Self::Object(object) => object.fields.values().any(has_children),
			_ => false,
		};
		if !has_nested {
			return;
		}

		// Unlink descendants onto a heap stack so nesting depth never reaches the call stack.
		let mut pending = Vec::new();
		detach_children(self, &mut pending);
		while let Some(mut item) = pending.pop() {
			detach_children(&mut item, &mut pending);
		}
	}
}

fn has_children(value: &Value) -> bool {
	!value.is_leaf()
}

fn detach_children(value: &mut Value, out: &mut Vec<Value>) {
	match value {
		Value::Array(items) => out.append(items),
		Value::Object(object) => out.extend(std::mem::take(&mut object.fields).into_values()),
		_ => {}
	}
}

/// Keyed mapping with an optional type label.
///
/// Keys are unique and iterate in lexicographic order, which keeps every
/// rendering and flattening of the same object identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectValue {
	/// Optional label naming the captured type, such as `Date`.
	pub name: Option<Box<str>>,
	/// Member values keyed by name.
	pub fields: BTreeMap<String, Value>,
}

impl ObjectValue {
	/// Create an unlabeled empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty object carrying a type label.
	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self {
			name: Some(name.into()),
			fields: BTreeMap::new(),
		}
	}

	/// Return the type label, if any.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Add a member and return the object, for chained construction.
	pub fn add(mut self, key: impl Into<String>, value: impl ToValue) -> Self {
		self.insert(key, value);
		self
	}

	/// Insert a member, returning the value it replaced.
	pub fn insert(&mut self, key: impl Into<String>, value: impl ToValue) -> Option<Value> {
		self.fields.insert(key.into(), value.into_value())
	}

	/// Look up a member by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the object has no members.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Iterate members in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(key, value)| (key.as_str(), value))
	}
}

impl From<ObjectValue> for Value {
	fn from(value: ObjectValue) -> Self {
		Self::Object(value)
	}
}

/// Chainable builder for array values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayBuilder {
	items: Vec<Value>,
}

impl ArrayBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an element and return the builder.
	pub fn add(mut self, value: impl ToValue) -> Self {
		self.push(value);
		self
	}

	/// Append an element in place.
	pub fn push(&mut self, value: impl ToValue) {
		self.items.push(value.into_value());
	}

	/// Number of collected elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether no element was added.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Finish into an array value.
	pub fn build(self) -> Value {
		Value::Array(self.items)
	}

	pub(crate) fn items(&self) -> &[Value] {
		&self.items
	}
}

impl From<ArrayBuilder> for Value {
	fn from(value: ArrayBuilder) -> Self {
		value.build()
	}
}

#[cfg(test)]
pub(crate) mod strategy;

#[cfg(test)]
mod tests;
