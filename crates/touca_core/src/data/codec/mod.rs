use std::collections::BTreeMap;

use crate::data::bytes::{Cursor, Writer};
use crate::data::{DataError, MalformedReason, ObjectValue, Result, Value};

pub(crate) const TAG_NULL: u8 = 0;
pub(crate) const TAG_BOOL: u8 = 1;
pub(crate) const TAG_I64: u8 = 2;
pub(crate) const TAG_U64: u8 = 3;
pub(crate) const TAG_F32: u8 = 4;
pub(crate) const TAG_F64: u8 = 5;
pub(crate) const TAG_STRING: u8 = 6;
pub(crate) const TAG_ARRAY: u8 = 7;
pub(crate) const TAG_OBJECT: u8 = 8;

/// Encode a value tree into its self-describing binary form.
///
/// Every value starts with one tag byte. Scalars follow with fixed-size
/// little-endian payloads (floats as IEEE bits); strings, arrays and
/// objects carry LEB128 lengths. Objects also carry an optional label.
pub fn encode_binary(value: &Value) -> Vec<u8> {
	let mut out = Writer::new();
	write_value(&mut out, value);
	out.into_inner()
}

/// Decode a complete binary value, rejecting trailing bytes.
pub fn decode_binary(bytes: &[u8]) -> Result<Value> {
	let mut cursor = Cursor::new(bytes);
	let value = read_value(&mut cursor)?;
	cursor.finish()?;
	Ok(value)
}

enum Pending<'a> {
	Value(&'a Value),
	Key(&'a str),
}

pub(crate) fn write_value(out: &mut Writer, value: &Value) {
	let mut stack = vec![Pending::Value(value)];

	while let Some(item) = stack.pop() {
		let value = match item {
			Pending::Key(key) => {
				out.put_str(key);
				continue;
			}
			Pending::Value(value) => value,
		};

		match value {
			Value::Null => out.put_u8(TAG_NULL),
			Value::Bool(v) => {
				out.put_u8(TAG_BOOL);
				out.put_u8(u8::from(*v));
			}
			Value::I64(v) => {
				out.put_u8(TAG_I64);
				out.put_u64_le(*v as u64);
			}
			Value::U64(v) => {
				out.put_u8(TAG_U64);
				out.put_u64_le(*v);
			}
			Value::F32(v) => {
				out.put_u8(TAG_F32);
				out.put_u32_le(v.to_bits());
			}
			Value::F64(v) => {
				out.put_u8(TAG_F64);
				out.put_u64_le(v.to_bits());
			}
			Value::String(v) => {
				out.put_u8(TAG_STRING);
				out.put_str(v);
			}
			Value::Array(items) => {
				out.put_u8(TAG_ARRAY);
				out.put_len(items.len());
				stack.extend(items.iter().rev().map(Pending::Value));
			}
			Value::Object(object) => {
				out.put_u8(TAG_OBJECT);
				match object.name() {
					Some(name) => {
						out.put_u8(1);
						out.put_str(name);
					}
					None => out.put_u8(0),
				}
				out.put_len(object.len());
				for (key, child) in object.fields.iter().rev() {
					stack.push(Pending::Value(child));
					stack.push(Pending::Key(key));
				}
			}
		}
	}
}

enum Open {
	Array { items: Vec<Value>, left: usize },
	Object { object: ObjectValue, left: usize, key: String },
}

impl Open {
	/// Store a finished child; return whether the container is complete.
	fn attach(&mut self, value: Value) -> bool {
		match self {
			Self::Array { items, left } => {
				items.push(value);
				*left -= 1;
				*left == 0
			}
			Self::Object { object, left, key } => {
				object.fields.insert(std::mem::take(key), value);
				*left -= 1;
				*left == 0
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

enum Head {
	Complete(Value),
	Open(Open),
}

/// Smallest encoded array element: a bare tag.
const MIN_ELEMENT_SIZE: usize = 1;
/// Smallest encoded object entry: empty key length plus a bare tag.
const MIN_ENTRY_SIZE: usize = 2;

pub(crate) fn read_value(cursor: &mut Cursor<'_>) -> Result<Value> {
	let mut stack: Vec<Open> = Vec::new();

	'outer: loop {
		if let Some(Open::Object { object, key, .. }) = stack.last_mut() {
			let at = cursor.pos();
			let name = cursor.read_string()?;
			if object.fields.contains_key(&name) {
				return Err(DataError::MalformedEncoding {
					at,
					reason: MalformedReason::DuplicateKey { key: name },
				});
			}
			*key = name;
		}

		let mut done = match read_head(cursor)? {
			Head::Complete(value) => value,
			Head::Open(open) => {
				stack.push(open);
				continue;
			}
		};

		while let Some(mut open) = stack.pop() {
			if open.attach(done) {
				done = open.finish();
			} else {
				stack.push(open);
				continue 'outer;
			}
		}

		return Ok(done);
	}
}

fn read_head(cursor: &mut Cursor<'_>) -> Result<Head> {
	let at = cursor.pos();
	let tag = cursor.read_u8()?;
	let value = match tag {
		TAG_NULL => Value::Null,
		TAG_BOOL => match cursor.read_u8()? {
			0 => Value::Bool(false),
			1 => Value::Bool(true),
			byte => return Err(malformed_at(at + 1, MalformedReason::InvalidBool { byte })),
		},
		TAG_I64 => Value::I64(cursor.read_u64_le()? as i64),
		TAG_U64 => Value::U64(cursor.read_u64_le()?),
		TAG_F32 => Value::F32(f32::from_bits(cursor.read_u32_le()?)),
		TAG_F64 => Value::F64(f64::from_bits(cursor.read_u64_le()?)),
		TAG_STRING => Value::String(cursor.read_string()?.into_boxed_str()),
		TAG_ARRAY => {
			let count = cursor.read_count(MIN_ELEMENT_SIZE)?;
			if count == 0 {
				Value::Array(Vec::new())
			} else {
				return Ok(Head::Open(Open::Array {
					items: Vec::with_capacity(count),
					left: count,
				}));
			}
		}
		TAG_OBJECT => {
			let name = match cursor.read_u8()? {
				0 => None,
				1 => Some(cursor.read_string()?.into_boxed_str()),
				flag => return Err(malformed_at(at + 1, MalformedReason::InvalidNameFlag { flag })),
			};
			let count = cursor.read_count(MIN_ENTRY_SIZE)?;
			let object = ObjectValue { name, fields: BTreeMap::new() };
			if count == 0 {
				Value::Object(object)
			} else {
				return Ok(Head::Open(Open::Object {
					object,
					left: count,
					key: String::new(),
				}));
			}
		}
		tag => return Err(malformed_at(at, MalformedReason::UnknownTag { tag })),
	};
	Ok(Head::Complete(value))
}

fn malformed_at(at: usize, reason: MalformedReason) -> DataError {
	DataError::MalformedEncoding { at, reason }
}
