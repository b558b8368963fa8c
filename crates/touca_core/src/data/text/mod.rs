use std::collections::BTreeMap;
use std::fmt::Write;

use crate::data::Value;

enum Piece<'a> {
	Value(&'a Value),
	Raw(&'static str),
	Key(&'a str),
}

/// Render a value as compact JSON-like text.
///
/// Object members appear in key order and labels are omitted. Floats use
/// their shortest round-trip form (`1.0`, `0.1`, `1e300`); non-finite
/// floats render as `NaN`, `inf` and `-inf`. The same tree always renders
/// to the same text.
pub fn to_display_text(value: &Value) -> String {
	let mut out = String::new();
	let mut stack = vec![Piece::Value(value)];

	while let Some(piece) = stack.pop() {
		let value = match piece {
			Piece::Raw(text) => {
				out.push_str(text);
				continue;
			}
			Piece::Key(key) => {
				push_json_string(&mut out, key);
				out.push(':');
				continue;
			}
			Piece::Value(value) => value,
		};

		match value {
			Value::Null => out.push_str("null"),
			Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
			Value::I64(v) => {
				let _ = write!(out, "{v}");
			}
			Value::U64(v) => {
				let _ = write!(out, "{v}");
			}
			Value::F32(v) => {
				let _ = write!(out, "{v:?}");
			}
			Value::F64(v) => {
				let _ = write!(out, "{v:?}");
			}
			Value::String(v) => push_json_string(&mut out, v),
			Value::Array(items) => {
				out.push('[');
				stack.push(Piece::Raw("]"));
				for (index, item) in items.iter().enumerate().rev() {
					stack.push(Piece::Value(item));
					if index > 0 {
						stack.push(Piece::Raw(","));
					}
				}
			}
			Value::Object(object) => {
				out.push('{');
				stack.push(Piece::Raw("}"));
				for (index, (key, child)) in object.fields.iter().enumerate().rev() {
					stack.push(Piece::Value(child));
					stack.push(Piece::Key(key));
					if index > 0 {
						stack.push(Piece::Raw(","));
					}
				}
			}
		}
	}

	out
}

/// Render keyed values as `[{"key":"<key>","value":"<display text>"},...]`.
///
/// Entries are ordered by key in byte order, which is the order tools
/// diffing this output rely on.
pub fn render_keyed(entries: &BTreeMap<String, Value>) -> String {
	render_pairs(entries.iter().map(|(key, value)| (key.as_str(), to_display_text(value))))
}

pub(crate) fn render_pairs<'a>(pairs: impl Iterator<Item = (&'a str, String)>) -> String {
	let mut out = String::from("[");
	for (index, (key, text)) in pairs.enumerate() {
		if index > 0 {
			out.push(',');
		}
		out.push_str("{\"key\":");
		push_json_string(&mut out, key);
		out.push_str(",\"value\":");
		push_json_string(&mut out, &text);
		out.push('}');
	}
	out.push(']');
	out
}

/// Append `input` as a quoted, escaped JSON string.
pub(crate) fn push_json_string(out: &mut String, input: &str) {
	out.push('"');
	for ch in input.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => {
				let _ = write!(out, "\\u{:04x}", c as u32);
			}
			c => out.push(c),
		}
	}
	out.push('"');
}
