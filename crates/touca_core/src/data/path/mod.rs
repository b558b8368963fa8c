use std::fmt;

use crate::data::{DataError, Result, Value};

/// Escape character that, after a backslash, stands for an empty key.
const EMPTY_KEY_MARKER: char = '0';

/// One parsed operation in a flat path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select an object member by key.
	Key(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Parsed flat path, the inverse of the paths emitted by [`flatten`](crate::data::flatten).
///
/// Object members join with `.`, array elements use `[index]`, members of
/// the root object carry no prefix, and the root itself is the empty path.
/// Key characters `.`, `[`, `]` and `\` are escaped with a backslash, and an
/// empty key is written as `\0` so it never reads as the root or as a
/// missing step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FlatPath {
	/// Parse a flat path expression.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || DataError::InvalidFlatPath { path: input.to_owned() };
		let mut chars = input.chars().peekable();
		let mut steps = Vec::new();

		if input.is_empty() {
			return Ok(Self { steps });
		}

		if chars.peek() != Some(&'[') {
			steps.push(PathStep::Key(read_key(&mut chars).ok_or_else(invalid)?));
		}

		while let Some(ch) = chars.next() {
			match ch {
				'.' => steps.push(PathStep::Key(read_key(&mut chars).ok_or_else(invalid)?)),
				'[' => {
					let mut digits = String::new();
					loop {
						match chars.next() {
							Some(']') => break,
							Some(digit) if digit.is_ascii_digit() => digits.push(digit),
							_ => return Err(invalid()),
						}
					}
					let index = digits.parse::<usize>().map_err(|_| invalid())?;
					steps.push(PathStep::Index(index));
				}
				_ => return Err(invalid()),
			}
		}

		Ok(Self { steps })
	}

	/// Whether the path addresses the root.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}
}

fn read_key(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
	let mut key = String::new();
	let mut empty_marker = false;
	while let Some(&ch) = chars.peek() {
		if empty_marker && !matches!(ch, '.' | '[') {
			return None;
		}
		match ch {
			'.' | '[' => break,
			']' => return None,
			'\\' => {
				chars.next();
				match chars.next() {
					Some(escaped @ ('.' | '[' | ']' | '\\')) => key.push(escaped),
					Some(EMPTY_KEY_MARKER) if key.is_empty() => empty_marker = true,
					_ => return None,
				}
			}
			other => {
				chars.next();
				key.push(other);
			}
		}
	}
	(empty_marker || !key.is_empty()).then_some(key)
}

impl fmt::Display for FlatPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out: Option<String> = None;
		for step in &self.steps {
			out = Some(match step {
				PathStep::Key(key) => key_path(out.as_deref(), key),
				PathStep::Index(index) => index_path(out.as_deref(), *index),
			});
		}
		f.write_str(out.as_deref().unwrap_or(""))
	}
}

/// Compose the path of an object member; `parent` is `None` at the root.
pub(crate) fn key_path(parent: Option<&str>, key: &str) -> String {
	let mut out = String::with_capacity(parent.map_or(0, str::len) + key.len() + 1);
	if let Some(parent) = parent {
		out.push_str(parent);
		out.push('.');
	}
	if key.is_empty() {
		out.push('\\');
		out.push(EMPTY_KEY_MARKER);
		return out;
	}
	for ch in key.chars() {
		if matches!(ch, '.' | '[' | ']' | '\\') {
			out.push('\\');
		}
		out.push(ch);
	}
	out
}

/// Compose the path of an array element; `parent` is `None` at the root.
pub(crate) fn index_path(parent: Option<&str>, index: usize) -> String {
	format!("{}[{index}]", parent.unwrap_or(""))
}

impl Value {
	/// Return the node addressed by `path`, if present.
	pub fn lookup(&self, path: &FlatPath) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match (step, current) {
				(PathStep::Key(key), Value::Object(object)) => object.get(key)?,
				(PathStep::Index(index), Value::Array(items)) => items.get(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}
}

#[cfg(test)]
mod tests;
