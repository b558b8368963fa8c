use std::cmp::Ordering;

use crate::data::{FlatMap, Value, flatten};

/// One path present in both baseline and candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonKey {
	/// Flat path of the leaf.
	pub path: String,
	/// Whether both leaves have the same kind and identical data.
	pub matched: bool,
	/// Leaf captured in the baseline.
	pub baseline: Value,
	/// Leaf captured in the candidate.
	pub candidate: Value,
}

/// Scored, itemized result of comparing two captures.
///
/// All sequences are ordered lexicographically by path.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
	score: f64,
	common_keys: Vec<CommonKey>,
	missing_keys: Vec<String>,
	new_keys: Vec<String>,
}

impl ComparisonReport {
	/// Matched paths divided by all paths seen on either side; `1.0` when both sides are empty.
	pub fn score(&self) -> f64 {
		self.score
	}

	/// Paths present on both sides, matched or not.
	pub fn common_keys(&self) -> &[CommonKey] {
		&self.common_keys
	}

	/// Paths present only in the baseline.
	pub fn missing_keys(&self) -> &[String] {
		&self.missing_keys
	}

	/// Paths present only in the candidate.
	pub fn new_keys(&self) -> &[String] {
		&self.new_keys
	}

	/// Number of common paths whose leaves match.
	pub fn matched_count(&self) -> usize {
		self.common_keys.iter().filter(|item| item.matched).count()
	}

	/// Common paths whose leaves differ.
	pub fn mismatched(&self) -> impl Iterator<Item = &CommonKey> {
		self.common_keys.iter().filter(|item| !item.matched)
	}

	/// Size of the path union.
	pub fn total_count(&self) -> usize {
		self.common_keys.len() + self.missing_keys.len() + self.new_keys.len()
	}

	/// Whether both captures have the same paths and every leaf matches.
	pub fn is_identical(&self) -> bool {
		self.missing_keys.is_empty() && self.new_keys.is_empty() && self.common_keys.iter().all(|item| item.matched)
	}
}

/// Compare a baseline and a candidate capture path by path.
///
/// Arrays compare positionally: an element inserted at the front shifts
/// every later index and shows up as mismatched, missing, or new paths
/// rather than as a reorder.
pub fn compare(baseline: &Value, candidate: &Value) -> ComparisonReport {
	compare_flat(&flatten(baseline), &flatten(candidate))
}

/// Compare two already flattened captures.
pub fn compare_flat(baseline: &FlatMap<'_>, candidate: &FlatMap<'_>) -> ComparisonReport {
	let mut common_keys = Vec::new();
	let mut missing_keys = Vec::new();
	let mut new_keys = Vec::new();

	let mut left = baseline.iter().peekable();
	let mut right = candidate.iter().peekable();
	loop {
		let order = match (left.peek(), right.peek()) {
			(Some((a, _)), Some((b, _))) => a.cmp(b),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => break,
		};

		match order {
			Ordering::Less => {
				if let Some((path, _)) = left.next() {
					missing_keys.push(path.clone());
				}
			}
			Ordering::Greater => {
				if let Some((path, _)) = right.next() {
					new_keys.push(path.clone());
				}
			}
			Ordering::Equal => {
				if let (Some((path, base)), Some((_, cand))) = (left.next(), right.next()) {
					common_keys.push(CommonKey {
						path: path.clone(),
						matched: leaf_eq(base, cand),
						baseline: (*base).clone(),
						candidate: (*cand).clone(),
					});
				}
			}
		}
	}

	let matched = common_keys.iter().filter(|item| item.matched).count();
	let total = common_keys.len() + missing_keys.len() + new_keys.len();
	let score = if total == 0 { 1.0 } else { matched as f64 / total as f64 };

	ComparisonReport {
		score,
		common_keys,
		missing_keys,
		new_keys,
	}
}

/// Leaf equality: same kind and identical data, floats by bit pattern.
///
/// Flattened containers are always empty, so their labels are ignored.
fn leaf_eq(base: &Value, cand: &Value) -> bool {
	match (base, cand) {
		(Value::Object(a), Value::Object(b)) => a.is_empty() && b.is_empty(),
		(Value::Array(a), Value::Array(b)) => a.is_empty() && b.is_empty(),
		_ => base == cand,
	}
}
