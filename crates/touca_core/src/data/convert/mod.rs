use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::time::Duration;

use crate::data::{ArrayBuilder, ObjectValue, Value};

/// Conversion of a type into a captured [`Value`].
///
/// Implement this for custom types to pass them anywhere a value is
/// accepted, including as members of other captured types:
///
/// ```
/// use touca::data::{ObjectValue, ToValue, Value};
///
/// struct Date {
/// 	year: u16,
/// 	month: u8,
/// 	day: u8,
/// }
///
/// impl ToValue for Date {
/// 	fn to_value(&self) -> Value {
/// 		ObjectValue::named("Date")
/// 			.add("year", self.year)
/// 			.add("month", self.month)
/// 			.add("day", self.day)
/// 			.into()
/// 	}
/// }
///
/// let person = ObjectValue::named("Person").add("name", "alex").add("birthday", Date { year: 1961, month: 8, day: 4 });
/// assert_eq!(person.get("birthday").map(Value::kind), Some(touca::data::ValueKind::Object));
/// ```
pub trait ToValue {
	/// Build a value describing `self`.
	fn to_value(&self) -> Value;

	/// Consume `self` into a value; override to avoid copying owned data.
	fn into_value(self) -> Value
	where
		Self: Sized,
	{
		self.to_value()
	}
}

impl ToValue for Value {
	fn to_value(&self) -> Value {
		self.clone()
	}

	fn into_value(self) -> Value {
		self
	}
}

impl ToValue for ObjectValue {
	fn to_value(&self) -> Value {
		Value::Object(self.clone())
	}

	fn into_value(self) -> Value {
		Value::Object(self)
	}
}

impl ToValue for ArrayBuilder {
	fn to_value(&self) -> Value {
		Value::Array(self.items().to_vec())
	}

	fn into_value(self) -> Value {
		self.build()
	}
}

impl<T: ToValue + ?Sized> ToValue for &T {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl ToValue for bool {
	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}
}

macro_rules! signed_to_value {
	($($ty:ty),*) => {
		$(impl ToValue for $ty {
			fn to_value(&self) -> Value {
				Value::I64(i64::from(*self))
			}
		})*
	};
}

macro_rules! unsigned_to_value {
	($($ty:ty),*) => {
		$(impl ToValue for $ty {
			fn to_value(&self) -> Value {
				Value::U64(u64::from(*self))
			}
		})*
	};
}

signed_to_value!(i8, i16, i32, i64);
unsigned_to_value!(u8, u16, u32, u64);

impl ToValue for isize {
	fn to_value(&self) -> Value {
		Value::I64(*self as i64)
	}
}

impl ToValue for usize {
	fn to_value(&self) -> Value {
		Value::U64(*self as u64)
	}
}

impl ToValue for f32 {
	fn to_value(&self) -> Value {
		Value::F32(*self)
	}
}

impl ToValue for f64 {
	fn to_value(&self) -> Value {
		Value::F64(*self)
	}
}

impl ToValue for char {
	fn to_value(&self) -> Value {
		Value::String(self.to_string().into_boxed_str())
	}
}

impl ToValue for str {
	fn to_value(&self) -> Value {
		Value::String(self.into())
	}
}

impl ToValue for String {
	fn to_value(&self) -> Value {
		Value::String(self.as_str().into())
	}

	fn into_value(self) -> Value {
		Value::String(self.into_boxed_str())
	}
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
	fn to_value(&self) -> Value {
		(**self).to_value()
	}
}

impl ToValue for Cow<'_, str> {
	fn to_value(&self) -> Value {
		Value::String(self.as_ref().into())
	}
}

impl<T: ToValue> ToValue for Option<T> {
	fn to_value(&self) -> Value {
		match self {
			Some(value) => value.to_value(),
			None => Value::Null,
		}
	}

	fn into_value(self) -> Value {
		match self {
			Some(value) => value.into_value(),
			None => Value::Null,
		}
	}
}

impl<T: ToValue> ToValue for [T] {
	fn to_value(&self) -> Value {
		Value::Array(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
	fn to_value(&self) -> Value {
		self.as_slice().to_value()
	}

	fn into_value(self) -> Value {
		Value::Array(self.into_iter().map(ToValue::into_value).collect())
	}
}

impl<T: ToValue> ToValue for Vec<T> {
	fn to_value(&self) -> Value {
		self.as_slice().to_value()
	}

	fn into_value(self) -> Value {
		Value::Array(self.into_iter().map(ToValue::into_value).collect())
	}
}

impl<T: ToValue> ToValue for VecDeque<T> {
	fn to_value(&self) -> Value {
		Value::Array(self.iter().map(ToValue::to_value).collect())
	}
}

impl<K: AsRef<str>, T: ToValue> ToValue for BTreeMap<K, T> {
	fn to_value(&self) -> Value {
		Value::Object(ObjectValue {
			name: None,
			fields: self.iter().map(|(key, value)| (key.as_ref().to_owned(), value.to_value())).collect(),
		})
	}
}

impl<K: AsRef<str>, T: ToValue, S: BuildHasher> ToValue for HashMap<K, T, S> {
	fn to_value(&self) -> Value {
		Value::Object(ObjectValue {
			name: None,
			fields: self.iter().map(|(key, value)| (key.as_ref().to_owned(), value.to_value())).collect(),
		})
	}
}

impl ToValue for Duration {
	/// Elapsed milliseconds as a signed integer, saturating at `i64::MAX`.
	fn to_value(&self) -> Value {
		Value::I64(i64::try_from(self.as_millis()).unwrap_or(i64::MAX))
	}
}

impl ToValue for serde_json::Value {
	fn to_value(&self) -> Value {
		match self {
			Self::Null => Value::Null,
			Self::Bool(value) => Value::Bool(*value),
			Self::Number(number) => {
				if let Some(value) = number.as_i64() {
					Value::I64(value)
				} else if let Some(value) = number.as_u64() {
					Value::U64(value)
				} else {
					Value::F64(number.as_f64().unwrap_or(f64::NAN))
				}
			}
			Self::String(value) => Value::String(value.as_str().into()),
			Self::Array(items) => items.to_value(),
			Self::Object(map) => Value::Object(ObjectValue {
				name: None,
				fields: map.iter().map(|(key, value)| (key.clone(), value.to_value())).collect(),
			}),
		}
	}
}
