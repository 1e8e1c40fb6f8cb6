use std::borrow::Cow;

use crate::value::{Result, Value};

/// Key paired with a [`Value`].
#[derive(Debug, Clone)]
pub struct Field<'v> {
	key: Cow<'v, str>,
	value: Value<'v>,
}

impl<'v> Field<'v> {
	/// Pair `key` with `value`.
	pub fn new(key: impl Into<Cow<'v, str>>, value: Value<'v>) -> Self {
		Self { key: key.into(), value }
	}

	/// Field key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Field value.
	pub fn value(&self) -> &Value<'v> {
		&self.value
	}

	/// Split into key and value.
	pub fn into_parts(self) -> (Cow<'v, str>, Value<'v>) {
		(self.key, self.value)
	}

	/// Field with an owned key and a snapshotted value.
	///
	/// # Panics
	///
	/// Panics under the same conditions as [`Value::snapshot`].
	pub fn snapshot(&self) -> Field<'static> {
		Field {
			key: Cow::Owned(self.key.clone().into_owned()),
			value: self.value.snapshot(),
		}
	}

	/// Like [`Field::snapshot`], reporting a missing snapshotter as an error.
	pub fn try_snapshot(&self) -> Result<Field<'static>> {
		Ok(Field {
			key: Cow::Owned(self.key.clone().into_owned()),
			value: self.value.try_snapshot()?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::Field;
	use crate::value::{Type, Value, ValueError};

	#[test]
	fn snapshot_detaches_key_and_value() {
		let mut key = String::from("user");
		let mut name = String::from("ada");
		let field = Field::new(key.as_str(), Value::str(&name)).snapshot();
		key.push('!');
		name.push('!');

		assert_eq!(field.key(), "user");
		assert!(field.value().is_const());
		assert_eq!(field.value().as_string(), Ok("ada"));
	}

	#[test]
	fn owned_key_is_kept() {
		let field = Field::new(String::from("n"), Value::int(3));
		let (key, value) = field.into_parts();
		assert_eq!(key, "n");
		assert_eq!(value.ty(), Type::Int);
	}

	#[test]
	fn try_snapshot_reports_missing_snapshotter() {
		let payload = vec![1_u8];
		let field = Field::new("raw", Value::opaque(&payload));
		assert!(matches!(field.try_snapshot(), Err(ValueError::MissingSnapshotter { .. })));
	}
}
