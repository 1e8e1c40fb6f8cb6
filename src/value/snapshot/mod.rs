use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::value::capability::{ArrayItemVisitor, ObjectFieldVisitor, ValueArray, ValueObject};
use crate::value::repr::{AnySlot, Slot};
use crate::value::types::slot_mismatch;
use crate::value::{Formatted, Result, Type, Value, ValueError};

/// Upper bound on capacity reserved from a caller-reported item or field count.
const PREALLOCATE_LIMIT: usize = 1024;

/// Owned capture of an error message and its source chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ErrorSnapshot {
	message: String,
	#[source]
	source: Option<Box<ErrorSnapshot>>,
}

impl ErrorSnapshot {
	/// Render `error` and every error in its source chain.
	pub fn capture(error: &(dyn std::error::Error + 'static)) -> Self {
		Self {
			message: error.to_string(),
			source: error.source().map(|source| Box::new(Self::capture(source))),
		}
	}

	/// Rendered message of the captured error.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Items of an array captured by snapshotting, in original order.
///
/// Reachable from a snapshot through [`ValueArray::as_any_array`].
#[derive(Debug, Clone)]
pub struct ArraySnapshot {
	items: Vec<Value<'static>>,
}

impl ArraySnapshot {
	/// Captured items.
	pub fn items(&self) -> &[Value<'static>] {
		&self.items
	}
}

impl ValueArray for ArraySnapshot {
	fn item_count(&self) -> usize {
		self.items.len()
	}

	fn accept_item_visitor(&self, visitor: &mut dyn ArrayItemVisitor) {
		for (index, item) in self.items.iter().enumerate() {
			visitor.visit_array_item(index, item);
		}
	}

	fn as_any_array(&self) -> Option<&dyn Any> {
		Some(self)
	}
}

/// Fields of an object captured by snapshotting. Keys are unique; a repeated key keeps its last value.
///
/// Reachable from a snapshot through [`ValueObject::as_any_object`].
#[derive(Debug, Clone)]
pub struct ObjectSnapshot {
	fields: HashMap<String, Value<'static>>,
}

impl ObjectSnapshot {
	/// Captured value for `key`.
	pub fn get(&self, key: &str) -> Option<&Value<'static>> {
		self.fields.get(key)
	}

	/// Captured fields, in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<'static>)> {
		self.fields.iter().map(|(key, value)| (key.as_str(), value))
	}
}

impl ValueObject for ObjectSnapshot {
	fn field_count(&self) -> usize {
		self.fields.len()
	}

	fn accept_field_visitor(&self, visitor: &mut dyn ObjectFieldVisitor) {
		for (key, value) in &self.fields {
			visitor.visit_object_field(key, value);
		}
	}

	fn as_any_object(&self) -> Option<&dyn Any> {
		Some(self)
	}
}

impl Value<'_> {
	/// Const copy of this value that no later mutation of caller memory can affect.
	///
	/// Const values share their payload. Borrowed text and sequences are copied, Stringer and
	/// Formatter values are rendered into a String, arrays and objects are captured item by item
	/// unless they provide their own [`Snapshotter`](crate::value::Snapshotter).
	///
	/// # Panics
	///
	/// Panics if an opaque Any payload has no snapshotter, or if the value is corrupted.
	pub fn snapshot(&self) -> Value<'static> {
		match self.try_snapshot() {
			Ok(snapshot) => snapshot,
			Err(err) => panic!("logval: {err}"),
		}
	}

	/// Consuming form of [`Value::snapshot`].
	pub fn into_snapshot(self) -> Value<'static> {
		self.snapshot()
	}

	/// Like [`Value::snapshot`], reporting a missing snapshotter as an error.
	///
	/// # Panics
	///
	/// Panics if the value is corrupted.
	pub fn try_snapshot(&self) -> Result<Value<'static>> {
		let ty = self.view().ty();
		if self.is_const()
			&& let Some(slot) = self.slot.retained()
		{
			return Ok(Value { bits: self.bits, slot });
		}
		match (ty, &self.slot) {
			(Type::String, Slot::Str(text)) => Ok(Value::from_slot(Type::String, true, Slot::Str(text.to_retained()))),
			(Type::Error, Slot::Error(error)) => Ok(Value::error(Arc::new(ErrorSnapshot::capture(error.get())))),
			(_, Slot::Seq(seq)) => Ok(Value::from_slot(ty, true, Slot::Seq(seq.to_retained()))),
			(Type::Stringer, Slot::Stringer(target)) => Ok(Value::string(target.get().to_string())),
			(Type::Formatter, Slot::Formatter { template, target }) => Ok(Value::string(Formatted::new(template.get(), target.get()).to_string())),
			(Type::Array, Slot::Array(array)) => snapshot_array(array.get()),
			(Type::Object, Slot::Object(object)) => snapshot_object(object.get()),
			(Type::Any, Slot::Any(AnySlot::Nil)) => Ok(Value::nil()),
			(Type::Any, Slot::Any(AnySlot::Borrowed { snapshotter: Some(snapshotter), .. })) => snapshotter.take_snapshot().try_snapshot(),
			(Type::Any, Slot::Any(AnySlot::Borrowed { value, snapshotter: None, .. })) => Err(ValueError::MissingSnapshotter {
				type_name: (**value).type_name(),
			}),
			_ => match self.slot.retained() {
				Some(slot) => Ok(Value {
					bits: self.bits.with_const(),
					slot,
				}),
				None => slot_mismatch(ty),
			},
		}
	}
}

fn snapshot_array(array: &dyn ValueArray) -> Result<Value<'static>> {
	if let Some(snapshotter) = array.snapshotter() {
		return snapshotter.take_snapshot().try_snapshot();
	}
	let mut items = Vec::with_capacity(array.item_count().min(PREALLOCATE_LIMIT));
	let mut failure = None;
	array.accept_item_visitor(&mut |_: usize, item: &Value<'_>| {
		if failure.is_some() {
			return;
		}
		match item.try_snapshot() {
			Ok(item) => items.push(item),
			Err(err) => failure = Some(err),
		}
	});
	if let Some(err) = failure {
		return Err(err);
	}
	Ok(Value::const_array(Arc::new(ArraySnapshot { items })))
}

fn snapshot_object(object: &dyn ValueObject) -> Result<Value<'static>> {
	if let Some(snapshotter) = object.snapshotter() {
		return snapshotter.take_snapshot().try_snapshot();
	}
	let mut fields = HashMap::with_capacity(object.field_count().min(PREALLOCATE_LIMIT));
	let mut failure = None;
	object.accept_field_visitor(&mut |key: &str, value: &Value<'_>| {
		if failure.is_some() {
			return;
		}
		match value.try_snapshot() {
			Ok(value) => {
				fields.insert(key.to_owned(), value);
			}
			Err(err) => failure = Some(err),
		}
	});
	if let Some(err) = failure {
		return Err(err);
	}
	Ok(Value::const_object(Arc::new(ObjectSnapshot { fields })))
}
