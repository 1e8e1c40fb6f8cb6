use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;

use crate::value::Value;

/// Ordered, caller-defined sequence of values.
pub trait ValueArray: Send + Sync {
	/// Number of items `accept_item_visitor` produces.
	fn item_count(&self) -> usize;

	/// Invoke `visitor` once per item, in index order.
	fn accept_item_visitor(&self, visitor: &mut dyn ArrayItemVisitor);

	/// Custom snapshot strategy, used instead of walking the items.
	fn snapshotter(&self) -> Option<&dyn Snapshotter> {
		None
	}

	/// Concrete array for downcasting, if the implementation exposes it.
	fn as_any_array(&self) -> Option<&dyn Any> {
		None
	}
}

/// Receives array items from [`ValueArray::accept_item_visitor`].
pub trait ArrayItemVisitor {
	/// Called for the item at `index`.
	fn visit_array_item(&mut self, index: usize, value: &Value<'_>);
}

impl<F> ArrayItemVisitor for F
where
	F: FnMut(usize, &Value<'_>),
{
	fn visit_array_item(&mut self, index: usize, value: &Value<'_>) {
		self(index, value)
	}
}

/// Caller-defined collection of keyed values.
pub trait ValueObject: Send + Sync {
	/// Number of fields `accept_field_visitor` produces.
	fn field_count(&self) -> usize;

	/// Invoke `visitor` once per field. Order is unspecified.
	fn accept_field_visitor(&self, visitor: &mut dyn ObjectFieldVisitor);

	/// Custom snapshot strategy, used instead of walking the fields.
	fn snapshotter(&self) -> Option<&dyn Snapshotter> {
		None
	}

	/// Concrete object for downcasting, if the implementation exposes it.
	fn as_any_object(&self) -> Option<&dyn Any> {
		None
	}
}

/// Receives object fields from [`ValueObject::accept_field_visitor`].
pub trait ObjectFieldVisitor {
	/// Called for one field.
	fn visit_object_field(&mut self, key: &str, value: &Value<'_>);
}

impl<F> ObjectFieldVisitor for F
where
	F: FnMut(&str, &Value<'_>),
{
	fn visit_object_field(&mut self, key: &str, value: &Value<'_>) {
		self(key, value)
	}
}

/// Produces an owned copy of a payload that is independent of later mutation.
pub trait Snapshotter: Send + Sync {
	/// Capture the current state.
	fn take_snapshot(&self) -> Value<'static>;
}

/// Opaque payload carried by the Any type.
pub trait AnyValue: Any + Send + Sync {
	/// Upcast for downcasting.
	fn as_any(&self) -> &dyn Any;

	/// Rust type name of the payload.
	fn type_name(&self) -> &'static str;
}

impl<T> AnyValue for T
where
	T: Any + Send + Sync,
{
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn type_name(&self) -> &'static str {
		type_name::<T>()
	}
}

impl dyn AnyValue {
	/// Borrow the payload as `T` if it has that type.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	/// Whether the payload has type `T`.
	pub fn is<T: Any>(&self) -> bool {
		self.as_any().is::<T>()
	}
}

/// Borrowed opaque payload of an Any value.
///
/// `Debug` uses the payload's own rendering when the value was built from a `Debug` type, and the
/// payload's type name otherwise.
#[derive(Clone, Copy)]
pub struct Opaque<'a> {
	value: &'a (dyn AnyValue + 'static),
	debug: Option<&'a (dyn fmt::Debug + Send + Sync)>,
}

impl<'a> Opaque<'a> {
	pub(crate) fn new(value: &'a (dyn AnyValue + 'static), debug: Option<&'a (dyn fmt::Debug + Send + Sync)>) -> Self {
		Self { value, debug }
	}

	/// The payload itself.
	pub fn value(&self) -> &'a (dyn AnyValue + 'static) {
		self.value
	}

	/// Rust type name of the payload.
	pub fn type_name(&self) -> &'static str {
		self.value.type_name()
	}

	/// Borrow the payload as `T` if it has that type.
	pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
		self.value.as_any().downcast_ref::<T>()
	}

	/// Whether the payload has type `T`.
	pub fn is<T: Any>(&self) -> bool {
		self.value.as_any().is::<T>()
	}
}

impl fmt::Debug for Opaque<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.debug {
			Some(debug) => fmt::Debug::fmt(debug, f),
			None => write!(f, "<{}>", self.type_name()),
		}
	}
}

impl fmt::Debug for dyn ValueArray + '_ {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut list = f.debug_list();
		self.accept_item_visitor(&mut |_: usize, item: &Value<'_>| {
			list.entry(&item.view());
		});
		list.finish()
	}
}

impl fmt::Debug for dyn ValueObject + '_ {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut map = f.debug_map();
		self.accept_field_visitor(&mut |key: &str, value: &Value<'_>| {
			map.entry(&key, &value.view());
		});
		map.finish()
	}
}

impl ValueArray for Vec<Value<'static>> {
	fn item_count(&self) -> usize {
		self.len()
	}

	fn accept_item_visitor(&self, visitor: &mut dyn ArrayItemVisitor) {
		for (index, item) in self.iter().enumerate() {
			visitor.visit_array_item(index, item);
		}
	}
}

impl ValueObject for HashMap<String, Value<'static>> {
	fn field_count(&self) -> usize {
		self.len()
	}

	fn accept_field_visitor(&self, visitor: &mut dyn ObjectFieldVisitor) {
		for (key, value) in self {
			visitor.visit_object_field(key, value);
		}
	}
}
