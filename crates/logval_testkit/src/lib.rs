//! Shared test fixtures for workspace crates.

use std::error::Error;
use std::fmt;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use logval::value::{ArrayItemVisitor, Formatted, ObjectFieldVisitor, Opaque, Snapshotter, Value, ValueArray, ValueObject, Visitor};

/// Array whose items can be replaced while values borrow it.
#[derive(Default)]
pub struct LiveArray {
	items: RwLock<Vec<Value<'static>>>,
}

impl LiveArray {
	/// Array holding `items`.
	pub fn new(items: Vec<Value<'static>>) -> Self {
		Self { items: RwLock::new(items) }
	}

	/// Append an item.
	pub fn push(&self, item: Value<'static>) {
		self.items.write().expect("live array lock").push(item);
	}

	/// Replace the item at `index`.
	pub fn set(&self, index: usize, item: Value<'static>) {
		self.items.write().expect("live array lock")[index] = item;
	}
}

impl ValueArray for LiveArray {
	fn item_count(&self) -> usize {
		self.items.read().expect("live array lock").len()
	}

	fn accept_item_visitor(&self, visitor: &mut dyn ArrayItemVisitor) {
		for (index, item) in self.items.read().expect("live array lock").iter().enumerate() {
			visitor.visit_array_item(index, item);
		}
	}
}

/// Object whose fields can change while values borrow it. Field order is insertion order.
#[derive(Default)]
pub struct LiveObject {
	fields: RwLock<Vec<(String, Value<'static>)>>,
}

impl LiveObject {
	/// Insert or replace the field `key`.
	pub fn insert(&self, key: &str, value: Value<'static>) {
		let mut fields = self.fields.write().expect("live object lock");
		match fields.iter_mut().find(|(existing, _)| existing == key) {
			Some((_, slot)) => *slot = value,
			None => fields.push((key.to_owned(), value)),
		}
	}

	/// Remove the field `key`.
	pub fn remove(&self, key: &str) {
		self.fields.write().expect("live object lock").retain(|(existing, _)| existing != key);
	}
}

impl ValueObject for LiveObject {
	fn field_count(&self) -> usize {
		self.fields.read().expect("live object lock").len()
	}

	fn accept_field_visitor(&self, visitor: &mut dyn ObjectFieldVisitor) {
		for (key, value) in self.fields.read().expect("live object lock").iter() {
			visitor.visit_object_field(key, value);
		}
	}
}

/// `Display` target whose text can change after a value wraps it.
pub struct MutableText(RwLock<String>);

impl MutableText {
	/// Text starting as `text`.
	pub fn new(text: &str) -> Self {
		Self(RwLock::new(text.to_owned()))
	}

	/// Replace the text.
	pub fn set(&self, text: &str) {
		*self.0.write().expect("text lock") = text.to_owned();
	}
}

impl fmt::Display for MutableText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.read().expect("text lock"))
	}
}

/// Array that snapshots itself into a fixed `Ints64` value and counts how often it did.
pub struct CountingSnapshotArray {
	values: Vec<i64>,
	snapshots: AtomicUsize,
}

impl CountingSnapshotArray {
	/// Array producing `values` on snapshot.
	pub fn new(values: Vec<i64>) -> Self {
		Self {
			values,
			snapshots: AtomicUsize::new(0),
		}
	}

	/// Number of snapshots taken so far.
	pub fn snapshots(&self) -> usize {
		self.snapshots.load(Ordering::SeqCst)
	}
}

impl ValueArray for CountingSnapshotArray {
	fn item_count(&self) -> usize {
		self.values.len()
	}

	fn accept_item_visitor(&self, visitor: &mut dyn ArrayItemVisitor) {
		for (index, value) in self.values.iter().enumerate() {
			visitor.visit_array_item(index, &Value::int64(*value));
		}
	}

	fn snapshotter(&self) -> Option<&dyn Snapshotter> {
		Some(self)
	}
}

impl Snapshotter for CountingSnapshotArray {
	fn take_snapshot(&self) -> Value<'static> {
		self.snapshots.fetch_add(1, Ordering::SeqCst);
		Value::const_ints64(self.values.clone())
	}
}

/// Visitor that records the name of every method it receives.
#[derive(Debug, Default)]
pub struct CallLog {
	/// Method names in call order.
	pub calls: Vec<&'static str>,
}

macro_rules! log_calls {
	($($method:ident($($ty:ty)?);)*) => {
		$(
			fn $method(&mut self $(, _: $ty)?) {
				self.calls.push(stringify!($method));
			}
		)*
	};
}

impl Visitor for CallLog {
	log_calls! {
		visit_none();
		visit_any(Option<Opaque<'_>>);
		visit_bool(bool);
		visit_int(isize);
		visit_int8(i8);
		visit_int16(i16);
		visit_int32(i32);
		visit_int64(i64);
		visit_uint(usize);
		visit_uint8(u8);
		visit_uint16(u16);
		visit_uint32(u32);
		visit_uint64(u64);
		visit_float32(f32);
		visit_float64(f64);
		visit_duration(Duration);
		visit_error(&(dyn Error + Send + Sync + 'static));
		visit_time(DateTime<FixedOffset>);
		visit_string(&str);
		visit_bytes(&[u8]);
		visit_bools(&[bool]);
		visit_ints(&[isize]);
		visit_ints8(&[i8]);
		visit_ints16(&[i16]);
		visit_ints32(&[i32]);
		visit_ints64(&[i64]);
		visit_uints(&[usize]);
		visit_uints8(&[u8]);
		visit_uints16(&[u16]);
		visit_uints32(&[u32]);
		visit_uints64(&[u64]);
		visit_floats32(&[f32]);
		visit_floats64(&[f64]);
		visit_durations(&[Duration]);
		visit_strings(&[String]);
		visit_array(&dyn ValueArray);
		visit_object(&dyn ValueObject);
		visit_stringer(&(dyn fmt::Display + Send + Sync));
		visit_formatter(Formatted<'_>);
	}
}

/// Serialize `value` to JSON through its serde adapter.
pub fn to_json(value: &Value<'_>) -> serde_json::Value {
	serde_json::to_value(value).expect("value serializes to json")
}
