use std::error::Error;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::value::capability::{Opaque, ValueArray, ValueObject};
use crate::value::{Formatted, Value, ValueRef};

/// Receives the payload of a value through exactly one typed method.
pub trait Visitor {
	/// Value without payload.
	fn visit_none(&mut self);
	/// Opaque payload; `None` is nil.
	fn visit_any(&mut self, value: Option<Opaque<'_>>);
	/// `bool` payload.
	fn visit_bool(&mut self, value: bool);
	/// `isize` payload.
	fn visit_int(&mut self, value: isize);
	/// `i8` payload.
	fn visit_int8(&mut self, value: i8);
	/// `i16` payload.
	fn visit_int16(&mut self, value: i16);
	/// `i32` payload.
	fn visit_int32(&mut self, value: i32);
	/// `i64` payload.
	fn visit_int64(&mut self, value: i64);
	/// `usize` payload.
	fn visit_uint(&mut self, value: usize);
	/// `u8` payload.
	fn visit_uint8(&mut self, value: u8);
	/// `u16` payload.
	fn visit_uint16(&mut self, value: u16);
	/// `u32` payload.
	fn visit_uint32(&mut self, value: u32);
	/// `u64` payload.
	fn visit_uint64(&mut self, value: u64);
	/// `f32` payload.
	fn visit_float32(&mut self, value: f32);
	/// `f64` payload.
	fn visit_float64(&mut self, value: f64);
	/// Duration payload.
	fn visit_duration(&mut self, value: Duration);
	/// Error payload.
	fn visit_error(&mut self, value: &(dyn Error + Send + Sync + 'static));
	/// Instant payload.
	fn visit_time(&mut self, value: DateTime<FixedOffset>);
	/// Text payload.
	fn visit_string(&mut self, value: &str);
	/// Byte sequence.
	fn visit_bytes(&mut self, value: &[u8]);
	/// `bool` sequence.
	fn visit_bools(&mut self, value: &[bool]);
	/// `isize` sequence.
	fn visit_ints(&mut self, value: &[isize]);
	/// `i8` sequence.
	fn visit_ints8(&mut self, value: &[i8]);
	/// `i16` sequence.
	fn visit_ints16(&mut self, value: &[i16]);
	/// `i32` sequence.
	fn visit_ints32(&mut self, value: &[i32]);
	/// `i64` sequence.
	fn visit_ints64(&mut self, value: &[i64]);
	/// `usize` sequence.
	fn visit_uints(&mut self, value: &[usize]);
	/// `u8` sequence.
	fn visit_uints8(&mut self, value: &[u8]);
	/// `u16` sequence.
	fn visit_uints16(&mut self, value: &[u16]);
	/// `u32` sequence.
	fn visit_uints32(&mut self, value: &[u32]);
	/// `u64` sequence.
	fn visit_uints64(&mut self, value: &[u64]);
	/// `f32` sequence.
	fn visit_floats32(&mut self, value: &[f32]);
	/// `f64` sequence.
	fn visit_floats64(&mut self, value: &[f64]);
	/// Duration sequence.
	fn visit_durations(&mut self, value: &[Duration]);
	/// Text sequence.
	fn visit_strings(&mut self, value: &[String]);
	/// Caller-defined array.
	fn visit_array(&mut self, value: &dyn ValueArray);
	/// Caller-defined object.
	fn visit_object(&mut self, value: &dyn ValueObject);
	/// Deferred `Display` payload; rendering is up to the visitor.
	fn visit_stringer(&mut self, value: &(dyn fmt::Display + Send + Sync));
	/// Deferred template payload; rendering is up to the visitor.
	fn visit_formatter(&mut self, value: Formatted<'_>);
}

impl ValueRef<'_> {
	/// Invoke the visitor method matching this payload.
	pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) {
		match self {
			ValueRef::None => visitor.visit_none(),
			ValueRef::Any(value) => visitor.visit_any(value),
			ValueRef::Bool(value) => visitor.visit_bool(value),
			ValueRef::Int(value) => visitor.visit_int(value),
			ValueRef::Int8(value) => visitor.visit_int8(value),
			ValueRef::Int16(value) => visitor.visit_int16(value),
			ValueRef::Int32(value) => visitor.visit_int32(value),
			ValueRef::Int64(value) => visitor.visit_int64(value),
			ValueRef::Uint(value) => visitor.visit_uint(value),
			ValueRef::Uint8(value) => visitor.visit_uint8(value),
			ValueRef::Uint16(value) => visitor.visit_uint16(value),
			ValueRef::Uint32(value) => visitor.visit_uint32(value),
			ValueRef::Uint64(value) => visitor.visit_uint64(value),
			ValueRef::Float32(value) => visitor.visit_float32(value),
			ValueRef::Float64(value) => visitor.visit_float64(value),
			ValueRef::Duration(value) => visitor.visit_duration(value),
			ValueRef::Error(value) => visitor.visit_error(value),
			ValueRef::Time(value) => visitor.visit_time(value),
			ValueRef::String(value) => visitor.visit_string(value),
			ValueRef::Bytes(value) => visitor.visit_bytes(value),
			ValueRef::Bools(value) => visitor.visit_bools(value),
			ValueRef::Ints(value) => visitor.visit_ints(value),
			ValueRef::Ints8(value) => visitor.visit_ints8(value),
			ValueRef::Ints16(value) => visitor.visit_ints16(value),
			ValueRef::Ints32(value) => visitor.visit_ints32(value),
			ValueRef::Ints64(value) => visitor.visit_ints64(value),
			ValueRef::Uints(value) => visitor.visit_uints(value),
			ValueRef::Uints8(value) => visitor.visit_uints8(value),
			ValueRef::Uints16(value) => visitor.visit_uints16(value),
			ValueRef::Uints32(value) => visitor.visit_uints32(value),
			ValueRef::Uints64(value) => visitor.visit_uints64(value),
			ValueRef::Floats32(value) => visitor.visit_floats32(value),
			ValueRef::Floats64(value) => visitor.visit_floats64(value),
			ValueRef::Durations(value) => visitor.visit_durations(value),
			ValueRef::Strings(value) => visitor.visit_strings(value),
			ValueRef::Array(value) => visitor.visit_array(value),
			ValueRef::Object(value) => visitor.visit_object(value),
			ValueRef::Stringer(value) => visitor.visit_stringer(value),
			ValueRef::Formatter(value) => visitor.visit_formatter(value),
		}
	}
}

impl Value<'_> {
	/// Invoke exactly one visitor method, selected by the value's type.
	///
	/// # Panics
	///
	/// Panics if the value is corrupted, see [`Value::view`].
	pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
		self.view().accept(visitor);
	}
}

/// Visitor that discards every payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoringVisitor;

impl Visitor for IgnoringVisitor {
	fn visit_none(&mut self) {}
	fn visit_any(&mut self, _: Option<Opaque<'_>>) {}
	fn visit_bool(&mut self, _: bool) {}
	fn visit_int(&mut self, _: isize) {}
	fn visit_int8(&mut self, _: i8) {}
	fn visit_int16(&mut self, _: i16) {}
	fn visit_int32(&mut self, _: i32) {}
	fn visit_int64(&mut self, _: i64) {}
	fn visit_uint(&mut self, _: usize) {}
	fn visit_uint8(&mut self, _: u8) {}
	fn visit_uint16(&mut self, _: u16) {}
	fn visit_uint32(&mut self, _: u32) {}
	fn visit_uint64(&mut self, _: u64) {}
	fn visit_float32(&mut self, _: f32) {}
	fn visit_float64(&mut self, _: f64) {}
	fn visit_duration(&mut self, _: Duration) {}
	fn visit_error(&mut self, _: &(dyn Error + Send + Sync + 'static)) {}
	fn visit_time(&mut self, _: DateTime<FixedOffset>) {}
	fn visit_string(&mut self, _: &str) {}
	fn visit_bytes(&mut self, _: &[u8]) {}
	fn visit_bools(&mut self, _: &[bool]) {}
	fn visit_ints(&mut self, _: &[isize]) {}
	fn visit_ints8(&mut self, _: &[i8]) {}
	fn visit_ints16(&mut self, _: &[i16]) {}
	fn visit_ints32(&mut self, _: &[i32]) {}
	fn visit_ints64(&mut self, _: &[i64]) {}
	fn visit_uints(&mut self, _: &[usize]) {}
	fn visit_uints8(&mut self, _: &[u8]) {}
	fn visit_uints16(&mut self, _: &[u16]) {}
	fn visit_uints32(&mut self, _: &[u32]) {}
	fn visit_uints64(&mut self, _: &[u64]) {}
	fn visit_floats32(&mut self, _: &[f32]) {}
	fn visit_floats64(&mut self, _: &[f64]) {}
	fn visit_durations(&mut self, _: &[Duration]) {}
	fn visit_strings(&mut self, _: &[String]) {}
	fn visit_array(&mut self, _: &dyn ValueArray) {}
	fn visit_object(&mut self, _: &dyn ValueObject) {}
	fn visit_stringer(&mut self, _: &(dyn fmt::Display + Send + Sync)) {}
	fn visit_formatter(&mut self, _: Formatted<'_>) {}
}
