use std::error::Error;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::value::capability::{Opaque, ValueArray, ValueObject};
use crate::value::{Formatted, Result, Type, Value, ValueError};

/// Borrowed payload of a [`Value`], one variant per [`Type`].
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
	/// No payload.
	None,
	/// Opaque payload; `None` is nil.
	Any(Option<Opaque<'a>>),
	/// `bool` payload.
	Bool(bool),
	/// `isize` payload.
	Int(isize),
	/// `i8` payload.
	Int8(i8),
	/// `i16` payload.
	Int16(i16),
	/// `i32` payload.
	Int32(i32),
	/// `i64` payload.
	Int64(i64),
	/// `usize` payload.
	Uint(usize),
	/// `u8` payload.
	Uint8(u8),
	/// `u16` payload.
	Uint16(u16),
	/// `u32` payload.
	Uint32(u32),
	/// `u64` payload.
	Uint64(u64),
	/// `f32` payload.
	Float32(f32),
	/// `f64` payload.
	Float64(f64),
	/// Duration payload.
	Duration(Duration),
	/// Error payload.
	Error(&'a (dyn Error + Send + Sync + 'static)),
	/// Instant with its UTC offset.
	Time(DateTime<FixedOffset>),
	/// Text payload.
	String(&'a str),
	/// Byte sequence.
	Bytes(&'a [u8]),
	/// `bool` sequence.
	Bools(&'a [bool]),
	/// `isize` sequence.
	Ints(&'a [isize]),
	/// `i8` sequence.
	Ints8(&'a [i8]),
	/// `i16` sequence.
	Ints16(&'a [i16]),
	/// `i32` sequence.
	Ints32(&'a [i32]),
	/// `i64` sequence.
	Ints64(&'a [i64]),
	/// `usize` sequence.
	Uints(&'a [usize]),
	/// `u8` sequence.
	Uints8(&'a [u8]),
	/// `u16` sequence.
	Uints16(&'a [u16]),
	/// `u32` sequence.
	Uints32(&'a [u32]),
	/// `u64` sequence.
	Uints64(&'a [u64]),
	/// `f32` sequence.
	Floats32(&'a [f32]),
	/// `f64` sequence.
	Floats64(&'a [f64]),
	/// Duration sequence.
	Durations(&'a [Duration]),
	/// Text sequence.
	Strings(&'a [String]),
	/// Caller-defined array.
	Array(&'a dyn ValueArray),
	/// Caller-defined object.
	Object(&'a dyn ValueObject),
	/// Object rendered through `Display` when consumed.
	Stringer(&'a (dyn fmt::Display + Send + Sync)),
	/// Object rendered through a template when consumed.
	Formatter(Formatted<'a>),
}

impl ValueRef<'_> {
	/// Type of the viewed payload.
	pub fn ty(&self) -> Type {
		match self {
			ValueRef::None => Type::None,
			ValueRef::Any(_) => Type::Any,
			ValueRef::Bool(_) => Type::Bool,
			ValueRef::Int(_) => Type::Int,
			ValueRef::Int8(_) => Type::Int8,
			ValueRef::Int16(_) => Type::Int16,
			ValueRef::Int32(_) => Type::Int32,
			ValueRef::Int64(_) => Type::Int64,
			ValueRef::Uint(_) => Type::Uint,
			ValueRef::Uint8(_) => Type::Uint8,
			ValueRef::Uint16(_) => Type::Uint16,
			ValueRef::Uint32(_) => Type::Uint32,
			ValueRef::Uint64(_) => Type::Uint64,
			ValueRef::Float32(_) => Type::Float32,
			ValueRef::Float64(_) => Type::Float64,
			ValueRef::Duration(_) => Type::Duration,
			ValueRef::Error(_) => Type::Error,
			ValueRef::Time(_) => Type::Time,
			ValueRef::String(_) => Type::String,
			ValueRef::Bytes(_) => Type::Bytes,
			ValueRef::Bools(_) => Type::Bools,
			ValueRef::Ints(_) => Type::Ints,
			ValueRef::Ints8(_) => Type::Ints8,
			ValueRef::Ints16(_) => Type::Ints16,
			ValueRef::Ints32(_) => Type::Ints32,
			ValueRef::Ints64(_) => Type::Ints64,
			ValueRef::Uints(_) => Type::Uints,
			ValueRef::Uints8(_) => Type::Uints8,
			ValueRef::Uints16(_) => Type::Uints16,
			ValueRef::Uints32(_) => Type::Uints32,
			ValueRef::Uints64(_) => Type::Uints64,
			ValueRef::Floats32(_) => Type::Floats32,
			ValueRef::Floats64(_) => Type::Floats64,
			ValueRef::Durations(_) => Type::Durations,
			ValueRef::Strings(_) => Type::Strings,
			ValueRef::Array(_) => Type::Array,
			ValueRef::Object(_) => Type::Object,
			ValueRef::Stringer(_) => Type::Stringer,
			ValueRef::Formatter(_) => Type::Formatter,
		}
	}
}

impl fmt::Debug for ValueRef<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			ValueRef::None => f.write_str("None"),
			ValueRef::Any(None) => f.write_str("Any(nil)"),
			ValueRef::Any(Some(value)) => f.debug_tuple("Any").field(&value).finish(),
			ValueRef::Bool(value) => f.debug_tuple("Bool").field(&value).finish(),
			ValueRef::Int(value) => f.debug_tuple("Int").field(&value).finish(),
			ValueRef::Int8(value) => f.debug_tuple("Int8").field(&value).finish(),
			ValueRef::Int16(value) => f.debug_tuple("Int16").field(&value).finish(),
			ValueRef::Int32(value) => f.debug_tuple("Int32").field(&value).finish(),
			ValueRef::Int64(value) => f.debug_tuple("Int64").field(&value).finish(),
			ValueRef::Uint(value) => f.debug_tuple("Uint").field(&value).finish(),
			ValueRef::Uint8(value) => f.debug_tuple("Uint8").field(&value).finish(),
			ValueRef::Uint16(value) => f.debug_tuple("Uint16").field(&value).finish(),
			ValueRef::Uint32(value) => f.debug_tuple("Uint32").field(&value).finish(),
			ValueRef::Uint64(value) => f.debug_tuple("Uint64").field(&value).finish(),
			ValueRef::Float32(value) => f.debug_tuple("Float32").field(&value).finish(),
			ValueRef::Float64(value) => f.debug_tuple("Float64").field(&value).finish(),
			ValueRef::Duration(value) => f.debug_tuple("Duration").field(&value).finish(),
			ValueRef::Error(value) => f.debug_tuple("Error").field(&format_args!("{value}")).finish(),
			ValueRef::Time(value) => f.debug_tuple("Time").field(&format_args!("{}", value.to_rfc3339())).finish(),
			ValueRef::String(value) => f.debug_tuple("String").field(&value).finish(),
			ValueRef::Bytes(value) => f.debug_tuple("Bytes").field(&value).finish(),
			ValueRef::Bools(value) => f.debug_tuple("Bools").field(&value).finish(),
			ValueRef::Ints(value) => f.debug_tuple("Ints").field(&value).finish(),
			ValueRef::Ints8(value) => f.debug_tuple("Ints8").field(&value).finish(),
			ValueRef::Ints16(value) => f.debug_tuple("Ints16").field(&value).finish(),
			ValueRef::Ints32(value) => f.debug_tuple("Ints32").field(&value).finish(),
			ValueRef::Ints64(value) => f.debug_tuple("Ints64").field(&value).finish(),
			ValueRef::Uints(value) => f.debug_tuple("Uints").field(&value).finish(),
			ValueRef::Uints8(value) => f.debug_tuple("Uints8").field(&value).finish(),
			ValueRef::Uints16(value) => f.debug_tuple("Uints16").field(&value).finish(),
			ValueRef::Uints32(value) => f.debug_tuple("Uints32").field(&value).finish(),
			ValueRef::Uints64(value) => f.debug_tuple("Uints64").field(&value).finish(),
			ValueRef::Floats32(value) => f.debug_tuple("Floats32").field(&value).finish(),
			ValueRef::Floats64(value) => f.debug_tuple("Floats64").field(&value).finish(),
			ValueRef::Durations(value) => f.debug_tuple("Durations").field(&value).finish(),
			ValueRef::Strings(value) => f.debug_tuple("Strings").field(&value).finish(),
			ValueRef::Array(array) => fmt::Debug::fmt(array, f),
			ValueRef::Object(object) => fmt::Debug::fmt(object, f),
			ValueRef::Stringer(value) => f.debug_tuple("Stringer").field(&format_args!("{value}")).finish(),
			ValueRef::Formatter(formatted) => f.debug_tuple("Formatter").field(&format_args!("{formatted}")).finish(),
		}
	}
}

macro_rules! copy_accessors {
	($($getter:ident => $variant:ident($ty:ty);)*) => {
		impl Value<'_> {
			$(
				#[doc = concat!("Payload of a [`Type::", stringify!($variant), "`] value.")]
				pub fn $getter(&self) -> Result<$ty> {
					match self.view() {
						ValueRef::$variant(value) => Ok(value),
						other => Err(mismatch(Type::$variant, other.ty())),
					}
				}
			)*
		}
	};
}

copy_accessors! {
	as_bool => Bool(bool);
	as_int => Int(isize);
	as_int8 => Int8(i8);
	as_int16 => Int16(i16);
	as_int32 => Int32(i32);
	as_int64 => Int64(i64);
	as_uint => Uint(usize);
	as_uint8 => Uint8(u8);
	as_uint16 => Uint16(u16);
	as_uint32 => Uint32(u32);
	as_uint64 => Uint64(u64);
	as_float32 => Float32(f32);
	as_float64 => Float64(f64);
	as_duration => Duration(Duration);
	as_time => Time(DateTime<FixedOffset>);
}

macro_rules! sequence_accessors {
	($(($variant:ident, $elem:ty, $ctor:ident, $const_ctor:ident, $getter:ident, $visit:ident)),* $(,)?) => {
		impl Value<'_> {
			$(
				#[doc = concat!("Items of a [`Type::", stringify!($variant), "`] value.")]
				pub fn $getter(&self) -> Result<&[$elem]> {
					match self.view() {
						ValueRef::$variant(values) => Ok(values),
						other => Err(mismatch(Type::$variant, other.ty())),
					}
				}
			)*
		}
	};
}

with_sequences!(sequence_accessors);

impl Value<'_> {
	/// Opaque payload of an Any value; `None` is nil.
	pub fn as_opaque(&self) -> Result<Option<Opaque<'_>>> {
		match self.view() {
			ValueRef::Any(value) => Ok(value),
			other => Err(mismatch(Type::Any, other.ty())),
		}
	}

	/// Payload of an Error value.
	pub fn as_error(&self) -> Result<&(dyn Error + Send + Sync + 'static)> {
		match self.view() {
			ValueRef::Error(value) => Ok(value),
			other => Err(mismatch(Type::Error, other.ty())),
		}
	}

	/// Text of a String value.
	pub fn as_string(&self) -> Result<&str> {
		match self.view() {
			ValueRef::String(value) => Ok(value),
			other => Err(mismatch(Type::String, other.ty())),
		}
	}

	/// Payload of an Array value.
	pub fn as_array(&self) -> Result<&dyn ValueArray> {
		match self.view() {
			ValueRef::Array(value) => Ok(value),
			other => Err(mismatch(Type::Array, other.ty())),
		}
	}

	/// Payload of an Object value.
	pub fn as_object(&self) -> Result<&dyn ValueObject> {
		match self.view() {
			ValueRef::Object(value) => Ok(value),
			other => Err(mismatch(Type::Object, other.ty())),
		}
	}

	/// Wrapped object of a Stringer value, unrendered.
	pub fn as_stringer(&self) -> Result<&(dyn fmt::Display + Send + Sync)> {
		match self.view() {
			ValueRef::Stringer(value) => Ok(value),
			other => Err(mismatch(Type::Stringer, other.ty())),
		}
	}

	/// Template and target of a Formatter value, unrendered.
	pub fn as_formatter(&self) -> Result<Formatted<'_>> {
		match self.view() {
			ValueRef::Formatter(value) => Ok(value),
			other => Err(mismatch(Type::Formatter, other.ty())),
		}
	}
}

fn mismatch(expected: Type, actual: Type) -> ValueError {
	ValueError::TypeMismatch { expected, actual }
}
