use std::fmt;

/// Exact payload type stored in a [`Value`](crate::value::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Type {
	/// No payload.
	None = 0,
	/// Opaque payload, possibly nil.
	Any,
	/// `bool`.
	Bool,
	/// `isize`.
	Int,
	/// `i8`.
	Int8,
	/// `i16`.
	Int16,
	/// `i32`.
	Int32,
	/// `i64`.
	Int64,
	/// `usize`.
	Uint,
	/// `u8`.
	Uint8,
	/// `u16`.
	Uint16,
	/// `u32`.
	Uint32,
	/// `u64`.
	Uint64,
	/// `f32`.
	Float32,
	/// `f64`.
	Float64,
	/// `std::time::Duration`.
	Duration,
	/// Error trait object.
	Error,
	/// Instant with a fixed UTC offset.
	Time,
	/// UTF-8 text.
	String,
	/// Byte sequence.
	Bytes,
	/// `bool` sequence.
	Bools,
	/// `isize` sequence.
	Ints,
	/// `i8` sequence.
	Ints8,
	/// `i16` sequence.
	Ints16,
	/// `i32` sequence.
	Ints32,
	/// `i64` sequence.
	Ints64,
	/// `usize` sequence.
	Uints,
	/// `u8` sequence.
	Uints8,
	/// `u16` sequence.
	Uints16,
	/// `u32` sequence.
	Uints32,
	/// `u64` sequence.
	Uints64,
	/// `f32` sequence.
	Floats32,
	/// `f64` sequence.
	Floats64,
	/// `Duration` sequence.
	Durations,
	/// `String` sequence.
	Strings,
	/// Caller-defined array.
	Array,
	/// Caller-defined key/value object.
	Object,
	/// Object rendered through `Display` on demand.
	Stringer,
	/// Object rendered through a format template on demand.
	Formatter,
}

const ALL_TYPES: [Type; 39] = [
	Type::None,
	Type::Any,
	Type::Bool,
	Type::Int,
	Type::Int8,
	Type::Int16,
	Type::Int32,
	Type::Int64,
	Type::Uint,
	Type::Uint8,
	Type::Uint16,
	Type::Uint32,
	Type::Uint64,
	Type::Float32,
	Type::Float64,
	Type::Duration,
	Type::Error,
	Type::Time,
	Type::String,
	Type::Bytes,
	Type::Bools,
	Type::Ints,
	Type::Ints8,
	Type::Ints16,
	Type::Ints32,
	Type::Ints64,
	Type::Uints,
	Type::Uints8,
	Type::Uints16,
	Type::Uints32,
	Type::Uints64,
	Type::Floats32,
	Type::Floats64,
	Type::Durations,
	Type::Strings,
	Type::Array,
	Type::Object,
	Type::Stringer,
	Type::Formatter,
];

impl Type {
	/// Every type in tag order.
	pub const ALL: &'static [Type] = &ALL_TYPES;

	/// Decode a raw tag, returning `None` outside the closed set.
	pub fn from_repr(raw: u8) -> Option<Self> {
		ALL_TYPES.get(usize::from(raw)).copied()
	}

	/// Stable lowercase name.
	pub fn name(self) -> &'static str {
		match self {
			Type::None => "none",
			Type::Any => "any",
			Type::Bool => "bool",
			Type::Int => "int",
			Type::Int8 => "int8",
			Type::Int16 => "int16",
			Type::Int32 => "int32",
			Type::Int64 => "int64",
			Type::Uint => "uint",
			Type::Uint8 => "uint8",
			Type::Uint16 => "uint16",
			Type::Uint32 => "uint32",
			Type::Uint64 => "uint64",
			Type::Float32 => "float32",
			Type::Float64 => "float64",
			Type::Duration => "duration",
			Type::Error => "error",
			Type::Time => "time",
			Type::String => "string",
			Type::Bytes => "bytes",
			Type::Bools => "bools",
			Type::Ints => "ints",
			Type::Ints8 => "ints8",
			Type::Ints16 => "ints16",
			Type::Ints32 => "ints32",
			Type::Ints64 => "ints64",
			Type::Uints => "uints",
			Type::Uints8 => "uints8",
			Type::Uints16 => "uints16",
			Type::Uints32 => "uints32",
			Type::Uints64 => "uints64",
			Type::Floats32 => "floats32",
			Type::Floats64 => "floats64",
			Type::Durations => "durations",
			Type::Strings => "strings",
			Type::Array => "array",
			Type::Object => "object",
			Type::Stringer => "stringer",
			Type::Formatter => "formatter",
		}
	}

	/// Coarse kind this type belongs to.
	pub fn kind(self) -> Kind {
		match self {
			Type::None => Kind::None,
			Type::Any => Kind::Any,
			Type::Bool => Kind::Bool,
			Type::Int
			| Type::Int8
			| Type::Int16
			| Type::Int32
			| Type::Int64
			| Type::Uint
			| Type::Uint8
			| Type::Uint16
			| Type::Uint32
			| Type::Uint64 => Kind::Int,
			Type::Float32 | Type::Float64 => Kind::Float,
			Type::Duration => Kind::Duration,
			Type::Error => Kind::Error,
			Type::Time => Kind::Time,
			Type::String | Type::Stringer | Type::Formatter => Kind::String,
			Type::Bytes => Kind::Bytes,
			Type::Bools
			| Type::Ints
			| Type::Ints8
			| Type::Ints16
			| Type::Ints32
			| Type::Ints64
			| Type::Uints
			| Type::Uints8
			| Type::Uints16
			| Type::Uints32
			| Type::Uints64
			| Type::Floats32
			| Type::Floats64
			| Type::Durations
			| Type::Strings
			| Type::Array => Kind::Array,
			Type::Object => Kind::Object,
		}
	}

	/// Whether the type is a homogeneous sequence backed by a slice.
	pub fn is_sequence(self) -> bool {
		matches!(
			self,
			Type::Bytes
				| Type::Bools | Type::Ints
				| Type::Ints8 | Type::Ints16
				| Type::Ints32 | Type::Ints64
				| Type::Uints | Type::Uints8
				| Type::Uints16 | Type::Uints32
				| Type::Uints64 | Type::Floats32
				| Type::Floats64 | Type::Durations
				| Type::Strings
		)
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Coarse classification of a [`Type`], as seen by encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
	/// No payload.
	None,
	/// Opaque payload.
	Any,
	/// Boolean.
	Bool,
	/// Signed or unsigned integer.
	Int,
	/// Floating point.
	Float,
	/// Text, eager or deferred.
	String,
	/// Error.
	Error,
	/// Instant.
	Time,
	/// Duration.
	Duration,
	/// Byte sequence.
	Bytes,
	/// Ordered items.
	Array,
	/// Key/value fields.
	Object,
}

const TYPE_MASK: u8 = (1 << 7) - 1;
const CONST_BIT: u8 = 1 << 7;

/// Packed type tag plus const flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bits(u8);

impl Bits {
	pub(crate) fn new(ty: Type, is_const: bool) -> Self {
		let raw = ty as u8;
		Self(if is_const { raw | CONST_BIT } else { raw })
	}

	#[cfg(test)]
	pub(crate) fn from_raw(raw: u8) -> Self {
		Self(raw)
	}

	/// Decoded type; a tag outside the closed set means the value is corrupted.
	pub(crate) fn ty(self) -> Type {
		let raw = self.0 & TYPE_MASK;
		Type::from_repr(raw).unwrap_or_else(|| unhandled_tag(raw))
	}

	pub(crate) fn is_const(self) -> bool {
		self.0 & CONST_BIT != 0
	}

	pub(crate) fn with_const(self) -> Self {
		Self(self.0 | CONST_BIT)
	}
}

#[cold]
pub(crate) fn unhandled_tag(raw: u8) -> ! {
	panic!("logval: internal error: unhandled value type: {raw}")
}

#[cold]
pub(crate) fn slot_mismatch(ty: Type) -> ! {
	panic!("logval: internal error: storage does not match value type {ty}")
}
