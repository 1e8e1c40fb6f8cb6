use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::value::capability::{AnyValue, Opaque, Snapshotter, ValueArray, ValueObject};
use crate::value::retained::Buf;
use crate::value::types::{Bits, slot_mismatch};
use crate::value::{Formatted, Kind, Type, ValueRef};

pub(crate) type DynError = dyn Error + Send + Sync;
pub(crate) type DynDisplay = dyn fmt::Display + Send + Sync;
pub(crate) type DynDebug = dyn fmt::Debug + Send + Sync;

/// One payload of a closed set of types, tagged with its [`Type`] and a const flag.
///
/// Non-const values may alias caller memory for `'v`. Const values are immutable for their whole
/// life and can be shared freely; [`Value::snapshot`] turns any value into a const one.
///
/// Cloning is shallow: clones of a non-const value observe the same caller memory.
#[derive(Clone)]
pub struct Value<'v> {
	pub(crate) bits: Bits,
	pub(crate) slot: Slot<'v>,
}

/// Backing storage; which variant is meaningful is decided by the tag alone.
#[derive(Clone)]
pub(crate) enum Slot<'v> {
	Empty,
	/// Bit pattern of a bool, integer, or float.
	Word(u64),
	Duration(Duration),
	Time(DateTime<FixedOffset>),
	Error(Buf<'v, DynError>),
	Str(Buf<'v, str>),
	Seq(Seq<'v>),
	Array(Buf<'v, dyn ValueArray>),
	Object(Buf<'v, dyn ValueObject>),
	Stringer(Buf<'v, DynDisplay>),
	Formatter {
		template: Buf<'v, str>,
		target: Buf<'v, DynDebug>,
	},
	Any(AnySlot<'v>),
}

/// Storage of the Any type.
#[derive(Clone)]
pub(crate) enum AnySlot<'v> {
	Nil,
	Borrowed {
		value: &'v (dyn AnyValue + 'static),
		debug: Option<&'v DynDebug>,
		snapshotter: Option<&'v dyn Snapshotter>,
	},
	Retained {
		value: Arc<dyn AnyValue>,
		debug: Option<Arc<DynDebug>>,
	},
}

impl AnySlot<'_> {
	pub(crate) fn get(&self) -> Option<Opaque<'_>> {
		match self {
			AnySlot::Nil => None,
			AnySlot::Borrowed { value, debug, .. } => Some(Opaque::new(*value, *debug)),
			AnySlot::Retained { value, debug } => Some(Opaque::new(&**value, debug.as_deref())),
		}
	}
}

macro_rules! define_seq {
	($(($variant:ident, $elem:ty, $ctor:ident, $const_ctor:ident, $getter:ident, $visit:ident)),* $(,)?) => {
		/// Typed storage of a homogeneous sequence.
		#[derive(Clone)]
		pub(crate) enum Seq<'v> {
			$($variant(Buf<'v, [$elem]>),)*
		}

		impl<'v> Seq<'v> {
			pub(crate) fn ty(&self) -> Type {
				match self {
					$(Seq::$variant(_) => Type::$variant,)*
				}
			}

			pub(crate) fn view(&self) -> ValueRef<'_> {
				match self {
					$(Seq::$variant(buf) => ValueRef::$variant(buf.get()),)*
				}
			}

			/// Owned copy, sharing storage that is already retained.
			pub(crate) fn to_retained(&self) -> Seq<'static> {
				match self {
					$(Seq::$variant(buf) => Seq::$variant(buf.to_retained()),)*
				}
			}

			pub(crate) fn retained(&self) -> Option<Seq<'static>> {
				match self {
					$(Seq::$variant(buf) => buf.retained().map(Seq::$variant),)*
				}
			}
		}
	};
}

with_sequences!(define_seq);

impl Slot<'_> {
	/// The same payload without borrowed parts, or `None` if any part borrows.
	pub(crate) fn retained(&self) -> Option<Slot<'static>> {
		Some(match self {
			Slot::Empty => Slot::Empty,
			Slot::Word(word) => Slot::Word(*word),
			Slot::Duration(duration) => Slot::Duration(*duration),
			Slot::Time(time) => Slot::Time(*time),
			Slot::Error(error) => Slot::Error(error.retained()?),
			Slot::Str(text) => Slot::Str(text.retained()?),
			Slot::Seq(seq) => Slot::Seq(seq.retained()?),
			Slot::Array(array) => Slot::Array(array.retained()?),
			Slot::Object(object) => Slot::Object(object.retained()?),
			Slot::Stringer(target) => Slot::Stringer(target.retained()?),
			Slot::Formatter { template, target } => Slot::Formatter {
				template: template.retained()?,
				target: target.retained()?,
			},
			Slot::Any(AnySlot::Nil) => Slot::Any(AnySlot::Nil),
			Slot::Any(AnySlot::Retained { value, debug }) => Slot::Any(AnySlot::Retained {
				value: Arc::clone(value),
				debug: debug.clone(),
			}),
			Slot::Any(AnySlot::Borrowed { .. }) => return None,
		})
	}
}

impl<'v> Value<'v> {
	pub(crate) fn from_slot(ty: Type, is_const: bool, slot: Slot<'v>) -> Self {
		Self {
			bits: Bits::new(ty, is_const),
			slot,
		}
	}

	/// Exact payload type.
	pub fn ty(&self) -> Type {
		self.bits.ty()
	}

	/// Coarse payload kind.
	pub fn kind(&self) -> Kind {
		self.ty().kind()
	}

	/// Whether the payload is guaranteed never to change.
	pub fn is_const(&self) -> bool {
		self.bits.is_const()
	}

	/// Whether the value carries no payload.
	pub fn is_none(&self) -> bool {
		self.ty() == Type::None
	}

	/// Whether the value is the nil Any payload.
	pub fn is_nil(&self) -> bool {
		matches!((self.ty(), &self.slot), (Type::Any, Slot::Any(AnySlot::Nil)))
	}

	/// Borrowed view for exhaustive matching.
	///
	/// # Panics
	///
	/// Panics if the tag is outside the closed type set or does not match the stored payload.
	pub fn view(&self) -> ValueRef<'_> {
		let ty = self.ty();
		match (ty, &self.slot) {
			(Type::None, Slot::Empty) => ValueRef::None,
			(Type::Any, Slot::Any(any)) => ValueRef::Any(any.get()),
			(Type::Bool, Slot::Word(word)) => ValueRef::Bool(*word != 0),
			(Type::Int, Slot::Word(word)) => ValueRef::Int(*word as isize),
			(Type::Int8, Slot::Word(word)) => ValueRef::Int8(*word as i8),
			(Type::Int16, Slot::Word(word)) => ValueRef::Int16(*word as i16),
			(Type::Int32, Slot::Word(word)) => ValueRef::Int32(*word as i32),
			(Type::Int64, Slot::Word(word)) => ValueRef::Int64(*word as i64),
			(Type::Uint, Slot::Word(word)) => ValueRef::Uint(*word as usize),
			(Type::Uint8, Slot::Word(word)) => ValueRef::Uint8(*word as u8),
			(Type::Uint16, Slot::Word(word)) => ValueRef::Uint16(*word as u16),
			(Type::Uint32, Slot::Word(word)) => ValueRef::Uint32(*word as u32),
			(Type::Uint64, Slot::Word(word)) => ValueRef::Uint64(*word),
			(Type::Float32, Slot::Word(word)) => ValueRef::Float32(f32::from_bits(*word as u32)),
			(Type::Float64, Slot::Word(word)) => ValueRef::Float64(f64::from_bits(*word)),
			(Type::Duration, Slot::Duration(duration)) => ValueRef::Duration(*duration),
			(Type::Error, Slot::Error(error)) => ValueRef::Error(error.get()),
			(Type::Time, Slot::Time(time)) => ValueRef::Time(*time),
			(Type::String, Slot::Str(text)) => ValueRef::String(text.get()),
			(_, Slot::Seq(seq)) if seq.ty() == ty => seq.view(),
			(Type::Array, Slot::Array(array)) => ValueRef::Array(array.get()),
			(Type::Object, Slot::Object(object)) => ValueRef::Object(object.get()),
			(Type::Stringer, Slot::Stringer(target)) => ValueRef::Stringer(target.get()),
			(Type::Formatter, Slot::Formatter { template, target }) => ValueRef::Formatter(Formatted::new(template.get(), target.get())),
			_ => slot_mismatch(ty),
		}
	}
}

impl Default for Value<'_> {
	fn default() -> Self {
		Value::none()
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value")
			.field("type", &self.ty())
			.field("const", &self.is_const())
			.field("payload", &self.view())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::{Slot, Value};
	use crate::value::types::Bits;
	use crate::value::{Kind, Type};

	fn assert_send_sync<T: Send + Sync>() {}

	#[test]
	fn values_are_send_and_sync() {
		assert_send_sync::<Value<'static>>();
		assert_send_sync::<Value<'_>>();
	}

	#[test]
	fn none_is_const_and_empty() {
		let value = Value::default();
		assert_eq!(value.ty(), Type::None);
		assert_eq!(value.kind(), Kind::None);
		assert!(value.is_const());
		assert!(value.is_none());
	}

	#[test]
	#[should_panic(expected = "unhandled value type")]
	fn corrupted_tag_panics_on_view() {
		let mut value = Value::int32(5);
		value.bits = Bits::from_raw(0x7f);
		let _ = value.view();
	}

	#[test]
	#[should_panic(expected = "storage does not match")]
	fn mismatched_storage_panics_on_view() {
		let value = Value {
			bits: Bits::new(Type::String, true),
			slot: Slot::Word(1),
		};
		let _ = value.view();
	}

	#[test]
	fn debug_prints_type_and_payload() {
		let rendered = format!("{:?}", Value::int8(-3));
		assert_eq!(rendered, "Value { type: Int8, const: true, payload: Int8(-3) }");
	}
}
