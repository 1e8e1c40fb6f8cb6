use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};

use crate::value::capability::{AnyValue, Snapshotter, ValueArray, ValueObject};
use crate::value::repr::{AnySlot, DynDebug, DynDisplay, DynError, Seq, Slot};
use crate::value::retained::{Buf, Retained};
use crate::value::{Type, Value};

const REPR_TEMPLATE: &str = "{:?}";

macro_rules! scalar_constructors {
	($($ctor:ident($ty:ty) => $variant:ident;)*) => {
		impl Value<'static> {
			$(
				#[doc = concat!("Const [`Type::", stringify!($variant), "`] value.")]
				pub fn $ctor(value: $ty) -> Self {
					Value::from_slot(Type::$variant, true, Slot::Word(value as u64))
				}
			)*
		}
	};
}

scalar_constructors! {
	int(isize) => Int;
	int8(i8) => Int8;
	int16(i16) => Int16;
	int32(i32) => Int32;
	int64(i64) => Int64;
	uint(usize) => Uint;
	uint8(u8) => Uint8;
	uint16(u16) => Uint16;
	uint32(u32) => Uint32;
	uint64(u64) => Uint64;
}

macro_rules! sequence_constructors {
	($(($variant:ident, $elem:ty, $ctor:ident, $const_ctor:ident, $getter:ident, $visit:ident)),* $(,)?) => {
		impl<'v> Value<'v> {
			$(
				#[doc = concat!("Non-const [`Type::", stringify!($variant), "`] value borrowing `values`.")]
				pub fn $ctor(values: &'v [$elem]) -> Self {
					Value::from_slot(Type::$variant, false, Slot::Seq(Seq::$variant(Buf::Borrowed(values))))
				}
			)*
		}

		impl Value<'static> {
			$(
				#[doc = concat!("Const [`Type::", stringify!($variant), "`] value; `values` must not change afterwards.")]
				pub fn $const_ctor(values: impl Into<Retained<[$elem]>>) -> Self {
					Value::from_slot(Type::$variant, true, Slot::Seq(Seq::$variant(Buf::Retained(values.into()))))
				}
			)*
		}
	};
}

with_sequences!(sequence_constructors);

impl Value<'static> {
	/// Value without payload. Always const.
	pub fn none() -> Self {
		Value::from_slot(Type::None, true, Slot::Empty)
	}

	/// Const Any value without payload.
	pub fn nil() -> Self {
		Value::from_slot(Type::Any, true, Slot::Any(AnySlot::Nil))
	}

	/// Const [`Type::Bool`] value.
	pub fn bool(value: bool) -> Self {
		Value::from_slot(Type::Bool, true, Slot::Word(u64::from(value)))
	}

	/// Const [`Type::Float32`] value.
	pub fn float32(value: f32) -> Self {
		Value::from_slot(Type::Float32, true, Slot::Word(u64::from(value.to_bits())))
	}

	/// Const [`Type::Float64`] value.
	pub fn float64(value: f64) -> Self {
		Value::from_slot(Type::Float64, true, Slot::Word(value.to_bits()))
	}

	/// Const [`Type::Duration`] value.
	pub fn duration(value: Duration) -> Self {
		Value::from_slot(Type::Duration, true, Slot::Duration(value))
	}

	/// Const [`Type::Time`] value; the instant and its UTC offset are kept.
	pub fn time<Tz: TimeZone>(value: DateTime<Tz>) -> Self {
		Value::from_slot(Type::Time, true, Slot::Time(value.fixed_offset()))
	}

	/// Const [`Type::Time`] value in UTC. Instants outside the representable range are clamped.
	pub fn system_time(value: SystemTime) -> Self {
		Value::time(utc_from_system_time(value))
	}

	/// Const [`Type::String`] value.
	pub fn string(value: impl Into<Retained<str>>) -> Self {
		Value::from_slot(Type::String, true, Slot::Str(Buf::Retained(value.into())))
	}

	/// Const [`Type::Error`] value.
	pub fn error(value: Arc<dyn std::error::Error + Send + Sync>) -> Self {
		Value::from_slot(Type::Error, true, Slot::Error(Buf::Retained(Retained::Shared(value))))
	}

	/// Const [`Type::Array`] value; the array must not change afterwards.
	pub fn const_array(value: Arc<dyn ValueArray>) -> Self {
		Value::from_slot(Type::Array, true, Slot::Array(Buf::Retained(Retained::Shared(value))))
	}

	/// Const [`Type::Object`] value; the object must not change afterwards.
	pub fn const_object(value: Arc<dyn ValueObject>) -> Self {
		Value::from_slot(Type::Object, true, Slot::Object(Buf::Retained(Retained::Shared(value))))
	}

	/// Const [`Type::Stringer`] value; the rendering must not change afterwards.
	pub fn const_stringer(value: Arc<dyn fmt::Display + Send + Sync>) -> Self {
		Value::from_slot(Type::Stringer, true, Slot::Stringer(Buf::Retained(Retained::Shared(value))))
	}

	/// Const [`Type::Formatter`] value rendering `target` through `template`.
	pub fn const_formatter(template: impl Into<Retained<str>>, target: Arc<dyn fmt::Debug + Send + Sync>) -> Self {
		let target: Arc<DynDebug> = target;
		Value::from_slot(
			Type::Formatter,
			true,
			Slot::Formatter {
				template: Buf::Retained(template.into()),
				target: Buf::Retained(Retained::Shared(target)),
			},
		)
	}

	/// Const [`Type::Formatter`] value rendering `target` with `{:?}`.
	pub fn const_formatter_repr(target: Arc<dyn fmt::Debug + Send + Sync>) -> Self {
		Value::const_formatter(REPR_TEMPLATE, target)
	}

	/// Const [`Type::Any`] value holding an opaque payload.
	pub fn const_opaque<T: AnyValue + fmt::Debug>(value: Arc<T>) -> Self {
		let debug: Arc<DynDebug> = value.clone();
		Value::from_slot(
			Type::Any,
			true,
			Slot::Any(AnySlot::Retained {
				value,
				debug: Some(debug),
			}),
		)
	}

	/// Const [`Type::Any`] value whose payload has no `Debug` rendering.
	pub(crate) fn const_opaque_untyped(value: Arc<dyn AnyValue>) -> Self {
		Value::from_slot(Type::Any, true, Slot::Any(AnySlot::Retained { value, debug: None }))
	}
}

impl<'v> Value<'v> {
	/// Non-const [`Type::String`] value borrowing `value`.
	pub fn str(value: &'v str) -> Self {
		Value::from_slot(Type::String, false, Slot::Str(Buf::Borrowed(value)))
	}

	/// Non-const [`Type::Error`] value borrowing `value`.
	pub fn error_ref(value: &'v (dyn std::error::Error + Send + Sync + 'static)) -> Self {
		let value: &'v DynError = value;
		Value::from_slot(Type::Error, false, Slot::Error(Buf::Borrowed(value)))
	}

	/// Non-const [`Type::Array`] value borrowing `value`.
	pub fn array(value: &'v (dyn ValueArray + 'static)) -> Self {
		Value::from_slot(Type::Array, false, Slot::Array(Buf::Borrowed(value)))
	}

	/// Non-const [`Type::Object`] value borrowing `value`.
	pub fn object(value: &'v (dyn ValueObject + 'static)) -> Self {
		Value::from_slot(Type::Object, false, Slot::Object(Buf::Borrowed(value)))
	}

	/// Non-const [`Type::Stringer`] value; `value` is rendered when visited or snapshotted.
	pub fn stringer(value: &'v (dyn fmt::Display + Send + Sync + 'static)) -> Self {
		let value: &'v DynDisplay = value;
		Value::from_slot(Type::Stringer, false, Slot::Stringer(Buf::Borrowed(value)))
	}

	/// Non-const [`Type::Formatter`] value; `target` is rendered through `template` when visited or snapshotted.
	///
	/// `{}`, `{:?}` and `{:#?}` in `template` all render `target` with `Debug`.
	pub fn formatter(template: &'v str, target: &'v (dyn fmt::Debug + Send + Sync + 'static)) -> Self {
		let target: &'v DynDebug = target;
		Value::from_slot(
			Type::Formatter,
			false,
			Slot::Formatter {
				template: Buf::Borrowed(template),
				target: Buf::Borrowed(target),
			},
		)
	}

	/// Non-const [`Type::Formatter`] value rendering `target` with `{:?}`.
	pub fn formatter_repr(target: &'v (dyn fmt::Debug + Send + Sync + 'static)) -> Self {
		Value::formatter(REPR_TEMPLATE, target)
	}

	/// Non-const [`Type::Any`] value borrowing an opaque payload.
	///
	/// Snapshotting it fails; use [`Value::opaque_snapshotter`] or [`Value::const_opaque`] for payloads
	/// that must outlive `'v`.
	pub fn opaque<T: AnyValue + fmt::Debug>(value: &'v T) -> Self {
		Value::from_slot(
			Type::Any,
			false,
			Slot::Any(AnySlot::Borrowed {
				value,
				debug: Some(value as &'v DynDebug),
				snapshotter: None,
			}),
		)
	}

	/// Non-const [`Type::Any`] value whose payload knows how to snapshot itself.
	pub fn opaque_snapshotter<T: AnyValue + fmt::Debug + Snapshotter>(value: &'v T) -> Self {
		Value::from_slot(
			Type::Any,
			false,
			Slot::Any(AnySlot::Borrowed {
				value,
				debug: Some(value as &'v DynDebug),
				snapshotter: Some(value as &'v dyn Snapshotter),
			}),
		)
	}

	/// Non-const [`Type::Any`] value borrowing a payload that has no `Debug` rendering.
	pub(crate) fn opaque_untyped<T: AnyValue>(value: &'v T) -> Self {
		Value::from_slot(
			Type::Any,
			false,
			Slot::Any(AnySlot::Borrowed {
				value,
				debug: None,
				snapshotter: None,
			}),
		)
	}
}

fn utc_from_system_time(value: SystemTime) -> DateTime<Utc> {
	match value.duration_since(UNIX_EPOCH) {
		Ok(after) => i64::try_from(after.as_secs())
			.ok()
			.and_then(|secs| DateTime::from_timestamp(secs, after.subsec_nanos()))
			.unwrap_or(DateTime::<Utc>::MAX_UTC),
		Err(err) => {
			let before = err.duration();
			let (secs, nanos) = match before.subsec_nanos() {
				0 => (i64::try_from(before.as_secs()).ok().and_then(i64::checked_neg), 0),
				nanos => (
					i64::try_from(before.as_secs()).ok().and_then(|secs| secs.checked_neg()?.checked_sub(1)),
					1_000_000_000 - nanos,
				),
			};
			secs.and_then(|secs| DateTime::from_timestamp(secs, nanos)).unwrap_or(DateTime::<Utc>::MIN_UTC)
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::{Duration, UNIX_EPOCH};

	use chrono::{DateTime, FixedOffset, TimeZone, Utc};

	use crate::value::{Type, Value, ValueRef};

	#[test]
	fn scalars_are_const_and_round_trip() {
		let cases: Vec<(Value<'static>, Type)> = vec![
			(Value::bool(true), Type::Bool),
			(Value::int(-7), Type::Int),
			(Value::int8(i8::MIN), Type::Int8),
			(Value::int16(-300), Type::Int16),
			(Value::int32(i32::MAX), Type::Int32),
			(Value::int64(i64::MIN), Type::Int64),
			(Value::uint(7), Type::Uint),
			(Value::uint8(u8::MAX), Type::Uint8),
			(Value::uint16(65_000), Type::Uint16),
			(Value::uint32(u32::MAX), Type::Uint32),
			(Value::uint64(u64::MAX), Type::Uint64),
			(Value::float32(-1.5), Type::Float32),
			(Value::float64(f64::MIN_POSITIVE), Type::Float64),
			(Value::duration(Duration::from_millis(1500)), Type::Duration),
		];
		for (value, ty) in cases {
			assert_eq!(value.ty(), ty);
			assert!(value.is_const(), "{ty} should be const");
		}

		assert_eq!(Value::int8(i8::MIN).as_int8(), Ok(i8::MIN));
		assert_eq!(Value::int64(i64::MIN).as_int64(), Ok(i64::MIN));
		assert_eq!(Value::uint64(u64::MAX).as_uint64(), Ok(u64::MAX));
		assert_eq!(Value::float32(-1.5).as_float32(), Ok(-1.5));
		assert!(Value::float64(f64::NAN).as_float64().expect("float64").is_nan());
	}

	#[test]
	fn borrowed_sequences_are_not_const() {
		let data = vec![1_i32, 2, 3];
		let value = Value::ints32(&data);
		assert_eq!(value.ty(), Type::Ints32);
		assert!(!value.is_const());
		assert_eq!(value.as_ints32(), Ok(&data[..]));

		let frozen = Value::const_ints32(vec![4, 5]);
		assert!(frozen.is_const());
		assert_eq!(frozen.as_ints32(), Ok(&[4, 5][..]));
	}

	#[test]
	fn bytes_and_uints8_are_distinct_types() {
		let raw = [1_u8, 2];
		assert_eq!(Value::bytes(&raw).ty(), Type::Bytes);
		assert_eq!(Value::uints8(&raw).ty(), Type::Uints8);
		assert!(Value::bytes(&raw).as_uints8().is_err());
	}

	#[test]
	fn strings_borrowed_and_retained() {
		let owned = String::from("hello");
		let borrowed = Value::str(&owned);
		assert!(!borrowed.is_const());
		assert_eq!(borrowed.as_string(), Ok("hello"));

		let retained = Value::string("hello");
		assert!(retained.is_const());
		assert_eq!(retained.as_string(), Ok("hello"));
		assert_eq!(Value::string(owned.clone()).as_string(), Ok("hello"));
		assert_eq!(Value::string(Arc::<str>::from("hello")).as_string(), Ok("hello"));
	}

	#[test]
	fn time_keeps_offset() {
		let offset = FixedOffset::east_opt(2 * 3600).expect("offset");
		let local = offset.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).single().expect("time");
		let value = Value::time(local);
		let ValueRef::Time(stored) = value.view() else {
			panic!("expected time, got {value:?}");
		};
		assert_eq!(stored, local);
		assert_eq!(stored.offset().local_minus_utc(), 7200);

		let epoch = Value::system_time(UNIX_EPOCH + Duration::from_secs(10));
		assert_eq!(epoch.as_time().expect("time"), Utc.timestamp_opt(10, 0).single().expect("utc"));
	}

	#[test]
	fn system_time_outside_chrono_range_is_clamped() {
		let far_future = UNIX_EPOCH + Duration::from_secs(10_000_000_000_000);
		assert_eq!(Value::system_time(far_future).as_time().expect("time"), DateTime::<Utc>::MAX_UTC);
		assert_eq!(Value::any(&far_future).as_time().expect("time"), DateTime::<Utc>::MAX_UTC);

		let far_past = UNIX_EPOCH.checked_sub(Duration::from_secs(10_000_000_000_000)).expect("representable instant");
		assert_eq!(Value::system_time(far_past).as_time().expect("time"), DateTime::<Utc>::MIN_UTC);
		assert_eq!(Value::const_any(far_past).as_time().expect("time"), DateTime::<Utc>::MIN_UTC);
	}

	#[test]
	fn system_time_before_epoch_keeps_subseconds() {
		let before = UNIX_EPOCH - Duration::from_millis(1500);
		let expected = DateTime::from_timestamp(-2, 500_000_000).expect("in range");
		assert_eq!(Value::system_time(before).as_time().expect("time"), expected);

		let whole = UNIX_EPOCH - Duration::from_secs(3);
		let expected = DateTime::from_timestamp(-3, 0).expect("in range");
		assert_eq!(Value::system_time(whole).as_time().expect("time"), expected);
	}

	#[test]
	fn formatter_templates_default_to_repr() {
		let target = vec![1, 2];
		let value = Value::formatter_repr(&target);
		let formatted = value.as_formatter().expect("formatter");
		assert_eq!(formatted.template(), "{:?}");
		assert_eq!(formatted.to_string(), "[1, 2]");
		assert!(!value.is_const());
		assert!(Value::const_formatter_repr(Arc::new(3)).is_const());
	}

	#[test]
	fn nil_and_none_differ() {
		let nil = Value::nil();
		assert_eq!(nil.ty(), Type::Any);
		assert!(nil.is_const());
		assert!(nil.is_nil());
		assert!(!Value::none().is_nil());
	}
}
