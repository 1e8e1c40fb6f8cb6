use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::value::capability::{AnyValue, ValueArray, ValueObject};
use crate::value::Value;

type SharedError = Arc<dyn Error + Send + Sync>;
type BoxedError = Box<dyn Error + Send + Sync>;
type SharedDisplay = Arc<dyn fmt::Display + Send + Sync>;

impl<'v> Value<'v> {
	/// Classify `value` by its concrete type, borrowing it where the type allows.
	///
	/// Scalars, durations and instants become const values of their own type. Owned text,
	/// sequences, errors, arrays, objects and shared `Display` objects are borrowed and not const.
	/// Unit is nil; any other type becomes an opaque Any value.
	///
	/// Newtypes are not unwrapped: `struct Level(i32)` is opaque, renders by type name, and cannot
	/// be snapshotted through [`Value::snapshot`]. Build such values with a typed constructor
	/// (`Value::int32(level.0)`), [`Value::opaque_snapshotter`], or [`Value::const_any`].
	pub fn any<T: AnyValue>(value: &'v T) -> Self {
		let dynamic: &'v dyn Any = value.as_any();
		if dynamic.is::<()>() {
			return Value::nil();
		}
		if let Some(classified) = classify_scalar(dynamic) {
			return classified;
		}
		if let Some(error) = dynamic.downcast_ref::<SharedError>() {
			return Value::error_ref(&**error);
		}
		if let Some(error) = dynamic.downcast_ref::<BoxedError>() {
			return Value::error_ref(&**error);
		}
		if let Some(array) = dynamic.downcast_ref::<Arc<dyn ValueArray>>() {
			return Value::array(&**array);
		}
		if let Some(object) = dynamic.downcast_ref::<Arc<dyn ValueObject>>() {
			return Value::object(&**object);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<u8>>() {
			return Value::bytes(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<String>>() {
			return Value::strings(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<bool>>() {
			return Value::bools(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<isize>>() {
			return Value::ints(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<i64>>() {
			return Value::ints64(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<i32>>() {
			return Value::ints32(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<i16>>() {
			return Value::ints16(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<i8>>() {
			return Value::ints8(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<usize>>() {
			return Value::uints(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<u64>>() {
			return Value::uints64(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<u32>>() {
			return Value::uints32(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<u16>>() {
			return Value::uints16(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<f64>>() {
			return Value::floats64(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<f32>>() {
			return Value::floats32(values);
		}
		if let Some(values) = dynamic.downcast_ref::<Vec<Duration>>() {
			return Value::durations(values);
		}
		if let Some(text) = dynamic.downcast_ref::<String>() {
			return Value::str(text);
		}
		if let Some(text) = dynamic.downcast_ref::<&'static str>() {
			return Value::string(*text);
		}
		if let Some(target) = dynamic.downcast_ref::<SharedDisplay>() {
			return Value::stringer(&**target);
		}
		Value::opaque_untyped(value)
	}
}

impl Value<'static> {
	/// Classify `value` by its concrete type, taking ownership.
	///
	/// Same table as [`Value::any`], but every branch produces a const value.
	pub fn const_any<T: AnyValue>(value: T) -> Self {
		if value.as_any().is::<()>() {
			return Value::nil();
		}
		if let Some(classified) = classify_scalar(value.as_any()) {
			return classified;
		}
		let mut slot = Some(value);
		if let Some(classified) = classify_owned(&mut slot) {
			return classified;
		}
		match slot {
			Some(value) => Value::const_opaque_untyped(Arc::new(value)),
			None => Value::nil(),
		}
	}
}

fn classify_scalar(dynamic: &dyn Any) -> Option<Value<'static>> {
	if let Some(value) = dynamic.downcast_ref::<bool>() {
		return Some(Value::bool(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<isize>() {
		return Some(Value::int(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<i64>() {
		return Some(Value::int64(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<i32>() {
		return Some(Value::int32(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<i16>() {
		return Some(Value::int16(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<i8>() {
		return Some(Value::int8(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<usize>() {
		return Some(Value::uint(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<u64>() {
		return Some(Value::uint64(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<u32>() {
		return Some(Value::uint32(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<u16>() {
		return Some(Value::uint16(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<u8>() {
		return Some(Value::uint8(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<f64>() {
		return Some(Value::float64(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<f32>() {
		return Some(Value::float32(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<DateTime<Utc>>() {
		return Some(Value::time(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<DateTime<FixedOffset>>() {
		return Some(Value::time(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<DateTime<Local>>() {
		return Some(Value::time(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<SystemTime>() {
		return Some(Value::system_time(*value));
	}
	if let Some(value) = dynamic.downcast_ref::<Duration>() {
		return Some(Value::duration(*value));
	}
	None
}

fn take<U: Any>(slot: &mut dyn Any) -> Option<U> {
	slot.downcast_mut::<Option<U>>().and_then(Option::take)
}

/// `slot` is an `Option<T>` still holding the payload; a matching branch moves it out.
fn classify_owned(slot: &mut dyn Any) -> Option<Value<'static>> {
	if let Some(error) = take::<SharedError>(slot) {
		return Some(Value::error(error));
	}
	if let Some(error) = take::<BoxedError>(slot) {
		return Some(Value::error(Arc::from(error)));
	}
	if let Some(array) = take::<Arc<dyn ValueArray>>(slot) {
		return Some(Value::const_array(array));
	}
	if let Some(object) = take::<Arc<dyn ValueObject>>(slot) {
		return Some(Value::const_object(object));
	}
	if let Some(values) = take::<Vec<u8>>(slot) {
		return Some(Value::const_bytes(values));
	}
	if let Some(values) = take::<Vec<String>>(slot) {
		return Some(Value::const_strings(values));
	}
	if let Some(values) = take::<Vec<bool>>(slot) {
		return Some(Value::const_bools(values));
	}
	if let Some(values) = take::<Vec<isize>>(slot) {
		return Some(Value::const_ints(values));
	}
	if let Some(values) = take::<Vec<i64>>(slot) {
		return Some(Value::const_ints64(values));
	}
	if let Some(values) = take::<Vec<i32>>(slot) {
		return Some(Value::const_ints32(values));
	}
	if let Some(values) = take::<Vec<i16>>(slot) {
		return Some(Value::const_ints16(values));
	}
	if let Some(values) = take::<Vec<i8>>(slot) {
		return Some(Value::const_ints8(values));
	}
	if let Some(values) = take::<Vec<usize>>(slot) {
		return Some(Value::const_uints(values));
	}
	if let Some(values) = take::<Vec<u64>>(slot) {
		return Some(Value::const_uints64(values));
	}
	if let Some(values) = take::<Vec<u32>>(slot) {
		return Some(Value::const_uints32(values));
	}
	if let Some(values) = take::<Vec<u16>>(slot) {
		return Some(Value::const_uints16(values));
	}
	if let Some(values) = take::<Vec<f64>>(slot) {
		return Some(Value::const_floats64(values));
	}
	if let Some(values) = take::<Vec<f32>>(slot) {
		return Some(Value::const_floats32(values));
	}
	if let Some(values) = take::<Vec<Duration>>(slot) {
		return Some(Value::const_durations(values));
	}
	if let Some(text) = take::<String>(slot) {
		return Some(Value::string(text));
	}
	if let Some(text) = take::<&'static str>(slot) {
		return Some(Value::string(text));
	}
	if let Some(target) = take::<SharedDisplay>(slot) {
		return Some(Value::const_stringer(target));
	}
	None
}

#[cfg(test)]
mod tests {
	use std::error::Error;
	use std::fmt;
	use std::sync::Arc;
	use std::time::{Duration, UNIX_EPOCH};

	use chrono::{TimeZone, Utc};

	use crate::value::{Type, Value, ValueArray, ValueError};

	#[derive(Debug, Clone, PartialEq)]
	struct Celsius(f64);

	#[derive(Debug)]
	struct Failure;

	impl fmt::Display for Failure {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("failure")
		}
	}

	impl Error for Failure {}

	#[test]
	fn scalars_classify_to_their_own_type() {
		assert_eq!(Value::any(&5_i32).ty(), Type::Int32);
		assert_eq!(Value::any(&5_i32).as_int32(), Ok(5));
		assert_eq!(Value::any(&5_u8).ty(), Type::Uint8);
		assert_eq!(Value::any(&-5_isize).ty(), Type::Int);
		assert_eq!(Value::any(&true).ty(), Type::Bool);
		assert_eq!(Value::any(&1.5_f32).ty(), Type::Float32);
		assert_eq!(Value::any(&Duration::from_secs(1)).ty(), Type::Duration);
		assert_eq!(Value::any(&UNIX_EPOCH).ty(), Type::Time);
		let utc = Utc.timestamp_opt(0, 0).single().expect("epoch");
		assert_eq!(Value::const_any(utc).ty(), Type::Time);
		for _ in 0..3 {
			let value = Value::const_any(5_i32);
			assert_eq!((value.ty(), value.as_int32()), (Type::Int32, Ok(5)));
			assert!(value.is_const());
		}
	}

	#[test]
	fn unit_is_nil_in_both_forms() {
		let borrowed = Value::any(&());
		let owned = Value::const_any(());
		for value in [borrowed, owned] {
			assert_eq!(value.ty(), Type::Any);
			assert!(value.is_const());
			assert!(value.is_nil());
		}
	}

	#[test]
	fn borrowed_classification_is_not_const_for_buffers() {
		let bytes = vec![1_u8, 2];
		let value = Value::any(&bytes);
		assert_eq!(value.ty(), Type::Bytes);
		assert!(!value.is_const());

		let text = String::from("abc");
		let value = Value::any(&text);
		assert_eq!((value.ty(), value.is_const()), (Type::String, false));

		let literal: &'static str = "lit";
		let value = Value::any(&literal);
		assert_eq!((value.ty(), value.is_const()), (Type::String, true));

		let words = vec![String::from("a")];
		assert_eq!(Value::any(&words).ty(), Type::Strings);
		assert_eq!(Value::any(&vec![1_u16]).ty(), Type::Uints16);
		assert_eq!(Value::any(&vec![Duration::ZERO]).ty(), Type::Durations);
	}

	#[test]
	fn owned_classification_is_const() {
		let cases = [
			(Value::const_any(vec![1_u8]), Type::Bytes),
			(Value::const_any(vec![1_i64]), Type::Ints64),
			(Value::const_any(vec![0.5_f64]), Type::Floats64),
			(Value::const_any(String::from("s")), Type::String),
			(Value::const_any("s"), Type::String),
			(Value::const_any(vec![String::from("s")]), Type::Strings),
		];
		for (value, ty) in cases {
			assert_eq!(value.ty(), ty);
			assert!(value.is_const(), "{ty}");
		}
		assert_eq!(Value::const_any(vec![1_u8, 2]).as_bytes(), Ok(&[1_u8, 2][..]));
	}

	#[test]
	fn capabilities_classify_before_fallback() {
		let error: Arc<dyn Error + Send + Sync> = Arc::new(Failure);
		assert_eq!(Value::any(&error).ty(), Type::Error);
		let boxed: Box<dyn Error + Send + Sync> = Box::new(Failure);
		let value = Value::const_any(boxed);
		assert_eq!(value.ty(), Type::Error);
		assert_eq!(value.as_error().map(|error| error.to_string()), Ok(String::from("failure")));

		let array: Arc<dyn ValueArray> = Arc::new(vec![Value::int(1)]);
		assert_eq!(Value::any(&array).ty(), Type::Array);
		assert!(!Value::any(&array).is_const());
		assert!(Value::const_any(array).is_const());
	}

	#[test]
	fn shared_display_classifies_as_stringer() {
		let target: Arc<dyn fmt::Display + Send + Sync> = Arc::new(Failure);
		let borrowed = Value::any(&target);
		assert_eq!((borrowed.ty(), borrowed.is_const()), (Type::Stringer, false));
		assert_eq!(borrowed.as_stringer().map(|target| target.to_string()), Ok(String::from("failure")));
		assert_eq!(borrowed.snapshot().as_string(), Ok("failure"));

		let owned = Value::const_any(target);
		assert_eq!((owned.ty(), owned.is_const()), (Type::Stringer, true));
	}

	#[test]
	fn newtypes_stay_opaque() {
		struct Level(i32);

		let level = Level(3);
		let borrowed = Value::any(&level);
		assert_eq!(borrowed.ty(), Type::Any);
		assert_eq!(format!("{:?}", borrowed.view()), format!("Any(<{}>)", std::any::type_name::<Level>()));
		assert!(matches!(borrowed.try_snapshot(), Err(ValueError::MissingSnapshotter { .. })));
		assert_eq!(Value::int32(level.0).snapshot().as_int32(), Ok(3));

		let owned = Value::const_any(Level(4)).snapshot();
		let payload = owned.as_opaque().expect("any").expect("payload");
		assert_eq!(payload.downcast_ref::<Level>().map(|level| level.0), Some(4));
	}

	#[test]
	fn unknown_types_fall_back_to_opaque() {
		let reading = Celsius(21.5);
		let value = Value::any(&reading);
		assert_eq!(value.ty(), Type::Any);
		assert!(!value.is_const());
		let payload = value.as_opaque().expect("any").expect("payload");
		assert_eq!(payload.downcast_ref::<Celsius>(), Some(&reading));

		let owned = Value::const_any(Celsius(3.0));
		assert!(owned.is_const());
		let payload = owned.as_opaque().expect("any").expect("payload");
		assert_eq!(payload.downcast_ref::<Celsius>(), Some(&Celsius(3.0)));
	}
}
