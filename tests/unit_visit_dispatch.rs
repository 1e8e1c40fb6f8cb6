#![allow(missing_docs)]

use std::io;
use std::time::{Duration, SystemTime};

use logval::value::{Kind, Type, Value, ValueRef};
use logval_testkit::{CallLog, LiveArray, LiveObject, MutableText};

#[test]
fn every_type_dispatches_to_its_own_method() {
	let failure = io::Error::other("boom");
	let array = LiveArray::new(vec![Value::int(1)]);
	let object = LiveObject::default();
	let text = MutableText::new("t");
	let target = 7_u8;
	let payload = vec!['x'];

	let values = vec![
		Value::none(),
		Value::opaque(&payload),
		Value::bool(true),
		Value::int(-1),
		Value::int8(-8),
		Value::int16(-16),
		Value::int32(-32),
		Value::int64(-64),
		Value::uint(1),
		Value::uint8(8),
		Value::uint16(16),
		Value::uint32(32),
		Value::uint64(64),
		Value::float32(0.5),
		Value::float64(0.25),
		Value::duration(Duration::from_secs(1)),
		Value::error_ref(&failure),
		Value::system_time(SystemTime::UNIX_EPOCH),
		Value::str("s"),
		Value::bytes(b"ab"),
		Value::bools(&[true]),
		Value::ints(&[1]),
		Value::ints8(&[1]),
		Value::ints16(&[1]),
		Value::ints32(&[1]),
		Value::ints64(&[1]),
		Value::uints(&[1]),
		Value::uints8(&[1]),
		Value::uints16(&[1]),
		Value::uints32(&[1]),
		Value::uints64(&[1]),
		Value::floats32(&[1.0]),
		Value::floats64(&[1.0]),
		Value::durations(&[Duration::ZERO]),
		Value::const_strings(vec![String::from("a")]),
		Value::array(&array),
		Value::object(&object),
		Value::stringer(&text),
		Value::formatter_repr(&target),
	];

	let types: Vec<Type> = values.iter().map(Value::ty).collect();
	assert_eq!(types, Type::ALL);

	for value in &values {
		let mut log = CallLog::default();
		value.accept(&mut log);
		let expected = format!("visit_{}", value.ty().name());
		assert_eq!(log.calls, vec![expected.as_str()], "dispatch for {}", value.ty());
	}
}

#[test]
fn view_and_kind_agree_with_type() {
	let value = Value::const_floats32(vec![1.5_f32]);
	assert_eq!(value.kind(), Kind::Array);
	assert!(matches!(value.view(), ValueRef::Floats32(items) if items == [1.5]));

	let text = MutableText::new("x");
	let stringer = Value::stringer(&text);
	assert_eq!(stringer.kind(), Kind::String);
	assert!(!stringer.is_const());
}

#[test]
fn accessors_reject_other_types() {
	let value = Value::int32(5);
	assert_eq!(value.as_int32(), Ok(5));
	let err = value.as_string().expect_err("int is not a string");
	assert_eq!(err.to_string(), "type mismatch: expected string, found int32");
}
