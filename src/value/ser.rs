use chrono::SecondsFormat;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::capability::{ValueArray, ValueObject};
use crate::value::{Value, ValueRef};

impl Serialize for Value<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.view().serialize(serializer)
	}
}

impl Serialize for ValueRef<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match *self {
			ValueRef::None | ValueRef::Any(None) => serializer.serialize_unit(),
			ValueRef::Any(Some(value)) => serializer.collect_str(&format_args!("{value:?}")),
			ValueRef::Bool(value) => serializer.serialize_bool(value),
			ValueRef::Int(value) => serializer.serialize_i64(value as i64),
			ValueRef::Int8(value) => serializer.serialize_i8(value),
			ValueRef::Int16(value) => serializer.serialize_i16(value),
			ValueRef::Int32(value) => serializer.serialize_i32(value),
			ValueRef::Int64(value) => serializer.serialize_i64(value),
			ValueRef::Uint(value) => serializer.serialize_u64(value as u64),
			ValueRef::Uint8(value) => serializer.serialize_u8(value),
			ValueRef::Uint16(value) => serializer.serialize_u16(value),
			ValueRef::Uint32(value) => serializer.serialize_u32(value),
			ValueRef::Uint64(value) => serializer.serialize_u64(value),
			ValueRef::Float32(value) => serializer.serialize_f32(value),
			ValueRef::Float64(value) => serializer.serialize_f64(value),
			ValueRef::Duration(value) => serializer.collect_str(&format_args!("{value:?}")),
			ValueRef::Error(error) => serializer.collect_str(error),
			ValueRef::Time(time) => serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
			ValueRef::String(text) => serializer.serialize_str(text),
			ValueRef::Bytes(bytes) => serializer.serialize_bytes(bytes),
			ValueRef::Bools(values) => serializer.collect_seq(values),
			ValueRef::Ints(values) => serializer.collect_seq(values),
			ValueRef::Ints8(values) => serializer.collect_seq(values),
			ValueRef::Ints16(values) => serializer.collect_seq(values),
			ValueRef::Ints32(values) => serializer.collect_seq(values),
			ValueRef::Ints64(values) => serializer.collect_seq(values),
			ValueRef::Uints(values) => serializer.collect_seq(values),
			ValueRef::Uints8(values) => serializer.collect_seq(values),
			ValueRef::Uints16(values) => serializer.collect_seq(values),
			ValueRef::Uints32(values) => serializer.collect_seq(values),
			ValueRef::Uints64(values) => serializer.collect_seq(values),
			ValueRef::Floats32(values) => serializer.collect_seq(values),
			ValueRef::Floats64(values) => serializer.collect_seq(values),
			ValueRef::Durations(values) => serializer.collect_seq(values.iter().map(|value| format!("{value:?}"))),
			ValueRef::Strings(values) => serializer.collect_seq(values),
			ValueRef::Array(array) => serialize_array(array, serializer),
			ValueRef::Object(object) => serialize_object(object, serializer),
			ValueRef::Stringer(target) => serializer.collect_str(target),
			ValueRef::Formatter(formatted) => serializer.collect_str(&formatted),
		}
	}
}

fn serialize_array<S: Serializer>(array: &dyn ValueArray, serializer: S) -> Result<S::Ok, S::Error> {
	let mut seq = serializer.serialize_seq(Some(array.item_count()))?;
	let mut failure = None;
	array.accept_item_visitor(&mut |_: usize, item: &Value<'_>| {
		if failure.is_none()
			&& let Err(err) = seq.serialize_element(item)
		{
			failure = Some(err);
		}
	});
	match failure {
		Some(err) => Err(err),
		None => seq.end(),
	}
}

fn serialize_object<S: Serializer>(object: &dyn ValueObject, serializer: S) -> Result<S::Ok, S::Error> {
	let mut map = serializer.serialize_map(Some(object.field_count()))?;
	let mut failure = None;
	object.accept_field_visitor(&mut |key: &str, value: &Value<'_>| {
		if failure.is_none()
			&& let Err(err) = map.serialize_entry(key, value)
		{
			failure = Some(err);
		}
	});
	match failure {
		Some(err) => Err(err),
		None => map.end(),
	}
}
