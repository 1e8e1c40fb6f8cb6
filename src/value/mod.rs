/// Expands `$callback!` with one entry per homogeneous sequence type:
/// `(variant, element, constructor, const constructor, accessor, visitor method)`.
macro_rules! with_sequences {
	($callback:ident) => {
		$callback! {
			(Bytes, u8, bytes, const_bytes, as_bytes, visit_bytes),
			(Bools, bool, bools, const_bools, as_bools, visit_bools),
			(Ints, isize, ints, const_ints, as_ints, visit_ints),
			(Ints8, i8, ints8, const_ints8, as_ints8, visit_ints8),
			(Ints16, i16, ints16, const_ints16, as_ints16, visit_ints16),
			(Ints32, i32, ints32, const_ints32, as_ints32, visit_ints32),
			(Ints64, i64, ints64, const_ints64, as_ints64, visit_ints64),
			(Uints, usize, uints, const_uints, as_uints, visit_uints),
			(Uints8, u8, uints8, const_uints8, as_uints8, visit_uints8),
			(Uints16, u16, uints16, const_uints16, as_uints16, visit_uints16),
			(Uints32, u32, uints32, const_uints32, as_uints32, visit_uints32),
			(Uints64, u64, uints64, const_uints64, as_uints64, visit_uints64),
			(Floats32, f32, floats32, const_floats32, as_floats32, visit_floats32),
			(Floats64, f64, floats64, const_floats64, as_floats64, visit_floats64),
			(Durations, ::std::time::Duration, durations, const_durations, as_durations, visit_durations),
			(Strings, ::std::string::String, strings, const_strings, as_strings, visit_strings),
		}
	};
}

mod capability;
mod classify;
mod construct;
mod error;
mod field;
mod format;
mod repr;
mod retained;
mod ser;
mod snapshot;
mod types;
mod view;
mod visit;

/// Array/object capability contracts and opaque payloads.
pub use capability::{AnyValue, ArrayItemVisitor, ObjectFieldVisitor, Opaque, Snapshotter, ValueArray, ValueObject};
/// Error and result aliases.
pub use error::{Result, ValueError};
/// Key/value pair carrying a value.
pub use field::Field;
/// Lazily rendered Formatter payload.
pub use format::Formatted;
/// The polymorphic value container.
pub use repr::Value;
/// Non-borrowing payload storage accepted by const constructors.
pub use retained::Retained;
/// Owned captures produced by snapshotting.
pub use snapshot::{ArraySnapshot, ErrorSnapshot, ObjectSnapshot};
/// Type tags and coarse kinds.
pub use types::{Kind, Type};
/// Borrowed, exhaustively matchable view of a value.
pub use view::ValueRef;
/// Double-dispatch visitor protocol.
pub use visit::{IgnoringVisitor, Visitor};
