use thiserror::Error;

use crate::value::Type;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ValueError>;

/// Recoverable errors produced by typed access and fallible snapshotting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
	/// A typed accessor was called on a value holding another type.
	#[error("type mismatch: expected {expected}, found {actual}")]
	TypeMismatch {
		/// Type the accessor reads.
		expected: Type,
		/// Type the value actually holds.
		actual: Type,
	},
	/// An opaque payload was snapshotted without a snapshot strategy.
	#[error("cannot snapshot opaque value of type {type_name}: no snapshotter attached")]
	MissingSnapshotter {
		/// Rust type name of the wrapped payload.
		type_name: &'static str,
	},
}

#[cfg(test)]
mod tests {
	use super::ValueError;
	use crate::value::Type;

	#[test]
	fn messages_name_both_types() {
		let err = ValueError::TypeMismatch {
			expected: Type::Int32,
			actual: Type::Strings,
		};
		assert_eq!(err.to_string(), "type mismatch: expected int32, found strings");
	}
}
