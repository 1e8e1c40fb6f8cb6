use std::ops::Deref;
use std::sync::Arc;

/// Payload storage that never borrows: a `'static` reference or shared ownership.
///
/// Const values hold their payload this way, so cloning or snapshotting them only copies a pointer.
#[derive(Debug)]
pub enum Retained<T: ?Sized + 'static> {
	/// Borrowed for the whole program.
	Static(&'static T),
	/// Reference-counted owned payload.
	Shared(Arc<T>),
}

impl<T: ?Sized + 'static> Clone for Retained<T> {
	fn clone(&self) -> Self {
		match self {
			Retained::Static(value) => Retained::Static(*value),
			Retained::Shared(value) => Retained::Shared(Arc::clone(value)),
		}
	}
}

impl<T: ?Sized + 'static> Deref for Retained<T> {
	type Target = T;

	fn deref(&self) -> &T {
		match self {
			Retained::Static(value) => value,
			Retained::Shared(value) => value,
		}
	}
}

impl<T: ?Sized + 'static> AsRef<T> for Retained<T> {
	fn as_ref(&self) -> &T {
		self
	}
}

impl<T: ?Sized + 'static> From<&'static T> for Retained<T> {
	fn from(value: &'static T) -> Self {
		Retained::Static(value)
	}
}

impl<T: ?Sized + 'static> From<Arc<T>> for Retained<T> {
	fn from(value: Arc<T>) -> Self {
		Retained::Shared(value)
	}
}

impl<T: ?Sized + 'static> From<Box<T>> for Retained<T> {
	fn from(value: Box<T>) -> Self {
		Retained::Shared(Arc::from(value))
	}
}

impl<T: 'static> From<Vec<T>> for Retained<[T]> {
	fn from(value: Vec<T>) -> Self {
		Retained::Shared(Arc::from(value))
	}
}

impl<T: 'static, const N: usize> From<[T; N]> for Retained<[T]> {
	fn from(value: [T; N]) -> Self {
		Retained::Shared(Arc::from(value))
	}
}

impl<T: 'static, const N: usize> From<&'static [T; N]> for Retained<[T]> {
	fn from(value: &'static [T; N]) -> Self {
		Retained::Static(value.as_slice())
	}
}

impl From<String> for Retained<str> {
	fn from(value: String) -> Self {
		Retained::Shared(Arc::from(value))
	}
}

/// Owned copy of borrowed payload memory.
pub(crate) trait Detach {
	fn detach(&self) -> Arc<Self>;
}

impl Detach for str {
	fn detach(&self) -> Arc<str> {
		Arc::from(self)
	}
}

impl<T: Clone> Detach for [T] {
	fn detach(&self) -> Arc<[T]> {
		Arc::from(self)
	}
}

/// Payload storage of a value: borrowed from the caller or retained.
#[derive(Debug)]
pub(crate) enum Buf<'v, T: ?Sized + 'static> {
	Borrowed(&'v T),
	Retained(Retained<T>),
}

impl<T: ?Sized + 'static> Clone for Buf<'_, T> {
	fn clone(&self) -> Self {
		match self {
			Buf::Borrowed(value) => Buf::Borrowed(*value),
			Buf::Retained(value) => Buf::Retained(value.clone()),
		}
	}
}

impl<'v, T: ?Sized + 'static> Buf<'v, T> {
	pub(crate) fn get(&self) -> &T {
		match self {
			Buf::Borrowed(value) => value,
			Buf::Retained(value) => value,
		}
	}

	/// Retained payload, if the buffer does not borrow.
	pub(crate) fn retained(&self) -> Option<Buf<'static, T>> {
		match self {
			Buf::Borrowed(_) => None,
			Buf::Retained(value) => Some(Buf::Retained(value.clone())),
		}
	}
}

impl<T: ?Sized + Detach + 'static> Buf<'_, T> {
	/// Detach from caller memory, copying only when the payload is borrowed.
	pub(crate) fn to_retained(&self) -> Buf<'static, T> {
		match self {
			Buf::Borrowed(value) => Buf::Retained(Retained::Shared(value.detach())),
			Buf::Retained(value) => Buf::Retained(value.clone()),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::{Buf, Retained};

	#[test]
	fn conversions_keep_contents() {
		let from_static: Retained<str> = "abc".into();
		let from_string: Retained<str> = String::from("abc").into();
		let from_vec: Retained<[u16]> = vec![1_u16, 2].into();
		let from_array: Retained<[u16]> = [1_u16, 2].into();
		static WORDS: [u16; 2] = [1, 2];
		let from_static_array: Retained<[u16]> = (&WORDS).into();

		assert_eq!(&*from_static, "abc");
		assert_eq!(&*from_string, "abc");
		assert_eq!(&*from_vec, &[1, 2]);
		assert_eq!(&*from_array, &[1, 2]);
		assert!(matches!(from_static_array, Retained::Static(_)));
	}

	#[test]
	fn retained_buffers_are_shared_not_copied() {
		let shared: Arc<[u8]> = Arc::from(&b"xyz"[..]);
		let buf: Buf<'_, [u8]> = Buf::Retained(Retained::Shared(Arc::clone(&shared)));
		let detached = buf.to_retained();
		match detached {
			Buf::Retained(Retained::Shared(arc)) => assert!(Arc::ptr_eq(&arc, &shared)),
			other => panic!("unexpected buffer {other:?}"),
		}
	}

	#[test]
	fn borrowed_buffers_are_copied_on_detach() {
		let mut source = vec![1_i32, 2, 3];
		let detached = Buf::Borrowed(source.as_slice()).to_retained();
		source[0] = 9;
		assert_eq!(detached.get(), &[1, 2, 3]);
		assert_eq!(source[0], 9);
	}
}
