//! Compact polymorphic values for structured logging pipelines.
//!
//! A [`value::Value`] carries one payload of a closed set of kinds (scalars, text, homogeneous
//! sequences, time, errors, and open-ended arrays/objects) without knowing the concrete type
//! ahead of time. Values may borrow caller memory; [`value::Value::snapshot`] detaches them so
//! they can be retained and shared across threads.

/// Value representation, construction, visiting, and snapshotting.
pub mod value;
