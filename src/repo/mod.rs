//! Single-writer async repository over a [`crate::store::RecordStore`].

/// Handle and command loop implementation.
pub mod handle;
