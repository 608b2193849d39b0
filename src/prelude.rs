//! Prelude module for the calendar_hub crate.
//!
//! Re-exports the derive macros the date types share.

pub use derive_more::Display;
