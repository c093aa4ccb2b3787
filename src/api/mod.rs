//! JSON API payloads.
//!
//! Not intended to be used directly. Provided to aid debugging.

mod enrollment;

pub use self::enrollment::Enrollment;
