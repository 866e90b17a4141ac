#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod date;
mod document;
mod macros;
mod serde;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use array::PrimitiveArray;
pub use date::{Date, DateParseError, LEGACY_DATE_FORMAT};
pub use document::{Document, IntoIter, Iter};
pub use value::Value;

pub use chrono;
