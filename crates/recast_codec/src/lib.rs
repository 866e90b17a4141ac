#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `recast_codec`, which must also resolve
// inside the crate and its doc tests.
extern crate self as recast_codec;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod factory;
mod impls;
mod options;
mod recast;
mod recaster;

pub mod error;
pub mod info;
pub mod ops;
pub mod registry;
pub mod transform;

#[doc(hidden)]
pub mod __macro_exports;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

/// Document key holding the discriminator of a struct or wrapped root value.
pub const DISCRIMINATOR_KEY: &str = "__recast";

/// Root document key holding the encoded form of a value that isn't a struct.
pub const ENCODED_VALUE_KEY: &str = "__encodedValue";

pub use error::{RecastError, Result};
pub use factory::ObjectFactory;
pub use impls::parse_message;
pub use ops::Object;
pub use options::RecastOptions;
pub use recast::{Recast, RecastKind};
pub use recaster::{Recaster, RecasterBuilder};

pub use recast_codec_derive::Recast;
pub use recast_document::{Date, Document, PrimitiveArray, Value, doc};

/// The commonly used items.
pub mod prelude {
    pub use crate::info::Typed;
    pub use crate::registry::GetTypeMeta;
    pub use crate::{Document, Object, Recast, RecastOptions, Recaster, Value, doc};
}
