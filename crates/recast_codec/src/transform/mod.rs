//! Conversion between typed values and document values.
//!
//! Leaf transformers handle single values of one exact type. Structural
//! transformers handle maps, iterables and protobuf messages and recurse
//! through the [`Dispatcher`] for their contents. Structs become nested
//! documents and enums their variant name.

// -----------------------------------------------------------------------------
// Modules

mod context;
mod dispatcher;
mod iterable;
mod leaf;
mod map;
mod message;
mod registry;
mod structural;

// -----------------------------------------------------------------------------
// Exports

pub use dispatcher::Dispatcher;
pub use leaf::{CustomTransformer, LeafTransformer};
pub use registry::TransformerRegistry;
pub use structural::StructuralTransformer;

pub(crate) use context::{Context, Direction};
pub(crate) use dispatcher::{decode_document, decode_natural, encode_struct, encode_value, merge_struct};
