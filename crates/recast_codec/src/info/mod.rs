//! Static type information.
//!
//! Every recastable type exposes a [`TypeInfo`] through [`Typed`]. The
//! information is built once per type, stored in a static cell and shared
//! by every encode and decode call touching that type.
//!
//! Nested types (struct fields, collection elements, map keys and values)
//! are linked through `fn() -> &'static TypeInfo` rather than references,
//! so self-referential types such as `struct Node { children: Vec<Node> }`
//! can be described.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod container_info;
mod enum_info;
mod field;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use container_info::{IterableInfo, IterableShape, MapInfo, OptionalInfo};
pub use enum_info::EnumInfo;
pub use field::CastedField;
pub use struct_info::StructInfo;
pub use ty::Type;
pub use type_info::{LeafInfo, MessageInfo, ObjectInfo, TypeInfo};
pub use typed::Typed;
