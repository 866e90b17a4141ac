//! Kind-specific views of a [`Recast`] value.
//!
//! - [`Struct`]: named fields, addressed by declaration index.
//! - [`Iterable`]: homogeneous collections such as `Vec<T>` or `HashSet<T>`.
//! - [`Map`]: key/value maps such as `HashMap<K, V>`.
//! - [`Optional`]: `Option<T>`.
//! - [`Enum`]: fieldless enums.
//!
//! [`Object`] is the slot type for values whose type is only known at
//! runtime.
//!
//! [`Recast`]: crate::Recast

// -----------------------------------------------------------------------------
// Modules

mod enum_ops;
mod iterable_ops;
mod kind;
mod map_ops;
mod object;
mod optional_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use enum_ops::Enum;
pub use iterable_ops::Iterable;
pub use kind::{RecastMut, RecastRef};
pub use map_ops::Map;
pub use object::Object;
pub use optional_ops::Optional;
pub use struct_ops::Struct;
