//! Registry of known types, looked up by `TypeId` or discriminator.
//!
//! - [`TypeTrait`]: a capability attached to a registered type.
//! - [`FromType`]: builds a `TypeTrait` for a concrete type.
//! - [`TypeMeta`]: a [`TypeInfo`] plus its `TypeTrait` table.
//! - [`GetTypeMeta`]: produces the `TypeMeta` of a type.
//! - [`TypeRegistry`]: stores `TypeMeta`s.
//! - [`TypeTraitDefault`]: constructs a default instance, used by the
//!   object factory.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types marked `#[recast(auto_register)]`
//! are collected at link time through [`inventory`] and registered by
//! [`TypeRegistry::auto_register`]. Platforms without support for it simply
//! register nothing.
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod default;
mod from_type;
mod type_meta;
mod type_registry;
mod type_trait;

#[cfg(feature = "auto_register")]
pub(crate) mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use default::TypeTraitDefault;
pub use from_type::FromType;
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
