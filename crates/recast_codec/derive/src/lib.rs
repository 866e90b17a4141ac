//! Derive macro for `recast_codec`.
//!
//! See [`Recast`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RECAST_ATTRIBUTE_NAME: &str = "recast";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Recast Derivation
///
/// `#[derive(Recast)]` implements the following traits:
///
/// - `Typed`
/// - `Recast`
/// - `GetTypeMeta`
/// - `Struct` (for `struct T { ... }`)
/// - `Enum` (for `enum T { A, B }`)
///
/// Only structs with named fields and enums whose variants are all units
/// are supported. The type must implement `Default`, which is how the
/// object factory constructs it before filling in the stored fields.
///
/// ## Type Attributes
///
/// ### Alias
///
/// Documents name a struct by its type path, e.g. `my_crate::model::User`.
/// An alias replaces it with a stable name that survives moving the type:
///
/// ```rust, ignore
/// #[derive(Recast, Default)]
/// #[recast(alias = "user")]
/// struct User { /* ... */ }
/// ```
///
/// The type path is still accepted on decode.
///
/// ### Auto Registration
///
/// Types are only known to a `Recaster` once registered. With the
/// `auto_register` feature, marked types are collected at link time:
///
/// ```rust, ignore
/// #[derive(Recast, Default)]
/// #[recast(auto_register)]
/// struct User { /* ... */ }
/// ```
///
/// This has no effect on generic types, or when the feature is disabled.
///
/// ## Field Attributes
///
/// - `#[recast(rename = "name")]`: stores the field (or variant) under `name`.
/// - `#[recast(skip)]`: the field is neither stored nor read back, and keeps
///   its `Default` value on decode.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Recast, Default)]
/// #[recast(alias = "account", auto_register)]
/// struct Account {
///     id: i64,
///     #[recast(rename = "display_name")]
///     name: String,
///     roles: Vec<Role>,
///     #[recast(skip)]
///     cache: Option<String>,
/// }
///
/// #[derive(Recast, Default)]
/// enum Role {
///     #[default]
///     Reader,
///     #[recast(rename = "admin")]
///     Administrator,
/// }
/// ```
#[proc_macro_derive(Recast, attributes(recast))]
pub fn derive_recast(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::RecastDerive::from_input(&ast) {
        Ok(derive) => impls::impl_recast(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
