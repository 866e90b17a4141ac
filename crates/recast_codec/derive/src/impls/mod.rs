//! Code generation.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod common;
mod enum_kind;
mod struct_kind;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{RecastData, RecastDerive};

pub(crate) fn impl_recast(derive: &RecastDerive) -> TokenStream {
    let meta = &derive.meta;

    let (info_expression, kind_impl, dependencies) = match &derive.data {
        RecastData::Struct(fields) => (
            struct_kind::struct_info_expression(meta, fields),
            struct_kind::impl_struct(meta, fields),
            fields.iter().map(|field| field.ty).collect::<Vec<_>>(),
        ),
        RecastData::Enum(variants) => (
            enum_kind::enum_info_expression(meta, variants),
            enum_kind::impl_enum(meta, variants),
            Vec::new(),
        ),
    };
    let kind = match &derive.data {
        RecastData::Struct(_) => quote!(Struct),
        RecastData::Enum(_) => quote!(Enum),
    };

    let typed_impl = common::impl_typed(meta, &info_expression);
    let recast_impl = common::impl_recast_trait(meta, &kind);
    let get_type_meta_impl = common::impl_get_type_meta(meta, &dependencies);
    let auto_register_impl = auto_register::get_auto_register_impl(meta);

    quote! {
        #typed_impl

        #recast_impl

        #kind_impl

        #get_type_meta_impl

        #auto_register_impl
    }
}
