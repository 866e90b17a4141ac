use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::RecastMeta;

/// `impl Typed`, with a cell shared by all instantiations of a generic type.
pub(crate) fn impl_typed(meta: &RecastMeta, info_expression: &TokenStream) -> TokenStream {
    let info_ = crate::path::info_(meta.recast_codec_path());
    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause();

    let cell = if meta.impl_with_generic() {
        quote! {
            static CELL: #info_::GenericTypeInfoCell = #info_::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| #info_expression)
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericTypeInfoCell = #info_::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| #info_expression)
        }
    };

    quote! {
        impl #impl_generics #info_::Typed for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #info_::TypeInfo {
                #cell
            }
        }
    }
}

/// `impl Recast` for a struct or enum, `kind` names the view variant.
pub(crate) fn impl_recast_trait(meta: &RecastMeta, kind: &TokenStream) -> TokenStream {
    let recast_codec_path = meta.recast_codec_path();
    let info_ = crate::path::info_(recast_codec_path);
    let ops_ = crate::path::ops_(recast_codec_path);
    let recast_ = crate::path::recast_(recast_codec_path);
    let box_ = crate::path::box_(recast_codec_path);
    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause();

    quote! {
        impl #impl_generics #recast_ for #ident #ty_generics #where_clause {
            #[inline]
            fn recast_type_info(&self) -> &'static #info_::TypeInfo {
                <Self as #info_::Typed>::type_info()
            }

            #[inline]
            fn recast_ref(&self) -> #ops_::RecastRef<'_> {
                #ops_::RecastRef::#kind(self)
            }

            #[inline]
            fn recast_mut(&mut self) -> #ops_::RecastMut<'_> {
                #ops_::RecastMut::#kind(self)
            }

            fn set(
                &mut self,
                value: #box_<dyn #recast_>,
            ) -> ::core::result::Result<(), #box_<dyn #recast_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }
        }
    }
}

/// `impl GetTypeMeta`, registering the type of every stored field.
pub(crate) fn impl_get_type_meta(meta: &RecastMeta, dependencies: &[&Type]) -> TokenStream {
    let registry_ = crate::path::registry_(meta.recast_codec_path());
    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause();

    let register_dependencies = if dependencies.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            fn register_dependencies(registry: &mut #registry_::TypeRegistry) {
                #(registry.register::<#dependencies>();)*
            }
        }
    };

    quote! {
        impl #impl_generics #registry_::GetTypeMeta for #ident #ty_generics #where_clause {
            fn get_type_meta() -> #registry_::TypeMeta {
                #registry_::TypeMeta::with_default::<Self>()
            }

            #register_dependencies
        }
    }
}
