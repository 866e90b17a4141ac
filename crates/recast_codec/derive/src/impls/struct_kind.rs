use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::derive_data::{RecastMeta, StructField};

/// `TypeInfo::Struct(StructInfo::new::<Self>(path, &[fields...]))`
pub(crate) fn struct_info_expression(meta: &RecastMeta, fields: &[StructField]) -> TokenStream {
    let info_ = crate::path::info_(meta.recast_codec_path());
    let type_path = meta.type_path_expression();
    let with_alias = meta.with_alias_expression();

    let casted_fields = fields.iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        quote! { #info_::CastedField::of::<#ty>(#name) }
    });

    quote! {
        #info_::TypeInfo::Struct(
            #info_::StructInfo::new::<Self>(#type_path, &[#(#casted_fields),*])#with_alias
        )
    }
}

/// `impl Struct`, fields addressed by their index among stored fields.
pub(crate) fn impl_struct(meta: &RecastMeta, fields: &[StructField]) -> TokenStream {
    let recast_codec_path = meta.recast_codec_path();
    let ops_ = crate::path::ops_(recast_codec_path);
    let recast_ = crate::path::recast_(recast_codec_path);
    let box_ = crate::path::box_(recast_codec_path);
    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause();

    let field_len = fields.len();
    let indices: Vec<Literal> = (0..fields.len()).map(Literal::usize_unsuffixed).collect();
    let members: Vec<_> = fields.iter().map(|field| field.member).collect();

    quote! {
        impl #impl_generics #ops_::Struct for #ident #ty_generics #where_clause {
            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #recast_> {
                match index {
                    #(#indices => ::core::option::Option::Some(#recast_::as_recast(&self.#members)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #recast_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#members as &mut dyn #recast_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field_at(
                &mut self,
                index: usize,
                value: #box_<dyn #recast_>,
            ) -> ::core::result::Result<(), #box_<dyn #recast_>> {
                match index {
                    #(#indices => #recast_::set(&mut self.#members, value),)*
                    _ => ::core::result::Result::Err(value),
                }
            }
        }
    }
}
