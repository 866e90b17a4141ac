use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::derive_data::{EnumVariant, RecastMeta};

/// `TypeInfo::Enum(EnumInfo::new::<Self>(path, &[names...], from_name))`
pub(crate) fn enum_info_expression(meta: &RecastMeta, variants: &[EnumVariant]) -> TokenStream {
    let recast_codec_path = meta.recast_codec_path();
    let info_ = crate::path::info_(recast_codec_path);
    let recast_ = crate::path::recast_(recast_codec_path);
    let box_ = crate::path::box_(recast_codec_path);
    let type_path = meta.type_path_expression();
    let with_alias = meta.with_alias_expression();

    let names: Vec<&String> = variants.iter().map(|variant| &variant.name).collect();
    let idents = variants.iter().map(|variant| variant.ident);

    quote! {
        #info_::TypeInfo::Enum(
            #info_::EnumInfo::new::<Self>(
                #type_path,
                &[#(#names),*],
                |name| match name {
                    #(#names => ::core::option::Option::Some(#box_::new(Self::#idents) as #box_<dyn #recast_>),)*
                    _ => ::core::option::Option::None,
                },
            )#with_alias
        )
    }
}

/// `impl Enum`
pub(crate) fn impl_enum(meta: &RecastMeta, variants: &[EnumVariant]) -> TokenStream {
    let ops_ = crate::path::ops_(meta.recast_codec_path());
    let ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();
    let where_clause = meta.where_clause();

    let idents: Vec<_> = variants.iter().map(|variant| variant.ident).collect();
    let names = variants.iter().map(|variant| &variant.name);
    let indices = (0..variants.len()).map(Literal::usize_unsuffixed);

    quote! {
        impl #impl_generics #ops_::Enum for #ident #ty_generics #where_clause {
            fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#idents => #names,)*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(Self::#idents => #indices,)*
                }
            }
        }
    }
}
