//! Parsed form of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;

// -----------------------------------------------------------------------------
// Internal API

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Path, Type};

pub(crate) use attributes::{FieldAttributes, TypeAttributes};

/// Key the codec reserves for the discriminator.
const RESERVED_NAME: &str = "__recast";

// -----------------------------------------------------------------------------
// RecastMeta

/// Everything about the type that doesn't depend on its kind.
pub(crate) struct RecastMeta<'a> {
    recast_codec_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> RecastMeta<'a> {
    #[inline]
    pub fn recast_codec_path(&self) -> &Path {
        &self.recast_codec_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &Generics {
        self.generics
    }

    /// Whether the type has type or const parameters.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some() || self.generics.const_params().next().is_some()
    }

    /// Expression of the type path.
    ///
    /// `module::Name` for plain types. Generic types use the full type name
    /// so that each instantiation gets its own path.
    pub fn type_path_expression(&self) -> TokenStream {
        if self.impl_with_generic() {
            quote! { ::core::any::type_name::<Self>() }
        } else {
            let name = self.ident.unraw().to_string();
            quote! { ::core::concat!(::core::module_path!(), "::", #name) }
        }
    }

    /// `.with_alias("...")` if an alias was given.
    pub fn with_alias_expression(&self) -> TokenStream {
        match &self.attrs.alias {
            Some(alias) => quote! { .with_alias(#alias) },
            None => TokenStream::new(),
        }
    }

    /// Where clause of every generated impl: the declared predicates plus
    /// `GetTypeMeta` for each type parameter.
    pub fn where_clause(&self) -> TokenStream {
        let registry_ = crate::path::registry_(&self.recast_codec_path);
        let params = self.generics.type_params().map(|param| &param.ident);
        let declared = self
            .generics
            .where_clause
            .iter()
            .flat_map(|clause| clause.predicates.iter());
        quote! {
            where
                #(#params: #registry_::GetTypeMeta,)*
                #(#declared,)*
        }
    }
}

// -----------------------------------------------------------------------------
// RecastData

pub(crate) struct StructField<'a> {
    pub member: &'a Ident,
    pub ty: &'a Type,
    /// Document key.
    pub name: String,
}

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    /// Stored form.
    pub name: String,
}

pub(crate) enum RecastData<'a> {
    /// Stored fields only, in declaration order.
    Struct(Vec<StructField<'a>>),
    Enum(Vec<EnumVariant<'a>>),
}

pub(crate) struct RecastDerive<'a> {
    pub meta: RecastMeta<'a>,
    pub data: RecastData<'a>,
}

impl<'a> RecastDerive<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "recastable types must be 'static, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse(&ast.attrs)?;
        let data = match &ast.data {
            Data::Struct(data) => RecastData::Struct(Self::parse_fields(&data.fields)?),
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "enums without variants can't be recast",
                    ));
                }
                let mut names = BTreeSet::new();
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new_spanned(
                            variant,
                            "only unit variants are supported",
                        ));
                    }
                    let field_attrs = FieldAttributes::parse(&variant.attrs)?;
                    if field_attrs.skip {
                        return Err(syn::Error::new_spanned(variant, "variants can't be skipped"));
                    }
                    let name = field_attrs
                        .rename
                        .map_or_else(|| variant.ident.unraw().to_string(), |lit| lit.value());
                    if !names.insert(name.clone()) {
                        return Err(syn::Error::new_spanned(
                            variant,
                            format!("variant name `{name}` is used twice"),
                        ));
                    }
                    variants.push(EnumVariant {
                        ident: &variant.ident,
                        name,
                    });
                }
                RecastData::Enum(variants)
            }
            Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "unions can't be recast",
                ));
            }
        };

        Ok(Self {
            meta: RecastMeta {
                recast_codec_path: crate::path::recast_codec(),
                attrs,
                ident: &ast.ident,
                generics: &ast.generics,
            },
            data,
        })
    }

    fn parse_fields(fields: &'a Fields) -> syn::Result<Vec<StructField<'a>>> {
        let named = match fields {
            Fields::Named(named) => named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "tuple structs can't be recast, use named fields",
                ));
            }
        };

        let mut names = BTreeSet::new();
        let mut result = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let field_attrs = FieldAttributes::parse(&field.attrs)?;
            if field_attrs.skip {
                continue;
            }
            // named fields always have an ident
            let Some(member) = &field.ident else { continue };
            let name = field_attrs
                .rename
                .map_or_else(|| member.unraw().to_string(), |lit| lit.value());
            if name == RESERVED_NAME {
                return Err(syn::Error::new_spanned(
                    field,
                    format!("`{RESERVED_NAME}` is reserved for the discriminator"),
                ));
            }
            if !names.insert(name.clone()) {
                return Err(syn::Error::new_spanned(
                    field,
                    format!("field name `{name}` is used twice"),
                ));
            }
            result.push(StructField {
                member,
                ty: &field.ty,
                name,
            });
        }
        Ok(result)
    }
}
