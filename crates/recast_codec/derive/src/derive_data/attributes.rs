use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::RECAST_ATTRIBUTE_NAME;

fn recast_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(RECAST_ATTRIBUTE_NAME))
}

/// `#[recast(...)]` on the type.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `alias = "name"`
    pub alias: Option<LitStr>,
    /// `auto_register`, span kept for the generated `submit!`.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in recast_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    if this.alias.is_some() {
                        return Err(meta.error("duplicate `alias`"));
                    }
                    let alias: LitStr = meta.value()?.parse()?;
                    if alias.value().is_empty() {
                        return Err(syn::Error::new(alias.span(), "`alias` must not be empty"));
                    }
                    this.alias = Some(alias);
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("expected `alias = \"...\"` or `auto_register`"))
                }
            })?;
        }
        Ok(this)
    }
}

/// `#[recast(...)]` on a field or variant.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `rename = "name"`
    pub rename: Option<LitStr>,
    /// `skip`, fields only.
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in recast_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    this.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"` or `skip`"))
                }
            })?;
        }
        Ok(this)
    }
}
