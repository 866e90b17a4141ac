//! Paths into `recast_codec` used by generated code.
//!
//! Kept in one place so a change in the crate layout only touches this file.

use proc_macro2::TokenStream;
use quote::quote;

/// Path of the `recast_codec` crate as seen from the crate being compiled.
///
/// Depends on the caller's `Cargo.toml`, see
/// [`Manifest`](recast_macro_utils::Manifest). Reading it is not free, so
/// the result is computed once per derive and passed around.
pub(crate) fn recast_codec() -> syn::Path {
    recast_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("recast_codec"))
}

#[inline(always)]
pub(crate) fn info_(recast_codec_path: &syn::Path) -> TokenStream {
    quote! { #recast_codec_path::info }
}

#[inline(always)]
pub(crate) fn ops_(recast_codec_path: &syn::Path) -> TokenStream {
    quote! { #recast_codec_path::ops }
}

#[inline(always)]
pub(crate) fn registry_(recast_codec_path: &syn::Path) -> TokenStream {
    quote! { #recast_codec_path::registry }
}

#[inline(always)]
pub(crate) fn recast_(recast_codec_path: &syn::Path) -> TokenStream {
    quote! { #recast_codec_path::Recast }
}

#[inline(always)]
pub(crate) fn box_(recast_codec_path: &syn::Path) -> TokenStream {
    quote! { #recast_codec_path::__macro_exports::Box }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(recast_codec_path: &syn::Path) -> TokenStream {
    quote! { #recast_codec_path::__macro_exports::auto_register }
}
