use crate::derive_data::RecastMeta;

/// `inventory::submit!` of the type's registration function.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &RecastMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return proc_macro2::TokenStream::new();
    };
    // Generic types have no single instantiation to register.
    if meta.impl_with_generic() {
        return proc_macro2::TokenStream::new();
    }

    let auto_register_ = crate::path::auto_register_(meta.recast_codec_path());
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &RecastMeta) -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
