//! Paths used by code generated from `#[derive(Recast)]` and
//! `impl_recast_message!`. Not public API.

pub use alloc::boxed::Box;

pub use crate::impls::parse_message;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use crate::registry::auto_register::{__AutoRegisterFunc, __RegisterType, inventory};
}
