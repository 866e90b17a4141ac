use crate::Recast;
use crate::info::TypeInfo;

/// Static access to a type's [`TypeInfo`].
///
/// Implemented by `#[derive(Recast)]`, `impl_recast_message!` and the
/// built-in impls. The returned reference is cached for the process
/// lifetime, see [`NonGenericTypeInfoCell`](crate::info::NonGenericTypeInfoCell).
pub trait Typed: Recast {
    fn type_info() -> &'static TypeInfo;
}
