use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeInfo;
use crate::ops::{RecastMut, RecastRef};

// -----------------------------------------------------------------------------
// RecastKind

/// Transformer family of a type, mirrors the variants of [`TypeInfo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecastKind {
    Leaf,
    Enum,
    Optional,
    Iterable,
    Map,
    Struct,
    Message,
    Object,
}

impl fmt::Display for RecastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leaf => "leaf",
            Self::Enum => "enum",
            Self::Optional => "optional",
            Self::Iterable => "iterable",
            Self::Map => "map",
            Self::Struct => "struct",
            Self::Message => "message",
            Self::Object => "object",
        })
    }
}

// -----------------------------------------------------------------------------
// Recast

/// A value that can be turned into a document value and back.
///
/// Implemented by `#[derive(Recast)]` for structs and fieldless enums, by
/// `impl_recast_message!` for protobuf messages, and by this crate for
/// scalars, temporals, `Option`, collections, maps and [`Object`].
///
/// The trait is object safe. Transformers only ever see `&dyn Recast` and
/// use [`recast_ref`](Recast::recast_ref) to reach the kind-specific view.
///
/// ```
/// use recast_codec::{Recast, RecastKind};
///
/// let value: Box<dyn Recast> = Box::new(vec![1_i32, 2, 3]);
/// assert_eq!(value.recast_kind(), RecastKind::Iterable);
/// assert!(value.is::<Vec<i32>>());
/// ```
///
/// [`Object`]: crate::Object
pub trait Recast: Any + Send + Sync {
    /// [`TypeInfo`] of the underlying type.
    fn recast_type_info(&self) -> &'static TypeInfo;

    /// Kind-specific immutable view.
    fn recast_ref(&self) -> RecastRef<'_>;

    /// Kind-specific mutable view.
    fn recast_mut(&mut self) -> RecastMut<'_>;

    /// Replaces `self` with `value` if both have the same type.
    fn set(&mut self, value: Box<dyn Recast>) -> Result<(), Box<dyn Recast>>;

    #[inline]
    fn recast_kind(&self) -> RecastKind {
        self.recast_type_info().kind()
    }

    /// [`TypeId`] of the underlying type.
    ///
    /// `Any::type_id` on a `Box<dyn Recast>` reports the box; this doesn't.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    #[inline(always)]
    fn as_recast(&self) -> &dyn Recast
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_recast(self) -> Box<dyn Recast>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

impl dyn Recast {
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.recast_type_info().type_path()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the boxed value to `T`, handing it back on mismatch.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Recast>) -> Result<Box<T>, Box<dyn Recast>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Like [`downcast`](Self::downcast), but unboxes the value.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Recast>) -> Result<T, Box<dyn Recast>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Recast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_path())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Recast;

    #[test]
    fn downcast_and_take() {
        let value: Box<dyn Recast> = Box::new(String::from("x"));
        assert!(value.is::<String>());
        assert!(!value.is::<i32>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("x"));

        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "x");
    }

    #[test]
    fn set_checks_type() {
        let mut target = 1_i64;
        assert!(target.set(Box::new(2_i32)).is_err());
        assert!(target.set(Box::new(7_i64)).is_ok());
        assert_eq!(target, 7);
    }
}
