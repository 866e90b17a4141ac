use crate::Recast;
use crate::ops::{Enum, Iterable, Map, Object, Optional, Struct};

/// Immutable view of a value, one variant per [`RecastKind`](crate::RecastKind).
pub enum RecastRef<'a> {
    Leaf(&'a dyn Recast),
    Enum(&'a dyn Enum),
    Optional(&'a dyn Optional),
    Iterable(&'a dyn Iterable),
    Map(&'a dyn Map),
    Struct(&'a dyn Struct),
    Message(&'a dyn protobuf::MessageDyn),
    Object(&'a Object),
}

/// Mutable view of a value, one variant per [`RecastKind`](crate::RecastKind).
pub enum RecastMut<'a> {
    Leaf(&'a mut dyn Recast),
    Enum(&'a mut dyn Enum),
    Optional(&'a mut dyn Optional),
    Iterable(&'a mut dyn Iterable),
    Map(&'a mut dyn Map),
    Struct(&'a mut dyn Struct),
    Message(&'a mut dyn protobuf::MessageDyn),
    Object(&'a mut Object),
}

impl<'a> RecastRef<'a> {
    #[inline]
    pub fn as_struct(self) -> Option<&'a dyn Struct> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_iterable(self) -> Option<&'a dyn Iterable> {
        match self {
            Self::Iterable(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(self) -> Option<&'a dyn Map> {
        match self {
            Self::Map(value) => Some(value),
            _ => None,
        }
    }
}

impl<'a> RecastMut<'a> {
    #[inline]
    pub fn as_struct(self) -> Option<&'a mut dyn Struct> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_iterable(self) -> Option<&'a mut dyn Iterable> {
        match self {
            Self::Iterable(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(self) -> Option<&'a mut dyn Map> {
        match self {
            Self::Map(value) => Some(value),
            _ => None,
        }
    }
}
