use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;
use core::fmt;

use crate::info::{EnumInfo, IterableInfo, MapInfo, OptionalInfo, StructInfo, Type, Typed};
use crate::{Recast, RecastKind};

// -----------------------------------------------------------------------------
// TypeInfo

/// Static description of a recastable type.
///
/// The variant decides which transformer family handles the type:
///
/// | Variant    | Handled by                                   |
/// |------------|----------------------------------------------|
/// | `Leaf`     | a leaf transformer keyed by exact type        |
/// | `Enum`     | variant name                                  |
/// | `Optional` | unwrapped by the dispatcher                   |
/// | `Iterable` | the iterable transformer                      |
/// | `Map`      | the map transformer                           |
/// | `Struct`   | a nested document with a discriminator        |
/// | `Message`  | the protobuf message transformer              |
/// | `Object`   | whatever the runtime content is               |
#[derive(Debug)]
pub enum TypeInfo {
    Leaf(LeafInfo),
    Enum(EnumInfo),
    Optional(OptionalInfo),
    Iterable(IterableInfo),
    Map(MapInfo),
    Struct(StructInfo),
    Message(MessageInfo),
    Object(ObjectInfo),
}

macro_rules! impl_as_kind {
    ($($fn_name:ident => $variant:ident($info:ty)),* $(,)?) => {
        $(
            #[inline]
            pub fn $fn_name(&self) -> Option<&$info> {
                match self {
                    Self::$variant(info) => Some(info),
                    _ => None,
                }
            }
        )*
    };
}

impl TypeInfo {
    /// Identity of the described type.
    pub fn ty(&self) -> &Type {
        match self {
            Self::Leaf(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Iterable(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::Message(info) => info.ty(),
            Self::Object(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    pub fn kind(&self) -> RecastKind {
        match self {
            Self::Leaf(_) => RecastKind::Leaf,
            Self::Enum(_) => RecastKind::Enum,
            Self::Optional(_) => RecastKind::Optional,
            Self::Iterable(_) => RecastKind::Iterable,
            Self::Map(_) => RecastKind::Map,
            Self::Struct(_) => RecastKind::Struct,
            Self::Message(_) => RecastKind::Message,
            Self::Object(_) => RecastKind::Object,
        }
    }

    /// Name stored under the discriminator key for this type.
    ///
    /// Structs and enums use their alias or path, everything else its path.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Struct(info) => info.discriminator(),
            Self::Enum(info) => info.discriminator(),
            other => other.type_path(),
        }
    }

    /// Looks through any number of `Optional` layers.
    pub fn declared(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Optional(optional) = info {
            info = optional.inner();
        }
        info
    }

    impl_as_kind! {
        as_leaf => Leaf(LeafInfo),
        as_enum => Enum(EnumInfo),
        as_optional => Optional(OptionalInfo),
        as_iterable => Iterable(IterableInfo),
        as_map => Map(MapInfo),
        as_struct => Struct(StructInfo),
        as_message => Message(MessageInfo),
        as_object => Object(ObjectInfo),
    }
}

// -----------------------------------------------------------------------------
// Simple kinds

/// A scalar or otherwise opaque value handled by a leaf transformer.
#[derive(Debug)]
pub struct LeafInfo {
    ty: Type,
}

impl LeafInfo {
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// The dynamically typed [`Object`](crate::Object) slot.
#[derive(Debug)]
pub struct ObjectInfo {
    ty: Type,
}

impl ObjectInfo {
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// A generated protobuf message.
///
/// Carries the constructor-and-merge function for the message type, so a
/// decode never has to look the message type up again.
pub struct MessageInfo {
    ty: Type,
    parse: fn(&str) -> Result<Box<dyn Recast>, String>,
}

impl MessageInfo {
    #[inline]
    pub fn new<T: Typed>(parse: fn(&str) -> Result<Box<dyn Recast>, String>) -> Self {
        Self {
            ty: Type::of::<T>(),
            parse,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Builds a fresh message from its canonical JSON, ignoring unknown fields.
    #[inline]
    pub fn parse(&self, json: &str) -> Result<Box<dyn Recast>, String> {
        (self.parse)(json)
    }
}

impl fmt::Debug for MessageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageInfo").field("ty", &self.ty).finish()
    }
}
