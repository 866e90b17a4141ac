use alloc::boxed::Box;

use crate::Recast;
use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// OptionalInfo

/// `Option<T>`: a value that may be absent.
///
/// `None` is stored as null; `Some(v)` is stored exactly as `v`.
#[derive(Debug)]
pub struct OptionalInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Recast>,
    some: fn(Box<dyn Recast>) -> Result<Box<dyn Recast>, Box<dyn Recast>>,
}

impl OptionalInfo {
    /// Describes `Option<T>`.
    pub fn new<T: Typed>() -> Self
    where
        Option<T>: Recast,
    {
        Self {
            ty: Type::of::<Option<T>>(),
            inner: T::type_info,
            none: || Box::new(None::<T>),
            some: |value| {
                value
                    .downcast::<T>()
                    .map(|value| Box::new(Some(*value)) as Box<dyn Recast>)
            },
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Info of the wrapped type.
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// A boxed `None`.
    #[inline]
    pub fn none(&self) -> Box<dyn Recast> {
        (self.none)()
    }

    /// Wraps a decoded inner value into `Some`.
    ///
    /// Hands the value back if it isn't of the wrapped type.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Recast>) -> Result<Box<dyn Recast>, Box<dyn Recast>> {
        (self.some)(value)
    }
}

// -----------------------------------------------------------------------------
// IterableInfo

/// How an iterable is laid out in memory.
///
/// All shapes are stored as document arrays. The shape only matters for
/// fixed-size arrays, which primitive leaf transformers may pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterableShape {
    /// Growable sequence such as `Vec` or `VecDeque`.
    List,
    /// Boxed slice.
    Array,
    /// Hash or ordered set.
    Set,
}

/// A homogeneous collection of `item` values.
#[derive(Debug)]
pub struct IterableInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    shape: IterableShape,
    create: fn(usize) -> Box<dyn Recast>,
}

impl IterableInfo {
    /// Describes collection `C` of `T` items.
    ///
    /// `create` returns an empty `C` with room for the given number of items.
    pub fn new<C: Typed, T: Typed>(shape: IterableShape, create: fn(usize) -> Box<dyn Recast>) -> Self {
        Self {
            ty: Type::of::<C>(),
            item: T::type_info,
            shape,
            create,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    #[inline]
    pub fn item_fn(&self) -> fn() -> &'static TypeInfo {
        self.item
    }

    #[inline]
    pub fn shape(&self) -> IterableShape {
        self.shape
    }

    /// An empty instance of the collection.
    #[inline]
    pub fn create(&self, capacity: usize) -> Box<dyn Recast> {
        (self.create)(capacity)
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// A map from `key` values to `value` values.
///
/// Keys are stored as document field names, so they must encode to a value
/// with a string form.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    create: fn() -> Box<dyn Recast>,
}

impl MapInfo {
    /// Describes map `M` from `K` to `V`.
    pub fn new<M: Typed, K: Typed, V: Typed>(create: fn() -> Box<dyn Recast>) -> Self {
        Self {
            ty: Type::of::<M>(),
            key: K::type_info,
            value: V::type_info,
            create,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn key(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn key_fn(&self) -> fn() -> &'static TypeInfo {
        self.key
    }

    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        (self.value)()
    }

    #[inline]
    pub fn value_fn(&self) -> fn() -> &'static TypeInfo {
        self.value
    }

    /// An empty instance of the map.
    #[inline]
    pub fn create(&self) -> Box<dyn Recast> {
        (self.create)()
    }
}
