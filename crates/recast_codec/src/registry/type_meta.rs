use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use recast_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{FromType, TypeRegistry, TypeTrait, TypeTraitDefault};

// -----------------------------------------------------------------------------
// TypeMeta

/// Registration record of a type: its [`TypeInfo`] and capabilities.
///
/// ```
/// use recast_codec::registry::{TypeMeta, TypeTraitDefault};
///
/// let meta = TypeMeta::with_default::<i32>();
/// let default = meta.get_trait::<TypeTraitDefault>().unwrap().default();
/// assert_eq!(default.downcast_ref::<i32>(), Some(&0));
/// ```
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// A record without capabilities.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            type_info: T::type_info(),
            trait_table: TypeIdMap::new(),
        }
    }

    /// A record with [`TypeTraitDefault`], so the type can be constructed
    /// by the object factory.
    pub fn with_default<T: Typed + Default>() -> Self {
        let mut meta = Self::of::<T>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<T>::from_type());
        meta
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.type_info.ty()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_info.type_id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_info.type_path()
    }

    /// Name this type is stored under in documents.
    #[inline]
    pub fn discriminator(&self) -> &'static str {
        self.type_info.discriminator()
    }

    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, value: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, value);
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }

    pub fn trait_iter(&self) -> impl ExactSizeIterator<Item = (TypeId, &dyn TypeTrait)> {
        self.trait_table
            .iter()
            .map(|(key, value)| (*key, value.deref()))
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for (id, type_trait) in self.trait_table.iter() {
            trait_table.insert(*id, (**type_trait).clone_type_trait());
        }
        Self {
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type", self.ty())
            .field("discriminator", &self.discriminator())
            .field("traits", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Produces the [`TypeMeta`] of a type for registration.
///
/// `register_dependencies` registers the types a value of `Self` may
/// contain, so registering a struct also registers its field types.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so it can't be registered",
    note = "consider annotating `{Self}` with `#[derive(Recast)]`"
)]
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
