use core::any::TypeId;
use core::fmt;

use crate::info::{TypeInfo, Typed};

/// Field metadata handed to transformers.
///
/// Describes the declared type of a struct field, or of an element or map
/// key/value position. Transformers use it to see through type erasure:
/// the element type of a `Vec<T>` field, the key type of a map field.
///
/// Values reached through an [`Object`](crate::Object) slot have no field.
#[derive(Clone, Copy)]
pub struct CastedField {
    name: &'static str,
    type_info: fn() -> &'static TypeInfo,
}

impl CastedField {
    #[inline]
    pub const fn new(name: &'static str, type_info: fn() -> &'static TypeInfo) -> Self {
        Self { name, type_info }
    }

    #[inline]
    pub fn of<T: Typed>(name: &'static str) -> Self {
        Self::new(name, T::type_info)
    }

    /// Name used as the document key.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Info of the field type as written.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Info of the field type with `Option` layers removed.
    #[inline]
    pub fn declared(&self) -> &'static TypeInfo {
        self.type_info().declared()
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self.declared(), TypeInfo::Map(_))
    }

    /// `true` for collections and maps.
    #[inline]
    pub fn is_multi_valued(&self) -> bool {
        matches!(self.declared(), TypeInfo::Iterable(_) | TypeInfo::Map(_))
    }

    /// Whether this field declares the type `id`, `Option` layers aside.
    #[inline]
    pub fn declares(&self, id: TypeId) -> bool {
        self.declared().type_id() == id
    }

    /// Field describing one element, named like this field.
    pub fn element(&self) -> Option<CastedField> {
        match self.declared() {
            TypeInfo::Iterable(info) => Some(Self::new(self.name, info.item_fn())),
            TypeInfo::Map(info) => Some(Self::new(self.name, info.value_fn())),
            _ => None,
        }
    }

    /// Field describing the keys of a map, named like this field.
    pub fn map_key(&self) -> Option<CastedField> {
        self.declared()
            .as_map()
            .map(|info| Self::new(self.name, info.key_fn()))
    }
}

impl fmt::Debug for CastedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CastedField")
            .field("name", &self.name)
            .field("type", &self.type_info().type_path())
            .finish()
    }
}
