use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use recast_document::{Date, Document, Value};
use recast_utils::TypeIdMap;
use recast_utils::hash::HashMap;

use crate::Object;
use crate::info::TypeInfo;
use crate::registry::{GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// Known types, addressable by `TypeId` and by the names documents use.
///
/// Each type is reachable through its discriminator and, when that is an
/// alias, through its type path as well. If two types claim the same name,
/// the first registration keeps it and a warning is logged.
///
/// ```
/// use recast_codec::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let meta = registry.get_with_discriminator("i32").unwrap();
/// assert!(meta.type_info().is::<i32>());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    name_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry without any types.
    #[inline]
    pub fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            name_to_id: HashMap::default(),
        }
    }

    /// A registry with every type an [`Object`] slot can decode into.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<u8>();
        registry.register::<i16>();
        registry.register::<char>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<Date>();
        registry.register::<DateTime<Utc>>();
        registry.register::<NaiveDateTime>();
        registry.register::<NaiveTime>();
        registry.register::<Value>();
        registry.register::<Document>();
        registry.register::<Object>();
        registry.register::<Vec<Object>>();
        registry.register::<Box<[u8]>>();
        registry.register::<Box<[i32]>>();
        registry.register::<Box<[i64]>>();
        registry.register::<Box<[f64]>>();
        registry.register::<Box<[char]>>();
        registry
    }

    fn add_name(name_to_id: &mut HashMap<&'static str, TypeId>, name: &'static str, id: TypeId) {
        match name_to_id.get(name) {
            Some(existing) if *existing != id => {
                log::warn!("discriminator `{name}` is already taken, keeping the first registration");
            }
            Some(_) => {}
            None => {
                name_to_id.insert(name, id);
            }
        }
    }

    fn add_new_type_indices(name_to_id: &mut HashMap<&'static str, TypeId>, meta: &TypeMeta) {
        let id = meta.type_id();
        Self::add_name(name_to_id, meta.discriminator(), id);
        if meta.discriminator() != meta.type_path() {
            Self::add_name(name_to_id, meta.type_path(), id);
        }
    }

    // Returns `false` and does nothing if the type is already present.
    fn register_internal(&mut self, type_id: TypeId, get_type_meta: impl FnOnce() -> TypeMeta) -> bool {
        let name_to_id = &mut self.name_to_id;
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_indices(name_to_id, &meta);
            meta
        })
    }

    /// Registers `T` and everything it depends on.
    ///
    /// Registering a type twice is a no-op.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            log::trace!("registered {}", core::any::type_name::<T>());
            T::register_dependencies(self);
        }
    }

    /// Inserts `type_meta`, replacing any previous record for its type.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.type_id()) {
            Self::add_new_type_indices(&mut self.name_to_id, &type_meta);
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Registers every type submitted with `#[recast(auto_register)]`.
    ///
    /// Returns `false` if the feature is disabled or the platform doesn't
    /// support link-time collection.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::registry::auto_register;

            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_types(self);
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Looks a type up by discriminator or type path.
    pub fn get_with_discriminator(&self, name: &str) -> Option<&TypeMeta> {
        match self.name_to_id.get(name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    #[inline]
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(meta) => meta.get_trait::<T>(),
            None => None,
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.name_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::TypeRegistry;
    use crate::Object;
    use crate::registry::TypeTraitDefault;

    #[test]
    fn natural_types_are_registered() {
        let registry = TypeRegistry::new();
        for name in ["bool", "i32", "alloc::string::String", "recast_document::value::Value"] {
            assert!(registry.get_with_discriminator(name).is_some(), "{name}");
        }
        assert!(registry.contains(core::any::TypeId::of::<Vec<Object>>()));
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<String>>();
        let len = registry.len();
        registry.register::<Vec<String>>();
        assert_eq!(registry.len(), len);
        // the item type comes along as a dependency
        assert!(registry.contains(core::any::TypeId::of::<String>()));
    }

    #[test]
    fn default_trait_constructs() {
        let registry = TypeRegistry::new();
        let default = registry
            .get_type_trait::<TypeTraitDefault>(core::any::TypeId::of::<String>())
            .unwrap()
            .default();
        assert_eq!(default.downcast_ref::<String>().map(String::len), Some(0));
    }
}
