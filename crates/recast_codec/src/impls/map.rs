use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use recast_utils::hash::hashbrown::HashMap as BrownHashMap;

use crate::info::{GenericTypeInfoCell, MapInfo, TypeInfo, Typed};
use crate::ops::Map;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
use crate::{Recast, impls};

// Unboxes a key/value pair, handing both back if either has the wrong type.
fn take_entry<K: Recast, V: Recast>(
    key: Box<dyn Recast>,
    value: Box<dyn Recast>,
) -> Result<(K, V), (Box<dyn Recast>, Box<dyn Recast>)> {
    let key = match key.take::<K>() {
        Ok(key) => key,
        Err(key) => return Err((key, value)),
    };
    match value.take::<V>() {
        Ok(value) => Ok((key, value)),
        Err(value) => Err((Box::new(key), value)),
    }
}

// -----------------------------------------------------------------------------
// Hash maps

macro_rules! impl_recast_hash_map {
    ($map:ident) => {
        impl<K, V, S> Typed for $map<K, V, S>
        where
            K: Typed + Eq + Hash,
            V: Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, K, V>(|| {
                        Box::new($map::<K, V, S>::with_hasher(S::default()))
                    }))
                })
            }
        }

        impl<K, V, S> Recast for $map<K, V, S>
        where
            K: Typed + Eq + Hash,
            V: Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            impls::impl_recast_cast_fn!(Map);
        }

        impl<K, V, S> Map for $map<K, V, S>
        where
            K: Typed + Eq + Hash,
            V: Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                $map::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Recast, &dyn Recast)> + '_> {
                Box::new($map::iter(self).map(|(key, value)| (key.as_recast(), value.as_recast())))
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Recast>,
                value: Box<dyn Recast>,
            ) -> Result<(), (Box<dyn Recast>, Box<dyn Recast>)> {
                let (key, value) = take_entry::<K, V>(key, value)?;
                self.insert(key, value);
                Ok(())
            }
        }

        impl<K, V, S> GetTypeMeta for $map<K, V, S>
        where
            K: GetTypeMeta + Eq + Hash,
            V: GetTypeMeta,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_recast_hash_map!(HashMap);
impl_recast_hash_map!(BrownHashMap);

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: Typed + Ord, V: Typed> Typed for BTreeMap<K, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Map(MapInfo::new::<Self, K, V>(|| Box::new(BTreeMap::<K, V>::new())))
        })
    }
}

impl<K: Typed + Ord, V: Typed> Recast for BTreeMap<K, V> {
    impls::impl_recast_cast_fn!(Map);
}

impl<K: Typed + Ord, V: Typed> Map for BTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Recast, &dyn Recast)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(key, value)| (key.as_recast(), value.as_recast())))
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Recast>,
        value: Box<dyn Recast>,
    ) -> Result<(), (Box<dyn Recast>, Box<dyn Recast>)> {
        let (key, value) = take_entry::<K, V>(key, value)?;
        self.insert(key, value);
        Ok(())
    }
}

impl<K: GetTypeMeta + Ord, V: GetTypeMeta> GetTypeMeta for BTreeMap<K, V> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_default::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::ops::Map;

    #[test]
    fn insert_checks_both_halves() {
        let mut map = BTreeMap::<String, i32>::new();
        let (key, value) = map
            .insert_boxed(Box::new(String::from("a")), Box::new(1_i64))
            .unwrap_err();
        assert!(key.is::<String>());
        assert!(value.is::<i64>());
        assert!(map.is_empty());

        map.insert_boxed(Box::new(String::from("a")), Box::new(1_i32))
            .unwrap();
        assert_eq!(map.get("a"), Some(&1));
    }
}
