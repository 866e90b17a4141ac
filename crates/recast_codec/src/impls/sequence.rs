use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use recast_utils::hash::hashbrown::HashSet as BrownHashSet;

use crate::info::{GenericTypeInfoCell, IterableInfo, IterableShape, TypeInfo, Typed};
use crate::ops::Iterable;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
use crate::{Recast, impls};

// -----------------------------------------------------------------------------
// Sequences

impl<T: Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Iterable(IterableInfo::new::<Self, T>(IterableShape::List, |capacity| {
                Box::new(Vec::<T>::with_capacity(capacity))
            }))
        })
    }
}

impl<T: Typed> Recast for Vec<T> {
    impls::impl_recast_cast_fn!(Iterable);
}

impl<T: Typed> Iterable for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Recast> + '_> {
        Box::new(<[T]>::iter(self).map(Recast::as_recast))
    }

    fn extend_boxed(&mut self, items: Vec<Box<dyn Recast>>) -> Result<(), Box<dyn Recast>> {
        let items = impls::take_all::<T>(items)?;
        self.extend(items);
        Ok(())
    }
}

impl<T: Typed> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Iterable(IterableInfo::new::<Self, T>(IterableShape::List, |capacity| {
                Box::new(VecDeque::<T>::with_capacity(capacity))
            }))
        })
    }
}

impl<T: Typed> Recast for VecDeque<T> {
    impls::impl_recast_cast_fn!(Iterable);
}

impl<T: Typed> Iterable for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Recast> + '_> {
        Box::new(VecDeque::iter(self).map(Recast::as_recast))
    }

    fn extend_boxed(&mut self, items: Vec<Box<dyn Recast>>) -> Result<(), Box<dyn Recast>> {
        let items = impls::take_all::<T>(items)?;
        self.extend(items);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Arrays

impl<T: Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Iterable(IterableInfo::new::<Self, T>(IterableShape::Array, |capacity| {
                Box::new(Vec::<T>::with_capacity(capacity).into_boxed_slice())
            }))
        })
    }
}

impl<T: Typed> Recast for Box<[T]> {
    impls::impl_recast_cast_fn!(Iterable);
}

impl<T: Typed> Iterable for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Recast> + '_> {
        Box::new(<[T]>::iter(self).map(Recast::as_recast))
    }

    fn extend_boxed(&mut self, items: Vec<Box<dyn Recast>>) -> Result<(), Box<dyn Recast>> {
        let items = impls::take_all::<T>(items)?;
        let mut all = core::mem::take(self).into_vec();
        all.extend(items);
        *self = all.into_boxed_slice();
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Sets

impl<T: Typed + Ord> Typed for BTreeSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Iterable(IterableInfo::new::<Self, T>(IterableShape::Set, |_| {
                Box::new(BTreeSet::<T>::new())
            }))
        })
    }
}

impl<T: Typed + Ord> Recast for BTreeSet<T> {
    impls::impl_recast_cast_fn!(Iterable);
}

impl<T: Typed + Ord> Iterable for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Recast> + '_> {
        Box::new(BTreeSet::iter(self).map(Recast::as_recast))
    }

    fn extend_boxed(&mut self, items: Vec<Box<dyn Recast>>) -> Result<(), Box<dyn Recast>> {
        let items = impls::take_all::<T>(items)?;
        self.extend(items);
        Ok(())
    }
}

macro_rules! impl_recast_hash_set {
    ($set:ident) => {
        impl<T, S> Typed for $set<T, S>
        where
            T: Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Iterable(IterableInfo::new::<Self, T>(IterableShape::Set, |capacity| {
                        Box::new($set::<T, S>::with_capacity_and_hasher(capacity, S::default()))
                    }))
                })
            }
        }

        impl<T, S> Recast for $set<T, S>
        where
            T: Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            impls::impl_recast_cast_fn!(Iterable);
        }

        impl<T, S> Iterable for $set<T, S>
        where
            T: Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                $set::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Recast> + '_> {
                Box::new($set::iter(self).map(Recast::as_recast))
            }

            fn extend_boxed(&mut self, items: Vec<Box<dyn Recast>>) -> Result<(), Box<dyn Recast>> {
                let items = impls::take_all::<T>(items)?;
                self.extend(items);
                Ok(())
            }
        }

        impl<T, S> GetTypeMeta for $set<T, S>
        where
            T: GetTypeMeta + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_recast_hash_set!(HashSet);
impl_recast_hash_set!(BrownHashSet);

// -----------------------------------------------------------------------------
// Registration

macro_rules! impl_get_type_meta {
    ($($ty:ty where $bound:path);* $(;)?) => {$(
        impl<T: GetTypeMeta + $bound> GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    )*};
}

impl_get_type_meta! {
    Vec<T> where Sized;
    VecDeque<T> where Sized;
    Box<[T]> where Sized;
    BTreeSet<T> where Ord;
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Recast;
    use crate::info::{IterableShape, Typed};
    use crate::ops::Iterable;

    #[test]
    fn extend_is_all_or_nothing() {
        let mut list = vec![1_i32];
        let items: Vec<Box<dyn Recast>> = vec![Box::new(2_i32), Box::new("x".to_owned()), Box::new(3_i32)];
        assert!(list.extend_boxed(items).is_err());
        assert_eq!(list, [1]);

        let items: Vec<Box<dyn Recast>> = vec![Box::new(2_i32), Box::new(3_i32)];
        list.extend_boxed(items).unwrap();
        assert_eq!(list, [1, 2, 3]);
    }

    #[test]
    fn boxed_slice_is_array_shaped() {
        let info = <Box<[i64]> as Typed>::type_info().as_iterable().unwrap();
        assert_eq!(info.shape(), IterableShape::Array);
        assert!(info.item().is::<i64>());

        let mut array = info.create(2);
        let Some(array) = array.recast_mut().as_iterable() else {
            panic!("not iterable");
        };
        array.extend_boxed(vec![Box::new(4_i64), Box::new(5_i64)]).unwrap();
        assert_eq!(array.len(), 2);
    }
}
