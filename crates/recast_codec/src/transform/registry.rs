use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use recast_document::{Date, Document, Value};
use recast_utils::TypeIdMap;

use crate::info::Typed;
use crate::transform::{CustomTransformer, LeafTransformer};

/// Leaf transformers keyed by the exact type they handle.
///
/// ```
/// use recast_codec::transform::{LeafTransformer, TransformerRegistry};
///
/// let registry = TransformerRegistry::new();
/// assert!(matches!(registry.get::<Box<[u8]>>(), Some(LeafTransformer::Byte)));
/// assert!(registry.get::<Vec<u8>>().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct TransformerRegistry {
    leaves: TypeIdMap<LeafTransformer>,
}

impl Default for TransformerRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TransformerRegistry {
    /// A registry without any transformers.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            leaves: TypeIdMap::new(),
        }
    }

    /// A registry with the built-in leaf transformers.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.insert::<bool>(LeafTransformer::Boolean);
        registry.insert_with_arrays::<u8>(LeafTransformer::Byte);
        registry.insert_with_arrays::<i16>(LeafTransformer::Short);
        registry.insert_with_arrays::<i32>(LeafTransformer::Integer);
        registry.insert_with_arrays::<i64>(LeafTransformer::Long);
        registry.insert_with_arrays::<f32>(LeafTransformer::Float);
        registry.insert_with_arrays::<f64>(LeafTransformer::Double);

        registry.insert::<char>(LeafTransformer::Character);
        registry.insert::<Box<[Option<char>]>>(LeafTransformer::Character);
        registry.insert::<Box<[char]>>(LeafTransformer::CharArray);

        registry.insert::<String>(LeafTransformer::String);
        registry.insert::<Date>(LeafTransformer::Date);
        registry.insert::<DateTime<Utc>>(LeafTransformer::Instant);
        registry.insert::<NaiveDateTime>(LeafTransformer::LocalDateTime);
        registry.insert::<NaiveTime>(LeafTransformer::LocalTime);
        registry.insert::<Value>(LeafTransformer::Value);
        registry.insert::<Document>(LeafTransformer::Document);

        registry
    }

    // `T`, `Box<[T]>` and `Box<[Option<T>]>` share one transformer.
    fn insert_with_arrays<T: Typed>(&mut self, transformer: LeafTransformer) {
        self.insert::<Box<[T]>>(transformer.clone());
        self.insert::<Box<[Option<T>]>>(transformer.clone());
        self.insert::<T>(transformer);
    }

    /// Uses `transformer` for values of type `T`, replacing any previous one.
    #[inline]
    pub fn insert<T: Typed>(&mut self, transformer: LeafTransformer) {
        self.leaves.insert_type::<T>(transformer);
    }

    /// Uses a custom transformer for values of type `T`.
    pub fn insert_custom<T: Typed>(&mut self, transformer: impl CustomTransformer) {
        self.insert::<T>(LeafTransformer::Custom(Arc::new(transformer)));
    }

    #[inline]
    pub fn leaf(&self, type_id: TypeId) -> Option<&LeafTransformer> {
        self.leaves.get(&type_id)
    }

    #[inline]
    pub fn get<T: Typed>(&self) -> Option<&LeafTransformer> {
        self.leaves.get_type::<T>()
    }

    #[inline]
    pub fn has_leaf_transformer(&self, type_id: TypeId) -> bool {
        self.leaves.contains(&type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }
}
