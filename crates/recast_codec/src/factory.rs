use alloc::boxed::Box;
use alloc::string::ToString;

use recast_document::{Document, Value};

use crate::error::ReconstructionError;
use crate::info::{CastedField, IterableInfo, TypeInfo};
use crate::registry::{TypeRegistry, TypeTraitDefault};
use crate::{DISCRIMINATOR_KEY, Object, Recast};

/// Creates empty instances and resolves discriminators to types.
///
/// Bound to one [`TypeRegistry`]; a type it has never seen can't be
/// constructed from a document.
#[derive(Clone, Copy, Debug)]
pub struct ObjectFactory<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> ObjectFactory<'a> {
    #[inline]
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// The registered type called `name`, by discriminator or type path.
    pub fn resolve(&self, name: &str) -> Result<&'static TypeInfo, ReconstructionError> {
        self.registry
            .get_with_discriminator(name)
            .map(|meta| meta.type_info())
            .ok_or_else(|| ReconstructionError::UnknownDiscriminator(name.to_string()))
    }

    /// An empty or default instance of `info`.
    ///
    /// Containers, `Option` and [`Object`] need no registration; every
    /// other type is built through its registered `Default`.
    pub fn create_instance(&self, info: &'static TypeInfo) -> Result<Box<dyn Recast>, ReconstructionError> {
        match info {
            TypeInfo::Iterable(iterable) => Ok(iterable.create(0)),
            TypeInfo::Map(map) => Ok(map.create()),
            TypeInfo::Optional(optional) => Ok(optional.none()),
            TypeInfo::Object(_) => Ok(Box::new(Object::null())),
            _ => self
                .registry
                .get_type_trait::<TypeTraitDefault>(info.type_id())
                .map(TypeTraitDefault::default)
                .ok_or(ReconstructionError::NotConstructible {
                    type_path: info.type_path(),
                }),
        }
    }

    /// The type a document describes.
    ///
    /// A discriminator must name a registered type, and must agree with
    /// `fallback` if one is given. Without a discriminator the fallback is
    /// used as-is. An [`Object`] fallback accepts any discriminator.
    pub fn resolve_document(
        &self,
        document: &Document,
        fallback: Option<&'static TypeInfo>,
    ) -> Result<&'static TypeInfo, ReconstructionError> {
        let fallback = fallback.filter(|info| !matches!(info, TypeInfo::Object(_)));
        let name = match document.get(DISCRIMINATOR_KEY) {
            None => return fallback.ok_or(ReconstructionError::MissingDiscriminator),
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(ReconstructionError::InvalidDiscriminator {
                    found: other.kind_name(),
                });
            }
        };
        match fallback {
            Some(info) if info.discriminator() == name || info.type_path() == name => Ok(info),
            Some(info) => {
                let found = self.resolve(name)?;
                Err(ReconstructionError::TypeMismatch {
                    expected: info.type_path(),
                    found: found.type_path(),
                })
            }
            None => self.resolve(name),
        }
    }

    /// An empty map of the type declared by `field`.
    pub fn create_map(&self, field: &CastedField) -> Result<Box<dyn Recast>, ReconstructionError> {
        match field.declared() {
            info @ TypeInfo::Map(_) => self.create_instance(info),
            info => Err(ReconstructionError::NotConstructible {
                type_path: info.type_path(),
            }),
        }
    }

    /// An empty collection of the type declared by `field`.
    pub fn create_collection(&self, info: &IterableInfo, capacity: usize) -> Box<dyn Recast> {
        info.create(capacity)
    }

    /// Like [`create_collection`](Self::create_collection), for a field.
    pub fn create_field_collection(
        &self,
        field: &CastedField,
        capacity: usize,
    ) -> Result<Box<dyn Recast>, ReconstructionError> {
        match field.declared() {
            TypeInfo::Iterable(info) => Ok(self.create_collection(info, capacity)),
            info => Err(ReconstructionError::NotConstructible {
                type_path: info.type_path(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use recast_document::{Value, doc};

    use super::ObjectFactory;
    use crate::error::ReconstructionError;
    use crate::info::{CastedField, Typed};
    use crate::registry::TypeRegistry;

    #[test]
    fn unknown_discriminator_is_rejected() {
        let registry = TypeRegistry::new();
        let factory = ObjectFactory::new(&registry);
        assert!(matches!(
            factory.resolve("com.example.Gone"),
            Err(ReconstructionError::UnknownDiscriminator(name)) if name == "com.example.Gone"
        ));
    }

    #[test]
    fn discriminator_must_be_text() {
        let registry = TypeRegistry::new();
        let factory = ObjectFactory::new(&registry);
        let document = doc! { crate::DISCRIMINATOR_KEY => 3 };
        assert!(matches!(
            factory.resolve_document(&document, None),
            Err(ReconstructionError::InvalidDiscriminator { found: "int" })
        ));
        assert!(matches!(
            factory.resolve_document(&doc! {}, None),
            Err(ReconstructionError::MissingDiscriminator)
        ));
    }

    #[test]
    fn fallback_must_agree() {
        let registry = TypeRegistry::new();
        let factory = ObjectFactory::new(&registry);
        let document = doc! { crate::DISCRIMINATOR_KEY => "i32" };
        let info = factory
            .resolve_document(&document, Some(<i32 as Typed>::type_info()))
            .unwrap();
        assert!(info.is::<i32>());
        assert!(matches!(
            factory.resolve_document(&document, Some(<String as Typed>::type_info())),
            Err(ReconstructionError::TypeMismatch { found: "i32", .. })
        ));
    }

    #[test]
    fn containers_need_no_registration() {
        let registry = TypeRegistry::empty();
        let factory = ObjectFactory::new(&registry);

        let field = CastedField::of::<Option<HashMap<String, i32>>>("counts");
        let map = factory.create_map(&field).unwrap();
        assert!(map.is::<HashMap<String, i32>>());

        let field = CastedField::of::<Vec<Value>>("rows");
        assert!(factory.create_field_collection(&field, 4).unwrap().is::<Vec<Value>>());
        assert!(factory.create_map(&field).is_err());

        assert!(matches!(
            factory.create_instance(<String as Typed>::type_info()),
            Err(ReconstructionError::NotConstructible { .. })
        ));
    }
}
