use crate::info::{GenericTypeInfoCell, OptionalInfo, TypeInfo, Typed};
use crate::ops::Optional;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
use crate::{Recast, impls};

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<T>()))
    }
}

impl<T: Typed> Recast for Option<T> {
    impls::impl_recast_cast_fn!(Optional);
}

impl<T: Typed> Optional for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Recast> {
        self.as_ref().map(|value| value as &dyn Recast)
    }
}

impl<T: GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_default::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}
