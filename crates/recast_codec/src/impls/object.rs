use alloc::boxed::Box;

use crate::info::{NonGenericTypeInfoCell, ObjectInfo, TypeInfo, Typed};
use crate::ops::{RecastMut, RecastRef};
use crate::registry::{GetTypeMeta, TypeMeta};
use crate::{Object, Recast};

impl Typed for Object {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Object(ObjectInfo::new::<Self>()))
    }
}

impl Recast for Object {
    #[inline]
    fn recast_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn recast_ref(&self) -> RecastRef<'_> {
        RecastRef::Object(self)
    }

    #[inline]
    fn recast_mut(&mut self) -> RecastMut<'_> {
        RecastMut::Object(self)
    }

    /// Any value fits an object slot.
    fn set(&mut self, value: Box<dyn Recast>) -> Result<(), Box<dyn Recast>> {
        *self = Object::from_boxed(value);
        Ok(())
    }
}

impl GetTypeMeta for Object {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_default::<Self>()
    }
}
