use crate::Recast;
use crate::info::{LeafInfo, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

pub use inventory;

/// Registration function submitted by `#[recast(auto_register)]`.
pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

inventory::collect!(__AutoRegisterFunc);

pub trait __RegisterType {
    fn __register(registry: &mut TypeRegistry);
}

impl<T: GetTypeMeta> __RegisterType for T {
    #[inline]
    fn __register(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

/// Registered through `inventory` when the platform supports it, so its
/// presence after [`__register_types`] tells whether collection worked.
#[derive(Default)]
pub struct __AvailFlag;

impl Typed for __AvailFlag {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Leaf(LeafInfo::new::<Self>()))
    }
}

impl Recast for __AvailFlag {
    crate::impls::impl_recast_cast_fn!(Leaf);
}

impl GetTypeMeta for __AvailFlag {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

inventory::submit! {
    __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
}

pub(crate) fn __register_types(registry: &mut TypeRegistry) {
    for func in inventory::iter::<__AutoRegisterFunc> {
        (func.0)(registry);
    }
}
