use alloc::string::String;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use recast_document::{Date, Document, Value};

use crate::Recast;
use crate::impls::impl_recast_cast_fn;
use crate::info::{LeafInfo, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::registry::{GetTypeMeta, TypeMeta};

macro_rules! impl_recast_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Leaf(LeafInfo::new::<Self>()))
            }
        }

        impl Recast for $ty {
            impl_recast_cast_fn!(Leaf);
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::with_default::<Self>()
            }
        }
    )*};
}

impl_recast_leaf!(bool, u8, i16, char, i32, i64, f32, f64, String);
impl_recast_leaf!(Date, DateTime<Utc>, NaiveDateTime, NaiveTime);
impl_recast_leaf!(Value, Document);
