use alloc::boxed::Box;

use recast_document::Value;

use crate::Recast;
use crate::error::{DecodeError, EncodeError, Result};
use crate::info::{CastedField, TypeInfo};
use crate::transform::context::Context;
use crate::transform::{iterable, map, message};

/// Transformers for values that contain other values.
///
/// They are tried in [`ORDER`](Self::ORDER) and the first one that supports
/// a type handles it. Leaf transformers are always consulted first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuralTransformer {
    Map,
    Iterable,
    Message,
}

impl StructuralTransformer {
    pub const ORDER: [Self; 3] = [Self::Map, Self::Iterable, Self::Message];

    /// Whether this transformer handles `info`.
    ///
    /// Field metadata, when present, decides for maps and iterables. Values
    /// without a field are judged by their own type.
    pub fn is_supported(self, info: &'static TypeInfo, field: Option<&CastedField>) -> bool {
        match (self, field) {
            (Self::Map, Some(field)) => field.is_map(),
            (Self::Iterable, Some(field)) => field.is_multi_valued() && !field.is_map(),
            (Self::Map, None) => matches!(info.declared(), TypeInfo::Map(_)),
            (Self::Iterable, None) => matches!(info.declared(), TypeInfo::Iterable(_)),
            (Self::Message, _) => matches!(info.declared(), TypeInfo::Message(_)),
        }
    }

    /// First transformer in [`ORDER`](Self::ORDER) that supports `info`.
    pub fn select(info: &'static TypeInfo, field: Option<&CastedField>) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|transformer| transformer.is_supported(info, field))
    }

    pub(crate) fn encode(
        self,
        cx: &mut Context<'_>,
        value: &dyn Recast,
        field: Option<&CastedField>,
    ) -> Result<Value> {
        let unsupported = || EncodeError::Unsupported {
            type_path: value.type_path(),
        };
        match self {
            Self::Map => map::encode(cx, value.recast_ref().as_map().ok_or_else(unsupported)?, field),
            Self::Iterable => iterable::encode(
                cx,
                value.recast_ref().as_iterable().ok_or_else(unsupported)?,
                field,
            ),
            Self::Message => message::encode(value),
        }
    }

    pub(crate) fn decode(
        self,
        cx: &mut Context<'_>,
        target: &'static TypeInfo,
        value: &Value,
        field: Option<&CastedField>,
    ) -> Result<Option<Box<dyn Recast>>> {
        let target = target.declared();
        let incompatible = || DecodeError::Incompatible {
            target: target.type_path(),
            found: value.kind_name(),
        };
        match (self, target) {
            (Self::Map, TypeInfo::Map(_)) => map::decode(cx, target, value, field),
            (Self::Iterable, TypeInfo::Iterable(info)) => iterable::decode(cx, info, value, field),
            (Self::Message, TypeInfo::Message(info)) => message::decode(info, value),
            _ => Err(incompatible().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use protobuf::well_known_types::timestamp::Timestamp;

    use super::StructuralTransformer;
    use crate::info::{CastedField, Typed};

    #[test]
    fn selection_follows_field_metadata() {
        let map = <HashMap<String, i32> as Typed>::type_info();
        let list = <Vec<i32> as Typed>::type_info();
        let optional_list = <Option<Vec<i32>> as Typed>::type_info();

        assert_eq!(StructuralTransformer::select(map, None), Some(StructuralTransformer::Map));
        assert_eq!(StructuralTransformer::select(list, None), Some(StructuralTransformer::Iterable));

        let field = CastedField::of::<Option<Vec<i32>>>("tags");
        assert_eq!(
            StructuralTransformer::select(optional_list, Some(&field)),
            Some(StructuralTransformer::Iterable)
        );

        let message = <Timestamp as Typed>::type_info();
        assert_eq!(
            StructuralTransformer::select(message, None),
            Some(StructuralTransformer::Message)
        );
        assert_eq!(StructuralTransformer::select(<i32 as Typed>::type_info(), None), None);
    }
}
