use alloc::boxed::Box;
use alloc::string::{String, ToString};

use protobuf::MessageFull;
use protobuf::well_known_types::{duration, empty, field_mask, source_context, timestamp, wrappers};
use protobuf_json_mapping::ParseOptions;

use crate::Recast;
use crate::info::Typed;

/// Builds a fresh `M` from its canonical JSON form.
///
/// Fields the message doesn't know are ignored, so documents written by a
/// newer schema still decode.
pub fn parse_message<M: MessageFull + Typed>(json: &str) -> Result<Box<dyn Recast>, String> {
    let options = ParseOptions {
        ignore_unknown_fields: true,
        ..Default::default()
    };
    let mut message = M::new();
    protobuf_json_mapping::merge_from_str_with_options(&mut message, json, &options)
        .map_err(|e| e.to_string())?;
    Ok(Box::new(message))
}

/// Makes generated protobuf message types recastable.
///
/// Messages are stored as their canonical JSON string. Decoding merges
/// that string into a fresh instance and ignores unknown fields.
///
/// ```ignore
/// mod proto {
///     include!(concat!(env!("OUT_DIR"), "/protos/mod.rs"));
/// }
///
/// recast_codec::impl_recast_message!(proto::user::User, proto::user::Address);
/// ```
#[macro_export]
macro_rules! impl_recast_message {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Message($crate::info::MessageInfo::new::<Self>(
                        $crate::__macro_exports::parse_message::<Self>,
                    ))
                })
            }
        }

        impl $crate::Recast for $ty {
            #[inline]
            fn recast_type_info(&self) -> &'static $crate::info::TypeInfo {
                <Self as $crate::info::Typed>::type_info()
            }

            #[inline]
            fn recast_ref(&self) -> $crate::ops::RecastRef<'_> {
                $crate::ops::RecastRef::Message(self)
            }

            #[inline]
            fn recast_mut(&mut self) -> $crate::ops::RecastMut<'_> {
                $crate::ops::RecastMut::Message(self)
            }

            fn set(
                &mut self,
                value: $crate::__macro_exports::Box<dyn $crate::Recast>,
            ) -> ::core::result::Result<(), $crate::__macro_exports::Box<dyn $crate::Recast>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }
        }

        impl $crate::registry::GetTypeMeta for $ty {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                $crate::registry::TypeMeta::with_default::<Self>()
            }
        }
    )*};
}

crate::impl_recast_message!(
    timestamp::Timestamp,
    duration::Duration,
    empty::Empty,
    field_mask::FieldMask,
    source_context::SourceContext,
    wrappers::BoolValue,
    wrappers::BytesValue,
    wrappers::DoubleValue,
    wrappers::Int32Value,
    wrappers::Int64Value,
    wrappers::StringValue,
);

#[cfg(test)]
mod tests {
    use protobuf::well_known_types::source_context::SourceContext;

    use super::parse_message;

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed = parse_message::<SourceContext>(r#"{"fileName": "a.proto", "extra": 1}"#).unwrap();
        let context = parsed.downcast_ref::<SourceContext>().unwrap();
        assert_eq!(context.file_name, "a.proto");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_message::<SourceContext>("{").is_err());
    }
}
