use alloc::boxed::Box;
use alloc::string::{String, ToString};

use recast_document::{Document, Value};

use crate::error::{DecodeError, EncodeError, ReconstructionError, Result};
use crate::info::{CastedField, MapInfo, TypeInfo};
use crate::ops::Map;
use crate::transform::context::{Context, PathSegment};
use crate::transform::dispatcher;
use crate::{DISCRIMINATOR_KEY, Recast};

// The field declaring this map, if any. An `Object` slot holding one
// doesn't count.
fn declaring<'f>(info: &MapInfo, field: Option<&'f CastedField>) -> Option<&'f CastedField> {
    field.filter(|field| field.declares(info.ty().id()))
}

// Keys and values are described by fields named like the map's own.
fn entry_fields(info: &MapInfo, field: Option<&CastedField>) -> (CastedField, CastedField) {
    match declaring(info, field).map(|field| (field.map_key(), field.element())) {
        Some((Some(key), Some(value))) => (key, value),
        _ => {
            let name = field.map_or("", CastedField::name);
            (
                CastedField::new(name, info.key_fn()),
                CastedField::new(name, info.value_fn()),
            )
        }
    }
}

/// Document field name of an encoded key.
fn key_name(key: Value) -> Result<String, EncodeError> {
    match key {
        Value::String(text) => Ok(text),
        Value::Null | Value::Array(_) | Value::Packed(_) | Value::Document(_) => {
            Err(EncodeError::InvalidMapKey {
                found: key.kind_name(),
            })
        }
        scalar => Ok(scalar.to_string()),
    }
}

/// Stores the map as a document keyed by the textual form of each key.
///
/// An empty map is null unless empties are stored.
pub(super) fn encode(
    cx: &mut Context<'_>,
    value: &dyn Map,
    field: Option<&CastedField>,
) -> Result<Value> {
    if value.is_empty() {
        return Ok(if cx.recaster.options().store_empties() {
            Value::Document(Document::new())
        } else {
            Value::Null
        });
    }
    let Some(info) = value.recast_type_info().as_map() else {
        return Ok(Value::Null);
    };
    let (key_field, value_field) = entry_fields(info, field);
    cx.guard(value, |cx| {
        let mut document = Document::with_capacity(value.len());
        for (key, item) in value.iter() {
            let key = key_name(dispatcher::encode_value(cx, key, Some(&key_field))?)?;
            let encoded = cx.nest(PathSegment::Key(key.clone()), |cx| {
                dispatcher::encode_value(cx, item, Some(&value_field))
            })?;
            document.insert(key, encoded);
        }
        Ok(Value::Document(document))
    })
}

pub(super) fn decode(
    cx: &mut Context<'_>,
    target: &'static TypeInfo,
    value: &Value,
    field: Option<&CastedField>,
) -> Result<Option<Box<dyn Recast>>> {
    match value {
        Value::Null => Ok(None),
        Value::Document(document) => decode_entries(cx, target, document, field).map(Some),
        other => Err(DecodeError::Incompatible {
            target: target.type_path(),
            found: other.kind_name(),
        }
        .into()),
    }
}

/// Rebuilds a map from the entries of `document`.
///
/// Keys are decoded from their textual form with the declared key type.
pub(crate) fn decode_entries(
    cx: &mut Context<'_>,
    target: &'static TypeInfo,
    document: &Document,
    field: Option<&CastedField>,
) -> Result<Box<dyn Recast>> {
    let not_constructible = || ReconstructionError::NotConstructible {
        type_path: target.type_path(),
    };
    let info = target.as_map().ok_or_else(not_constructible)?;
    let (key_field, value_field) = entry_fields(info, field);

    let factory = cx.recaster.factory();
    let mut map = match declaring(info, field) {
        Some(field) => factory.create_map(field)?,
        None => factory.create_instance(target)?,
    };
    let entries = map.recast_mut().as_map().ok_or_else(not_constructible)?;
    for (key, item) in document {
        if key == DISCRIMINATOR_KEY {
            log::debug!("skipping discriminator inside map document for {}", info.ty().path());
            continue;
        }
        cx.nest(PathSegment::Key(key.to_string()), |cx| {
            let stored_key = Value::String(key.to_string());
            let Some(decoded_key) = dispatcher::decode_value(cx, info.key(), &stored_key, Some(&key_field))? else {
                return Err(DecodeError::NullKey {
                    target: info.key().type_path(),
                }
                .into());
            };
            let decoded = match dispatcher::decode_value(cx, info.value(), item, Some(&value_field))? {
                Some(decoded) => decoded,
                None if item.is_null() => {
                    return Err(DecodeError::NullElement {
                        target: info.value().type_path(),
                    }
                    .into());
                }
                None => {
                    log::debug!("dropping entry whose {} value decoded to nothing", item.kind_name());
                    return Ok(());
                }
            };
            entries.insert_boxed(decoded_key, decoded).map_err(|(key, value)| {
                let found = if key.ty_id() == info.key().type_id() { value } else { key };
                DecodeError::TypeMismatch {
                    target: info.ty().path(),
                    found: found.type_path(),
                }
                .into()
            })
        })?;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use std::collections::HashMap;

    use recast_document::{Date, Document, PrimitiveArray, Value};

    use super::{entry_fields, key_name};
    use crate::Object;
    use crate::error::EncodeError;
    use crate::info::{CastedField, Typed};

    #[test]
    fn entries_come_from_the_declaring_field() {
        let info = <HashMap<i64, Date> as Typed>::type_info().as_map().unwrap();

        let field = CastedField::of::<Option<HashMap<i64, Date>>>("seen");
        let (key, value) = entry_fields(info, Some(&field));
        assert_eq!((key.name(), value.name()), ("seen", "seen"));
        assert!(key.type_info().is::<i64>());
        assert!(value.type_info().is::<Date>());

        let slot = CastedField::of::<Object>("any");
        let (key, value) = entry_fields(info, Some(&slot));
        assert_eq!(key.name(), "any");
        assert!(key.type_info().is::<i64>());
        assert!(value.type_info().is::<Date>());

        let other = CastedField::of::<HashMap<String, i32>>("other");
        assert!(entry_fields(info, Some(&other)).0.type_info().is::<i64>());
    }

    #[test]
    fn scalar_keys_use_their_text() {
        assert_eq!(key_name(Value::from("k")).unwrap(), "k");
        assert_eq!(key_name(Value::Long(-4)).unwrap(), "-4");
        assert_eq!(key_name(Value::Bool(true)).unwrap(), "true");
        assert_eq!(
            key_name(Value::Date(Date::from_millis(0))).unwrap(),
            "Thu Jan 01 00:00:00 UTC 1970"
        );
    }

    #[test]
    fn structured_keys_are_rejected() {
        for key in [
            Value::Null,
            Value::Array(vec![]),
            Value::Packed(PrimitiveArray::from(vec![1_u8])),
            Value::Document(Document::new()),
        ] {
            assert!(matches!(key_name(key), Err(EncodeError::InvalidMapKey { .. })));
        }
    }
}
