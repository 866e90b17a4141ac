use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;

use recast_document::Value;

use crate::Recast;
use crate::error::{DecodeError, ReconstructionError, Result};
use crate::info::{CastedField, IterableInfo};
use crate::ops::Iterable;
use crate::transform::context::{Context, PathSegment};
use crate::transform::dispatcher;

// The field declaring this collection, if any. An `Object` slot holding
// one doesn't count.
fn declaring<'f>(info: &IterableInfo, field: Option<&'f CastedField>) -> Option<&'f CastedField> {
    field.filter(|field| field.declares(info.ty().id()))
}

// Elements are described by a field named like the collection's own.
fn element_field(info: &IterableInfo, field: Option<&CastedField>) -> CastedField {
    declaring(info, field)
        .and_then(CastedField::element)
        .unwrap_or_else(|| CastedField::new(field.map_or("", CastedField::name), info.item_fn()))
}

/// Stores every element in order as an array.
pub(super) fn encode(
    cx: &mut Context<'_>,
    value: &dyn Iterable,
    field: Option<&CastedField>,
) -> Result<Value> {
    let Some(info) = value.recast_type_info().as_iterable() else {
        return Ok(Value::Null);
    };
    let element = element_field(info, field);
    cx.guard(value, |cx| {
        let mut items = Vec::with_capacity(value.len());
        for (index, item) in value.iter().enumerate() {
            items.push(cx.nest(PathSegment::Index(index), |cx| {
                dispatcher::encode_value(cx, item, Some(&element))
            })?);
        }
        Ok(Value::Array(items))
    })
}

/// Rebuilds the collection element by element.
///
/// A null element is an error unless the item type is an `Option`. An
/// element that is present but decodes to nothing is dropped.
pub(super) fn decode(
    cx: &mut Context<'_>,
    info: &'static IterableInfo,
    value: &Value,
    field: Option<&CastedField>,
) -> Result<Option<Box<dyn Recast>>> {
    let items: Cow<'_, [Value]> = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => Cow::Borrowed(items),
        Value::Packed(array) => Cow::Owned(array.to_values()),
        other => {
            return Err(DecodeError::Incompatible {
                target: info.ty().path(),
                found: other.kind_name(),
            }
            .into());
        }
    };

    let element = element_field(info, field);
    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        cx.nest(PathSegment::Index(index), |cx| {
            match dispatcher::decode_value(cx, element.type_info(), item, Some(&element))? {
                Some(value) => decoded.push(value),
                None if item.is_null() => {
                    return Err(DecodeError::NullElement {
                        target: info.item().type_path(),
                    }
                    .into());
                }
                None => log::debug!("dropping {} element that decoded to nothing", item.kind_name()),
            }
            Ok(())
        })?;
    }

    let factory = cx.recaster.factory();
    let mut collection = match declaring(info, field) {
        Some(field) => factory.create_field_collection(field, decoded.len())?,
        None => factory.create_collection(info, decoded.len()),
    };
    let Some(target) = collection.recast_mut().as_iterable() else {
        return Err(ReconstructionError::NotConstructible {
            type_path: info.ty().path(),
        }
        .into());
    };
    target.extend_boxed(decoded).map_err(|found| DecodeError::TypeMismatch {
        target: info.item().type_path(),
        found: found.type_path(),
    })?;
    Ok(Some(collection))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use recast_document::Date;

    use super::element_field;
    use crate::Object;
    use crate::info::{CastedField, Typed};

    #[test]
    fn elements_come_from_the_declaring_field() {
        let info = <Vec<Date> as Typed>::type_info().as_iterable().unwrap();

        let field = CastedField::of::<Option<Vec<Date>>>("stamps");
        let element = element_field(info, Some(&field));
        assert_eq!(element.name(), "stamps");
        assert!(element.type_info().is::<Date>());

        let slot = CastedField::of::<Object>("any");
        let element = element_field(info, Some(&slot));
        assert_eq!(element.name(), "any");
        assert!(element.type_info().is::<Date>());

        assert!(element_field(info, None).type_info().is::<Date>());
    }
}
