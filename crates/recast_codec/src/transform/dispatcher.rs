use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use recast_document::{Document, PrimitiveArray, Value};

use crate::error::{DecodeError, EncodeError, ReconstructionError, Result};
use crate::info::{CastedField, TypeInfo};
use crate::ops::{RecastRef, Struct};
use crate::transform::context::{Context, Direction, PathSegment};
use crate::transform::{StructuralTransformer, map};
use crate::{DISCRIMINATOR_KEY, ENCODED_VALUE_KEY, Object, Recast, Recaster};

// -----------------------------------------------------------------------------
// Dispatcher

/// Picks the transformer for a single value.
///
/// The order is fixed: a leaf transformer registered for the exact type,
/// then the first structural transformer that supports the value, then
/// nested documents for structs and variant names for enums. `Option`
/// layers and [`Object`] slots are unwrapped first.
///
/// ```
/// use recast_codec::{Recaster, Value};
///
/// let recaster = Recaster::new();
/// let dispatcher = recaster.dispatcher();
/// assert_eq!(dispatcher.encode(&vec![1_i64, 2], None).unwrap(), Value::from(vec![1_i64, 2]));
/// ```
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    recaster: &'a Recaster,
}

impl<'a> Dispatcher<'a> {
    #[inline]
    pub(crate) fn new(recaster: &'a Recaster) -> Self {
        Self { recaster }
    }

    pub fn encode(&self, value: &dyn Recast, field: Option<&CastedField>) -> Result<Value> {
        encode_value(&mut Context::new(self.recaster, Direction::Encode), value, field)
    }

    /// Decodes `value` as `target`. `Ok(None)` means "leave unset".
    pub fn decode(
        &self,
        target: &'static TypeInfo,
        value: &Value,
        field: Option<&CastedField>,
    ) -> Result<Option<Box<dyn Recast>>> {
        decode_value(&mut Context::new(self.recaster, Direction::Decode), target, value, field)
    }

    #[inline]
    pub fn has_leaf_transformer(&self, type_id: TypeId) -> bool {
        self.recaster.transformers().has_leaf_transformer(type_id)
    }
}

// -----------------------------------------------------------------------------
// Encode

pub(crate) fn encode_value(
    cx: &mut Context<'_>,
    value: &dyn Recast,
    field: Option<&CastedField>,
) -> Result<Value> {
    if let Some(leaf) = cx.recaster.transformers().leaf(value.ty_id()) {
        return Ok(leaf.encode(value)?);
    }
    let info = value.recast_type_info();
    match value.recast_ref() {
        RecastRef::Optional(optional) => {
            return match optional.get() {
                Some(inner) => encode_value(cx, inner, field),
                None => Ok(Value::Null),
            };
        }
        RecastRef::Object(object) => return encode_value(cx, object.get(), None),
        _ => {}
    }
    if let Some(structural) = StructuralTransformer::select(info, field) {
        return structural.encode(cx, value, field);
    }
    match value.recast_ref() {
        RecastRef::Struct(value) => encode_struct(cx, value).map(Value::Document),
        RecastRef::Enum(value) => Ok(Value::from(value.variant_name())),
        _ => Err(EncodeError::Unsupported {
            type_path: info.type_path(),
        }
        .into()),
    }
}

/// A struct as a document: discriminator first, then fields in declaration
/// order. Fields that encode to null are left out unless nulls are stored.
pub(crate) fn encode_struct(cx: &mut Context<'_>, value: &dyn Struct) -> Result<Document> {
    let Some(info) = value.recast_type_info().as_struct() else {
        return Err(EncodeError::Unsupported {
            type_path: value.recast_type_info().type_path(),
        }
        .into());
    };
    let store_nulls = cx.recaster.options().store_nulls();
    cx.guard(value, |cx| {
        let mut document = Document::with_capacity(info.field_len() + 1);
        document.insert(DISCRIMINATOR_KEY, info.discriminator());
        for (index, field) in info.fields().iter().enumerate() {
            let Some(item) = value.field_at(index) else {
                continue;
            };
            let encoded = cx.nest(PathSegment::Field(field.name()), |cx| {
                encode_value(cx, item, Some(field))
            })?;
            if encoded.is_null() && !store_nulls {
                continue;
            }
            document.insert(field.name(), encoded);
        }
        Ok(document)
    })
}

// -----------------------------------------------------------------------------
// Decode

pub(crate) fn decode_value(
    cx: &mut Context<'_>,
    target: &'static TypeInfo,
    value: &Value,
    field: Option<&CastedField>,
) -> Result<Option<Box<dyn Recast>>> {
    if let Some(leaf) = cx.recaster.transformers().leaf(target.type_id()) {
        return Ok(leaf.decode(target, value)?);
    }
    match target {
        TypeInfo::Optional(info) => {
            return match decode_value(cx, info.inner(), value, field)? {
                Some(inner) => info.wrap(inner).map(Some).map_err(|found| {
                    DecodeError::TypeMismatch {
                        target: info.ty().path(),
                        found: found.type_path(),
                    }
                    .into()
                }),
                None => Ok(Some(info.none())),
            };
        }
        TypeInfo::Object(_) => {
            let object = decode_natural(cx, value)?;
            return Ok(Some(Box::new(object)));
        }
        _ => {}
    }
    if let Some(structural) = StructuralTransformer::select(target, field) {
        return structural.decode(cx, target, value, field);
    }
    match (target, value) {
        (_, Value::Null) => Ok(None),
        (TypeInfo::Struct(_), Value::Document(document)) => {
            decode_document(cx, document, Some(target)).map(Some)
        }
        (TypeInfo::Enum(info), Value::String(name)) => match info.from_name(name) {
            Some(variant) => Ok(Some(variant)),
            None => Err(DecodeError::UnknownVariant {
                target: info.ty().path(),
                variant: name.clone(),
            }
            .into()),
        },
        _ => Err(DecodeError::Incompatible {
            target: target.type_path(),
            found: value.kind_name(),
        }
        .into()),
    }
}

/// Decodes a value with no declared type into its natural Rust form.
///
/// | Stored              | Decoded                                  |
/// |---------------------|------------------------------------------|
/// | scalar              | the matching leaf type                   |
/// | packed array        | `Box<[u8]>`, `Box<[i32]>`, ...            |
/// | array               | `Vec<Object>`                            |
/// | discriminated document | the type the discriminator names      |
/// | other document      | [`Document`]                             |
pub(crate) fn decode_natural(cx: &mut Context<'_>, value: &Value) -> Result<Object> {
    Ok(match value {
        Value::Null => Object::null(),
        Value::Bool(v) => Object::new(*v),
        Value::Byte(v) => Object::new(*v),
        Value::Char(v) => Object::new(*v),
        Value::Int(v) => Object::new(*v),
        Value::Long(v) => Object::new(*v),
        Value::Double(v) => Object::new(*v),
        Value::String(v) => Object::new(v.clone()),
        Value::Date(v) => Object::new(*v),
        Value::Instant(v) => Object::new(*v),
        Value::LocalDateTime(v) => Object::new(*v),
        Value::LocalTime(v) => Object::new(*v),
        Value::Packed(array) => match array {
            PrimitiveArray::Bytes(v) => Object::new(v.clone()),
            PrimitiveArray::Ints(v) => Object::new(v.clone()),
            PrimitiveArray::Longs(v) => Object::new(v.clone()),
            PrimitiveArray::Doubles(v) => Object::new(v.clone()),
        },
        Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                list.push(cx.nest(PathSegment::Index(index), |cx| decode_natural(cx, item))?);
            }
            Object::new(list)
        }
        Value::Document(document) if document.contains_key(DISCRIMINATOR_KEY) => {
            Object::from_boxed(decode_document(cx, document, None)?)
        }
        Value::Document(document) => Object::new(document.clone()),
    })
}

/// Rebuilds the typed value a document stands for.
///
/// The type comes from the discriminator, or from `fallback` when there is
/// none. Structs are filled field by field; any other type is read from the
/// encoded-value key, and maps without one from the document's entries.
pub(crate) fn decode_document(
    cx: &mut Context<'_>,
    document: &Document,
    fallback: Option<&'static TypeInfo>,
) -> Result<Box<dyn Recast>> {
    let factory = cx.recaster.factory();
    let info = factory.resolve_document(document, fallback)?;

    if let TypeInfo::Struct(_) = info {
        let mut instance = factory.create_instance(info)?;
        let Some(target) = instance.recast_mut().as_struct() else {
            return Err(ReconstructionError::NotConstructible {
                type_path: info.type_path(),
            }
            .into());
        };
        merge_struct(cx, document, target)?;
        return Ok(instance);
    }

    match document.get(ENCODED_VALUE_KEY) {
        Some(encoded) => match decode_value(cx, info, encoded, None)? {
            Some(decoded) => Ok(decoded),
            None => Ok(factory.create_instance(info)?),
        },
        None => match info {
            TypeInfo::Map(_) => map::decode_entries(cx, info, document, None),
            _ if info.is::<Document>() => Ok(Box::new(document.clone())),
            _ if info.is::<Value>() => Ok(Box::new(Value::Document(document.clone()))),
            _ => Err(DecodeError::Incompatible {
                target: info.type_path(),
                found: "document",
            }
            .into()),
        },
    }
}

/// Decodes the fields of `document` into `target`.
///
/// Unknown keys are ignored. Fields missing from the document, or stored
/// as something that decodes to nothing, keep their current value.
pub(crate) fn merge_struct(cx: &mut Context<'_>, document: &Document, target: &mut dyn Struct) -> Result<()> {
    let Some(info) = target.recast_type_info().as_struct() else {
        return Err(ReconstructionError::NotMergeable {
            type_path: target.recast_type_info().type_path(),
        }
        .into());
    };
    for (key, value) in document {
        if key == DISCRIMINATOR_KEY {
            continue;
        }
        let Some((index, field)) = info.field(key) else {
            log::debug!("ignoring unknown field `{key}` of {}", info.ty().path());
            continue;
        };
        cx.nest(PathSegment::Field(field.name()), |cx| {
            let Some(decoded) = decode_value(cx, field.type_info(), value, Some(field))? else {
                return Ok(());
            };
            target.set_field_at(index, decoded).map_err(|found| {
                DecodeError::TypeMismatch {
                    target: field.type_info().type_path(),
                    found: found.type_path(),
                }
                .into()
            })
        })?;
    }
    Ok(())
}
