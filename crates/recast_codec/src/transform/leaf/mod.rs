//! Transformers for single values, selected by the exact Rust type.

// -----------------------------------------------------------------------------
// Modules

mod character;
mod number;
mod temporal;
mod text;

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use recast_document::Value;

use crate::Recast;
use crate::error::{DecodeError, EncodeError};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// CustomTransformer

/// A user-supplied leaf transformer.
///
/// Registered per type with
/// [`RecasterBuilder::with_transformer`](crate::RecasterBuilder::with_transformer),
/// it takes precedence over any structural handling of that type.
///
/// ```
/// use recast_codec::error::{DecodeError, EncodeError};
/// use recast_codec::info::TypeInfo;
/// use recast_codec::transform::CustomTransformer;
/// use recast_codec::{Recast, Value};
///
/// /// Stores a `u8` as its hexadecimal text.
/// struct Hex;
///
/// impl CustomTransformer for Hex {
///     fn encode(&self, value: &dyn Recast) -> Result<Value, EncodeError> {
///         let byte = value.downcast_ref::<u8>().ok_or(EncodeError::Unsupported {
///             type_path: value.type_path(),
///         })?;
///         Ok(Value::String(format!("{byte:02x}")))
///     }
///
///     fn decode(
///         &self,
///         _target: &'static TypeInfo,
///         value: &Value,
///     ) -> Result<Option<Box<dyn Recast>>, DecodeError> {
///         let text = value.as_str().unwrap_or_default();
///         u8::from_str_radix(text, 16)
///             .map(|byte| Some(Box::new(byte) as Box<dyn Recast>))
///             .map_err(|_| DecodeError::Parse { target: "hex byte", text: text.into() })
///     }
/// }
/// ```
pub trait CustomTransformer: Send + Sync + 'static {
    fn encode(&self, value: &dyn Recast) -> Result<Value, EncodeError>;

    /// `Ok(None)` leaves the target unset.
    fn decode(
        &self,
        target: &'static TypeInfo,
        value: &Value,
    ) -> Result<Option<Box<dyn Recast>>, DecodeError>;
}

// -----------------------------------------------------------------------------
// LeafTransformer

/// Converts one leaf type to and from its stored form.
///
/// Numeric, character and wrapper transformers also handle the array forms
/// of their type: `Box<[T]>` is stored packed where a packed form exists,
/// `Box<[Option<T>]>` is packed when it has no gaps and stored element by
/// element otherwise.
///
/// | Transformer     | Types                                   | Stored as        |
/// |-----------------|-----------------------------------------|------------------|
/// | `Boolean`       | `bool`                                  | `Bool`           |
/// | `Byte`          | `u8`                                    | `Byte`, `Bytes`  |
/// | `Short`         | `i16`                                   | `Int`            |
/// | `Character`     | `char`, `Box<[Option<char>]>`           | `Char`, null     |
/// | `CharArray`     | `Box<[char]>`                           | `String`         |
/// | `Integer`       | `i32`                                   | `Int`, `Ints`    |
/// | `Long`          | `i64`                                   | `Long`, `Longs`  |
/// | `Float`         | `f32`                                   | `Double`         |
/// | `Double`        | `f64`                                   | `Double`, `Doubles` |
/// | `String`        | `String`                                | `String`         |
/// | `Date`          | [`Date`](recast_document::Date)         | `Date`           |
/// | `Instant`       | `DateTime<Utc>`                         | `Instant`        |
/// | `LocalDateTime` | `NaiveDateTime`                         | `LocalDateTime`  |
/// | `LocalTime`     | `NaiveTime`                             | `LocalTime`      |
/// | `Value`         | [`Value`]                               | itself           |
/// | `Document`      | [`Document`](recast_document::Document) | `Document`       |
#[derive(Clone)]
#[non_exhaustive]
pub enum LeafTransformer {
    Boolean,
    Byte,
    Short,
    Character,
    CharArray,
    Integer,
    Long,
    Float,
    Double,
    String,
    Date,
    Instant,
    LocalDateTime,
    LocalTime,
    Value,
    Document,
    Custom(Arc<dyn CustomTransformer>),
}

impl LeafTransformer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Character => "Character",
            Self::CharArray => "CharArray",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::Date => "Date",
            Self::Instant => "Instant",
            Self::LocalDateTime => "LocalDateTime",
            Self::LocalTime => "LocalTime",
            Self::Value => "Value",
            Self::Document => "Document",
            Self::Custom(_) => "Custom",
        }
    }

    pub fn encode(&self, value: &dyn Recast) -> Result<Value, EncodeError> {
        let encoded = match self {
            Self::Boolean => text::encode_bool(value),
            Self::Byte => number::encode::<u8>(value),
            Self::Short => number::encode::<i16>(value),
            Self::Character => character::encode_char(value),
            Self::CharArray => character::encode_char_array(value),
            Self::Integer => number::encode::<i32>(value),
            Self::Long => number::encode::<i64>(value),
            Self::Float => number::encode::<f32>(value),
            Self::Double => number::encode::<f64>(value),
            Self::String => text::encode_string(value),
            Self::Date => temporal::encode_date(value),
            Self::Instant => temporal::encode_instant(value),
            Self::LocalDateTime => temporal::encode_local_date_time(value),
            Self::LocalTime => temporal::encode_local_time(value),
            Self::Value => text::encode_raw(value),
            Self::Document => text::encode_document(value),
            Self::Custom(custom) => return custom.encode(value),
        };
        encoded.ok_or(EncodeError::Unsupported {
            type_path: value.type_path(),
        })
    }

    /// Decodes `value` into `target`.
    ///
    /// `Ok(None)` means "leave unset": the value was null, or a lenient
    /// transformer gave up on it.
    pub fn decode(
        &self,
        target: &'static TypeInfo,
        value: &Value,
    ) -> Result<Option<Box<dyn Recast>>, DecodeError> {
        match self {
            Self::Boolean => text::decode_bool(value),
            Self::Byte => number::decode::<u8>(target, value),
            Self::Short => number::decode::<i16>(target, value),
            Self::Character => character::decode_char(target, value),
            Self::CharArray => character::decode_char_array(target, value),
            Self::Integer => number::decode::<i32>(target, value),
            Self::Long => number::decode::<i64>(target, value),
            Self::Float => number::decode::<f32>(target, value),
            Self::Double => number::decode::<f64>(target, value),
            Self::String => text::decode_string(value),
            Self::Date => temporal::decode_date(value),
            Self::Instant => temporal::decode_instant(value),
            Self::LocalDateTime => temporal::decode_local_date_time(value),
            Self::LocalTime => temporal::decode_local_time(value),
            Self::Value => text::decode_raw(value),
            Self::Document => text::decode_document(value),
            Self::Custom(custom) => custom.decode(target, value),
        }
    }
}

impl fmt::Debug for LeafTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elements of a stored sequence, unpacked if needed.
fn elements<'v>(target: &'static TypeInfo, value: &'v Value) -> Result<Cow<'v, [Value]>, DecodeError> {
    match value {
        Value::Array(items) => Ok(Cow::Borrowed(items)),
        Value::Packed(array) => Ok(Cow::Owned(array.to_values())),
        other => Err(DecodeError::Incompatible {
            target: target.type_path(),
            found: other.kind_name(),
        }),
    }
}
