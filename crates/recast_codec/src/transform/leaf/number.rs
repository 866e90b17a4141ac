use alloc::boxed::Box;
use alloc::string::ToString;
use core::str::FromStr;

use recast_document::{PrimitiveArray, Value};

use crate::Recast;
use crate::error::DecodeError;
use crate::info::{TypeInfo, Typed};
use crate::transform::leaf::elements;

/// A numeric leaf type and its storage form.
///
/// `i16` and `f32` have no storage variant of their own and are widened to
/// `Int` and `Double`.
pub(super) trait Number: Typed + Copy + FromStr {
    const NAME: &'static str;

    /// Numeric value of any width, narrowed with `as`.
    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;

    /// Storage form of a whole array, packed when a packed form exists.
    fn pack(values: Box<[Self]>) -> Value;

    /// Elements of a packed array of exactly this type.
    fn unpack(array: &PrimitiveArray) -> Option<&[Self]>;
}

macro_rules! impl_number {
    (@pack $values:ident $packed:ident) => {
        Value::Packed(PrimitiveArray::$packed($values))
    };
    (@pack $values:ident) => {
        Value::Array($values.iter().map(|value| value.into_value()).collect())
    };
    (@unpack $array:ident $packed:ident) => {
        match $array {
            PrimitiveArray::$packed(values) => Some(values),
            _ => None,
        }
    };
    (@unpack $array:ident) => {{
        let _ = $array;
        None
    }};
    ($($ty:ty => $name:literal, $scalar:ident($wide:ty) $(, $packed:ident)?;)*) => {$(
        impl Number for $ty {
            const NAME: &'static str = $name;

            fn from_value(value: &Value) -> Option<Self> {
                match *value {
                    Value::Byte(v) => Some(v as Self),
                    Value::Int(v) => Some(v as Self),
                    Value::Long(v) => Some(v as Self),
                    Value::Double(v) => Some(v as Self),
                    _ => None,
                }
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$scalar(<$wide>::from(self))
            }

            fn pack(values: Box<[Self]>) -> Value {
                impl_number!(@pack values $($packed)?)
            }

            fn unpack(array: &PrimitiveArray) -> Option<&[Self]> {
                impl_number!(@unpack array $($packed)?)
            }
        }
    )*};
}

impl_number! {
    u8 => "byte", Byte(u8), Bytes;
    i16 => "short", Int(i32);
    i32 => "int", Int(i32), Ints;
    i64 => "long", Long(i64), Longs;
    f32 => "float", Double(f64);
    f64 => "double", Double(f64), Doubles;
}

/// Reads a `T` out of any scalar, parsing text as a last resort.
pub(super) fn coerce<T: Number>(value: &Value) -> Result<Option<T>, DecodeError> {
    if value.is_null() {
        return Ok(None);
    }
    if let Some(number) = T::from_value(value) {
        return Ok(Some(number));
    }
    let text = match value {
        Value::Packed(_) | Value::Array(_) | Value::Document(_) => {
            return Err(DecodeError::Incompatible {
                target: T::NAME,
                found: value.kind_name(),
            });
        }
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    match text.trim().parse::<T>() {
        Ok(number) => Ok(Some(number)),
        Err(_) => Err(DecodeError::Parse {
            target: T::NAME,
            text,
        }),
    }
}

/// Encodes `T`, `Box<[T]>` or `Box<[Option<T>]>`.
///
/// A wrapper array without gaps is packed like a primitive one.
pub(super) fn encode<T: Number>(value: &dyn Recast) -> Option<Value> {
    if let Some(number) = value.downcast_ref::<T>() {
        return Some(number.into_value());
    }
    if let Some(values) = value.downcast_ref::<Box<[T]>>() {
        return Some(T::pack(values.clone()));
    }
    let values = value.downcast_ref::<Box<[Option<T>]>>()?;
    if values.iter().all(Option::is_some) {
        Some(T::pack(values.iter().flatten().copied().collect()))
    } else {
        Some(Value::Array(
            values
                .iter()
                .map(|value| value.map_or(Value::Null, T::into_value))
                .collect(),
        ))
    }
}

pub(super) fn decode<T: Number>(
    target: &'static TypeInfo,
    value: &Value,
) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    if target.is::<T>() {
        return Ok(coerce::<T>(value)?.map(|number| Box::new(number) as Box<dyn Recast>));
    }
    if value.is_null() {
        return Ok(None);
    }
    if target.is::<Box<[T]>>() {
        if let Value::Packed(array) = value
            && let Some(values) = T::unpack(array)
        {
            return Ok(Some(Box::new(Box::<[T]>::from(values))));
        }
        let values = elements(target, value)?
            .iter()
            .map(|item| coerce::<T>(item)?.ok_or(DecodeError::NullElement { target: T::NAME }))
            .collect::<Result<Box<[T]>, _>>()?;
        return Ok(Some(Box::new(values)));
    }
    if target.is::<Box<[Option<T>]>>() {
        let values = elements(target, value)?
            .iter()
            .map(coerce::<T>)
            .collect::<Result<Box<[Option<T>]>, _>>()?;
        return Ok(Some(Box::new(values)));
    }
    Err(DecodeError::Incompatible {
        target: target.type_path(),
        found: value.kind_name(),
    })
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use recast_document::{PrimitiveArray, Value};

    use super::{coerce, decode, encode};
    use crate::error::DecodeError;
    use crate::info::Typed;

    #[test]
    fn coerce_narrows_and_parses() {
        assert_eq!(coerce::<i32>(&Value::Long(7)).unwrap(), Some(7));
        assert_eq!(coerce::<i64>(&Value::from(" 42 ")).unwrap(), Some(42));
        assert_eq!(coerce::<f64>(&Value::Int(2)).unwrap(), Some(2.0));
        assert_eq!(coerce::<u8>(&Value::Null).unwrap(), None);
        assert!(matches!(
            coerce::<i32>(&Value::from("seven")),
            Err(DecodeError::Parse { target: "int", .. })
        ));
        assert!(matches!(
            coerce::<i32>(&Value::Array(vec![])),
            Err(DecodeError::Incompatible { .. })
        ));
    }

    #[test]
    fn narrow_types_are_widened() {
        assert_eq!(encode::<i16>(&3_i16), Some(Value::Int(3)));
        assert_eq!(encode::<f32>(&0.5_f32), Some(Value::Double(0.5)));
    }

    #[test]
    fn wrapper_arrays_pack_without_gaps() {
        let full: Box<[Option<u8>]> = Box::new([Some(1), Some(2)]);
        assert_eq!(
            encode::<u8>(&full),
            Some(Value::Packed(PrimitiveArray::from(vec![1_u8, 2])))
        );

        let gap: Box<[Option<u8>]> = Box::new([Some(1), None]);
        assert_eq!(
            encode::<u8>(&gap),
            Some(Value::Array(vec![Value::Byte(1), Value::Null]))
        );
    }

    #[test]
    fn arrays_decode_from_either_form() {
        let target = <Box<[i64]> as Typed>::type_info();
        let packed = Value::Packed(PrimitiveArray::from(vec![1_i64, 2]));
        let decoded = decode::<i64>(target, &packed).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<Box<[i64]>>().map(|v| &v[..]), Some(&[1, 2][..]));

        let loose = Value::Array(vec![Value::Int(3), Value::from("4")]);
        let decoded = decode::<i64>(target, &loose).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<Box<[i64]>>().map(|v| &v[..]), Some(&[3, 4][..]));
    }

    #[test]
    fn null_in_primitive_array_is_rejected() {
        let target = <Box<[i32]> as Typed>::type_info();
        let value = Value::Array(vec![Value::Int(1), Value::Null]);
        assert!(matches!(
            decode::<i32>(target, &value),
            Err(DecodeError::NullElement { target: "int" })
        ));

        let target = <Box<[Option<i32>]> as Typed>::type_info();
        let decoded = decode::<i32>(target, &value).unwrap().unwrap();
        assert_eq!(
            decoded.downcast_ref::<Box<[Option<i32>]>>().map(|v| &v[..]),
            Some(&[Some(1), None][..])
        );
    }
}
