use alloc::boxed::Box;
use alloc::string::{String, ToString};

use recast_document::{Document, Value};

use crate::Recast;
use crate::error::DecodeError;

// -----------------------------------------------------------------------------
// Boolean

pub(super) fn encode_bool(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<bool>().map(|v| Value::Bool(*v))
}

/// Numbers are true when nonzero, text when it reads `true` in any case.
pub(super) fn decode_bool(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    let decoded = match value {
        Value::Null => return Ok(None),
        Value::Bool(v) => *v,
        Value::Double(v) => *v != 0.0,
        number if number.is_number() => number.as_i64() != Some(0),
        Value::Array(_) | Value::Packed(_) | Value::Document(_) => {
            return Err(DecodeError::Incompatible {
                target: "bool",
                found: value.kind_name(),
            });
        }
        other => other.to_string().trim().eq_ignore_ascii_case("true"),
    };
    Ok(Some(Box::new(decoded)))
}

// -----------------------------------------------------------------------------
// String

pub(super) fn encode_string(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<String>().map(|v| Value::String(v.clone()))
}

/// Any scalar decodes into its textual form.
pub(super) fn decode_string(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    let decoded = match value {
        Value::Null => return Ok(None),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Packed(_) | Value::Document(_) => {
            return Err(DecodeError::Incompatible {
                target: "string",
                found: value.kind_name(),
            });
        }
        other => other.to_string(),
    };
    Ok(Some(Box::new(decoded)))
}

// -----------------------------------------------------------------------------
// Raw values

pub(super) fn encode_raw(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<Value>().cloned()
}

/// A `Value` target takes the stored value as-is, null included.
pub(super) fn decode_raw(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    Ok(Some(Box::new(value.clone())))
}

pub(super) fn encode_document(value: &dyn Recast) -> Option<Value> {
    value
        .downcast_ref::<Document>()
        .map(|document| Value::Document(document.clone()))
}

pub(super) fn decode_document(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    match value {
        Value::Null => Ok(None),
        Value::Document(document) => Ok(Some(Box::new(document.clone()))),
        other => Err(DecodeError::Incompatible {
            target: "document",
            found: other.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use recast_document::Value;

    use super::{decode_bool, decode_raw, decode_string};

    fn as_bool(value: Value) -> Option<bool> {
        decode_bool(&value)
            .unwrap()
            .and_then(|v| v.downcast_ref::<bool>().copied())
    }

    #[test]
    fn bool_coercion() {
        assert_eq!(as_bool(Value::Bool(true)), Some(true));
        assert_eq!(as_bool(Value::Int(0)), Some(false));
        assert_eq!(as_bool(Value::Long(-3)), Some(true));
        assert_eq!(as_bool(Value::from("TRUE")), Some(true));
        assert_eq!(as_bool(Value::from("yes")), Some(false));
        assert_eq!(as_bool(Value::Null), None);
    }

    #[test]
    fn scalars_decode_as_text() {
        let decoded = decode_string(&Value::Long(12)).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<String>().map(String::as_str), Some("12"));
        assert!(decode_string(&Value::Array(vec![])).is_err());
    }

    #[test]
    fn raw_value_keeps_null() {
        let decoded = decode_raw(&Value::Null).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<Value>(), Some(&Value::Null));
    }
}
