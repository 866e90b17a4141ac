use alloc::boxed::Box;
use alloc::string::ToString;

use recast_document::Value;

use crate::Recast;
use crate::error::DecodeError;
use crate::info::TypeInfo;
use crate::transform::leaf::elements;

const CHAR: &str = "char";
const CHAR_ARRAY: &str = "char array";

/// Reads one character.
///
/// Text must be at most one character long; the empty string is NUL.
/// Numbers are taken as code points.
fn coerce_char(value: &Value) -> Result<Option<char>, DecodeError> {
    let parse_error = || DecodeError::Parse {
        target: CHAR,
        text: value.to_string(),
    };
    match value {
        Value::Null => Ok(None),
        Value::Char(c) => Ok(Some(*c)),
        Value::String(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (None, _) => Ok(Some('\0')),
                (Some(c), None) => Ok(Some(c)),
                _ => Err(parse_error()),
            }
        }
        number if number.is_number() => number
            .as_i64()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32)
            .map(Some)
            .ok_or_else(parse_error),
        other => Err(DecodeError::Incompatible {
            target: CHAR,
            found: other.kind_name(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Character

/// NUL is the "no character" value and is stored as null.
pub(super) fn encode_char(value: &dyn Recast) -> Option<Value> {
    if let Some(c) = value.downcast_ref::<char>() {
        return Some(match *c {
            '\0' => Value::Null,
            c => Value::Char(c),
        });
    }
    let values = value.downcast_ref::<Box<[Option<char>]>>()?;
    Some(Value::Array(values.iter().map(|c| Value::from(*c)).collect()))
}

pub(super) fn decode_char(
    target: &'static TypeInfo,
    value: &Value,
) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    if target.is::<char>() {
        return Ok(coerce_char(value)?.map(|c| Box::new(c) as Box<dyn Recast>));
    }
    if value.is_null() {
        return Ok(None);
    }
    if target.is::<Box<[Option<char>]>>() {
        let values = elements(target, value)?
            .iter()
            .map(coerce_char)
            .collect::<Result<Box<[Option<char>]>, _>>()?;
        return Ok(Some(Box::new(values)));
    }
    Err(DecodeError::Incompatible {
        target: target.type_path(),
        found: value.kind_name(),
    })
}

// -----------------------------------------------------------------------------
// CharArray

/// `Box<[char]>` is stored as a string.
pub(super) fn encode_char_array(value: &dyn Recast) -> Option<Value> {
    let chars = value.downcast_ref::<Box<[char]>>()?;
    Some(Value::String(chars.iter().collect()))
}

pub(super) fn decode_char_array(
    target: &'static TypeInfo,
    value: &Value,
) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    let chars: Box<[char]> = match value {
        Value::Null => return Ok(None),
        Value::String(text) => text.chars().collect(),
        Value::Char(c) => Box::new([*c]),
        Value::Array(_) | Value::Packed(_) => elements(target, value)?
            .iter()
            .map(|item| coerce_char(item)?.ok_or(DecodeError::NullElement { target: CHAR_ARRAY }))
            .collect::<Result<_, _>>()?,
        other => {
            return Err(DecodeError::Incompatible {
                target: CHAR_ARRAY,
                found: other.kind_name(),
            });
        }
    };
    Ok(Some(Box::new(chars)))
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use recast_document::Value;

    use super::{coerce_char, decode_char_array, encode_char, encode_char_array};
    use crate::error::DecodeError;
    use crate::info::Typed;

    #[test]
    fn nul_is_stored_as_null() {
        assert_eq!(encode_char(&'\0'), Some(Value::Null));
        assert_eq!(encode_char(&'a'), Some(Value::Char('a')));
    }

    #[test]
    fn text_must_be_short() {
        assert_eq!(coerce_char(&Value::from("x")).unwrap(), Some('x'));
        assert_eq!(coerce_char(&Value::from("")).unwrap(), Some('\0'));
        assert!(matches!(
            coerce_char(&Value::from("xy")),
            Err(DecodeError::Parse { target: "char", .. })
        ));
        assert_eq!(coerce_char(&Value::Int(65)).unwrap(), Some('A'));
        assert!(coerce_char(&Value::Long(-1)).is_err());
    }

    #[test]
    fn char_array_is_text() {
        let chars: Box<[char]> = "héllo".chars().collect();
        assert_eq!(encode_char_array(&chars), Some(Value::from("héllo")));

        let target = <Box<[char]> as Typed>::type_info();
        let decoded = decode_char_array(target, &Value::from("héllo")).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<Box<[char]>>(), Some(&chars));

        let decoded = decode_char_array(target, &Value::Array(vec![Value::Char('o'), Value::from("k")]))
            .unwrap()
            .unwrap();
        assert_eq!(decoded.downcast_ref::<Box<[char]>>().map(|v| &v[..]), Some(&['o', 'k'][..]));
    }
}
