use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::{Date, Document, PrimitiveArray};

pub(crate) const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub(crate) const LOCAL_TIME_FORMAT: &str = "%H:%M:%S%.f";

/// A value stored in a [`Document`].
///
/// Numbers keep the width they were encoded with, so a field declared as a
/// 64-bit integer comes back as [`Value::Long`] even if it holds `1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(u8),
    Char(char),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Date(Date),
    Instant(DateTime<Utc>),
    LocalDateTime(NaiveDateTime),
    LocalTime(NaiveTime),
    Packed(PrimitiveArray),
    Array(Vec<Value>),
    Document(Document),
}

impl Value {
    /// Short name of the value's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Char(_) => "char",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Instant(_) => "instant",
            Self::LocalDateTime(_) => "local date-time",
            Self::LocalTime(_) => "local time",
            Self::Packed(_) => "packed array",
            Self::Array(_) => "array",
            Self::Document(_) => "document",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for the numeric variants.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Byte(_) | Self::Int(_) | Self::Long(_) | Self::Double(_)
        )
    }

    /// Returns `true` for ordered sequences, packed or not.
    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Packed(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value widened to `i64`; doubles are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(*v as i64),
            Self::Int(v) => Some(*v as i64),
            Self::Long(v) => Some(*v),
            Self::Double(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Byte(v) => Some(*v as f64),
            Self::Int(v) => Some(*v as f64),
            Self::Long(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Self::Document(v) => Some(v),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Display

fn write_sequence<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Textual form of the value.
///
/// Scalars print bare (strings without quotes), which is the form map keys
/// are stored under and the form numeric parsers fall back to.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{v}"),
            Self::Instant(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::LocalDateTime(v) => write!(f, "{}", v.format(LOCAL_DATE_TIME_FORMAT)),
            Self::LocalTime(v) => write!(f, "{}", v.format(LOCAL_TIME_FORMAT)),
            Self::Packed(v) => write_sequence(f, v.iter()),
            Self::Array(v) => write_sequence(f, v.iter()),
            Self::Document(v) => {
                f.write_str("{")?;
                for (index, (key, value)) in v.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => Byte,
    char => Char,
    i32 => Int,
    i64 => Long,
    f64 => Double,
    String => String,
    Date => Date,
    DateTime<Utc> => Instant,
    NaiveDateTime => LocalDateTime,
    NaiveTime => LocalTime,
    PrimitiveArray => Packed,
    Document => Document,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeZone, Utc};

    use super::Value;
    use crate::{PrimitiveArray, doc};

    #[test]
    fn display_is_bare() {
        assert_eq!(Value::from("k").to_string(), "k");
        assert_eq!(Value::Long(42).to_string(), "42");
        assert_eq!(Value::Char('x').to_string(), "x");
        assert_eq!(Value::Double(1.5).to_string(), "1.5");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn display_nested() {
        let value = Value::from(doc! {
            "a" => vec![1, 2],
            "b" => PrimitiveArray::from(vec![3_u8]),
        });
        assert_eq!(value.to_string(), "{a: [1, 2], b: [3]}");
    }

    #[test]
    fn display_temporal() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 3, 10, 15, 30).unwrap();
        assert_eq!(Value::Instant(instant).to_string(), "2024-01-03T10:15:30Z");
        let time = NaiveTime::from_hms_opt(8, 5, 0).unwrap();
        assert_eq!(Value::LocalTime(time).to_string(), "08:05:00");
    }

    #[test]
    fn numeric_views() {
        assert_eq!(Value::Byte(7).as_i64(), Some(7));
        assert_eq!(Value::Double(2.9).as_i64(), Some(2));
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("3").as_i64(), None);
        assert!(Value::Long(1).is_number());
        assert!(!Value::Char('1').is_number());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5_i64)), Value::Long(5));
    }
}
