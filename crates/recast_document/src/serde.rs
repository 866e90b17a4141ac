//! `serde` support for [`Value`] and [`Document`].
//!
//! Serialization maps every variant onto the serde data model. Temporal
//! variants have no serde counterpart and are written as ISO-8601 strings,
//! [`Date`](crate::Date) as epoch milliseconds. Deserialization is the
//! self-describing subset: numbers become `Int`, `Long` or `Double` by
//! range, and strings stay strings.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::SecondsFormat;
use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{LOCAL_DATE_TIME_FORMAT, LOCAL_TIME_FORMAT};
use crate::{Document, PrimitiveArray, Value};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Byte(v) => serializer.serialize_u8(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Date(v) => serializer.serialize_i64(v.millis()),
            Value::Instant(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::LocalDateTime(v) => serializer.collect_str(&v.format(LOCAL_DATE_TIME_FORMAT)),
            Value::LocalTime(v) => serializer.collect_str(&v.format(LOCAL_TIME_FORMAT)),
            Value::Packed(v) => v.serialize(serializer),
            Value::Array(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Document(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for PrimitiveArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        match self {
            PrimitiveArray::Bytes(v) => v.iter().try_for_each(|x| seq.serialize_element(x))?,
            PrimitiveArray::Ints(v) => v.iter().try_for_each(|x| seq.serialize_element(x))?,
            PrimitiveArray::Longs(v) => v.iter().try_for_each(|x| seq.serialize_element(x))?,
            PrimitiveArray::Doubles(v) => v.iter().try_for_each(|x| seq.serialize_element(x))?,
        }
        seq.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any document value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(i32::try_from(v).map_or(Value::Long(v), Value::Int))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        if let Ok(v) = i32::try_from(v) {
            Ok(Value::Int(v))
        } else if let Ok(v) = i64::try_from(v) {
            Ok(Value::Long(v))
        } else {
            Ok(Value::Double(v as f64))
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        DocumentVisitor.visit_map(map).map(Value::Document)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a document")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut document = Document::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            document.insert(key, value);
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{Date, Document, PrimitiveArray, Value, doc};

    #[test]
    fn serialize_to_json() {
        let document = doc! {
            "id" => "abc",
            "n" => 1_i64,
            "bytes" => PrimitiveArray::from(vec![1_u8, 2]),
            "when" => Date::from_millis(5),
            "at" => Utc.with_ymd_and_hms(2024, 1, 3, 10, 15, 30).unwrap(),
            "none" => Value::Null,
        };
        let json = serde_json::to_string(&document).unwrap();
        assert_eq!(
            json,
            r#"{"id":"abc","n":1,"bytes":[1,2],"when":5,"at":"2024-01-03T10:15:30Z","none":null}"#
        );
    }

    #[test]
    fn deserialize_from_json() {
        let document: Document =
            serde_json::from_str(r#"{"a":1,"b":[true,null],"c":{"d":5000000000},"e":1.5}"#)
                .unwrap();
        assert_eq!(
            document,
            doc! {
                "a" => 1,
                "b" => vec![Value::Bool(true), Value::Null],
                "c" => doc! { "d" => 5_000_000_000_i64 },
                "e" => 1.5,
            }
        );
        assert_eq!(document.keys().collect::<Vec<_>>(), ["a", "b", "c", "e"]);
    }

    #[test]
    fn document_rejects_non_map() {
        assert!(serde_json::from_str::<Document>("[1]").is_err());
    }
}
