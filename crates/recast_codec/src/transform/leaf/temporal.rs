use alloc::boxed::Box;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use recast_document::{Date, Value};

use crate::Recast;
use crate::error::DecodeError;

// -----------------------------------------------------------------------------
// Date

pub(super) fn encode_date(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<Date>().map(|date| Value::Date(*date))
}

/// Legacy dates accept epoch millis and their textual form.
///
/// Unparseable text, including a zone abbreviation other than `UTC` or
/// `GMT`, is logged and leaves the target unset instead of failing the
/// whole decode. An instant is not a legacy date.
pub(super) fn decode_date(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    let date = match value {
        Value::Null => return Ok(None),
        Value::Date(date) => *date,
        Value::String(text) => match Date::parse_legacy(text) {
            Ok(date) => date,
            Err(error) => {
                log::warn!("can't parse `{text}` as a date, leaving it unset: {error}");
                return Ok(None);
            }
        },
        number => match number.as_i64() {
            Some(millis) => Date::from_millis(millis),
            None => {
                return Err(DecodeError::Incompatible {
                    target: "date",
                    found: number.kind_name(),
                });
            }
        },
    };
    Ok(Some(Box::new(date)))
}

// -----------------------------------------------------------------------------
// Strict temporals

// Instants and local values only decode from their own storage variant.
fn decode_strict<T: Recast>(
    target: &'static str,
    value: &Value,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    if value.is_null() {
        return Ok(None);
    }
    match extract(value) {
        Some(decoded) => Ok(Some(Box::new(decoded))),
        None => Err(DecodeError::Incompatible {
            target,
            found: value.kind_name(),
        }),
    }
}

pub(super) fn encode_instant(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<DateTime<Utc>>().map(|v| Value::Instant(*v))
}

pub(super) fn decode_instant(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    decode_strict("instant", value, |value| match value {
        Value::Instant(instant) => Some(*instant),
        _ => None,
    })
}

pub(super) fn encode_local_date_time(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<NaiveDateTime>().map(|v| Value::LocalDateTime(*v))
}

pub(super) fn decode_local_date_time(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    decode_strict("local date-time", value, |value| match value {
        Value::LocalDateTime(datetime) => Some(*datetime),
        _ => None,
    })
}

pub(super) fn encode_local_time(value: &dyn Recast) -> Option<Value> {
    value.downcast_ref::<NaiveTime>().map(|v| Value::LocalTime(*v))
}

pub(super) fn decode_local_time(value: &Value) -> Result<Option<Box<dyn Recast>>, DecodeError> {
    decode_strict("local time", value, |value| match value {
        Value::LocalTime(time) => Some(*time),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use recast_document::{Date, Value};

    use super::{decode_date, decode_instant};
    use crate::error::DecodeError;

    #[test]
    fn date_is_lenient() {
        let decoded = decode_date(&Value::Long(1_000)).unwrap().unwrap();
        assert_eq!(decoded.downcast_ref::<Date>(), Some(&Date::from_millis(1_000)));

        let decoded = decode_date(&Value::from("Wed Jan 03 10:15:30 UTC 2024"))
            .unwrap()
            .unwrap();
        assert_eq!(decoded.downcast_ref::<Date>().map(|d| d.millis()), Some(1_704_276_930_000));

        let decoded = decode_date(&Value::from("Wed Jan 03 18:15:30 GMT+08:00 2024"))
            .unwrap()
            .unwrap();
        assert_eq!(decoded.downcast_ref::<Date>().map(|d| d.millis()), Some(1_704_276_930_000));

        assert!(decode_date(&Value::from("not a date")).unwrap().is_none());
        assert!(decode_date(&Value::from("Wed Jan 03 10:15:30 PST 2024")).unwrap().is_none());
        assert!(decode_date(&Value::Bool(true)).is_err());
    }

    #[test]
    fn date_rejects_instants() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 3, 10, 15, 30).unwrap();
        assert!(matches!(
            decode_date(&Value::Instant(instant)),
            Err(DecodeError::Incompatible { target: "date", found: "instant" })
        ));
    }

    #[test]
    fn instant_is_strict() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 3, 10, 15, 30).unwrap();
        let decoded = decode_instant(&Value::Instant(instant)).unwrap().unwrap();
        assert!(decoded.is::<chrono::DateTime<Utc>>());

        assert!(matches!(
            decode_instant(&Value::from("2024-01-03T10:15:30Z")),
            Err(DecodeError::Incompatible { target: "instant", found: "string" })
        ));
        assert!(decode_instant(&Value::Null).unwrap().is_none());
    }
}
