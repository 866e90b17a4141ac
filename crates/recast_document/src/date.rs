use alloc::format;
use alloc::string::String;
use core::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// `strftime` pattern of the legacy textual date form, e.g.
/// `Wed Jan 03 10:15:30 UTC 2024`.
///
/// Dates are always written in UTC. On parse the zone may be `UTC`, `GMT`,
/// `UT`, `Z` or a numeric offset such as `+0800`, `-05:00` or `GMT+01:00`.
pub const LEGACY_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";

/// The legacy form with its zone token removed.
const ZONELESS_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Why a string isn't a legacy date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateParseError {
    #[error("expected six fields like `Wed Jan 03 10:15:30 UTC 2024`, found `{0}`")]
    Shape(String),
    #[error("unknown time zone `{0}`")]
    UnknownZone(String),
    #[error(transparent)]
    Format(#[from] chrono::ParseError),
}

/// A point in time stored as milliseconds since the Unix epoch.
///
/// This is the legacy date shape: unlike [`DateTime<Utc>`] it is decoded
/// leniently from numbers and from its textual form.
///
/// # Examples
///
/// ```
/// use recast_document::Date;
///
/// let date = Date::parse_legacy("Wed Jan 03 10:15:30 UTC 2024").unwrap();
/// assert_eq!(date.millis(), 1_704_276_930_000);
/// assert_eq!(date.to_string(), "Wed Jan 03 10:15:30 UTC 2024");
///
/// let east = Date::parse_legacy("Wed Jan 03 18:15:30 +0800 2024").unwrap();
/// assert_eq!(east, date);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(i64);

impl Date {
    /// Creates a date from epoch milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the epoch milliseconds.
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Converts to a UTC date-time, `None` if out of chrono's range.
    #[inline]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Parses the legacy textual form, see [`LEGACY_DATE_FORMAT`].
    ///
    /// Zone abbreviations other than the UTC ones are ambiguous and are
    /// rejected with [`DateParseError::UnknownZone`].
    pub fn parse_legacy(text: &str) -> Result<Self, DateParseError> {
        let mut parts = text.split_whitespace();
        let (Some(weekday), Some(month), Some(day), Some(time), Some(zone), Some(year), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(DateParseError::Shape(text.trim().into()));
        };

        let offset = zone_offset(zone).ok_or_else(|| DateParseError::UnknownZone(zone.into()))?;
        let zoneless = format!("{weekday} {month} {day} {time} {year}");
        let naive = NaiveDateTime::parse_from_str(&zoneless, ZONELESS_FORMAT)?;

        match offset.from_local_datetime(&naive).single() {
            Some(datetime) => Ok(Self(datetime.timestamp_millis())),
            None => Err(DateParseError::Shape(text.trim().into())),
        }
    }
}

/// The offset named by a zone token, `None` if it names no fixed offset.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    let offset = match zone {
        "UTC" | "GMT" | "UT" | "Z" => return FixedOffset::east_opt(0),
        _ => zone
            .strip_prefix("GMT")
            .or_else(|| zone.strip_prefix("UTC"))
            .unwrap_or(zone),
    };

    let (sign, digits) = match offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match digits.split_once(':') {
        Some(parts) => parts,
        None if digits.len() == 4 => digits.split_at(2),
        None if digits.len() <= 2 => (digits, "0"),
        None => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl From<DateTime<Utc>> for Date {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => fmt::Display::fmt(&datetime.format(LEGACY_DATE_FORMAT), f),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use chrono::{TimeZone, Utc};

    use super::{Date, DateParseError};

    const HOUR: i64 = 3_600_000;

    #[test]
    fn legacy_round_trip() {
        let date = Date::from(Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 58).unwrap());
        let text = date.to_string();
        assert_eq!(text, "Fri Dec 31 23:59:58 UTC 1999");
        assert_eq!(Date::parse_legacy(&text).unwrap(), date);
    }

    #[test]
    fn zone_offset_is_applied() {
        let utc = Date::parse_legacy("Wed Jan 03 10:15:30 UTC 2024").unwrap();
        assert_eq!(utc.millis(), 1_704_276_930_000);

        for zone in ["GMT", "UT", "Z", "+0000", "GMT+00:00"] {
            let text = format!("Wed Jan 03 10:15:30 {zone} 2024");
            assert_eq!(Date::parse_legacy(&text).unwrap(), utc, "{zone}");
        }

        let east = Date::parse_legacy("Wed Jan 03 10:15:30 +0800 2024").unwrap();
        assert_eq!(east.millis(), utc.millis() - 8 * HOUR);

        let west = Date::parse_legacy("Wed Jan 03 10:15:30 -05:00 2024").unwrap();
        assert_eq!(west.millis(), utc.millis() + 5 * HOUR);

        let prefixed = Date::parse_legacy("Wed Jan 03 10:15:30 GMT-08:00 2024").unwrap();
        assert_eq!(prefixed.millis(), utc.millis() + 8 * HOUR);
    }

    #[test]
    fn zone_abbreviations_are_rejected() {
        assert_eq!(
            Date::parse_legacy("Wed Jan 03 10:15:30 PST 2024"),
            Err(DateParseError::UnknownZone("PST".into()))
        );
        assert!(matches!(
            Date::parse_legacy("Wed Jan 03 10:15:30 +2500 2024"),
            Err(DateParseError::UnknownZone(_))
        ));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            Date::parse_legacy("2024-01-03T10:15:30Z"),
            Err(DateParseError::Shape(_))
        ));
        assert!(matches!(Date::parse_legacy(""), Err(DateParseError::Shape(_))));
        assert!(matches!(
            Date::parse_legacy("Wed Foo 03 10:15:30 UTC 2024"),
            Err(DateParseError::Format(_))
        ));
    }
}
