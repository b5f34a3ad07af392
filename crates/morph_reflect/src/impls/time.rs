//! The built-in timestamp type.

use chrono::{DateTime, Timelike, Utc};

use crate::Reflect;
use crate::hooks::{HookError, TextDecodable, TextEncodable, TextHooks};
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};

/// A UTC timestamp.
///
/// Converts through RFC 3339 text with fractional seconds, see
/// [`format_timestamp`] and [`parse_timestamp`].
pub type Timestamp = DateTime<Utc>;

/// Formats as RFC 3339 in UTC, with trailing zeros of the fractional
/// seconds removed (`2024-05-01T10:00:00.5Z`).
pub fn format_timestamp(ts: &Timestamp) -> String {
    let base = ts.format("%Y-%m-%dT%H:%M:%S");
    let nanos = ts.nanosecond();
    if nanos == 0 {
        return format!("{base}Z");
    }
    let fraction = format!("{nanos:09}");
    format!("{base}.{}Z", fraction.trim_end_matches('0'))
}

/// Parses RFC 3339 text, with or without fractional seconds, in any
/// offset.
pub fn parse_timestamp(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|ts| ts.with_timezone(&Utc))
}

impl Typed for Timestamp {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Opaque(OpaqueInfo::new::<Timestamp>().with_text_hooks(TextHooks::all()))
        })
    }
}

impl Reflect for Timestamp {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Opaque(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque(self)
    }

    #[inline]
    fn as_text_encodable(&self) -> Option<&dyn TextEncodable> {
        Some(self)
    }

    #[inline]
    fn as_text_decodable(&mut self) -> Option<&mut dyn TextDecodable> {
        Some(self)
    }

    fn reset_opaque(&mut self) {
        *self = Timestamp::default();
    }
}

impl TextEncodable for Timestamp {
    fn encode_text(&self) -> Result<String, HookError> {
        Ok(format_timestamp(self))
    }
}

impl TextDecodable for Timestamp {
    fn decode_text(&mut self, text: &str) -> Result<(), HookError> {
        *self = parse_timestamp(text).map_err(HookError::from_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_timestamp, parse_timestamp};
    use crate::hooks::TextDecodable;

    #[test]
    fn fraction_is_trimmed() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(format_timestamp(&ts), "2024-05-01T10:00:00.5Z");
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(&whole), "2024-05-01T10:00:00Z");
    }

    #[test]
    fn offsets_are_normalized() {
        let ts = parse_timestamp("2024-01-01T10:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn bad_text_is_a_hook_error() {
        let mut ts = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let before = ts;
        assert!(ts.decode_text("not a time").is_err());
        assert_eq!(ts, before);
    }
}
