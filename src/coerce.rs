//! Coercion rules for single values.
//!
//! Every rule is a pure function from a raw value to a coerced value or a
//! [`ValidationError`] rooted at that value. Schemas prefix the path as the
//! error travels outwards.

use crate::errors::{ErrorKind, ValidationError};
use crate::params::Param;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serializer;
use serde_json::Value;

/// Wire format of every date-time field in API responses.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ---------------------------------------------------------------------------
// Date and time
// ---------------------------------------------------------------------------

/// Convert a date-time parameter to epoch seconds.
///
/// Only [`Param::DateTime`] is accepted; pre-formatted strings are refused
/// rather than parsed.
pub fn timestamp(value: &Param) -> Result<f64, ValidationError> {
    value.expect_datetime().map(|dt| epoch_seconds(&dt))
}

/// Seconds since the Unix epoch, with sub-second precision.
pub fn epoch_seconds(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_micros()) / 1_000_000.0
}

/// Parse a [`DATETIME_FORMAT`] string.
///
/// The year must be exactly four digits, and no characters other than digits,
/// `-`, `:` and `T` may appear. Unpadded fields such as `2017-1-5T1:2:3` parse.
pub fn coerce_datetime(value: &Value) -> Result<NaiveDateTime, ValidationError> {
    value
        .as_str()
        .filter(|s| has_datetime_layout(s))
        .and_then(|s| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok())
        .ok_or_else(|| {
            ValidationError::new(ErrorKind::InvalidFormat {
                format: DATETIME_FORMAT,
            })
            .with_received(value.clone())
        })
}

fn has_datetime_layout(s: &str) -> bool {
    let year_digits = s.bytes().take_while(u8::is_ascii_digit).count();
    year_digits == 4
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b':' | b'T'))
}

// ---------------------------------------------------------------------------
// Strict primitives
// ---------------------------------------------------------------------------

pub fn string(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(invalid_type("str", other)),
    }
}

/// A JSON integer. Floats and booleans are refused.
pub fn integer(value: &Value) -> Result<i64, ValidationError> {
    value.as_i64().ok_or_else(|| invalid_type("int", value))
}

/// A non-negative JSON integer of any size up to `u64::MAX`.
pub fn non_negative_integer(value: &Value) -> Result<u64, ValidationError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let n = integer(value)?;
    Err(ValidationError::new(ErrorKind::OutOfRange {
        min: Some(0),
        max: None,
    })
    .with_received(n))
}

/// A JSON float. Integer literals such as `5` are refused, `5.0` is accepted.
pub fn float(value: &Value) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().ok_or_else(|| invalid_type("float", value)),
        other => Err(invalid_type("float", other)),
    }
}

/// A JSON array whose every element passes `rule`.
pub fn list<T>(
    value: &Value,
    mut rule: impl FnMut(&Value) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    let items = value.as_array().ok_or_else(|| invalid_type("list", value))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| rule(item).map_err(|e| e.at_index(index)))
        .collect()
}

/// Check an integer against inclusive bounds. Values are never clamped.
pub fn in_range(value: i64, min: Option<i64>, max: Option<i64>) -> Result<i64, ValidationError> {
    let below = min.is_some_and(|min| value < min);
    let above = max.is_some_and(|max| value > max);
    if below || above {
        return Err(ValidationError::new(ErrorKind::OutOfRange { min, max }).with_received(value));
    }
    Ok(value)
}

/// Accept only one of the listed string literals.
pub fn one_of(
    value: &Value,
    allowed: &'static [&'static str],
) -> Result<&'static str, ValidationError> {
    value
        .as_str()
        .and_then(|s| allowed.iter().copied().find(|candidate| *candidate == s))
        .ok_or_else(|| {
            ValidationError::new(ErrorKind::NotAllowed { allowed }).with_received(value.clone())
        })
}

// ---------------------------------------------------------------------------
// Nullable unions
// ---------------------------------------------------------------------------

/// `OPT_STR`: a string or null.
pub fn opt_str(value: &Value) -> Result<Option<String>, ValidationError> {
    nullable(value, "str or None", string)
}

/// `OPT_INT`: an integer or null.
pub fn opt_int(value: &Value) -> Result<Option<i64>, ValidationError> {
    nullable(value, "int or None", integer)
}

/// `OPT_FLOAT`: a float or null.
pub fn opt_float(value: &Value) -> Result<Option<f64>, ValidationError> {
    nullable(value, "float or None", float)
}

/// `OPT_DATETIME`: a [`DATETIME_FORMAT`] string or null.
pub fn opt_datetime(value: &Value) -> Result<Option<NaiveDateTime>, ValidationError> {
    if value.is_null() {
        return Ok(None);
    }
    coerce_datetime(value).map(Some)
}

fn nullable<T>(
    value: &Value,
    expected: &'static str,
    rule: fn(&Value) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    if value.is_null() {
        return Ok(None);
    }
    rule(value)
        .map(Some)
        .map_err(|_| invalid_type(expected, value))
}

fn invalid_type(expected: &'static str, value: &Value) -> ValidationError {
    ValidationError::new(ErrorKind::InvalidType { expected }).with_received(value.clone())
}

// ---------------------------------------------------------------------------
// Serializers for coerced values
// ---------------------------------------------------------------------------

/// Renders a coerced date-time back in [`DATETIME_FORMAT`] so validated output
/// validates again unchanged.
pub(crate) fn serialize_opt_datetime<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// Renders a date-time filter as epoch seconds.
pub(crate) fn serialize_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_f64(epoch_seconds(dt)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_timestamp_of_datetime() {
        let dt = Utc.with_ymd_and_hms(2017, 7, 14, 2, 40, 0).unwrap();
        assert_eq!(timestamp(&Param::DateTime(dt)).unwrap(), 1_500_000_000.0);
    }

    #[test]
    fn test_timestamp_keeps_subseconds() {
        let dt = Utc.timestamp_millis_opt(1_500_000_000_250).unwrap();
        assert_eq!(epoch_seconds(&dt), 1_500_000_000.25);
    }

    #[test]
    fn test_coerce_datetime_rejects_timezone_suffix() {
        let err = coerce_datetime(&json!("2017-01-01T00:00:00Z")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value does not match expected format %Y-%m-%dT%H:%M:%S"
        );
    }

    #[test]
    fn test_coerce_datetime_rejects_padding_and_sign() {
        for raw in [
            " 2017-01-28T18:00:00",
            "2017-01-28T 18:00:00",
            "2017-01-28T18:00:00 ",
            "+2017-01-28T18:00:00",
            "-2017-01-28T18:00:00",
            "17-01-28T18:00:00",
            "20170-01-28T18:00:00",
        ] {
            let err = coerce_datetime(&json!(raw)).unwrap_err();
            assert_eq!(
                err.kind,
                ErrorKind::InvalidFormat {
                    format: DATETIME_FORMAT
                },
                "{raw:?} should be refused"
            );
        }
    }

    #[test]
    fn test_coerce_datetime_accepts_unpadded_fields() {
        let dt = coerce_datetime(&json!("2017-1-5T1:2:3")).unwrap();
        assert_eq!(dt.format(DATETIME_FORMAT).to_string(), "2017-01-05T01:02:03");
    }

    #[test]
    fn test_non_negative_integer_beyond_i64() {
        let big = u64::MAX;
        assert_eq!(non_negative_integer(&json!(big)).unwrap(), big);
        assert_eq!(non_negative_integer(&json!(0)).unwrap(), 0);
        assert!(non_negative_integer(&json!(-1)).unwrap_err().is_out_of_range());
        assert_eq!(
            non_negative_integer(&json!(1.5)).unwrap_err().kind,
            ErrorKind::InvalidType { expected: "int" }
        );
    }

    #[test]
    fn test_integer_refuses_float_and_bool() {
        assert_eq!(integer(&json!(3)).unwrap(), 3);
        assert!(integer(&json!(3.0)).is_err());
        assert!(integer(&json!(true)).is_err());
    }

    #[test]
    fn test_float_refuses_integer_literal() {
        assert_eq!(float(&json!(3.5)).unwrap(), 3.5);
        assert!(float(&json!(3)).is_err());
    }

    #[test]
    fn test_list_reports_index() {
        let err = list(&json!(["a", 1, "c"]), string).unwrap_err();
        assert_eq!(err.path_string(), "data[1]");
    }

    #[test]
    fn test_in_range_bounds_are_inclusive() {
        assert!(in_range(1, Some(1), Some(250)).is_ok());
        assert!(in_range(250, Some(1), Some(250)).is_ok());
        assert!(in_range(0, Some(1), Some(250)).unwrap_err().is_out_of_range());
        assert!(in_range(251, Some(1), Some(250)).unwrap_err().is_out_of_range());
    }
}
