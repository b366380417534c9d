use automatic::coerce::{self, opt_datetime, opt_float, opt_int, opt_str};
use automatic::{coerce_datetime, timestamp, ErrorKind, Param, DATETIME_FORMAT};
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::json;

// ---------------------------------------------------------------------------
// timestamp
// ---------------------------------------------------------------------------

#[test]
fn test_timestamp_returns_epoch_seconds() {
    let dt = Utc.with_ymd_and_hms(2017, 1, 28, 18, 0, 0).unwrap();
    let ts = timestamp(&Param::DateTime(dt)).unwrap();
    assert_eq!(ts, 1_485_626_400.0);
}

#[test]
fn test_timestamp_of_naive_datetime_is_utc() {
    let naive = NaiveDate::from_ymd_opt(1970, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(timestamp(&Param::from(naive)).unwrap(), 86_400.0);
}

#[test]
fn test_timestamp_refuses_formatted_string() {
    let err = timestamp(&Param::from("2017-01-28T18:00:00")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidType { expected: "datetime" });
    assert_eq!(err.received, Some(json!("2017-01-28T18:00:00")));
}

#[test]
fn test_timestamp_refuses_numbers() {
    assert!(timestamp(&Param::Int(1_485_626_400)).is_err());
    assert!(timestamp(&Param::Float(1_485_626_400.0)).is_err());
}

// ---------------------------------------------------------------------------
// coerce_datetime
// ---------------------------------------------------------------------------

#[test]
fn test_coerce_datetime_parses_format() {
    let dt = coerce_datetime(&json!("2016-03-01T12:34:56")).unwrap();
    let expected = NaiveDateTime::parse_from_str("2016-03-01T12:34:56", DATETIME_FORMAT).unwrap();
    assert_eq!(dt, expected);
}

#[test]
fn test_coerce_datetime_rejects_other_formats() {
    for raw in [
        "2016-03-01",
        "2016-03-01 12:34:56",
        "2016-03-01T12:34:56.123",
        "2016-03-01T12:34:56Z",
        "not a date",
    ] {
        let err = coerce_datetime(&json!(raw)).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::InvalidFormat {
                format: DATETIME_FORMAT
            },
            "{} should not parse",
            raw
        );
    }
}

#[test]
fn test_coerce_datetime_rejects_non_strings() {
    for raw in [json!(null), json!(1_485_626_400), json!(["2016-03-01T12:34:56"])] {
        let err = coerce_datetime(&raw).unwrap_err();
        assert!(err.to_string().contains("%Y-%m-%dT%H:%M:%S"));
    }
}

// ---------------------------------------------------------------------------
// Nullable unions
// ---------------------------------------------------------------------------

#[test]
fn test_opt_str() {
    assert_eq!(opt_str(&json!("x")).unwrap(), Some("x".to_string()));
    assert_eq!(opt_str(&json!(null)).unwrap(), None);
    let err = opt_str(&json!(5)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidType { expected: "str or None" });
}

#[test]
fn test_opt_int() {
    assert_eq!(opt_int(&json!(2013)).unwrap(), Some(2013));
    assert_eq!(opt_int(&json!(null)).unwrap(), None);
    assert!(opt_int(&json!("2013")).is_err());
    assert!(opt_int(&json!(2013.5)).is_err());
}

#[test]
fn test_opt_float() {
    assert_eq!(opt_float(&json!(12.6)).unwrap(), Some(12.6));
    assert_eq!(opt_float(&json!(null)).unwrap(), None);
    assert!(opt_float(&json!(12)).is_err());
    assert!(opt_float(&json!("12.6")).is_err());
}

#[test]
fn test_opt_datetime() {
    assert!(opt_datetime(&json!("2017-01-28T18:00:00")).unwrap().is_some());
    assert_eq!(opt_datetime(&json!(null)).unwrap(), None);
    let err = opt_datetime(&json!("yesterday")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidFormat { .. }));
}

// ---------------------------------------------------------------------------
// Other rules
// ---------------------------------------------------------------------------

#[test]
fn test_one_of_literal() {
    assert_eq!(coerce::one_of(&json!("Bearer"), &["Bearer"]).unwrap(), "Bearer");
    assert!(coerce::one_of(&json!("bearer"), &["Bearer"]).is_err());
    assert!(coerce::one_of(&json!(1), &["Bearer"]).is_err());
}

#[test]
fn test_in_range_open_upper_bound() {
    assert_eq!(coerce::in_range(0, Some(0), None).unwrap(), 0);
    assert_eq!(coerce::in_range(i64::MAX, Some(0), None).unwrap(), i64::MAX);
    let err = coerce::in_range(-1, Some(0), None).unwrap_err();
    assert_eq!(err.to_string(), "value must be at least 0");
}
