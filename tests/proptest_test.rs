//! Property-based tests for the coercion rules and schemas using proptest.
//!
//! Covers timestamp and date-time coercion, page/limit range
//! enforcement, and idempotence of response validation.

use automatic::{
    coerce_datetime, timestamp, Address, ErrorKind, Location, Param, Params, RequestSchema,
    ResponseSchema, Trip, VehiclesRequest, DATETIME_FORMAT,
};
use chrono::{NaiveDateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Seconds between 1970 and 2100.
fn arb_epoch() -> impl Strategy<Value = i64> {
    0..4_102_444_800i64
}

fn format_epoch(secs: i64) -> String {
    Utc.timestamp_opt(secs, 0)
        .unwrap()
        .naive_utc()
        .format(DATETIME_FORMAT)
        .to_string()
}

/// Values that must never coerce to a date-time: a well-formed string spoiled
/// by padding, a sign, trailing text or a missing `T`, or a non-string value.
fn arb_malformed_datetime() -> impl Strategy<Value = serde_json::Value> {
    let spoiled = (arb_epoch(), 0..7usize, "[ \t\n]{1,3}", "[a-zA-Z .Z+]{1,6}").prop_map(
        |(secs, how, space, tail)| {
            let good = format_epoch(secs);
            match how {
                0 => format!("{space}{good}"),
                1 => format!("{good}{space}"),
                2 => good.replacen('T', &format!("T{space}"), 1),
                3 => format!("+{good}"),
                4 => format!("-{good}"),
                5 => format!("{good}{tail}"),
                _ => good.replacen('T', " ", 1),
            }
        },
    );
    prop_oneof![
        spoiled.prop_map(serde_json::Value::String),
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        Just(serde_json::Value::Null),
        Just(json!(["2017-01-28T18:00:00"])),
    ]
}

fn arb_opt_string() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        "[a-zA-Z0-9 ]{0,20}".prop_map(serde_json::Value::String),
    ]
}

fn arb_location() -> impl Strategy<Value = serde_json::Value> {
    (-90.0..90.0f64, -180.0..180.0f64, 0.0..1000.0f64)
        .prop_map(|(lat, lon, acc)| json!({"lat": lat, "lon": lon, "accuracy_m": acc}))
}

fn arb_address() -> impl Strategy<Value = serde_json::Value> {
    (arb_opt_string(), arb_opt_string(), arb_opt_string()).prop_map(|(name, street, city)| {
        json!({"name": name, "streen_name": street, "city": city})
    })
}

fn arb_trip() -> impl Strategy<Value = serde_json::Value> {
    (
        "[A-Z]_[a-z0-9]{4,12}",
        arb_location(),
        arb_location(),
        arb_address(),
        arb_address(),
        prop::option::of(arb_epoch()),
        prop::collection::vec("[a-z]{1,10}", 0..4),
        prop::option::of(0..100i64),
    )
        .prop_map(|(id, start, end, start_addr, end_addr, started, tags, brakes)| {
            let started_at = started.map(format_epoch);
            json!({
                "url": format!("https://api.automatic.com/trip/{}/", id),
                "id": id,
                "driver": null,
                "started_at": started_at,
                "start_location": start,
                "end_location": end,
                "start_address": start_addr,
                "end_address": end_addr,
                "hard_brakes": brakes,
                "tags": tags,
                "unexpected": true,
            })
        })
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

proptest! {
    /// timestamp(d) is d's epoch seconds.
    #[test]
    fn timestamp_matches_epoch(secs in arb_epoch(), millis in 0..1000u32) {
        let dt = Utc.timestamp_opt(secs, millis * 1_000_000).unwrap();
        let ts = timestamp(&Param::DateTime(dt)).unwrap();
        prop_assert!((ts - (secs as f64 + f64::from(millis) / 1000.0)).abs() < 1e-3);
    }

    /// timestamp never accepts anything but a date-time.
    #[test]
    fn timestamp_rejects_non_datetimes(s in ".*", i in any::<i64>()) {
        prop_assert!(timestamp(&Param::from(s)).is_err());
        prop_assert!(timestamp(&Param::from(i)).is_err());
    }

    /// coerce_datetime agrees with chrono parsing the same format.
    #[test]
    fn coerce_datetime_matches_format(secs in arb_epoch()) {
        let formatted = format_epoch(secs);
        let expected = NaiveDateTime::parse_from_str(&formatted, DATETIME_FORMAT).unwrap();
        prop_assert_eq!(coerce_datetime(&json!(formatted)).unwrap(), expected);
    }

    /// Strings that deviate from the layout and non-string values are refused.
    #[test]
    fn coerce_datetime_rejects_malformed(value in arb_malformed_datetime()) {
        let err = coerce_datetime(&value).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::InvalidFormat { format: DATETIME_FORMAT });
        prop_assert_eq!(err.received, Some(value));
    }

    /// page and limit are accepted exactly inside their ranges.
    #[test]
    fn page_and_limit_ranges(page in -10..10i64, limit in -10..300i64) {
        let page_ok = VehiclesRequest::validate(&Params::new().with("page", page)).is_ok();
        let limit_ok = VehiclesRequest::validate(&Params::new().with("limit", limit)).is_ok();
        prop_assert_eq!(page_ok, page >= 1);
        prop_assert_eq!(limit_ok, (1..=250).contains(&limit));
    }

    /// Location output holds exactly the three declared keys.
    #[test]
    fn location_output_is_exact(body in arb_location()) {
        let output = Location::validate(&body).unwrap().to_value().unwrap();
        prop_assert_eq!(output, body);
    }

    /// Address output always lists every declared key.
    #[test]
    fn address_output_has_all_keys(body in arb_address()) {
        let output = Address::validate(&body).unwrap().to_value().unwrap();
        prop_assert_eq!(output.as_object().unwrap().len(), 7);
    }

    /// Re-validating a validated trip yields the same trip.
    #[test]
    fn trip_validation_is_idempotent(body in arb_trip()) {
        let first = Trip::validate(&body).unwrap();
        let output = first.to_value().unwrap();
        prop_assert!(output.get("unexpected").is_none());
        let second = Trip::validate(&output).unwrap();
        prop_assert_eq!(first, second);
    }
}
