//! JSON fixtures shaped like real API responses.
//!
//! Enable with the `testing` feature to exercise client code against bodies
//! that pass the response schemas.
//!
//! # Usage
//!
//! ```rust,ignore
//! use automatic::testing;
//! use automatic::{ResponseSchema, Trip};
//!
//! let mut body = testing::trip("T_1");
//! body["distance_m"] = serde_json::json!(1234.5);
//! let trip = Trip::validate(&body).unwrap();
//! ```

use serde_json::{json, Value};

const API_BASE: &str = "https://api.automatic.com";

/// A location in San Francisco.
pub fn location() -> Value {
    json!({
        "lat": 37.7749,
        "lon": -122.4194,
        "accuracy_m": 8.5,
    })
}

/// A fully populated address.
pub fn address() -> Value {
    json!({
        "name": "Ferry Building",
        "display_name": "1 Ferry Building, San Francisco, CA",
        "street_number": "1",
        "streen_name": "Ferry Building",
        "city": "San Francisco",
        "state": "CA",
        "country": "US",
    })
}

/// A vehicle with every optional field set.
pub fn vehicle(id: &str) -> Value {
    json!({
        "url": format!("{}/vehicle/{}/", API_BASE, id),
        "id": id,
        "vin": "1FTFW1ET5DFC10312",
        "created_at": "2016-03-01T12:00:00",
        "updated_at": "2016-03-02T08:30:00",
        "make": "Ford",
        "model": "F-150",
        "year": 2013,
        "submodel": "XLT",
        "display_name": "Work truck",
        "fuel_grade": "regular",
        "fuel_level_percent": 72.5,
        "battery_voltage": 12.6,
    })
}

/// A driving event of the given type.
pub fn vehicle_event(event_type: &str) -> Value {
    json!({
        "type": event_type,
        "lat": 37.7793,
        "lon": -122.4192,
        "created_at": "2017-01-28T18:05:21",
        "g_force": 0.42,
    })
}

/// A trip carrying every required key and a single hard brake.
pub fn trip(id: &str) -> Value {
    json!({
        "url": format!("{}/trip/{}/", API_BASE, id),
        "id": id,
        "driver": format!("{}/user/U_1/", API_BASE),
        "user": format!("{}/user/U_1/", API_BASE),
        "started_at": "2017-01-28T18:00:00",
        "ended_at": "2017-01-28T18:25:00",
        "distance_m": 10871.2,
        "duration_s": 1500.0,
        "vehicle": format!("{}/vehicle/C_1/", API_BASE),
        "start_location": location(),
        "start_address": address(),
        "end_location": {
            "lat": 37.8044,
            "lon": -122.2712,
            "accuracy_m": 12.0,
        },
        "end_address": {
            "name": "Oakland",
            "city": "Oakland",
            "state": "CA",
            "country": "US",
        },
        "vehicle_events": [vehicle_event("hard_brake")],
        "tags": ["business"],
    })
}

/// A token payload as returned by the authorization endpoint.
pub fn auth_token() -> Value {
    json!({
        "access_token": "123",
        "expires_in": 72_000,
        "scope": "scope:trip scope:vehicle:profile",
        "refresh_token": "ABCDEF",
        "token_type": "Bearer",
    })
}

/// A single-page list envelope around `results`.
pub fn list(results: Vec<Value>) -> Value {
    json!({
        "_metadata": {
            "count": results.len(),
            "next": null,
            "previous": null,
        },
        "results": results,
    })
}
