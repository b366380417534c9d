//! Trip validation example.
//!
//! Builds a trip list query string, then validates a trip list response and
//! shows how a malformed body is reported.

use automatic::registry::TRIP_LIST;
use automatic::{AutomaticError, Limit, RequestSchema, ResponseSchema, TripList, TripsRequest};
use chrono::{TimeZone, Utc};
use serde_json::json;

fn main() -> automatic::Result<()> {
    // 1. Query parameters for the trip list endpoint
    let since = Utc
        .with_ymd_and_hms(2017, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AutomaticError::Serialization("invalid date".into()))?;
    let request = TripsRequest::new()
        .started_at_gte(since)
        .tags_in("business")
        .limit(Limit::new(50)?);
    println!("GET /trip/?{}", request.query_string()?);

    // 2. A response body, with a key the schema does not declare
    let body = json!({
        "_metadata": {"count": 1, "next": null, "previous": null},
        "results": [{
            "url": "https://api.automatic.com/trip/T_1/",
            "id": "T_1",
            "driver": null,
            "started_at": "2017-01-28T18:00:00",
            "start_location": {"lat": 37.7749, "lon": -122.4194, "accuracy_m": 10.0},
            "start_address": {"name": "Ferry Building", "city": "San Francisco"},
            "end_location": {"lat": 37.8044, "lon": -122.2712, "accuracy_m": 8.0},
            "end_address": {},
            "tags": ["business"],
            "beta_feature": true,
        }],
    });

    let trips = TripList::validate(&body)?;
    for trip in &trips {
        println!(
            "trip {} started {:?} at {:?}",
            trip.id, trip.started_at, trip.start_address.name
        );
    }

    // 3. The same body through the registry, as plain JSON
    let cleaned = TRIP_LIST.validate(&body)?;
    println!("cleaned: {}", cleaned["results"][0]);

    // 4. A malformed body
    let mut broken = body.clone();
    broken["results"][0]["start_location"]["lat"] = json!("north");
    if let Err(err) = TripList::validate(&broken) {
        println!("rejected: {err}");
    }

    Ok(())
}
