use crate::coerce::{self, serialize_opt_datetime};
use crate::config::SchemaConfig;
use crate::errors::ValidationError;
use crate::schema::{Fields, ResponseSchema};
use crate::vehicle::VehicleEvent;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A GPS fix. Every coordinate is required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    /// Horizontal accuracy in metres.
    pub accuracy_m: f64,
}

impl ResponseSchema for Location {
    const NAME: &'static str = "LOCATION";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                lat: f.required("lat", coerce::float)?,
                lon: f.required("lon", coerce::float)?,
                accuracy_m: f.required("accuracy_m", coerce::float)?,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A reverse-geocoded address. Any part may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub street_number: Option<String>,
    /// Street name. The API spells the key `streen_name`.
    #[serde(rename = "streen_name")]
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl ResponseSchema for Address {
    const NAME: &'static str = "ADDRESS";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                name: f.opt("name", coerce::opt_str)?,
                display_name: f.opt("display_name", coerce::opt_str)?,
                street_number: f.opt("street_number", coerce::opt_str)?,
                street_name: f.opt("streen_name", coerce::opt_str)?,
                city: f.opt("city", coerce::opt_str)?,
                state: f.opt("state", coerce::opt_str)?,
                country: f.opt("country", coerce::opt_str)?,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Trip
// ---------------------------------------------------------------------------

/// A completed trip with its route endpoints, driving events and scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub url: String,
    pub id: String,
    /// Always present in the payload, null for trips without a known driver.
    pub driver: Option<String>,
    pub user: Option<String>,
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub started_at: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub ended_at: Option<NaiveDateTime>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
    pub vehicle: Option<String>,
    pub start_location: Location,
    pub start_address: Address,
    pub end_location: Location,
    pub end_address: Address,
    /// Encoded polyline of the route.
    pub path: Option<String>,
    pub fuel_cost_usd: Option<f64>,
    pub fuel_volume_l: Option<f64>,
    pub average_kmpl: Option<f64>,
    pub average_from_epa_kmpl: Option<f64>,
    pub score_events: Option<f64>,
    pub score_speeding: Option<f64>,
    pub hard_brakes: Option<i64>,
    pub hard_accels: Option<i64>,
    pub duration_over_70_s: Option<i64>,
    pub duration_over_75_s: Option<i64>,
    pub duration_over_80_s: Option<i64>,
    pub vehicle_events: Vec<VehicleEvent>,
    pub start_timezone: Option<String>,
    pub end_timezone: Option<String>,
    pub city_fraction: Option<f64>,
    pub highway_fraction: Option<f64>,
    pub night_driving_fraction: Option<f64>,
    pub idling_time_s: Option<i64>,
    pub tags: Vec<String>,
}

impl ResponseSchema for Trip {
    const NAME: &'static str = "TRIP";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                url: f.required("url", coerce::string)?,
                id: f.required("id", coerce::string)?,
                driver: f.required("driver", coerce::opt_str)?,
                user: f.opt("user", coerce::opt_str)?,
                started_at: f.opt("started_at", coerce::opt_datetime)?,
                ended_at: f.opt("ended_at", coerce::opt_datetime)?,
                distance_m: f.opt("distance_m", coerce::opt_float)?,
                duration_s: f.opt("duration_s", coerce::opt_float)?,
                vehicle: f.opt("vehicle", coerce::opt_str)?,
                start_location: f.nested("start_location")?,
                start_address: f.nested("start_address")?,
                end_location: f.nested("end_location")?,
                end_address: f.nested("end_address")?,
                path: f.opt("path", coerce::opt_str)?,
                fuel_cost_usd: f.opt("fuel_cost_usd", coerce::opt_float)?,
                fuel_volume_l: f.opt("fuel_volume_l", coerce::opt_float)?,
                average_kmpl: f.opt("average_kmpl", coerce::opt_float)?,
                average_from_epa_kmpl: f.opt("average_from_epa_kmpl", coerce::opt_float)?,
                score_events: f.opt("score_events", coerce::opt_float)?,
                score_speeding: f.opt("score_speeding", coerce::opt_float)?,
                hard_brakes: f.opt("hard_brakes", coerce::opt_int)?,
                hard_accels: f.opt("hard_accels", coerce::opt_int)?,
                duration_over_70_s: f.opt("duration_over_70_s", coerce::opt_int)?,
                duration_over_75_s: f.opt("duration_over_75_s", coerce::opt_int)?,
                duration_over_80_s: f.opt("duration_over_80_s", coerce::opt_int)?,
                vehicle_events: {
                    let config = f.config();
                    f.opt_or("vehicle_events", Vec::new(), |events| {
                        coerce::list(events, |event| VehicleEvent::validate_with(event, config))
                    })?
                },
                start_timezone: f.opt("start_timezone", coerce::opt_str)?,
                end_timezone: f.opt("end_timezone", coerce::opt_str)?,
                city_fraction: f.opt("city_fraction", coerce::opt_float)?,
                highway_fraction: f.opt("highway_fraction", coerce::opt_float)?,
                night_driving_fraction: f.opt("night_driving_fraction", coerce::opt_float)?,
                idling_time_s: f.opt("idling_time_s", coerce::opt_int)?,
                tags: f.required("tags", |tags| coerce::list(tags, coerce::string))?,
            })
        })
    }
}
