use crate::coerce::{self, serialize_opt_datetime};
use crate::config::SchemaConfig;
use crate::errors::ValidationError;
use crate::schema::{Fields, ResponseSchema};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// A vehicle connected to the user's account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    /// Canonical resource URL.
    pub url: String,
    pub id: String,
    pub vin: Option<String>,
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub updated_at: Option<NaiveDateTime>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub submodel: Option<String>,
    pub display_name: Option<String>,
    pub fuel_grade: Option<String>,
    pub fuel_level_percent: Option<f64>,
    pub battery_voltage: Option<f64>,
}

impl ResponseSchema for Vehicle {
    const NAME: &'static str = "VEHICLE";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                url: f.required("url", coerce::string)?,
                id: f.required("id", coerce::string)?,
                vin: f.opt("vin", coerce::opt_str)?,
                created_at: f.opt("created_at", coerce::opt_datetime)?,
                updated_at: f.opt("updated_at", coerce::opt_datetime)?,
                make: f.opt("make", coerce::opt_str)?,
                model: f.opt("model", coerce::opt_str)?,
                year: f.opt("year", coerce::opt_int)?,
                submodel: f.opt("submodel", coerce::opt_str)?,
                display_name: f.opt("display_name", coerce::opt_str)?,
                fuel_grade: f.opt("fuel_grade", coerce::opt_str)?,
                fuel_level_percent: f.opt("fuel_level_percent", coerce::opt_float)?,
                battery_voltage: f.opt("battery_voltage", coerce::opt_float)?,
            })
        })
    }
}

/// A driving event recorded during a trip (hard brake, speeding, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleEvent {
    /// Event type, e.g. `"hard_brake"`.
    #[serde(rename = "type")]
    pub event_type: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(serialize_with = "serialize_opt_datetime")]
    pub created_at: Option<NaiveDateTime>,
    pub g_force: Option<f64>,
}

impl ResponseSchema for VehicleEvent {
    const NAME: &'static str = "VEHICLE_EVENT";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                event_type: f.required("type", coerce::string)?,
                lat: f.opt("lat", coerce::opt_float)?,
                lon: f.opt("lon", coerce::opt_float)?,
                created_at: f.opt("created_at", coerce::opt_datetime)?,
                g_force: f.opt("g_force", coerce::opt_float)?,
            })
        })
    }
}
