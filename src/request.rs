use crate::coerce::{self, serialize_timestamp};
use crate::errors::ValidationError;
use crate::params::Param;
use crate::schema::{Fields, RequestSchema};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Largest page size the API serves.
pub const MAX_LIMIT: u32 = 250;

// ---------------------------------------------------------------------------
// Pagination parameters
// ---------------------------------------------------------------------------

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Page(u64);

impl Page {
    pub fn new(page: i64) -> Result<Self, ValidationError> {
        let page = coerce::in_range(page, Some(1), None)?;
        Ok(Self(page.unsigned_abs()))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    fn from_param(param: &Param) -> Result<Self, ValidationError> {
        Self::new(param.expect_int()?)
    }
}

/// A page size in `1..=250`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Limit(u32);

impl Limit {
    pub fn new(limit: i64) -> Result<Self, ValidationError> {
        let limit = coerce::in_range(limit, Some(1), Some(i64::from(MAX_LIMIT)))?;
        Ok(Self(limit as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn from_param(param: &Param) -> Result<Self, ValidationError> {
        Self::new(param.expect_int()?)
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// Query parameters of the vehicle list endpoint.
///
/// # Example
///
/// ```rust
/// use automatic::{Limit, RequestSchema, VehiclesRequest};
/// use chrono::{TimeZone, Utc};
///
/// let request = VehiclesRequest::new()
///     .created_at_gte(Utc.with_ymd_and_hms(2017, 7, 14, 2, 40, 0).unwrap())
///     .limit(Limit::new(25).unwrap());
///
/// assert_eq!(
///     request.query_string().unwrap(),
///     "created_at__gte=1500000000.0&limit=25"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehiclesRequest {
    #[serde(
        rename = "created_at__lte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at_lte: Option<DateTime<Utc>>,
    #[serde(
        rename = "created_at__gte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at_gte: Option<DateTime<Utc>>,
    #[serde(
        rename = "updated_at__lte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at_lte: Option<DateTime<Utc>>,
    #[serde(
        rename = "updated_at__gte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at_gte: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl VehiclesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vehicles created at or before `at`.
    pub fn created_at_lte(mut self, at: DateTime<Utc>) -> Self {
        self.created_at_lte = Some(at);
        self
    }

    /// Vehicles created at or after `at`.
    pub fn created_at_gte(mut self, at: DateTime<Utc>) -> Self {
        self.created_at_gte = Some(at);
        self
    }

    /// Vehicles updated at or before `at`.
    pub fn updated_at_lte(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at_lte = Some(at);
        self
    }

    /// Vehicles updated at or after `at`.
    pub fn updated_at_gte(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at_gte = Some(at);
        self
    }

    pub fn vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = Some(vin.into());
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl RequestSchema for VehiclesRequest {
    const NAME: &'static str = "VEHICLES_REQUEST";

    fn from_fields(fields: &mut Fields<'_, Param>) -> Result<Self, ValidationError> {
        Ok(Self {
            created_at_lte: fields.optional("created_at__lte", Param::expect_datetime)?,
            created_at_gte: fields.optional("created_at__gte", Param::expect_datetime)?,
            updated_at_lte: fields.optional("updated_at__lte", Param::expect_datetime)?,
            updated_at_gte: fields.optional("updated_at__gte", Param::expect_datetime)?,
            vin: fields.optional("vin", Param::expect_str)?,
            page: fields.optional("page", Page::from_param)?,
            limit: fields.optional("limit", Limit::from_param)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Trips
// ---------------------------------------------------------------------------

/// Query parameters of the trip list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripsRequest {
    #[serde(
        rename = "started_at__lte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at_lte: Option<DateTime<Utc>>,
    #[serde(
        rename = "started_at__gte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at_gte: Option<DateTime<Utc>>,
    #[serde(
        rename = "ended_at__lte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at_lte: Option<DateTime<Utc>>,
    #[serde(
        rename = "ended_at__gte",
        serialize_with = "serialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at_gte: Option<DateTime<Utc>>,
    /// Vehicle id filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    /// Tag filter.
    #[serde(rename = "tags__in", skip_serializing_if = "Option::is_none")]
    pub tags_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl TripsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started_at_lte(mut self, at: DateTime<Utc>) -> Self {
        self.started_at_lte = Some(at);
        self
    }

    pub fn started_at_gte(mut self, at: DateTime<Utc>) -> Self {
        self.started_at_gte = Some(at);
        self
    }

    pub fn ended_at_lte(mut self, at: DateTime<Utc>) -> Self {
        self.ended_at_lte = Some(at);
        self
    }

    pub fn ended_at_gte(mut self, at: DateTime<Utc>) -> Self {
        self.ended_at_gte = Some(at);
        self
    }

    pub fn vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    pub fn tags_in(mut self, tags: impl Into<String>) -> Self {
        self.tags_in = Some(tags.into());
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl RequestSchema for TripsRequest {
    const NAME: &'static str = "TRIPS_REQUEST";

    fn from_fields(fields: &mut Fields<'_, Param>) -> Result<Self, ValidationError> {
        Ok(Self {
            started_at_lte: fields.optional("started_at__lte", Param::expect_datetime)?,
            started_at_gte: fields.optional("started_at__gte", Param::expect_datetime)?,
            ended_at_lte: fields.optional("ended_at__lte", Param::expect_datetime)?,
            ended_at_gte: fields.optional("ended_at__gte", Param::expect_datetime)?,
            vehicle: fields.optional("vehicle", Param::expect_str)?,
            tags_in: fields.optional("tags__in", Param::expect_str)?,
            page: fields.optional("page", Page::from_param)?,
            limit: fields.optional("limit", Limit::from_param)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// Query parameters of the device list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DevicesRequest {
    #[serde(
        rename = "device__serial_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl DevicesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl RequestSchema for DevicesRequest {
    const NAME: &'static str = "DEVICES_REQUEST";

    fn from_fields(fields: &mut Fields<'_, Param>) -> Result<Self, ValidationError> {
        Ok(Self {
            serial_number: fields.optional("device__serial_number", Param::expect_str)?,
            page: fields.optional("page", Page::from_param)?,
            limit: fields.optional("limit", Limit::from_param)?,
        })
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Selects the user whose profile is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl UserRequest {
    /// Id used when none is given: the authorized user.
    pub const CURRENT_USER: &'static str = "me";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The requested user id, or [`CURRENT_USER`](Self::CURRENT_USER).
    pub fn user_id(&self) -> &str {
        self.id.as_deref().unwrap_or(Self::CURRENT_USER)
    }
}

impl RequestSchema for UserRequest {
    const NAME: &'static str = "USER_REQUEST";

    fn from_fields(fields: &mut Fields<'_, Param>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: fields.optional("id", Param::expect_str)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_limit_bounds() {
        assert!(Page::new(0).unwrap_err().is_out_of_range());
        assert_eq!(Page::new(1).unwrap().get(), 1);
        assert!(Limit::new(0).is_err());
        assert_eq!(Limit::new(250).unwrap().get(), 250);
        assert!(Limit::new(251).is_err());
    }

    #[test]
    fn test_user_id_defaults_to_me() {
        assert_eq!(UserRequest::new().user_id(), "me");
        assert_eq!(UserRequest::new().id("U_123").user_id(), "U_123");
    }
}
