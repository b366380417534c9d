//! Named access to every schema.
//!
//! The typed records ([`Trip`], [`VehiclesRequest`], ...) are the primary API.
//! [`Schema`] adds the mapping-in, mapping-out view for callers that hold raw
//! data and pick the schema by name at runtime.

use crate::auth::AuthToken;
use crate::config::SchemaConfig;
use crate::errors::{AutomaticError, ValidationError};
use crate::list::{ListMetadata, ListResponse, TripList, VehicleList};
use crate::params::Params;
use crate::request::{DevicesRequest, TripsRequest, UserRequest, VehiclesRequest};
use crate::schema::{RequestSchema, ResponseSchema};
use crate::trip::{Address, Location, Trip};
use crate::vehicle::{Vehicle, VehicleEvent};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Whether a schema validates outbound parameters or inbound bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Request,
    Response,
}

impl SchemaKind {
    fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Request => "request",
            SchemaKind::Response => "response",
        }
    }
}

/// Every schema the client validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    VehiclesRequest,
    TripsRequest,
    DevicesRequest,
    UserRequest,
    AuthToken,
    ListMetadata,
    ListResponse,
    VehicleList,
    TripList,
    Vehicle,
    Location,
    Address,
    VehicleEvent,
    Trip,
}

pub const VEHICLES_REQUEST: Schema = Schema::VehiclesRequest;
pub const TRIPS_REQUEST: Schema = Schema::TripsRequest;
pub const DEVICES_REQUEST: Schema = Schema::DevicesRequest;
pub const USER_REQUEST: Schema = Schema::UserRequest;
pub const AUTH_TOKEN: Schema = Schema::AuthToken;
pub const LIST_METADATA: Schema = Schema::ListMetadata;
pub const LIST_RESPONSE: Schema = Schema::ListResponse;
pub const VEHICLE_LIST: Schema = Schema::VehicleList;
pub const TRIP_LIST: Schema = Schema::TripList;
pub const VEHICLE: Schema = Schema::Vehicle;
pub const LOCATION: Schema = Schema::Location;
pub const ADDRESS: Schema = Schema::Address;
pub const VEHICLE_EVENT: Schema = Schema::VehicleEvent;
pub const TRIP: Schema = Schema::Trip;

impl Schema {
    pub const ALL: [Schema; 14] = [
        Schema::VehiclesRequest,
        Schema::TripsRequest,
        Schema::DevicesRequest,
        Schema::UserRequest,
        Schema::AuthToken,
        Schema::ListMetadata,
        Schema::ListResponse,
        Schema::VehicleList,
        Schema::TripList,
        Schema::Vehicle,
        Schema::Location,
        Schema::Address,
        Schema::VehicleEvent,
        Schema::Trip,
    ];

    /// Canonical constant name, e.g. `"VEHICLES_REQUEST"`.
    pub fn name(self) -> &'static str {
        match self {
            Schema::VehiclesRequest => VehiclesRequest::NAME,
            Schema::TripsRequest => TripsRequest::NAME,
            Schema::DevicesRequest => DevicesRequest::NAME,
            Schema::UserRequest => UserRequest::NAME,
            Schema::AuthToken => AuthToken::NAME,
            Schema::ListMetadata => ListMetadata::NAME,
            Schema::ListResponse => "LIST_RESPONSE",
            Schema::VehicleList => "VEHICLE_LIST",
            Schema::TripList => "TRIP_LIST",
            Schema::Vehicle => Vehicle::NAME,
            Schema::Location => Location::NAME,
            Schema::Address => Address::NAME,
            Schema::VehicleEvent => VehicleEvent::NAME,
            Schema::Trip => Trip::NAME,
        }
    }

    pub fn kind(self) -> SchemaKind {
        match self {
            Schema::VehiclesRequest
            | Schema::TripsRequest
            | Schema::DevicesRequest
            | Schema::UserRequest => SchemaKind::Request,
            _ => SchemaKind::Response,
        }
    }

    /// Resolve a schema by its constant name.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|schema| schema.name() == name)
    }

    /// Validate a response body with the default (tolerant) configuration.
    pub fn validate(self, value: &Value) -> crate::Result<Value> {
        self.validate_with(value, SchemaConfig::RESPONSE)
    }

    /// Validate a response body and return the coerced mapping.
    pub fn validate_with(self, value: &Value, config: SchemaConfig) -> crate::Result<Value> {
        match self {
            Schema::AuthToken => self.coerce::<AuthToken>(value, config),
            Schema::ListMetadata => self.coerce::<ListMetadata>(value, config),
            Schema::ListResponse => self.coerce::<ListResponse>(value, config),
            Schema::VehicleList => self.coerce::<VehicleList>(value, config),
            Schema::TripList => self.coerce::<TripList>(value, config),
            Schema::Vehicle => self.coerce::<Vehicle>(value, config),
            Schema::Location => self.coerce::<Location>(value, config),
            Schema::Address => self.coerce::<Address>(value, config),
            Schema::VehicleEvent => self.coerce::<VehicleEvent>(value, config),
            Schema::Trip => self.coerce::<Trip>(value, config),
            Schema::VehiclesRequest
            | Schema::TripsRequest
            | Schema::DevicesRequest
            | Schema::UserRequest => Err(self.wrong_kind()),
        }
    }

    /// Validate outbound parameters with the default (closed) configuration.
    pub fn validate_params(self, params: &Params) -> crate::Result<Map<String, Value>> {
        self.validate_params_with(params, SchemaConfig::REQUEST)
    }

    /// Validate outbound parameters and return the coerced mapping.
    pub fn validate_params_with(
        self,
        params: &Params,
        config: SchemaConfig,
    ) -> crate::Result<Map<String, Value>> {
        match self {
            Schema::VehiclesRequest => self.coerce_params::<VehiclesRequest>(params, config),
            Schema::TripsRequest => self.coerce_params::<TripsRequest>(params, config),
            Schema::DevicesRequest => self.coerce_params::<DevicesRequest>(params, config),
            Schema::UserRequest => self.coerce_params::<UserRequest>(params, config),
            _ => Err(self.wrong_kind()),
        }
    }

    fn coerce<T: ResponseSchema>(self, value: &Value, config: SchemaConfig) -> crate::Result<Value> {
        let record = T::validate_with(value, config).map_err(|e| self.failed(e))?;
        record.to_value()
    }

    fn coerce_params<T: RequestSchema>(
        self,
        params: &Params,
        config: SchemaConfig,
    ) -> crate::Result<Map<String, Value>> {
        let request = T::validate_with(params, config).map_err(|e| self.failed(e))?;
        request.to_params()
    }

    fn failed(self, err: ValidationError) -> AutomaticError {
        tracing::debug!(schema = self.name(), error = %err, "validation failed");
        AutomaticError::from(err)
    }

    fn wrong_kind(self) -> AutomaticError {
        AutomaticError::WrongSchemaKind {
            schema: self.name(),
            expected: self.kind().as_str(),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Schema {
    type Err = AutomaticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| AutomaticError::UnknownSchema(s.to_string()))
    }
}
