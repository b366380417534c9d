#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(warnings)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::ref_option)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
//! # automatic
//!
//! Request and response validation for the Automatic vehicle telematics REST
//! API (vehicles, trips, locations, driving events).
//!
//! The crate does no I/O. Client code validates query parameters before
//! sending them and validates parsed JSON bodies after receiving them:
//!
//! ```rust
//! use automatic::{Params, RequestSchema, ResponseSchema, Location, VehiclesRequest};
//! use serde_json::json;
//!
//! // Outbound: unknown or out-of-range parameters are rejected.
//! let params = Params::new().with("page", 1).with("limit", 250);
//! let request = VehiclesRequest::validate(&params).unwrap();
//! assert_eq!(request.query_string().unwrap(), "limit=250&page=1");
//! assert!(VehiclesRequest::validate(&Params::new().with("limit", 251)).is_err());
//!
//! // Inbound: unknown fields are dropped, types are checked and coerced.
//! let body = json!({"lat": 1.0, "lon": 2.0, "accuracy_m": 5.0, "heading": 90.0});
//! let location = Location::validate(&body).unwrap();
//! assert_eq!(location.to_value().unwrap(), json!({"lat": 1.0, "lon": 2.0, "accuracy_m": 5.0}));
//! ```
//!
//! Schemas can also be picked by name through [`Schema`], mapping in and
//! mapping out:
//!
//! ```rust
//! use automatic::registry::ADDRESS;
//! use serde_json::json;
//!
//! let address = ADDRESS.validate(&json!({})).unwrap();
//! assert_eq!(address["city"], json!(null));
//! ```

pub mod auth;
pub mod coerce;
pub mod config;
pub mod errors;
pub mod list;
pub mod params;
pub mod registry;
pub mod request;
pub mod schema;
pub mod trip;
pub mod vehicle;

/// JSON fixtures for tests of code built on this crate.
#[cfg(feature = "testing")]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use auth::{AuthToken, TokenType};
pub use coerce::{coerce_datetime, timestamp, DATETIME_FORMAT};
pub use config::{ExtraKeys, SchemaConfig};
pub use errors::{AutomaticError, ErrorKind, PathSegment, Result, ValidationError};
pub use list::{ListMetadata, ListResponse, TripList, VehicleList};
pub use params::{Param, Params};
pub use registry::{Schema, SchemaKind};
pub use request::{DevicesRequest, Limit, Page, TripsRequest, UserRequest, VehiclesRequest, MAX_LIMIT};
pub use schema::{Fields, RequestSchema, ResponseSchema};
pub use trip::{Address, Location, Trip};
pub use vehicle::{Vehicle, VehicleEvent};
