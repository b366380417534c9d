use crate::coerce;
use crate::config::SchemaConfig;
use crate::errors::ValidationError;
use crate::schema::{Fields, ResponseSchema};
use crate::trip::Trip;
use crate::vehicle::Vehicle;
use serde::Serialize;
use serde_json::Value;

/// Pagination metadata of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMetadata {
    /// Total number of results across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
}

impl ListMetadata {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl ResponseSchema for ListMetadata {
    const NAME: &'static str = "LIST_METADATA";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                count: f.required("count", coerce::non_negative_integer)?,
                next: f.required("next", coerce::opt_str)?,
                previous: f.required("previous", coerce::opt_str)?,
            })
        })
    }
}

/// Pagination envelope around one page of results.
///
/// The default element type keeps results as raw JSON; the endpoint specific
/// aliases [`VehicleList`] and [`TripList`] validate every result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse<T = Value> {
    #[serde(rename = "_metadata")]
    pub metadata: ListMetadata,
    pub results: Vec<T>,
}

/// One page of the vehicle list endpoint.
pub type VehicleList = ListResponse<Vehicle>;

/// One page of the trip list endpoint.
pub type TripList = ListResponse<Trip>;

impl<T: ResponseSchema> ResponseSchema for ListResponse<T> {
    const NAME: &'static str = "LIST_RESPONSE";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                metadata: f.nested("_metadata")?,
                results: f.required("results", |results| {
                    coerce::list(results, |item| T::validate_with(item, config))
                })?,
            })
        })
    }
}

impl<T> ListResponse<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListResponse<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
