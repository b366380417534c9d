use crate::errors::{ErrorKind, ValidationError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single outbound query parameter value.
///
/// Date-time filters must be passed as [`Param::DateTime`]; the request
/// schemas convert them to epoch seconds and refuse pre-formatted strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

impl Param {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Param::Str(_) => "string",
            Param::Int(_) => "integer",
            Param::Float(_) => "float",
            Param::Bool(_) => "bool",
            Param::DateTime(_) => "datetime",
        }
    }

    /// JSON rendering of the raw value, used to report what was received.
    pub fn to_json(&self) -> Value {
        match self {
            Param::Str(s) => Value::String(s.clone()),
            Param::Int(i) => Value::from(*i),
            Param::Float(f) => Value::from(*f),
            Param::Bool(b) => Value::Bool(*b),
            Param::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }

    pub(crate) fn expect_str(&self) -> Result<String, ValidationError> {
        match self {
            Param::Str(s) => Ok(s.clone()),
            other => Err(other.invalid("string")),
        }
    }

    pub(crate) fn expect_int(&self) -> Result<i64, ValidationError> {
        match self {
            Param::Int(i) => Ok(*i),
            other => Err(other.invalid("integer")),
        }
    }

    pub(crate) fn expect_datetime(&self) -> Result<DateTime<Utc>, ValidationError> {
        match self {
            Param::DateTime(dt) => Ok(*dt),
            other => Err(other.invalid("datetime")),
        }
    }

    fn invalid(&self, expected: &'static str) -> ValidationError {
        ValidationError::new(ErrorKind::InvalidType { expected }).with_received(self.to_json())
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(value: DateTime<Utc>) -> Self {
        Param::DateTime(value)
    }
}

/// Naive date-times are taken to be UTC.
impl From<NaiveDateTime> for Param {
    fn from(value: NaiveDateTime) -> Self {
        Param::DateTime(value.and_utc())
    }
}

/// An outbound parameter mapping, the input of every request schema.
///
/// # Example
///
/// ```rust
/// use automatic::{Params, RequestSchema, VehiclesRequest};
///
/// let params = Params::new().with("vin", "1FTFW1ET5DFC10312").with("limit", 50);
/// let request = VehiclesRequest::validate(&params).unwrap();
/// assert_eq!(request.vin.as_deref(), Some("1FTFW1ET5DFC10312"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, Param>);

impl Params {
    /// Create an empty parameter mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) -> Option<Param> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Param)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_params_builder_and_lookup() {
        let params = Params::new().with("page", 2).with("vin", "abc");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("page"), Some(&Param::Int(2)));
        assert_eq!(params.get("vin"), Some(&Param::Str("abc".into())));
        assert!(params.get("limit").is_none());
    }

    #[test]
    fn test_naive_datetime_is_utc() {
        let naive = NaiveDateTime::parse_from_str("2017-01-01T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let expected = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Param::from(naive), Param::DateTime(expected));
    }

    #[test]
    fn test_expect_datetime_rejects_strings() {
        let err = Param::from("2017-01-01T00:00:00").expect_datetime().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidType { expected: "datetime" });
        assert_eq!(err.received, Some(Value::String("2017-01-01T00:00:00".into())));
    }
}
