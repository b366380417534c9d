use crate::config::{ExtraKeys, SchemaConfig};
use crate::errors::{AutomaticError, ErrorKind, ValidationError};
use crate::params::{Param, Params};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Schema traits
// ---------------------------------------------------------------------------

/// A typed record validated from a parsed JSON response body.
///
/// Validation is all-or-nothing: the first failing field fails the whole
/// object, with the error path pointing at the field.
pub trait ResponseSchema: Sized + Serialize {
    /// Registry name of the schema (e.g. `"TRIP"`).
    const NAME: &'static str;

    /// Validate `value` with an explicit configuration.
    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError>;

    /// Validate `value`, discarding undeclared keys.
    fn validate(value: &Value) -> Result<Self, ValidationError> {
        Self::validate_with(value, SchemaConfig::RESPONSE)
    }

    /// The coerced mapping: every declared key present, absent optionals as null.
    fn to_value(&self) -> crate::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A typed record validated from an outbound parameter mapping.
pub trait RequestSchema: Sized + Serialize {
    /// Registry name of the schema (e.g. `"VEHICLES_REQUEST"`).
    const NAME: &'static str;

    /// Read the declared parameters. Every key is optional.
    fn from_fields(fields: &mut Fields<'_, Param>) -> Result<Self, ValidationError>;

    /// Validate `params` with an explicit configuration.
    fn validate_with(params: &Params, config: SchemaConfig) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(params.iter(), config);
        let request = Self::from_fields(&mut fields)?;
        fields.finish()?;
        Ok(request)
    }

    /// Validate `params`, rejecting undeclared keys.
    fn validate(params: &Params) -> Result<Self, ValidationError> {
        Self::validate_with(params, SchemaConfig::REQUEST)
    }

    /// The coerced mapping: only keys that were set, date-time filters as
    /// epoch seconds.
    fn to_params(&self) -> crate::Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(AutomaticError::Serialization(format!(
                "{} rendered as {} instead of a mapping",
                Self::NAME,
                other
            ))),
        }
    }

    /// URL-encoded `key=value&...` query string of the coerced mapping.
    fn query_string(&self) -> crate::Result<String> {
        let params = self.to_params()?;
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &params {
            match value {
                Value::String(s) => query.append_pair(key, s),
                other => query.append_pair(key, &other.to_string()),
            };
        }
        Ok(query.finish())
    }
}

/// Unconstrained JSON, the element rule of the generic list envelope.
impl ResponseSchema for Value {
    const NAME: &'static str = "ANY";

    fn validate_with(value: &Value, _config: SchemaConfig) -> Result<Self, ValidationError> {
        Ok(value.clone())
    }
}

// ---------------------------------------------------------------------------
// Field reader
// ---------------------------------------------------------------------------

/// Reads declared keys out of one mapping and tracks which keys were declared,
/// so that [`finish`](Fields::finish) can apply the extra-key policy.
///
/// Errors raised by a rule are prefixed with the key they were read from.
#[derive(Debug)]
pub struct Fields<'a, V> {
    entries: BTreeMap<&'a str, &'a V>,
    declared: Vec<&'a str>,
    config: SchemaConfig,
}

impl<'a, V> Fields<'a, V> {
    pub fn new<I>(entries: I, config: SchemaConfig) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a V)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.as_str(), value))
                .collect(),
            declared: Vec::new(),
            config,
        }
    }

    /// The configuration nested schemas should inherit.
    pub fn config(&self) -> SchemaConfig {
        self.config
    }

    fn take(&mut self, key: &'static str) -> Option<&'a V> {
        self.declared.push(key);
        self.entries.get(key).copied()
    }

    /// A key that must be present.
    pub fn required<T>(
        &mut self,
        key: &'static str,
        rule: impl FnOnce(&'a V) -> Result<T, ValidationError>,
    ) -> Result<T, ValidationError> {
        let value = self
            .take(key)
            .ok_or_else(|| ValidationError::new(ErrorKind::MissingKey).at(key))?;
        rule(value).map_err(|e| e.at(key))
    }

    /// A key that may be absent; absence yields `None`.
    pub fn optional<T>(
        &mut self,
        key: &'static str,
        rule: impl FnOnce(&'a V) -> Result<T, ValidationError>,
    ) -> Result<Option<T>, ValidationError> {
        match self.take(key) {
            Some(value) => rule(value).map(Some).map_err(|e| e.at(key)),
            None => Ok(None),
        }
    }

    /// Optional key with a null default, read through a nullable rule.
    /// Absent and null both yield `None`.
    pub fn opt<T>(
        &mut self,
        key: &'static str,
        rule: impl FnOnce(&'a V) -> Result<Option<T>, ValidationError>,
    ) -> Result<Option<T>, ValidationError> {
        Ok(self.optional(key, rule)?.flatten())
    }

    /// Optional key replaced by `default` when absent.
    pub fn opt_or<T>(
        &mut self,
        key: &'static str,
        default: T,
        rule: impl FnOnce(&'a V) -> Result<T, ValidationError>,
    ) -> Result<T, ValidationError> {
        Ok(self.optional(key, rule)?.unwrap_or(default))
    }

    /// Apply the extra-key policy to every key no rule asked for.
    pub fn finish(self) -> Result<(), ValidationError> {
        for key in self.entries.keys() {
            if self.declared.contains(key) {
                continue;
            }
            match self.config.extra {
                ExtraKeys::Reject => {
                    return Err(ValidationError::new(ErrorKind::ExtraKey).at(*key));
                }
                ExtraKeys::Remove => {
                    tracing::trace!(key = %key, "discarding undeclared field");
                }
            }
        }
        Ok(())
    }
}

impl<'a> Fields<'a, Value> {
    /// Run `build` over the keys of a JSON object, then apply the extra-key
    /// policy.
    pub fn object<T>(
        value: &'a Value,
        config: SchemaConfig,
        build: impl FnOnce(&mut Self) -> Result<T, ValidationError>,
    ) -> Result<T, ValidationError> {
        let map = value.as_object().ok_or_else(|| {
            ValidationError::new(ErrorKind::InvalidType {
                expected: "dictionary",
            })
            .with_received(value.clone())
        })?;
        let mut fields = Self::new(map, config);
        let record = build(&mut fields)?;
        fields.finish()?;
        Ok(record)
    }

    /// A required key holding a nested schema.
    pub fn nested<T: ResponseSchema>(&mut self, key: &'static str) -> Result<T, ValidationError> {
        let config = self.config;
        self.required(key, |value| T::validate_with(value, config))
    }
}
