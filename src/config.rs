/// What a schema does with keys it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraKeys {
    /// Fail validation with [`ErrorKind::ExtraKey`](crate::errors::ErrorKind::ExtraKey).
    Reject,
    /// Drop the key from the validated output.
    Remove,
}

/// Per-call validation settings.
///
/// Request schemas default to [`SchemaConfig::REQUEST`] (unknown parameters are
/// a caller bug) and response schemas to [`SchemaConfig::RESPONSE`] (the API
/// may add fields at any time). Override either when needed.
///
/// # Example
///
/// ```rust
/// use automatic::{ExtraKeys, Location, ResponseSchema, SchemaConfig};
/// use serde_json::json;
///
/// // Catch API additions in a contract test.
/// let strict = SchemaConfig::RESPONSE.extra(ExtraKeys::Reject);
/// let body = json!({"lat": 1.0, "lon": 2.0, "accuracy_m": 5.0, "altitude": 3.0});
///
/// assert!(Location::validate(&body).is_ok());
/// assert!(Location::validate_with(&body, strict).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Extra-key policy, applied to nested objects as well.
    pub extra: ExtraKeys,
}

impl SchemaConfig {
    /// Closed schema: undeclared keys fail validation.
    pub const REQUEST: Self = Self {
        extra: ExtraKeys::Reject,
    };

    /// Tolerant schema: undeclared keys are discarded.
    pub const RESPONSE: Self = Self {
        extra: ExtraKeys::Remove,
    };

    /// Set the extra-key policy.
    pub const fn extra(mut self, extra: ExtraKeys) -> Self {
        self.extra = extra;
        self
    }

    /// Returns `true` if undeclared keys fail validation.
    pub const fn rejects_extra(&self) -> bool {
        matches!(self.extra, ExtraKeys::Reject)
    }
}
