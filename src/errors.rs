use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Main crate error type
// ---------------------------------------------------------------------------

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum AutomaticError {
    /// A request or response mapping failed schema validation.
    #[error("validation error: {0}")]
    Validation(Box<ValidationError>),

    /// Serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// No schema is registered under the given name.
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    /// A request schema was handed a response body, or the other way round.
    #[error("schema {schema} validates {expected} mappings")]
    WrongSchemaKind {
        schema: &'static str,
        expected: &'static str,
    },
}

impl From<ValidationError> for AutomaticError {
    fn from(err: ValidationError) -> Self {
        AutomaticError::Validation(Box::new(err))
    }
}

impl From<serde_json::Error> for AutomaticError {
    fn from(err: serde_json::Error) -> Self {
        AutomaticError::Serialization(err.to_string())
    }
}

impl AutomaticError {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AutomaticError::Validation(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation error
// ---------------------------------------------------------------------------

/// One step of the path leading to an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key inside a mapping.
    Key(String),
    /// A position inside a list.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "['{}']", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// The constraint a value violated.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// A required key was absent.
    MissingKey,
    /// A key was present that the schema does not declare.
    ExtraKey,
    /// The value had the wrong type (e.g. `"float"`, `"datetime"`).
    InvalidType { expected: &'static str },
    /// A string did not match the expected date-time format.
    InvalidFormat { format: &'static str },
    /// A number fell outside its permitted range (bounds inclusive).
    OutOfRange { min: Option<i64>, max: Option<i64> },
    /// The value was not one of the permitted literals.
    NotAllowed { allowed: &'static [&'static str] },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingKey => f.write_str("required key not provided"),
            ErrorKind::ExtraKey => f.write_str("extra keys not allowed"),
            ErrorKind::InvalidType { expected } => write!(f, "expected {}", expected),
            ErrorKind::InvalidFormat { format } => {
                write!(f, "value does not match expected format {}", format)
            }
            ErrorKind::OutOfRange {
                min: Some(min),
                max: Some(max),
            } => write!(f, "value must be between {} and {}", min, max),
            ErrorKind::OutOfRange {
                min: Some(min),
                max: None,
            } => write!(f, "value must be at least {}", min),
            ErrorKind::OutOfRange {
                min: None,
                max: Some(max),
            } => write!(f, "value must be at most {}", max),
            ErrorKind::OutOfRange {
                min: None,
                max: None,
            } => f.write_str("value out of range"),
            ErrorKind::NotAllowed { allowed } => {
                write!(f, "value must be one of {:?}", allowed)
            }
        }
    }
}

/// A validation failure: where it happened, what was expected, what was received.
///
/// The path is built innermost-first while the failure propagates out of
/// nested schemas, so a bad latitude inside a trip renders as
/// `expected float @ data['start_location']['lat']`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub path: Vec<PathSegment>,
    pub kind: ErrorKind,
    pub received: Option<Value>,
}

impl ValidationError {
    /// Create an error at the root of the current mapping.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
            received: None,
        }
    }

    /// Attach the offending value.
    pub fn with_received(mut self, value: impl Into<Value>) -> Self {
        self.received = Some(value.into());
        self
    }

    /// Prefix the path with a mapping key.
    pub fn at(mut self, key: impl Into<String>) -> Self {
        self.path.insert(0, PathSegment::Key(key.into()));
        self
    }

    /// Prefix the path with a list index.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// Renders the path as `data['a'][0]['b']`.
    pub fn path_string(&self) -> String {
        let mut out = String::from("data");
        for segment in &self.path {
            out.push_str(&segment.to_string());
        }
        out
    }

    /// Returns `true` if a required key was missing.
    pub fn is_missing_key(&self) -> bool {
        self.kind == ErrorKind::MissingKey
    }

    /// Returns `true` if an undeclared key was present.
    pub fn is_extra_key(&self) -> bool {
        self.kind == ErrorKind::ExtraKey
    }

    /// Returns `true` if a numeric range was violated.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::OutOfRange { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} @ {}", self.kind, self.path_string())
        }
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// Result type alias
// ---------------------------------------------------------------------------

pub type Result<T> = std::result::Result<T, AutomaticError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_path_rendering() {
        let err = ValidationError::new(ErrorKind::InvalidType { expected: "float" })
            .with_received(json!("north"))
            .at("lat")
            .at_index(2)
            .at("vehicle_events");

        assert_eq!(err.path_string(), "data['vehicle_events'][2]['lat']");
        assert_eq!(
            err.to_string(),
            "expected float @ data['vehicle_events'][2]['lat']"
        );
        assert_eq!(err.received, Some(json!("north")));
    }

    #[test]
    fn test_root_error_has_no_path_suffix() {
        let err = ValidationError::new(ErrorKind::InvalidType {
            expected: "dictionary",
        });
        assert_eq!(err.to_string(), "expected dictionary");
    }
}
