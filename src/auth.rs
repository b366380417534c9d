use crate::coerce;
use crate::config::SchemaConfig;
use crate::errors::ValidationError;
use crate::schema::{Fields, ResponseSchema};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Token types the API issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    Bearer,
}

impl TokenType {
    pub const ALLOWED: &'static [&'static str] = &["Bearer"];

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        coerce::one_of(value, Self::ALLOWED).map(|_| TokenType::Bearer)
    }
}

/// OAuth2 token payload returned by the authorization and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    pub scope: String,
    pub refresh_token: String,
    pub token_type: TokenType,
}

impl AuthToken {
    /// Lifetime of the access token; negative values count as expired.
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.expires_in.max(0) as u64)
    }
}

impl ResponseSchema for AuthToken {
    const NAME: &'static str = "AUTH_TOKEN";

    fn validate_with(value: &Value, config: SchemaConfig) -> Result<Self, ValidationError> {
        Fields::object(value, config, |f| {
            Ok(Self {
                access_token: f.required("access_token", coerce::string)?,
                expires_in: f.required("expires_in", coerce::integer)?,
                scope: f.required("scope", coerce::string)?,
                refresh_token: f.required("refresh_token", coerce::string)?,
                token_type: f.required("token_type", TokenType::from_value)?,
            })
        })
    }
}
