//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{BlogId, Error, RegistrationError, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    EmptyField,
    TooShort,
    TooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_min(self, code: ErrorCode, min: usize) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "min": min,
            "code": code.as_str(),
        }))
    }

    fn with_max(self, code: ErrorCode, max: usize) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "max": max,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} is not a valid identifier"))
        .with_value(ErrorCode::InvalidId, value)
}

/// Parse a blog identifier from a path segment.
pub(crate) fn parse_blog_id(value: &str, field: FieldName) -> Result<BlogId, Error> {
    BlogId::new(value).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn registration_error(err: RegistrationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationError::User(UserValidationError::EmptyUsername) => {
            ValidationError::new("username", message).with_code(ErrorCode::EmptyField)
        }
        RegistrationError::User(UserValidationError::UsernameTooShort { min }) => {
            ValidationError::new("username", message).with_min(ErrorCode::TooShort, min)
        }
        RegistrationError::User(UserValidationError::UsernameTooLong { max }) => {
            ValidationError::new("username", message).with_max(ErrorCode::TooLong, max)
        }
        RegistrationError::User(UserValidationError::EmptyName) => {
            ValidationError::new("name", message).with_code(ErrorCode::EmptyField)
        }
        RegistrationError::User(UserValidationError::NameTooLong { max }) => {
            ValidationError::new("name", message).with_max(ErrorCode::TooLong, max)
        }
        RegistrationError::User(UserValidationError::EmptyId | UserValidationError::InvalidId) => {
            ValidationError::new("id", message).with_code(ErrorCode::InvalidId)
        }
        RegistrationError::EmptyPassword => {
            ValidationError::new("password", message).with_code(ErrorCode::EmptyField)
        }
        RegistrationError::PasswordTooShort { min } => {
            ValidationError::new("password", message).with_min(ErrorCode::TooShort, min)
        }
    }
}
