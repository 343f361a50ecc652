//! Error types for donationcart.
//!
//! This module defines all error types used throughout the donationcart crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A donor form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The donor's name.
    DonorName,
    /// The donor's email address.
    DonorEmail,
    /// The honoree's name (for in-honor and in-memory donations).
    HonoreeName,
    /// The matching employer's name.
    EmployerName,
    /// The matching employer's contact email.
    EmployerEmail,
}

impl Field {
    /// The form field name, as the checkout form labels it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DonorName => "donorName",
            Self::DonorEmail => "donorEmail",
            Self::HonoreeName => "honoreeName",
            Self::EmployerName => "employerName",
            Self::EmployerEmail => "employerEmail",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected donor form field, with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: Field,
    /// Why the field was rejected.
    pub reason: String,
}

impl ValidationError {
    /// A required field was left empty.
    #[must_use]
    pub fn missing(field: Field) -> Self {
        Self {
            field,
            reason: "is required".to_string(),
        }
    }

    /// A field was present but malformed.
    #[must_use]
    pub fn malformed(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// The main error type for donationcart operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Checkout Errors ===
    /// A donor form field failed validation.
    #[error("validation failed for {0}")]
    Validation(#[from] ValidationError),

    /// Checkout was attempted with no items in the cart.
    #[error("the donation cart is empty")]
    EmptyCart,

    /// A second submission was attempted for the same checkout.
    #[error("this donation has already been submitted")]
    AlreadySubmitted,

    // === Cart Errors ===
    /// A donation amount was zero or could not be parsed.
    #[error("invalid donation amount: {message}")]
    InvalidAmount {
        /// Description of what was wrong with the amount.
        message: String,
    },

    /// A subtotal, fee or total did not fit in the cents representation.
    #[error("donation total is too large to represent")]
    AmountOverflow,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Session Errors ===
    /// Failed to read a session file.
    #[error("failed to read session file {path}: {source}")]
    SessionLoad {
        /// Path to the session file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for donationcart operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid amount error.
    #[must_use]
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount {
            message: message.into(),
        }
    }

    /// The validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this error is a donor form validation failure.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from submitting an empty cart.
    #[must_use]
    pub fn is_empty_cart(&self) -> bool {
        matches!(self, Self::EmptyCart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyCart;
        assert_eq!(err.to_string(), "the donation cart is empty");

        let err = Error::AmountOverflow;
        assert_eq!(err.to_string(), "donation total is too large to represent");
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::DonorName.to_string(), "donorName");
        assert_eq!(Field::DonorEmail.to_string(), "donorEmail");
        assert_eq!(Field::HonoreeName.to_string(), "honoreeName");
        assert_eq!(Field::EmployerName.to_string(), "employerName");
        assert_eq!(Field::EmployerEmail.to_string(), "employerEmail");
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = Error::from(ValidationError::missing(Field::DonorEmail));
        let msg = err.to_string();
        assert!(msg.contains("donorEmail"));
        assert!(msg.contains("required"));
    }

    #[test]
    fn test_as_validation() {
        let err = Error::from(ValidationError::missing(Field::DonorName));
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.field, Field::DonorName);

        assert!(Error::EmptyCart.as_validation().is_none());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Error::from(ValidationError::missing(Field::DonorName)).is_validation_error());
        assert!(!Error::AlreadySubmitted.is_validation_error());
    }

    #[test]
    fn test_is_empty_cart() {
        assert!(Error::EmptyCart.is_empty_cart());
        assert!(!Error::AlreadySubmitted.is_empty_cart());
    }

    #[test]
    fn test_malformed_validation_error() {
        let err = ValidationError::malformed(Field::DonorEmail, "not an email address");
        assert_eq!(err.to_string(), "donorEmail: not an email address");
    }

    #[test]
    fn test_invalid_amount_display() {
        let err = Error::invalid_amount("amount must be greater than zero");
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "percent_bps too large".to_string(),
        };
        assert!(err.to_string().contains("percent_bps"));
    }

    #[test]
    fn test_session_load_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::SessionLoad {
            path: PathBuf::from("/tmp/session.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/session.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }
}
