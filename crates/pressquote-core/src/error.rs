//! # Error Types
//!
//! Domain-specific error types for pressquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pressquote-core errors (this file)                                    │
//! │  ├── CoreError        - Rate card and request handling errors          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote-cli errors (app)                                                │
//! │  └── ConfigError      - Configuration loading failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (binary boundary)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculators themselves have no error path: every lookup has a defined
//! fallback. Errors only come from validating caller input and from loading a
//! custom rate card.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised around the pricing engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A rate card failed its consistency checks.
    ///
    /// ## When This Occurs
    /// - A table contains a negative rate
    /// - A threshold table is empty
    /// - A lamination orientation or fold count has no rates
    #[error("Invalid rate card: {reason}")]
    InvalidRateCard { reason: String },

    /// A rate card document could not be parsed.
    #[error("Rate card parse error: {0}")]
    RateCardParse(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These mirror the checks the quote wizard enforces before a job reaches the
/// calculators.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is below its minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Value exceeds its maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be a multiple of a step (page counts).
    #[error("{field} must be a multiple of {multiple}")]
    NotMultipleOf { field: String, multiple: u32 },

    /// Invalid format (e.g., a finished format that is not WIDTHxHEIGHT).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Option combination is not allowed.
    #[error("{field} is not allowed: {reason}")]
    NotAllowed { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotMultipleOf {
            field: "interiorPages".to_string(),
            multiple: 4,
        };
        assert_eq!(err.to_string(), "interiorPages must be a multiple of 4");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "deliveries".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: deliveries is required");
    }

    #[test]
    fn test_rate_card_error_message() {
        let err = CoreError::InvalidRateCard {
            reason: "negative rate in paper table".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid rate card: negative rate in paper table");
    }
}
