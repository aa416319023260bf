//! Error types for the fx converter.

use fx_currency::CurrencyCode;

/// Bad caller input, rejected before any network activity.
///
/// This is the only failure that escapes the pipeline as an `Err`;
/// every other failure is captured in a [`ConversionOutcome`](crate::ConversionOutcome).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation Error: amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("Validation Error: amount must be a finite number")]
    NonFiniteAmount,

    #[error("Invalid currency: {0}")]
    UnsupportedCurrency(CurrencyCode),
}

/// A response body that is not a recognizable rate result or error payload.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Payload does not look like {0}")]
    Shape(&'static str),

    #[error("Payload matches no known response shape")]
    Unrecognized,

    #[error("Payload does not decode: {0}")]
    Decode(#[from] serde_json::Error),
}
