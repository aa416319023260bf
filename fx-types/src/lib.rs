//! # FX Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has no IO dependencies - only data structures,
//! response shape checks, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Requests and outcomes of a conversion
//! - `schema/` - Structural checks that turn raw JSON into domain types
//! - `ports/` - The `Converter` trait every pipeline stage implements
//! - `error/` - Validation and schema error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod schema;

// Re-export commonly used types
pub use domain::{ApiError, ConversionOutcome, ConversionRequest, ErrorKind, RateResult};
pub use error::{SchemaError, ValidationError};
pub use fx_currency::{CurrencyCode, CurrencyError, SupportedCurrencies};
pub use ports::Converter;
