//! Conversion port.

use crate::domain::{ConversionOutcome, ConversionRequest};
use crate::error::ValidationError;

/// Port trait for anything that turns a request into an outcome.
///
/// Transport, status and parse failures are returned inside
/// [`ConversionOutcome::Failure`]. Only bad input is an `Err`.
#[async_trait::async_trait]
pub trait Converter: Send + Sync {
    /// Operation identifier used in cache keys and log records.
    fn name(&self) -> &str;

    async fn convert(&self, req: &ConversionRequest) -> Result<ConversionOutcome, ValidationError>;
}
