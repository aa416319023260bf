//! Domain types for currency conversion.

mod outcome;
mod request;

pub use outcome::{ApiError, ConversionOutcome, ErrorKind, RateResult};
pub use request::ConversionRequest;
