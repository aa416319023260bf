//! # FX Service
//!
//! Interception pipeline around a [`Converter`](fx_types::Converter).
//!
//! ## Architecture
//!
//! - `log` - `Logged`, records arguments on entry and the resolved value
//! - `cache` - `Cached`, TTL memoization keyed by operation and arguments
//! - `validate` - `Validated`, rejects bad amounts and unsupported codes
//! - `service` - `CurrencyService`, composes the three once at construction
//!
//! Every layer implements `Converter` itself, so the composed pipeline has
//! the same contract as the adapter it wraps:
//! `Logged(Cached(Validated(adapter)))`.

pub mod cache;
pub mod log;
pub mod service;
pub mod validate;

#[cfg(test)]
mod service_tests;

pub use cache::{Cached, DEFAULT_TTL};
pub use log::{Logged, observe_sync};
pub use service::CurrencyService;
pub use validate::Validated;

/// Serializes a value for log records and cache keys.
pub(crate) fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
