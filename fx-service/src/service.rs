//! Currency Application Service
//!
//! Owns the composed conversion pipeline and the supported currency set.
//! Contains no transport logic; the adapter is injected.

use std::time::Duration;

use fx_types::{
    ConversionOutcome, ConversionRequest, Converter, CurrencyCode, SupportedCurrencies,
    ValidationError,
};

use crate::cache::{Cached, DEFAULT_TTL};
use crate::log::{Logged, observe_sync};
use crate::validate::Validated;

/// Pipeline type built by [`CurrencyService`].
pub type Pipeline<C> = Logged<Cached<Validated<C>>>;

/// Application service for currency conversion.
///
/// Generic over `C: Converter` - the HTTP adapter in production, a stub
/// in tests. The pipeline is built once here, so every call shares the
/// same cache for the lifetime of the service.
pub struct CurrencyService<C: Converter> {
    pipeline: Pipeline<C>,
}

impl<C: Converter> CurrencyService<C> {
    /// Creates a service with the default one-minute cache TTL.
    pub fn new(converter: C, supported: SupportedCurrencies) -> Self {
        Self::with_ttl(converter, supported, DEFAULT_TTL)
    }

    pub fn with_ttl(converter: C, supported: SupportedCurrencies, ttl: Duration) -> Self {
        tracing::info!("💱 CurrencyService initialized with: {}", supported);
        let validated = Validated::new(converter, supported);
        let cached = Cached::new(validated, ttl);
        let pipeline = Logged::new(cached).with_prefix("💱");
        Self { pipeline }
    }

    /// Converts through log, cache and validation, in that order.
    ///
    /// Returns `Err` only for invalid input. Transport, status and parse
    /// failures come back as [`ConversionOutcome::Failure`] and are cached
    /// for the TTL like any other outcome.
    pub async fn convert(
        &self,
        req: ConversionRequest,
    ) -> Result<ConversionOutcome, ValidationError> {
        self.pipeline.convert(&req).await
    }

    /// The supported currencies, in the order given at construction.
    pub fn supported_currencies(&self) -> &SupportedCurrencies {
        observe_sync("📋", "supported_currencies", &[(); 0], || {
            self.validator().supported()
        })
    }

    /// Returns the code if `raw` names a supported currency.
    pub fn is_supported(&self, raw: &str) -> Option<CurrencyCode> {
        self.validator().supported().find(raw)
    }

    /// The result cache, for inspection and manual clearing.
    pub fn cache(&self) -> &Cached<Validated<C>> {
        self.pipeline.inner()
    }

    /// The injected adapter.
    pub fn converter(&self) -> &C {
        self.validator().inner()
    }

    fn validator(&self) -> &Validated<C> {
        self.cache().inner()
    }
}
