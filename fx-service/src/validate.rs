//! Argument validation layer.

use async_trait::async_trait;
use fx_types::{
    ConversionOutcome, ConversionRequest, Converter, SupportedCurrencies, ValidationError,
};

/// Rejects a request before it reaches the wrapped converter.
///
/// The amount must be positive and finite, and both currencies must be in
/// the supported set. Requests are forwarded untouched.
pub struct Validated<C> {
    inner: C,
    supported: SupportedCurrencies,
}

impl<C: Converter> Validated<C> {
    pub fn new(inner: C, supported: SupportedCurrencies) -> Self {
        Self { inner, supported }
    }

    pub fn supported(&self) -> &SupportedCurrencies {
        &self.supported
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Runs the amount and currency guards without calling the converter.
    pub fn check(&self, req: &ConversionRequest) -> Result<(), ValidationError> {
        // NaN compares false here and is caught by the finiteness check.
        if req.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(req.amount));
        }
        if !req.amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }
        tracing::debug!(
            stage = "validate",
            operation = self.inner.name(),
            payload = req.amount,
            "✅ [Validated] amount: {}",
            req.amount
        );

        for code in [req.from, req.to] {
            if !self.supported.contains(code) {
                return Err(ValidationError::UnsupportedCurrency(code));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<C: Converter> Converter for Validated<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn convert(
        &self,
        req: &ConversionRequest,
    ) -> Result<ConversionOutcome, ValidationError> {
        self.check(req)?;
        self.inner.convert(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_types::CurrencyCode;

    struct Unreachable;

    #[async_trait]
    impl Converter for Unreachable {
        fn name(&self) -> &str {
            "convert"
        }

        async fn convert(
            &self,
            _req: &ConversionRequest,
        ) -> Result<ConversionOutcome, ValidationError> {
            panic!("validation should have stopped the call");
        }
    }

    fn validator() -> Validated<Unreachable> {
        Validated::new(Unreachable, SupportedCurrencies::default())
    }

    fn req(amount: f64) -> ConversionRequest {
        ConversionRequest::new(CurrencyCode::USD, CurrencyCode::THB, amount)
    }

    #[test]
    fn test_accepts_positive_finite_amount() {
        assert_eq!(validator().check(&req(0.01)), Ok(()));
        assert_eq!(validator().check(&req(1e12)), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert_eq!(
            validator().check(&req(0.0)),
            Err(ValidationError::NonPositiveAmount(0.0))
        );
        assert_eq!(
            validator().check(&req(-5.0)),
            Err(ValidationError::NonPositiveAmount(-5.0))
        );
        assert_eq!(
            validator().check(&req(f64::NEG_INFINITY)),
            Err(ValidationError::NonPositiveAmount(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn test_rejects_non_finite_amount() {
        assert_eq!(
            validator().check(&req(f64::NAN)),
            Err(ValidationError::NonFiniteAmount)
        );
        assert_eq!(
            validator().check(&req(f64::INFINITY)),
            Err(ValidationError::NonFiniteAmount)
        );
    }

    #[test]
    fn test_rejects_unsupported_currency_on_either_side() {
        let v = validator();
        let from_gbp = ConversionRequest::new(CurrencyCode::GBP, CurrencyCode::USD, 1.0);
        assert_eq!(
            v.check(&from_gbp),
            Err(ValidationError::UnsupportedCurrency(CurrencyCode::GBP))
        );
        let to_chf = ConversionRequest::new(CurrencyCode::USD, CurrencyCode::CHF, 1.0);
        assert_eq!(
            v.check(&to_chf),
            Err(ValidationError::UnsupportedCurrency(CurrencyCode::CHF))
        );
    }

    #[tokio::test]
    async fn test_convert_short_circuits_on_error() {
        let err = validator().convert(&req(-1.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation Error: amount must be positive, got -1");
    }
}
