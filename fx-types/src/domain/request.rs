//! A single conversion request.

use serde::{Deserialize, Serialize};
use std::fmt;

use fx_currency::CurrencyCode;

/// Convert `amount` units of `from` into `to`.
///
/// Field order is part of the serialized form, which the result cache
/// uses as its key. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: f64) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.amount, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_order() {
        let req = ConversionRequest::new(CurrencyCode::USD, CurrencyCode::THB, 100.0);
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"from":"USD","to":"THB","amount":100.0}"#
        );
    }

    #[test]
    fn test_display() {
        let req = ConversionRequest::new(CurrencyCode::EUR, CurrencyCode::JPY, 50.0);
        assert_eq!(req.to_string(), "50 EUR -> JPY");
    }
}
