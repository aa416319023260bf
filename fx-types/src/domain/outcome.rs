//! Conversion outcomes: a rate result or a captured failure.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fx_currency::CurrencyCode;

/// Rates returned by the rate service for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    pub amount: f64,
    pub base: CurrencyCode,
    pub date: NaiveDate,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl RateResult {
    /// Converted amount for `code`, if the service returned it.
    pub fn rate(&self, code: CurrencyCode) -> Option<f64> {
        self.rates.get(&code).copied()
    }
}

/// Category of a captured failure.
///
/// `Remote` carries whatever `type` the rate service echoed in its own
/// error payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ErrorKind {
    Http,
    Parse,
    Network,
    Remote(String),
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Http => "HTTP_ERROR",
            ErrorKind::Parse => "PARSE_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Remote(kind) => kind,
        }
    }
}

impl From<String> for ErrorKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "HTTP_ERROR" => ErrorKind::Http,
            "PARSE_ERROR" => ErrorKind::Parse,
            "NETWORK_ERROR" => ErrorKind::Network,
            _ => ErrorKind::Remote(kind),
        }
    }
}

impl From<ErrorKind> for String {
    fn from(kind: ErrorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure captured into the outcome instead of being raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Result of one conversion call.
///
/// Serialized as `{"success": true, "data": {..}}` or
/// `{"success": false, "error": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "OutcomeRepr", try_from = "OutcomeRepr")]
pub enum ConversionOutcome {
    Success(RateResult),
    Failure(ApiError),
}

impl ConversionOutcome {
    pub fn http_error(status: u16) -> Self {
        Self::Failure(ApiError::new(
            ErrorKind::Http,
            format!("HTTP Error: {}", status),
        ))
    }

    pub fn parse_error() -> Self {
        Self::Failure(ApiError::new(ErrorKind::Parse, "Unknown response format"))
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::Failure(ApiError::new(ErrorKind::Network, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&RateResult> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeRepr {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<RateResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
}

impl From<ConversionOutcome> for OutcomeRepr {
    fn from(outcome: ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Success(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            ConversionOutcome::Failure(error) => Self {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<OutcomeRepr> for ConversionOutcome {
    type Error = String;
    fn try_from(repr: OutcomeRepr) -> Result<Self, Self::Error> {
        match repr {
            OutcomeRepr {
                success: true,
                data: Some(data),
                ..
            } => Ok(Self::Success(data)),
            OutcomeRepr {
                success: false,
                error: Some(error),
                ..
            } => Ok(Self::Failure(error)),
            OutcomeRepr { success, .. } => Err(format!(
                "outcome with success={} is missing its {} field",
                success,
                if success { "data" } else { "error" }
            )),
        }
    }
}
