//! # FX Client
//!
//! Adapter that performs the single outbound call of the converter:
//! `GET {base_url}/latest?base=..&symbols=..&amount=..` against the
//! Frankfurter rate service. Every failure is folded into a
//! [`ConversionOutcome::Failure`]; nothing is retried.

use async_trait::async_trait;
use fx_types::{
    ConversionOutcome, ConversionRequest, Converter, ValidationError, schema,
};
use reqwest::Client;
use serde_json::Value;

/// Public Frankfurter endpoint.
pub const DEFAULT_API_URL: &str = "https://api.frankfurter.dev/v1";

/// Error type for the raw fetch, before it is folded into an outcome.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP Error: {0}")]
    Status(u16),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for ConversionOutcome {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status(status) => ConversionOutcome::http_error(status),
            ClientError::Network(e) => ConversionOutcome::network_error(e.to_string()),
            // A body that is not JSON at all fails while reading, like a transport error.
            ClientError::Json(e) => ConversionOutcome::network_error(e.to_string()),
        }
    }
}

/// Frankfurter API client.
pub struct FrankfurterClient {
    base_url: String,
    http: Client,
}

impl Default for FrankfurterClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl FrankfurterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the latest rates for one pair and returns the decoded body.
    pub async fn fetch_latest(&self, req: &ConversionRequest) -> Result<Value, ClientError> {
        let amount = req.amount.to_string();
        let resp = self
            .http
            .get(format!("{}/latest", self.base_url))
            .query(&[
                ("base", req.from.code()),
                ("symbols", req.to.code()),
                ("amount", amount.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Converter for FrankfurterClient {
    fn name(&self) -> &str {
        "convert"
    }

    async fn convert(
        &self,
        req: &ConversionRequest,
    ) -> Result<ConversionOutcome, ValidationError> {
        let body = match self.fetch_latest(req).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(stage = "client", operation = self.name(), error = %e, "rate request failed");
                return Ok(e.into());
            }
        };

        let outcome = match schema::classify(&body) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    stage = "client",
                    operation = self.name(),
                    payload = %body,
                    reason = %e,
                    "unrecognized rate response"
                );
                ConversionOutcome::parse_error()
            }
        };
        Ok(outcome)
    }
}
