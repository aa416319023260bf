//! Call logging layer.
//!
//! Records the arguments when a call starts and the value once it resolves.
//! Never changes what it observes.

use async_trait::async_trait;
use fx_types::{ConversionOutcome, ConversionRequest, Converter, ValidationError};
use serde::Serialize;

use crate::to_json;

/// Logs every call made through the wrapped converter.
pub struct Logged<C> {
    inner: C,
    prefix: &'static str,
}

impl<C: Converter> Logged<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            prefix: "📝",
        }
    }

    /// Marker printed at the start of each record.
    pub fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: Converter> Converter for Logged<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn convert(
        &self,
        req: &ConversionRequest,
    ) -> Result<ConversionOutcome, ValidationError> {
        let name = self.name();
        log_called(self.prefix, name, &to_json(std::slice::from_ref(req)));

        let result = self.inner.convert(req).await;
        match &result {
            Ok(outcome) => log_returned(self.prefix, name, &to_json(outcome)),
            Err(e) => tracing::warn!(
                stage = "log",
                operation = name,
                error = %e,
                "{} [{}] Rejected: {}",
                self.prefix,
                name,
                e
            ),
        }
        result
    }
}

/// Synchronous counterpart of [`Logged`] for calls that return immediately.
pub fn observe_sync<A, T, F>(prefix: &str, operation: &str, args: &A, call: F) -> T
where
    A: Serialize + ?Sized,
    T: Serialize,
    F: FnOnce() -> T,
{
    log_called(prefix, operation, &to_json(args));
    let value = call();
    log_returned(prefix, operation, &to_json(&value));
    value
}

fn log_called(prefix: &str, operation: &str, args: &str) {
    tracing::info!(
        stage = "log",
        operation,
        payload = args,
        "{} [{}] Called with: {}",
        prefix,
        operation,
        args
    );
}

fn log_returned(prefix: &str, operation: &str, value: &str) {
    tracing::info!(
        stage = "log",
        operation,
        payload = value,
        "{} [{}] Returned: {}",
        prefix,
        operation,
        value
    );
}
