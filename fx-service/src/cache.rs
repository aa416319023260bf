//! TTL result cache layer.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use fx_types::{ConversionOutcome, ConversionRequest, Converter, ValidationError};
use tokio::time::Instant;

use crate::to_json;

/// Default time-to-live for cached outcomes.
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

/// A memoized outcome and the instant it goes stale.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: ConversionOutcome,
    expires_at: Instant,
}

/// Memoizes the outcomes of the wrapped converter for a fixed TTL.
///
/// Keys combine the operation name with the JSON form of the arguments, so
/// equal requests share an entry. Failures are memoized exactly like
/// successes. Stale entries are only replaced on the next miss for the same
/// key; nothing sweeps them. Concurrent misses for one key are not merged:
/// each calls the converter and the last write wins.
pub struct Cached<C> {
    inner: C,
    ttl: Duration,
    entries: DashMap<String, CacheEntry>,
}

impl<C: Converter> Cached<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
        tracing::debug!(stage = "cache", operation = self.inner.name(), "🗑️ Cache cleared");
    }

    /// `"<operation>:<json args>"`, e.g. `convert:[{"from":"USD","to":"THB","amount":100.0}]`.
    pub fn key_for(&self, req: &ConversionRequest) -> String {
        format!(
            "{}:{}",
            self.inner.name(),
            to_json(std::slice::from_ref(req))
        )
    }

    fn lookup(&self, key: &str, now: Instant) -> Option<ConversionOutcome> {
        self.entries
            .get(key)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.value.clone())
    }
}

#[async_trait]
impl<C: Converter> Converter for Cached<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn convert(
        &self,
        req: &ConversionRequest,
    ) -> Result<ConversionOutcome, ValidationError> {
        let key = self.key_for(req);
        let now = Instant::now();

        if let Some(value) = self.lookup(&key, now) {
            tracing::debug!(stage = "cache", operation = self.name(), payload = %key, "💾 [Cache Hit] {}", self.name());
            return Ok(value);
        }

        tracing::debug!(stage = "cache", operation = self.name(), payload = %key, "🔄 [Cache Miss] {}", self.name());
        let value = self.inner.convert(req).await?;

        self.entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(value)
    }
}
