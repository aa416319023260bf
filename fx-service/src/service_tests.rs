//! CurrencyService pipeline tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;

    use fx_types::{
        ConversionOutcome, ConversionRequest, Converter, CurrencyCode, ErrorKind, RateResult,
        SupportedCurrencies, ValidationError,
    };

    use crate::{CurrencyService, DEFAULT_TTL, observe_sync};

    type Responder = Box<dyn Fn(&ConversionRequest, usize) -> ConversionOutcome + Send + Sync>;

    /// Stand-in for the HTTP adapter that counts how often it is reached.
    pub struct StubConverter {
        calls: AtomicUsize,
        respond: Responder,
    }

    impl StubConverter {
        pub fn new(
            respond: impl Fn(&ConversionRequest, usize) -> ConversionOutcome + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                respond: Box::new(respond),
            }
        }

        /// Rates at 35 per unit plus the call number, so repeated backend
        /// hits are distinguishable.
        pub fn rates() -> Self {
            Self::new(|req, call| ConversionOutcome::Success(rate_result(req, 35.0 + call as f64)))
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Converter for StubConverter {
        fn name(&self) -> &str {
            "convert"
        }

        async fn convert(
            &self,
            req: &ConversionRequest,
        ) -> Result<ConversionOutcome, ValidationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            // Suspend once, like a real network round trip.
            tokio::task::yield_now().await;
            Ok((self.respond)(req, call))
        }
    }

    fn rate_result(req: &ConversionRequest, rate: f64) -> RateResult {
        RateResult {
            amount: req.amount,
            base: req.from,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rates: BTreeMap::from([(req.to, req.amount * rate)]),
        }
    }

    fn service(stub: StubConverter) -> CurrencyService<StubConverter> {
        CurrencyService::new(stub, SupportedCurrencies::default())
    }

    fn usd_to_thb(amount: f64) -> ConversionRequest {
        ConversionRequest::new(CurrencyCode::USD, CurrencyCode::THB, amount)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_bad_amounts_never_reach_the_backend() {
        let svc = service(StubConverter::rates());

        for amount in [0.0, -0.0, -100.0, f64::NEG_INFINITY] {
            let err = svc.convert(usd_to_thb(amount)).await.unwrap_err();
            assert!(matches!(err, ValidationError::NonPositiveAmount(_)));
        }
        for amount in [f64::NAN, f64::INFINITY] {
            let err = svc.convert(usd_to_thb(amount)).await.unwrap_err();
            assert_eq!(err, ValidationError::NonFiniteAmount);
        }

        assert_eq!(svc.converter().calls(), 0);
        assert!(svc.cache().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_currencies_are_rejected() {
        let svc = service(StubConverter::rates());

        let err = svc
            .convert(ConversionRequest::new(CurrencyCode::GBP, CurrencyCode::THB, 10.0))
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedCurrency(CurrencyCode::GBP));

        let err = svc
            .convert(ConversionRequest::new(CurrencyCode::USD, CurrencyCode::AUD, 10.0))
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedCurrency(CurrencyCode::AUD));

        assert_eq!(svc.converter().calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_call_leaves_cached_entry_alone() {
        let svc = service(StubConverter::rates());
        let first = svc.convert(usd_to_thb(100.0)).await.unwrap();

        assert!(svc.convert(usd_to_thb(-1.0)).await.is_err());
        let again = svc.convert(usd_to_thb(100.0)).await.unwrap();

        assert_eq!(first, again);
        assert_eq!(svc.converter().calls(), 1);
        assert_eq!(svc.cache().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caching
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_identical_calls_hit_backend_once() {
        let svc = service(StubConverter::rates());

        let first = svc.convert(usd_to_thb(100.0)).await.unwrap();
        let second = svc.convert(usd_to_thb(100.0)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(svc.converter().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_after_ttl_reaches_backend_again() {
        let svc = CurrencyService::with_ttl(
            StubConverter::rates(),
            SupportedCurrencies::default(),
            Duration::from_secs(60),
        );

        let first = svc.convert(usd_to_thb(100.0)).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        let cached = svc.convert(usd_to_thb(100.0)).await.unwrap();
        assert_eq!(first, cached);
        assert_eq!(svc.converter().calls(), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        let fresh = svc.convert(usd_to_thb(100.0)).await.unwrap();
        assert_eq!(svc.converter().calls(), 2);
        assert_ne!(first, fresh);
        assert_eq!(
            fresh.data().and_then(|d| d.rate(CurrencyCode::THB)),
            Some(3700.0)
        );
    }

    #[tokio::test]
    async fn test_each_argument_is_part_of_the_key() {
        let svc = service(StubConverter::rates());

        svc.convert(usd_to_thb(100.0)).await.unwrap();
        svc.convert(usd_to_thb(101.0)).await.unwrap();
        svc.convert(ConversionRequest::new(CurrencyCode::EUR, CurrencyCode::THB, 100.0))
            .await
            .unwrap();
        svc.convert(ConversionRequest::new(CurrencyCode::USD, CurrencyCode::JPY, 100.0))
            .await
            .unwrap();

        assert_eq!(svc.converter().calls(), 4);
        assert_eq!(svc.cache().len(), 4);
    }

    #[tokio::test]
    async fn test_failures_are_cached_too() {
        let svc = service(StubConverter::new(|_, _| ConversionOutcome::http_error(500)));

        let first = svc.convert(usd_to_thb(100.0)).await.unwrap();
        let second = svc.convert(usd_to_thb(100.0)).await.unwrap();

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            json!({
                "success": false,
                "error": { "message": "HTTP Error: 500", "type": "HTTP_ERROR" }
            })
        );
        assert_eq!(first, second);
        assert_eq!(svc.converter().calls(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_identical_calls_are_not_merged() {
        let svc = service(StubConverter::rates());

        let (a, b) = tokio::join!(
            svc.convert(usd_to_thb(100.0)),
            svc.convert(usd_to_thb(100.0))
        );

        assert!(a.unwrap().is_success());
        assert!(b.unwrap().is_success());
        assert_eq!(svc.converter().calls(), 2);
        assert_eq!(svc.cache().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging and accessors
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pipeline_returns_what_the_backend_returns() {
        let req = usd_to_thb(100.0);

        let bare = StubConverter::rates();
        let expected = bare.convert(&req).await.unwrap();
        let svc = service(StubConverter::rates());
        assert_eq!(svc.convert(req).await.unwrap(), expected);

        let failing =
            |_: &ConversionRequest, _: usize| ConversionOutcome::network_error("connection reset");
        let expected = StubConverter::new(failing).convert(&req).await.unwrap();
        let svc = service(StubConverter::new(failing));
        let outcome = svc.convert(req).await.unwrap();
        assert_eq!(outcome, expected);
        assert_eq!(outcome.error().map(|e| &e.kind), Some(&ErrorKind::Network));
    }

    #[tokio::test]
    async fn test_usd_to_thb_scenario() {
        let svc = service(StubConverter::new(|req, _| {
            ConversionOutcome::Success(rate_result(req, 35.0))
        }));

        let outcome = svc.convert(usd_to_thb(100.0)).await.unwrap();
        let expected = json!({
            "success": true,
            "data": {
                "amount": 100.0,
                "base": "USD",
                "date": "2024-01-01",
                "rates": { "THB": 3500.0 }
            }
        });
        assert_eq!(serde_json::to_value(&outcome).unwrap(), expected);

        let repeated = svc.convert(usd_to_thb(100.0)).await.unwrap();
        assert_eq!(serde_json::to_value(&repeated).unwrap(), expected);
        assert_eq!(svc.converter().calls(), 1);
    }

    #[test]
    fn test_supported_currencies_keep_construction_order() {
        let supported = SupportedCurrencies::new([
            CurrencyCode::THB,
            CurrencyCode::USD,
            CurrencyCode::EUR,
        ])
        .unwrap();
        let svc = CurrencyService::new(StubConverter::rates(), supported);

        assert_eq!(
            svc.supported_currencies().as_slice(),
            &[CurrencyCode::THB, CurrencyCode::USD, CurrencyCode::EUR]
        );
    }

    #[test]
    fn test_is_supported() {
        let svc = service(StubConverter::rates());
        assert_eq!(svc.is_supported("usd"), Some(CurrencyCode::USD));
        assert_eq!(svc.is_supported("GBP"), None);
        assert_eq!(svc.is_supported("DOGE"), None);
    }

    #[test]
    fn test_service_ttl_defaults_to_one_minute() {
        let svc = service(StubConverter::rates());
        assert_eq!(svc.cache().ttl(), DEFAULT_TTL);

        let short = CurrencyService::with_ttl(
            StubConverter::rates(),
            SupportedCurrencies::default(),
            Duration::from_millis(250),
        );
        assert_eq!(short.cache().ttl(), Duration::from_millis(250));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Log records
    // ─────────────────────────────────────────────────────────────────────────

    /// Shared buffer the fmt subscriber writes into.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Routes events on this thread into a buffer until the guard drops.
    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (buffer, tracing::subscriber::set_default(subscriber))
    }

    /// Asserts each marker appears, in order, after the previous one.
    fn assert_in_order(logs: &str, markers: &[&str]) {
        let mut from = 0;
        for marker in markers {
            match logs[from..].find(marker) {
                Some(pos) => from += pos + marker.len(),
                None => panic!("missing {:?} after byte {} in logs:\n{}", marker, from, logs),
            }
        }
    }

    #[tokio::test]
    async fn test_records_for_miss_then_hit() {
        let (logs, _guard) = capture_logs();
        let svc = service(StubConverter::rates());

        svc.convert(usd_to_thb(100.0)).await.unwrap();
        svc.convert(usd_to_thb(100.0)).await.unwrap();

        let logs = logs.contents();
        assert_in_order(
            &logs,
            &[
                "[convert] Called with: [{\"from\":\"USD\",\"to\":\"THB\",\"amount\":100.0}]",
                "[Cache Miss] convert",
                "[Validated] amount: 100",
                "[convert] Returned: {\"success\":true",
                "[convert] Called with:",
                "[Cache Hit] convert",
                "[convert] Returned: {\"success\":true",
            ],
        );
        assert_eq!(logs.matches("[Validated]").count(), 1);
        assert_eq!(logs.matches("[Cache Hit]").count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_call_is_logged_without_a_result() {
        let (logs, _guard) = capture_logs();
        let svc = service(StubConverter::rates());

        svc.convert(usd_to_thb(0.0)).await.unwrap_err();

        let logs = logs.contents();
        assert_in_order(
            &logs,
            &[
                "[convert] Called with:",
                "[Cache Miss] convert",
                "[convert] Rejected: Validation Error: amount must be positive",
            ],
        );
        assert!(!logs.contains("Returned:"));
        assert!(!logs.contains("[Validated]"));
    }

    #[test]
    fn test_immediate_calls_are_logged_on_entry_and_return() {
        let (logs, _guard) = capture_logs();
        let svc = service(StubConverter::rates());

        svc.supported_currencies();
        let doubled = observe_sync("🔢", "double", &[21], || 42);
        assert_eq!(doubled, 42);

        assert_in_order(
            &logs.contents(),
            &[
                "📋 [supported_currencies] Called with: []",
                "📋 [supported_currencies] Returned: [\"USD\",\"EUR\",\"JPY\",\"THB\"]",
                "🔢 [double] Called with: [21]",
                "🔢 [double] Returned: 42",
            ],
        );
    }
}
