use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Lazily initialises and returns the process-wide metrics.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Provider metrics
    pub cache_hits: IntCounterVec,
    pub generations: IntCounterVec,
    pub generation_failures: IntCounterVec,
    pub generation_duration: HistogramVec,
    pub token_expiry_unix: IntGaugeVec,

    // Transport metrics
    pub authorized_requests: IntCounterVec,
    pub token_acquisition_failures: IntCounterVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("ekstoken".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            cache_hits: IntCounterVec::new(Opts::new("token_cache_hits_total", "Tokens served from cache"),&["cluster"],).unwrap(),
            generations: IntCounterVec::new(Opts::new("token_generations_total", "Successful token generations"),&["cluster"],).unwrap(),
            generation_failures: IntCounterVec::new(Opts::new("token_generation_failures_total", "Token generation failures by reason"),&["cluster", "reason"],).unwrap(),
            generation_duration: HistogramVec::new(HistogramOpts::new("token_generation_duration_seconds", "Token generation duration seconds").buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),&["cluster"],).unwrap(),
            token_expiry_unix: IntGaugeVec::new(Opts::new("token_expiry_unix_seconds", "Cached token expiry timestamp"),&["cluster"],).unwrap(),

            authorized_requests: IntCounterVec::new(Opts::new("authorized_requests_total", "Requests sent with a bearer token"),&["cluster"],).unwrap(),
            token_acquisition_failures: IntCounterVec::new(Opts::new("token_acquisition_failures_total", "Requests aborted before dispatch"),&["cluster"],).unwrap(),

            registry,
        });

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.generations.clone())).unwrap();
        reg.register(Box::new(metrics.generation_failures.clone())).unwrap();
        reg.register(Box::new(metrics.generation_duration.clone())).unwrap();
        reg.register(Box::new(metrics.token_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.authorized_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_acquisition_failures.clone())).unwrap();

        metrics
    }

    /// Prometheus text exposition of everything registered.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
