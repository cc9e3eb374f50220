#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::cache::timings::TokenTimings;
    use crate::cache::token::IdentityParams;
    use crate::observability::metrics::get_metrics;
    use crate::provider::token_provider::TokenProvider;
    use crate::tests::common::{counting_generator, failing_generator};

    #[tokio::test]
    async fn generations_and_hits_are_counted_per_cluster() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = TokenProvider::new(
            IdentityParams::new("metrics-cluster", "us-west-2"),
            counting_generator(calls.clone(), Duration::ZERO),
            TokenTimings::default(),
        );

        provider.get_token().await.unwrap();
        provider.get_token().await.unwrap();
        provider.get_token().await.unwrap();

        let metrics = get_metrics().await;
        assert_eq!(metrics.generations.with_label_values(&["metrics-cluster"]).get(), 1);
        assert_eq!(metrics.cache_hits.with_label_values(&["metrics-cluster"]).get(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains("ekstoken_token_generations_total"));
    }

    #[tokio::test]
    async fn failures_are_counted_by_reason() {
        let provider = TokenProvider::new(
            IdentityParams::new("failing-metrics-cluster", "us-west-2"),
            failing_generator(Arc::new(AtomicUsize::new(0)), "boom"),
            TokenTimings::default(),
        );

        assert!(provider.get_token().await.is_err());

        let metrics = get_metrics().await;
        assert_eq!(
            metrics
                .generation_failures
                .with_label_values(&["failing-metrics-cluster", "signing"])
                .get(),
            1
        );
    }
}
