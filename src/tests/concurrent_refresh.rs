// Many callers hitting a cold provider at once must share a single
// generation and all see the same token.

#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;

    use crate::cache::timings::TokenTimings;
    use crate::cache::token::IdentityParams;
    use crate::provider::token_provider::TokenProvider;
    use crate::tests::common::{counting_generator, provider_with};

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn fifty_concurrent_callers_generate_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(provider_with(counting_generator(calls.clone(), Duration::from_millis(50))));

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.get_token().await })
            })
            .collect();

        let mut tokens = Vec::with_capacity(handles.len());
        for handle in handles {
            tokens.push(handle.await.expect("task panicked").expect("token"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(tokens.len(), 50);
        assert!(tokens.iter().all(|t| t == &tokens[0]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_after_expiry_regenerate_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(provider_with(counting_generator(calls.clone(), Duration::from_millis(20))));

        let first = provider.get_token().await.unwrap();
        provider.set_cached_expiry(Utc::now() - chrono::Duration::seconds(1)).await;

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.get_token().await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert_ne!(handle.await.unwrap(), first);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn providers_do_not_share_cache() {
        let calls_a = Arc::new(AtomicUsize::new(0));
        let calls_b = Arc::new(AtomicUsize::new(0));
        let a = TokenProvider::new(
            IdentityParams::new("cluster-a", "us-east-1"),
            counting_generator(calls_a.clone(), Duration::ZERO),
            TokenTimings::default(),
        );
        let b = TokenProvider::new(
            IdentityParams::new("cluster-b", "eu-west-1"),
            counting_generator(calls_b.clone(), Duration::ZERO),
            TokenTimings::default(),
        );

        a.get_token().await.unwrap();
        a.get_token().await.unwrap();
        b.get_token().await.unwrap();
        a.invalidate().await;
        b.get_token().await.unwrap();

        assert_eq!(calls_a.load(Ordering::SeqCst), 1);
        assert_eq!(calls_b.load(Ordering::SeqCst), 1);
    }
}
