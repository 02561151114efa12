//! Timeout controller integration tests
//!
//! Race real futures against deadlines and external cancellation.

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use resilience_monitor::config::TimeoutConfig;
    use resilience_monitor::{
        MonitoringSystem, OperationKind, ResilienceError, TimeoutController, TimeoutOptions,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn controller() -> TimeoutController {
        crate::assert_ok!(TimeoutController::new(&TimeoutConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_operation_wins() {
        let result = controller()
            .with_timeout(
                async {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    "done"
                },
                TimeoutOptions::new().with_timeout(Duration::from_millis(50)),
            )
            .await;
        assert_eq!(crate::assert_ok!(result), "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_operation_is_dropped() {
        let completed = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&completed);

        let err = crate::assert_err!(
            controller()
                .with_timeout(
                    async move {
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        flag.fetch_add(1, Ordering::SeqCst);
                    },
                    TimeoutOptions::new().with_timeout(Duration::from_millis(50)),
                )
                .await
        );
        assert!(matches!(err, ResilienceError::Timeout(_)));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_operation_result_passes_through() {
        let result: resilience_monitor::Result<Result<u32, String>> = controller()
            .with_timeout(
                async { Err("upstream said no".to_string()) },
                TimeoutOptions::new(),
            )
            .await;
        assert_eq!(crate::assert_ok!(result), Err("upstream said no".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_parent_cancels_every_call() {
        let controller = controller();
        let parent = CancellationToken::new();

        let calls: Vec<_> = (0..3)
            .map(|_| {
                let controller = controller.clone();
                let parent = parent.clone();
                tokio::spawn(async move {
                    controller
                        .with_timeout(
                            std::future::pending::<()>(),
                            TimeoutOptions::new()
                                .with_timeout(Duration::from_secs(60))
                                .with_token(parent),
                        )
                        .await
                })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(5)).await;
        parent.cancel();

        for call in calls {
            let result = call.await.unwrap();
            assert!(crate::assert_err!(result).is_timeout());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_operation_observes_cancellation() {
        let stopped = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&stopped);

        let result = controller()
            .with_timeout_fn(
                move |token| async move {
                    // Background work the caller spawned; stops on the deadline
                    let worker = tokio::spawn(async move {
                        token.cancelled().await;
                        observed.fetch_add(1, Ordering::SeqCst);
                    });
                    let _ = worker.await;
                    std::future::pending::<()>().await
                },
                TimeoutOptions::new().with_timeout(Duration::from_millis(20)),
            )
            .await;

        assert!(crate::assert_err!(result).is_timeout());
        tokio::task::yield_now().await;
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_feeds_monitoring() {
        let controller = crate::assert_ok!(TimeoutController::new(
            &ConfigFactory::uniform_timeouts(25)
        ));
        let monitoring = crate::assert_ok!(MonitoringSystem::new(&Default::default()));

        let started = tokio::time::Instant::now();
        let outcome = controller
            .with_timeout_for(OperationKind::Api, std::future::pending::<()>())
            .await;
        match outcome {
            Ok(()) => monitoring.record_success(started.elapsed(), false),
            Err(_) => monitoring.record_failure("TIMEOUT", started.elapsed()),
        }

        let metrics = monitoring.get_metrics();
        assert_eq!(metrics.errors_by_type.get("TIMEOUT"), Some(&1));
        assert!(metrics.average_response_time_ms >= 25.0);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let controller = controller();
        let err = crate::assert_err!(controller.validate_timeout(0));
        assert!(err.is_config());
        assert!(err.to_string().contains("positive"));
        assert_eq!(
            crate::assert_ok!(controller.validate_timeout(300_001)),
            Duration::from_millis(300_001)
        );
    }
}
