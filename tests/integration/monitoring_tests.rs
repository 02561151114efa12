//! Monitoring system integration tests
//!
//! Drive a MonitoringSystem with scripted call outcomes and check the
//! metrics, health and alert views a dashboard would read.

#[cfg(test)]
mod tests {
    use crate::common::{CallOutcome, ConfigFactory, replay};
    use resilience_monitor::config::{AlertingConfig, MonitoringConfig};
    use resilience_monitor::{AlertSeverity, AlertType, HealthState, MonitoringSystem};
    use std::sync::Arc;
    use std::time::Duration;

    fn system() -> MonitoringSystem {
        crate::assert_ok!(MonitoringSystem::new(&MonitoringConfig::default()))
    }

    // ==================== Metrics ====================

    #[test]
    fn test_mixed_traffic_snapshot() {
        let system = system();
        replay(
            &system,
            &[
                CallOutcome::ok(100),
                CallOutcome::cached(20),
                CallOutcome::fail("HTTP_502", 300),
                CallOutcome::Retry(2),
                CallOutcome::RateLimit { wait_millis: 1000 },
                CallOutcome::StaleHit,
                CallOutcome::ok(180),
            ],
        );

        let metrics = system.get_metrics();
        assert_eq!(metrics.counters.total_requests, 4);
        assert_eq!(metrics.counters.successful_requests, 3);
        assert_eq!(metrics.counters.failed_requests, 1);
        assert_eq!(metrics.counters.retried_requests, 1);
        assert_eq!(metrics.counters.rate_limit_hits, 1);
        assert_eq!(metrics.counters.stale_hits, 1);
        assert_eq!(metrics.counters.consecutive_failures, 0);
        assert_eq!(metrics.average_response_time_ms, 150.0);
        assert_eq!(metrics.counters.rate_limit_wait_time_average_ms, 1000.0);
        assert_eq!(metrics.errors_by_type.get("HTTP_502"), Some(&1));

        let performance = system.get_performance_metrics();
        assert_eq!(performance.error_rate, 0.25);
        assert_eq!(performance.retry_rate, 0.25);
        assert!((performance.cache_hit_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentiles_follow_sample_window() {
        let system = crate::assert_ok!(MonitoringSystem::new(&ConfigFactory::small_window(4)));
        let outcomes: Vec<_> = (1..=8).map(|step| CallOutcome::ok(step * 100)).collect();
        replay(&system, &outcomes);

        let metrics = system.get_metrics();
        assert_eq!(metrics.response_time_samples, vec![500.0, 600.0, 700.0, 800.0]);

        let performance = system.get_performance_metrics();
        assert_eq!(performance.p50_response_time_ms, 600.0);
        assert_eq!(performance.p95_response_time_ms, 800.0);
        assert_eq!(performance.average_response_time_ms, 450.0);
    }

    #[test]
    fn test_snapshot_is_json_serializable() {
        let system = system();
        replay(&system, &[CallOutcome::fail("HTTP_500", 10)]);

        let metrics = serde_json::to_value(system.get_metrics()).unwrap();
        assert_eq!(metrics["failed_requests"], 1);

        let health = serde_json::to_value(system.get_health_status()).unwrap();
        assert_eq!(health["status"], "unhealthy");

        let alerts = serde_json::to_value(system.get_active_alerts()).unwrap();
        assert_eq!(alerts[0]["type"], "high_error_rate");
        assert_eq!(alerts[0]["severity"], "high");
    }

    // ==================== Health ====================

    #[test]
    fn test_health_recovers_after_success_streak() {
        let system = system();
        let mut outcomes = vec![CallOutcome::fail("HTTP_503", 10); 5];
        replay(&system, &outcomes);
        assert_eq!(system.get_health_status().status, HealthState::Degraded);

        outcomes = vec![CallOutcome::ok(10); 95];
        replay(&system, &outcomes);

        let health = system.get_health_status();
        assert_eq!(health.consecutive_failures, 0);
        assert_eq!(health.error_rate, 0.05);
        assert_eq!(health.status, HealthState::Healthy);
    }

    #[test]
    fn test_failure_streak_outranks_error_rate() {
        let system = system();
        replay(&system, &vec![CallOutcome::fail("HTTP_500", 10); 10]);

        let health = system.get_health_status();
        assert_eq!(health.status, HealthState::Unhealthy);
        assert_eq!(health.consecutive_failures, 10);
    }

    // ==================== Alerts ====================

    #[test]
    fn test_alert_lifecycle() {
        let system = system();
        replay(&system, &vec![CallOutcome::fail("HTTP_500", 10); 3]);

        let active = system.get_active_alerts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].alert_type, AlertType::HighErrorRate);
        assert_eq!(active[0].severity, AlertSeverity::High);

        assert!(system.resolve_alert(&active[0].id));
        assert!(!system.resolve_alert(&active[0].id));
        assert!(system.get_active_alerts().is_empty());

        replay(&system, &vec![CallOutcome::fail("HTTP_500", 10); 2]);
        let active = system.get_active_alerts();
        let types: Vec<_> = active.iter().map(|alert| alert.alert_type).collect();
        assert_eq!(
            types,
            vec![AlertType::HighErrorRate, AlertType::ConsecutiveFailures]
        );

        let stats = system.get_alert_stats();
        assert_eq!(stats.total_alerts, 3);
        assert_eq!(stats.resolved_alerts, 1);
        assert_eq!(stats.alerts_by_severity.get("high"), Some(&3));
        assert_eq!(system.get_alert_history(Some(2)).len(), 2);
    }

    #[test]
    fn test_slow_and_retry_alerts_with_custom_thresholds() {
        let system = crate::assert_ok!(MonitoringSystem::new(&ConfigFactory::alerting(
            AlertingConfig {
                response_time_ms: 500.0,
                retry_rate: 0.2,
                ..Default::default()
            }
        )));
        replay(
            &system,
            &[CallOutcome::ok(800), CallOutcome::ok(600), CallOutcome::Retry(3)],
        );

        let types: Vec<_> = system
            .get_active_alerts()
            .iter()
            .map(|alert| alert.alert_type)
            .collect();
        assert_eq!(types, vec![AlertType::SlowResponse, AlertType::RetryStorm]);
        // Health uses its own, less sensitive thresholds
        assert_eq!(system.get_health_status().status, HealthState::Healthy);
    }

    #[test]
    fn test_unknown_alert_id() {
        assert!(!system().resolve_alert("00000000-0000-0000-0000-000000000000"));
    }

    // ==================== Lifecycle ====================

    #[test]
    fn test_reset_then_continue() {
        let system = system();
        replay(&system, &vec![CallOutcome::fail("HTTP_500", 10); 6]);
        system.reset_metrics();

        assert!(system.get_active_alerts().is_empty());
        assert_eq!(system.get_metrics().counters.total_requests, 0);

        replay(&system, &[CallOutcome::ok(50)]);
        assert_eq!(system.get_metrics().average_response_time_ms, 50.0);
        assert_eq!(system.get_health_status().status, HealthState::Healthy);
    }

    #[tokio::test]
    async fn test_destroyed_system_is_inert() {
        let system = system();
        crate::assert_ok!(system.start());
        replay(&system, &[CallOutcome::ok(10)]);

        system.shutdown().await;
        replay(&system, &[CallOutcome::fail("HTTP_500", 10)]);

        assert_eq!(system.get_metrics().counters.total_requests, 1);
        let err = crate::assert_err!(system.start());
        assert!(err.to_string().contains("destroyed"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_recording_from_tasks() {
        let system = Arc::new(system());
        let tasks: Vec<_> = (0..16)
            .map(|task| {
                let system = Arc::clone(&system);
                tokio::spawn(async move {
                    for i in 0..250u64 {
                        if (i + task) % 4 == 0 {
                            system.record_failure("HTTP_500", Duration::from_millis(i));
                        } else {
                            system.record_success(Duration::from_millis(i), i % 2 == 0);
                        }
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let counters = system.get_metrics().counters;
        assert_eq!(counters.total_requests, 4000);
        assert_eq!(counters.failed_requests, 1000);
        assert_eq!(
            counters.total_requests,
            counters.successful_requests + counters.failed_requests
        );
        assert_eq!(counters.cache_hits + counters.cache_misses, 3000);

        let active = system.get_active_alerts();
        let error_alerts = active
            .iter()
            .filter(|alert| alert.alert_type == AlertType::HighErrorRate)
            .count();
        assert_eq!(error_alerts, 1);
    }
}
