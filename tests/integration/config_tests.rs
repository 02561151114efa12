//! Configuration loading integration tests
//!
//! Load configuration from real files and environment-style variables and
//! build the runtime components from it.

#[cfg(test)]
mod tests {
    use resilience_monitor::config::{Config, Validate};
    use resilience_monitor::{MonitoringSystem, OperationKind, TimeoutController};
    use std::io::Write;
    use std::time::Duration;

    const FULL_CONFIG: &str = r#"
monitoring:
  metrics:
    max_response_samples: 200
    cleanup_interval_secs: 15
  health:
    degraded_consecutive_failures: 3
    unhealthy_consecutive_failures: 6
  alerting:
    consecutive_failures: 2
    resolved_retention_secs: 600
timeouts:
  default_ms: 20000
  database_ms: 25000
  file_ms: 90000
logging:
  level: "resilience_monitor=debug,info"
  json: true
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_from_file_full_document() {
        let file = write_config(FULL_CONFIG);
        let config = crate::assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.monitoring.metrics.max_response_samples, 200);
        assert_eq!(config.monitoring.metrics.cleanup_interval_secs, 15);
        assert_eq!(config.monitoring.health.degraded_consecutive_failures, 3);
        assert_eq!(config.monitoring.health.degraded_error_rate, 0.1);
        assert_eq!(config.monitoring.alerting.consecutive_failures, 2);
        assert_eq!(config.timeouts.file_ms, 90_000);
        assert_eq!(config.timeouts.api_ms, 30_000);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_components_follow_loaded_config() {
        let file = write_config(FULL_CONFIG);
        let config = crate::assert_ok!(Config::from_file(file.path()).await);

        let timeouts = crate::assert_ok!(TimeoutController::new(&config.timeouts));
        assert_eq!(timeouts.default_timeout(), Duration::from_secs(20));
        // Database timeout never exceeds the general default
        assert_eq!(
            timeouts.get_timeout_for_operation(OperationKind::Database),
            Duration::from_secs(20)
        );

        let monitoring = crate::assert_ok!(MonitoringSystem::new(&config.monitoring));
        for _ in 0..3 {
            monitoring.record_failure("HTTP_500", Duration::from_millis(5));
        }
        let health = monitoring.get_health_status();
        assert_eq!(health.status.as_str(), "degraded");
        assert_eq!(monitoring.get_active_alerts().len(), 2);
    }

    #[tokio::test]
    async fn test_example_file_matches_defaults() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("config")
            .join("resilience.yaml.example");
        let config = crate::assert_ok!(Config::from_file(path).await);
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = crate::assert_err!(Config::from_file(dir.path().join("absent.yaml")).await);
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let file = write_config("monitoring:\n  health:\n    degraded_error_rate: 1.5\n");
        let err = crate::assert_err!(Config::from_file(file.path()).await);
        assert!(err.is_config());

        let file = write_config("logging:\n  level: \"\"\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_file_gives_defaults() {
        let file = write_config("{}\n");
        let config = crate::assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides_on_top_of_file_values() {
        let mut config = crate::assert_ok!(Config::from_yaml(FULL_CONFIG));
        crate::assert_ok!(config.apply_vars(vec![
            ("RESILIENCE_FILE_TIMEOUT_MS".to_string(), "45000".to_string()),
            ("RESILIENCE_LOG_LEVEL".to_string(), "warn".to_string()),
        ]));

        assert_eq!(config.timeouts.file_ms, 45_000);
        assert_eq!(config.timeouts.default_ms, 20_000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.monitoring.metrics.max_response_samples, 200);
    }

    #[test]
    fn test_env_values_matching_defaults_override_file() {
        let mut config = crate::assert_ok!(Config::from_yaml(FULL_CONFIG));
        crate::assert_ok!(config.apply_vars(vec![
            ("RESILIENCE_DEFAULT_TIMEOUT_MS".to_string(), "30000".to_string()),
            ("RESILIENCE_MAX_RESPONSE_SAMPLES".to_string(), "1000".to_string()),
            ("RESILIENCE_LOG_JSON".to_string(), "false".to_string()),
        ]));

        assert_eq!(config.timeouts.default_ms, 30_000);
        assert_eq!(config.monitoring.metrics.max_response_samples, 1000);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_yaml() {
        let config = crate::assert_ok!(Config::from_yaml(FULL_CONFIG));
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(crate::assert_ok!(Config::from_yaml(&yaml)), config);
    }
}
