//! # resilience-monitor
//!
//! A resilience layer for outbound third-party API calls.
//!
//! ## Features
//!
//! - **Call telemetry**: success, failure, retry, rate-limit and stale-cache
//!   counters with a bounded response-time window for percentiles
//! - **Health classification**: an ordered rule chain mapping the telemetry to
//!   healthy, degraded or unhealthy
//! - **Alerting**: deduplicated alerts with explicit resolution and history
//! - **Timeouts**: race any future against a deadline or an external
//!   cancellation token, releasing the timer on every exit path
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resilience_monitor::{Config, MonitoringSystem, TimeoutController, TimeoutOptions};
//! use std::time::{Duration, Instant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Some("config/resilience.yaml")).await?;
//!     resilience_monitor::utils::logging::init_logging(&config.logging)?;
//!
//!     let monitoring = MonitoringSystem::new(&config.monitoring)?;
//!     monitoring.start()?;
//!     let timeouts = TimeoutController::new(&config.timeouts)?;
//!
//!     let started = Instant::now();
//!     let outcome = timeouts
//!         .with_timeout(
//!             async { "response" },
//!             TimeoutOptions::new().with_timeout(Duration::from_secs(5)),
//!         )
//!         .await;
//!     match outcome {
//!         Ok(_) => monitoring.record_success(started.elapsed(), false),
//!         Err(_) => monitoring.record_failure("TIMEOUT", started.elapsed()),
//!     }
//!
//!     println!("health: {}", monitoring.get_health_status().status);
//!     monitoring.shutdown().await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod monitoring;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use monitoring::{
    Alert, AlertSeverity, AlertType, HealthState, HealthStatus, MetricsSnapshot,
    MonitoringSystem, PerformanceMetrics,
};
pub use utils::error::{
    DeadlineToken, OperationKind, ResilienceError, Result, TimeoutController, TimeoutOptions,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
