//! Timeout and cancellation for in-flight async operations
//!
//! [`TimeoutController`] races an operation against a deadline or an external
//! [`CancellationToken`](tokio_util::sync::CancellationToken).

mod timeout;
mod types;

pub use timeout::{DeadlineToken, TimeoutController};
pub use types::{OperationKind, TimeoutOptions};
