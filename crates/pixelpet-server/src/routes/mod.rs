//! Route handlers.
//!
//! - [`health`]: liveness endpoint
//! - [`account`]: registration and login
//! - [`pet`]: pet state and actions (bearer token required)

pub mod account;
pub mod health;
pub mod pet;

use crate::error::{AppError, AppResult};

/// Run store I/O or password hashing off the async workers.
pub(crate) async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
}
