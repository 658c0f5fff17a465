use mongodb::error::{Error, ErrorKind, RETRYABLE_WRITE_ERROR, WriteFailure};
use std::future::Future;

use crate::common::{RetryConfig, retry_if};

/// Server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// True when an insert or replace was rejected by a unique index
pub fn is_duplicate_key(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// True for connectivity failures that are worth retrying
pub fn is_transient(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } | ErrorKind::ConnectionPoolCleared { .. }
    ) || err.contains_label(RETRYABLE_WRITE_ERROR)
}

/// Run a read against MongoDB, retrying transient failures twice.
///
/// Only use this for idempotent operations.
pub async fn with_transient_retry<F, Fut, T>(operation: F) -> mongodb::error::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = mongodb::error::Result<T>>,
{
    let policy = RetryConfig::new().with_max_retries(2).with_initial_delay(50);
    retry_if(operation, policy, is_transient).await
}
