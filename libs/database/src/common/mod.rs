//! Utilities shared by every store backend

pub mod retry;

pub use retry::{RetryConfig, retry, retry_if, retry_with_backoff};
