//! Bounded exponential backoff for vendor calls

use crate::error::{ConnectError, ConnectResult};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retries
    pub max_retries: u32,
    /// Initial backoff in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff in milliseconds
    pub max_backoff_ms: u64,
    /// Backoff multiplier
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 5000,
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// No retries at all; the first failure is final
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Execute an operation with retry
pub async fn execute_with_retry<T, F, Fut>(config: &RetryConfig, operation: F) -> ConnectResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = ConnectResult<T>>,
{
    let mut last_error = ConnectError::VendorUnavailable("No attempts made".to_string());
    let mut backoff_ms = config.initial_backoff_ms;

    for attempt in 0..=config.max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                last_error = e;
                if attempt < config.max_retries {
                    tokio::time::sleep(std::time::Duration::from_millis(backoff_ms)).await;
                    backoff_ms = std::cmp::min(
                        (backoff_ms as f64 * config.multiplier) as u64,
                        config.max_backoff_ms,
                    );
                }
            }
        }
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let attempts = AtomicU32::new(0);
        let config = RetryConfig {
            max_retries: 3,
            initial_backoff_ms: 1,
            max_backoff_ms: 2,
            multiplier: 2.0,
        };

        let result = execute_with_retry(&config, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ConnectError::VendorUnavailable("flaky".to_string()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_retries() {
        let attempts = AtomicU32::new(0);
        let config = RetryConfig {
            max_retries: 2,
            initial_backoff_ms: 1,
            max_backoff_ms: 1,
            multiplier: 1.0,
        };

        let result: ConnectResult<()> = execute_with_retry(&config, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(ConnectError::VendorUnavailable("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_no_retry_config_tries_once() {
        let attempts = AtomicU32::new(0);
        let result: ConnectResult<()> = execute_with_retry(&RetryConfig::none(), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(ConnectError::VendorUnavailable("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
