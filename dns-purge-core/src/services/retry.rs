//! 限流重试
//!
//! An HTTP 429 is answered by sleeping a fixed backoff and repeating the exact
//! call that was refused. Every other outcome is handed back to the caller.

use std::future::Future;
use std::time::Duration;

use crate::error::CoreResult;
use crate::types::PurgeConfig;

/// Repeats rate-limited calls and counts how many 429s it absorbed.
#[derive(Debug)]
pub struct RateLimitRetry {
    backoff: Duration,
    /// `None` retries forever.
    max_retries: Option<u32>,
    enabled: bool,
    absorbed: u32,
}

impl RateLimitRetry {
    pub fn new(config: &PurgeConfig) -> Self {
        Self {
            backoff: config.rate_limit_backoff,
            max_retries: (config.max_rate_limit_retries > 0)
                .then_some(config.max_rate_limit_retries),
            enabled: true,
            absorbed: 0,
        }
    }

    /// Pass every result through untouched.
    pub fn disabled() -> Self {
        Self {
            backoff: Duration::ZERO,
            max_retries: Some(0),
            enabled: false,
            absorbed: 0,
        }
    }

    /// 429 answers absorbed so far.
    pub fn absorbed(&self) -> u32 {
        self.absorbed
    }

    /// Run `call` until it returns anything but a rate-limit error.
    ///
    /// After the configured number of consecutive 429s the last one is returned.
    pub async fn run<T, F, Fut>(&mut self, operation: &str, mut call: F) -> CoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match call().await {
                Err(e) if self.enabled && e.is_rate_limited() => {
                    if self.max_retries.is_some_and(|max| attempt >= max) {
                        log::error!("{operation}: still rate limited after {attempt} retries, giving up");
                        return Err(e);
                    }
                    attempt += 1;
                    self.absorbed = self.absorbed.saturating_add(1);
                    log::warn!(
                        "{operation}: rate limited ({e}), retrying in {}s",
                        self.backoff.as_secs()
                    );
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{rate_limited, server_error};

    fn config(max: u32) -> PurgeConfig {
        PurgeConfig::immediate().with_max_rate_limit_retries(max)
    }

    /// Returns `failures` rate-limit errors, then `Ok(attempts)`.
    async fn flaky(attempts: &Cell<u32>, failures: u32) -> CoreResult<u32> {
        attempts.set(attempts.get() + 1);
        if attempts.get() <= failures {
            Err(CoreError::Provider(rate_limited()))
        } else {
            Ok(attempts.get())
        }
    }

    #[tokio::test]
    async fn absorbs_rate_limits_then_succeeds() {
        let mut retry = RateLimitRetry::new(&config(5));
        let attempts = &Cell::new(0);
        let res = retry.run("op", move || flaky(attempts, 3)).await;
        assert!(matches!(res, Ok(4)), "unexpected result: {res:?}");
        assert_eq!(retry.absorbed(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_bound() {
        let mut retry = RateLimitRetry::new(&config(2));
        let attempts = &Cell::new(0);
        let res = retry.run("op", move || flaky(attempts, u32::MAX)).await;
        assert!(res.as_ref().is_err_and(CoreError::is_rate_limited));
        assert_eq!(attempts.get(), 3);
        assert_eq!(retry.absorbed(), 2);
    }

    #[tokio::test]
    async fn zero_bound_retries_forever() {
        let mut retry = RateLimitRetry::new(&config(0));
        let attempts = &Cell::new(0);
        let res = retry.run("op", move || flaky(attempts, 100)).await;
        assert!(matches!(res, Ok(101)), "unexpected result: {res:?}");
        assert_eq!(retry.absorbed(), 100);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let mut retry = RateLimitRetry::new(&config(5));
        let mut attempts = 0;
        let res: CoreResult<()> = retry
            .run("op", || {
                attempts += 1;
                async { Err(CoreError::Provider(server_error())) }
            })
            .await;
        assert!(matches!(res, Err(CoreError::Provider(_))));
        assert_eq!(attempts, 1);
        assert_eq!(retry.absorbed(), 0);
    }

    #[tokio::test]
    async fn disabled_passes_rate_limit_through() {
        let mut retry = RateLimitRetry::disabled();
        let attempts = &Cell::new(0);
        let res = retry.run("op", move || flaky(attempts, 1)).await;
        assert!(res.as_ref().is_err_and(CoreError::is_rate_limited));
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_fixed_backoff_between_attempts() {
        let config = PurgeConfig::default().with_delay(Duration::from_secs(10));
        let mut retry = RateLimitRetry::new(&config);
        let attempts = &Cell::new(0);
        let started = tokio::time::Instant::now();
        let res = retry.run("op", move || flaky(attempts, 2)).await;
        assert!(matches!(res, Ok(3)));
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(20), "waited {waited:?}");
        assert!(waited < Duration::from_secs(21), "waited {waited:?}");
    }
}
