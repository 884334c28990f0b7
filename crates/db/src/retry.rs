//! Retry-on-deadlock wrapper for multi-statement transactions.
//!
//! PostgreSQL aborts one participant of a deadlock with SQLSTATE `40P01` and
//! reports an expired `lock_timeout` as `55P03`. Both leave the transaction
//! unusable, so the whole unit of work is rolled back and re-run from the top
//! with a doubling backoff. Any other error is returned immediately.

use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

/// `deadlock_detected`
pub const SQLSTATE_DEADLOCK: &str = "40P01";
/// `lock_not_available` (raised when `lock_timeout` expires)
pub const SQLSTATE_LOCK_TIMEOUT: &str = "55P03";

/// Bounds for [`retry_on_deadlock`] and [`transaction_with_retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Values below 1 are
    /// treated as 1.
    pub max_attempts: u32,
    /// Sleep before the second attempt; doubled before each later one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff to wait after `attempt` (1-based) has failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exp)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

/// True for the SQLSTATE codes that mean "retry the transaction".
pub fn is_retryable_code(code: &str) -> bool {
    code == SQLSTATE_DEADLOCK || code == SQLSTATE_LOCK_TIMEOUT
}

pub fn is_retryable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|c| is_retryable_code(&c)),
        _ => false,
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent. The last retryable error is returned when every
/// attempt deadlocks.
///
/// `op` must be safe to repeat: each call should perform one complete unit of
/// work (a single statement, or a `CALL` that runs inside its own implicit
/// transaction).
pub async fn retry_on_deadlock<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if is_retryable(&e) && attempt < attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Lock conflict, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if is_retryable(&e) {
                    tracing::error!(attempts, error = %e, "Lock conflict persisted after all retries");
                }
                return Err(e);
            }
        }
    }
}

/// Begin a transaction, run `op` on it and commit, retrying the whole
/// sequence on deadlock or lock timeout.
///
/// The transaction is dropped (rolled back) before every retry, so `op` sees
/// a clean slate each time. `op` is called once per attempt and must own the
/// data it needs; clone inputs into the returned future rather than
/// borrowing from the caller.
///
/// ```ignore
/// let id = transaction_with_retry(&pool, policy, move |conn| {
///     let input = input.clone();
///     Box::pin(async move { WebSeriesRepo::create_in(conn, &input).await })
/// })
/// .await?;
/// ```
pub async fn transaction_with_retry<T, F>(
    pool: &PgPool,
    policy: RetryPolicy,
    mut op: F,
) -> Result<T, sqlx::Error>
where
    F: for<'c> FnMut(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>>,
{
    let attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        let result = async {
            let mut tx = pool.begin().await?;
            let value = op(&mut *tx).await?;
            tx.commit().await?;
            Ok::<T, sqlx::Error>(value)
        }
        .await;

        match result {
            Ok(value) => return Ok(value),
            Err(e) if is_retryable(&e) && attempt < attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transaction rolled back on lock conflict, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if is_retryable(&e) {
                    tracing::error!(attempts, error = %e, "Transaction failed after all retries");
                } else {
                    tracing::debug!(error = %e, "Transaction rolled back");
                }
                return Err(e);
            }
        }
    }
}
