//! Exponential backoff schedule and the retry decision for send attempts.

use std::time::Duration;

use crate::error::ClassifiedError;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Delay before the first retry. Doubles for every further retry.
pub const BASE_RETRY_DELAY: Duration = Duration::from_millis(400);

/// Delay to wait before retry number `attempt` (0-based): `2^attempt * 400ms`.
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    BASE_RETRY_DELAY.saturating_mul(factor)
}

/// Decides whether a failed attempt is retried.
///
/// `attempt` counts retries already made. Returns the delay to wait before
/// trying again, or `None` when `error` is final.
pub fn next_retry_delay(error: &ClassifiedError, attempt: u32, max_retries: u32) -> Option<Duration> {
    if !error.is_retryable() || max_retries < 1 {
        return None;
    }

    if attempt >= max_retries {
        return None;
    }

    Some(backoff_delay(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_backoff_schedule() {
        assert_eq!(backoff_delay(0), Duration::from_millis(400));
        assert_eq!(backoff_delay(1), Duration::from_millis(800));
        assert_eq!(backoff_delay(2), Duration::from_millis(1600));
        assert_eq!(backoff_delay(4), Duration::from_millis(6400));
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(backoff_delay(64), BASE_RETRY_DELAY.saturating_mul(u32::MAX));
    }

    #[test]
    fn test_non_retryable_error_is_final() {
        let err = ClassifiedError::new(ErrorKind::Authentication, "");
        assert_eq!(next_retry_delay(&err, 0, 5), None);
    }

    #[test]
    fn test_zero_budget_is_final() {
        let err = ClassifiedError::new(ErrorKind::Connection, "refused");
        assert_eq!(next_retry_delay(&err, 0, 0), None);
    }

    #[test]
    fn test_budget_exhausted() {
        let err = ClassifiedError::new(ErrorKind::ServiceUnavailable, "");
        assert_eq!(next_retry_delay(&err, 2, 3), Some(Duration::from_millis(1600)));
        assert_eq!(next_retry_delay(&err, 3, 3), None);
    }
}
