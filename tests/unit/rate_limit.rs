//! Unit tests for rate limiting through the public interface
//!
//! Simulated-clock coverage lives next to the implementation; these tests
//! exercise the behavior visible to callers in real time.

use std::time::Duration;
use web_search_client::client::{Admission, RateLimiter};

#[test]
fn test_daily_quota_is_a_hard_ceiling() {
    let limiter = RateLimiter::new(2, 0);

    assert_eq!(limiter.admit(), Admission::Proceed);
    limiter.record_request();
    assert_eq!(limiter.admit(), Admission::Proceed);
    limiter.record_request();

    match limiter.admit() {
        Admission::Reject { retry_after } => {
            // Freshly created window: the reset is ~24h out
            assert!(retry_after > Duration::from_secs(23 * 3600));
        }
        other => panic!("expected Reject, got {other:?}"),
    }
    assert_eq!(limiter.daily_count(), 2);
}

#[test]
fn test_burst_beyond_per_second_quota_requires_delay() {
    let limiter = RateLimiter::new(100, 3);

    for _ in 0..3 {
        assert_eq!(limiter.admit(), Admission::Proceed);
        limiter.record_request();
    }

    match limiter.admit() {
        Admission::ProceedAfterDelay(wait) => {
            assert!(wait > Duration::ZERO);
            assert!(wait <= Duration::from_secs(1));
        }
        other => panic!("expected ProceedAfterDelay, got {other:?}"),
    }
}

#[test]
fn test_rejection_is_not_recorded() {
    let limiter = RateLimiter::new(1, 0);

    limiter.record_request();
    assert!(matches!(limiter.admit(), Admission::Reject { .. }));
    assert!(matches!(limiter.admit(), Admission::Reject { .. }));

    // Rejected admissions never advance the counter
    assert_eq!(limiter.daily_count(), 1);
}

#[test]
fn test_zero_per_second_quota_only_enforces_daily() {
    let limiter = RateLimiter::new(1000, 0);

    for _ in 0..100 {
        assert_eq!(limiter.admit(), Admission::Proceed);
        limiter.record_request();
    }
}
