//! Dual-window rate limiting
//!
//! Tracks a rolling per-second request window and a calendar-day request
//! quota. Decisions are split from waiting: `admit` only reports whether a
//! call may proceed, must wait, or must be rejected; the request executor
//! performs the actual sleep.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Length of the rolling short-term window
const SECOND_WINDOW: Duration = Duration::from_secs(1);

/// Length of the daily quota window
const DAILY_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Outcome of a rate-limit admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed immediately
    Proceed,
    /// The request may proceed after a mandatory delay
    ProceedAfterDelay(Duration),
    /// The daily quota is exhausted; retrying cannot help until the window
    /// resets
    Reject {
        /// Time remaining until the daily window resets
        retry_after: Duration,
    },
}

/// Mutable rate-limit counters
///
/// `request_timestamps` never holds entries older than one second relative
/// to the last prune; `daily_count` never exceeds the daily quota at the
/// moment a request is admitted.
struct RateLimitState {
    request_timestamps: VecDeque<Instant>,
    daily_count: u32,
    daily_reset_at: Instant,
}

/// Dual-window rate limiter
///
/// One instance owns its state; sharing across tasks is safe because the
/// counters live behind a mutex.
pub struct RateLimiter {
    requests_per_day: u32,
    requests_per_second: u32,
    state: Mutex<RateLimitState>,
}

impl RateLimiter {
    /// Create a rate limiter with the given quotas
    ///
    /// # Arguments
    /// * `requests_per_day` - Hard daily ceiling, enforced client-side
    /// * `requests_per_second` - Rolling-window ceiling; 0 disables
    ///   per-second limiting
    pub fn new(requests_per_day: u32, requests_per_second: u32) -> Self {
        Self {
            requests_per_day,
            requests_per_second,
            state: Mutex::new(RateLimitState {
                request_timestamps: VecDeque::new(),
                daily_count: 0,
                daily_reset_at: Instant::now() + DAILY_WINDOW,
            }),
        }
    }

    /// Check whether a request may proceed right now
    pub fn admit(&self) -> Admission {
        self.admit_at(Instant::now())
    }

    /// Admission check against an explicit clock reading
    pub(crate) fn admit_at(&self, now: Instant) -> Admission {
        let mut state = self.lock_state();

        // Reset the daily counter when a new window has started
        if now >= state.daily_reset_at {
            state.daily_count = 0;
            state.daily_reset_at = now + DAILY_WINDOW;
        }

        if state.daily_count >= self.requests_per_day {
            return Admission::Reject {
                retry_after: state.daily_reset_at.saturating_duration_since(now),
            };
        }

        if self.requests_per_second == 0 {
            return Admission::Proceed;
        }

        // Prune timestamps that have left the rolling window
        while let Some(front) = state.request_timestamps.front() {
            if now.saturating_duration_since(*front) >= SECOND_WINDOW {
                state.request_timestamps.pop_front();
            } else {
                break;
            }
        }

        if state.request_timestamps.len() >= self.requests_per_second as usize {
            if let Some(oldest) = state.request_timestamps.front() {
                let wait = SECOND_WINDOW.saturating_sub(now.saturating_duration_since(*oldest));
                if !wait.is_zero() {
                    return Admission::ProceedAfterDelay(wait);
                }
            }
        }

        Admission::Proceed
    }

    /// Record an attempt that reached the transport
    ///
    /// Called after every attempt that produced an HTTP response, success
    /// or failure, since either counts against the upstream quota.
    /// Pre-emptive rejections are never recorded.
    pub fn record_request(&self) {
        self.record_at(Instant::now());
    }

    /// Record an attempt against an explicit clock reading
    pub(crate) fn record_at(&self, now: Instant) {
        let mut state = self.lock_state();
        state.daily_count += 1;
        state.request_timestamps.push_back(now);
    }

    /// Requests counted against the current daily window
    pub fn daily_count(&self) -> u32 {
        self.lock_state().daily_count
    }

    /// The configured daily quota
    pub fn requests_per_day(&self) -> u32 {
        self.requests_per_day
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RateLimitState> {
        // Counter updates cannot leave the state inconsistent, so a
        // poisoned lock is recoverable
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Format a wait duration as an `Xh Ym Zs` breakdown for user messages
pub fn format_reset_wait(wait: Duration) -> String {
    let total = wait.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}h {minutes}m {seconds}s")
}
