use std::time::Duration;

/// Bounded retry for steps that opt in with `onError: retry`. Attempts are
/// the initial try plus retries; only external-call failures are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub factor: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            factor: 2.0,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff with full jitter for a 1-based attempt number.
    pub fn backoff_delay(&self, attempt_no: u32) -> Duration {
        let exp = attempt_no.saturating_sub(1) as i32;
        let raw = (self.base_delay.as_millis() as f64) * self.factor.powi(exp);
        let raw_ms = raw.min(self.max_delay.as_millis() as f64).max(0.0) as u64;
        let jitter_ms = if raw_ms == 0 {
            0
        } else {
            fastrand::u64(0..=raw_ms)
        };
        Duration::from_millis(jitter_ms)
    }
}
