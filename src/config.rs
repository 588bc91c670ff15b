use std::time::Duration;

/// Timing of the read polling that follows a measurement command.
///
/// The defaults match an SHT3x in high repeatability mode: the conversion takes up to 15ms, the
/// first read is delayed generously and a busy sensor is given a few more chances after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    settle_delay: Duration,
    retry_delay: Duration,
    attempts: u8,
}

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(70);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(30);
pub const DEFAULT_ATTEMPTS: u8 = 4;

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            retry_delay: DEFAULT_RETRY_DELAY,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Policy that never sleeps. Mostly useful with simulated sensors.
    pub fn immediate() -> Self {
        Self::default()
            .with_settle_delay(Duration::ZERO)
            .with_retry_delay(Duration::ZERO)
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Total number of read attempts, clamped to at least one.
    pub fn with_attempts(mut self, attempts: u8) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[inline]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    #[inline]
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Longest time a transaction can spend sleeping before giving up. Saturates at
    /// `Duration::MAX`.
    pub fn worst_case(&self) -> Duration {
        self.retry_delay
            .saturating_mul(u32::from(self.attempts - 1))
            .saturating_add(self.settle_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_worst_case() {
        assert_eq!(RetryPolicy::default().worst_case(), Duration::from_millis(160));
    }

    #[test]
    fn test_attempts_clamped() {
        let policy = RetryPolicy::default().with_attempts(0);
        assert_eq!(policy.attempts(), 1);
        assert_eq!(policy.worst_case(), DEFAULT_SETTLE_DELAY);
    }

    #[test]
    fn test_worst_case_saturates() {
        let policy = RetryPolicy::default().with_retry_delay(Duration::MAX);
        assert_eq!(policy.worst_case(), Duration::MAX);
        let policy = RetryPolicy::default().with_settle_delay(Duration::MAX);
        assert_eq!(policy.worst_case(), Duration::MAX);
    }

    #[test]
    fn test_immediate() {
        let policy = RetryPolicy::immediate();
        assert_eq!(policy.worst_case(), Duration::ZERO);
        assert_eq!(policy.attempts(), DEFAULT_ATTEMPTS);
    }
}
