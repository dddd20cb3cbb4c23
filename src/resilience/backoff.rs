use std::time::Duration;

/// Retry delay that doubles after every failed fetch, up to a ceiling.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    base: Duration,
    max: Duration,
    attempts: u32,
}

impl Backoff {
    #[must_use]
    pub fn new(base: Duration, max: Duration) -> Self {
        let base = base.min(max);
        Self {
            current: base,
            base,
            max,
            attempts: 0,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        self.attempts = self.attempts.saturating_add(1);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.base;
        self.attempts = 0;
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_secs(300))
    }
}
