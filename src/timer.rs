use std::time::{Duration, Instant};

/// Wall-clock timer with an optional time limit.
#[derive(Clone, Debug)]
pub struct Timer {
    start: Instant,
    time_limit: Option<Duration>,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            time_limit: None,
        }
    }
}

impl Timer {
    /// Returns a timer with the given time limit in seconds.
    ///
    /// Negative or non-finite limits expire immediately.
    pub fn with_time_limit(time_limit: f64) -> Self {
        Self {
            start: Instant::now(),
            time_limit: Some(Duration::try_from_secs_f64(time_limit).unwrap_or(Duration::ZERO)),
        }
    }

    /// Returns the elapsed time in seconds.
    pub fn get_elapsed_time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Returns the remaining time in seconds.
    pub fn get_remaining_time_limit(&self) -> Option<f64> {
        self.time_limit
            .map(|time_limit| time_limit.saturating_sub(self.start.elapsed()).as_secs_f64())
    }

    /// Returns whether the time limit is reached.
    pub fn check_time_limit(&self) -> bool {
        self.get_remaining_time_limit()
            .is_some_and(|remaining| remaining <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_limit() {
        let timer = Timer::default();
        assert_eq!(timer.get_remaining_time_limit(), None);
        assert!(!timer.check_time_limit());
        assert!(timer.get_elapsed_time() >= 0.0);
    }

    #[test]
    fn test_zero_limit_expires() {
        let timer = Timer::with_time_limit(0.0);
        assert_eq!(timer.get_remaining_time_limit(), Some(0.0));
        assert!(timer.check_time_limit());
    }

    #[test]
    fn test_negative_limit_expires() {
        assert!(Timer::with_time_limit(-1.0).check_time_limit());
    }

    #[test]
    fn test_large_limit() {
        let timer = Timer::with_time_limit(3600.0);
        assert!(!timer.check_time_limit());
        assert!(timer.get_remaining_time_limit().unwrap() > 0.0);
    }
}
