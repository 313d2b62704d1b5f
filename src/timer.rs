use std::time::Duration;

/// Repeating autoplay timer, advanced by the host's frame clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayTimer {
    interval: Duration,
    elapsed: Duration,
}

impl AutoplayTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Adds `dt` and reports whether the interval was reached. A long frame
    /// fires once; the remainder carries over to the next period.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        if self.interval.is_zero() || self.elapsed < self.interval {
            return false;
        }
        self.elapsed = Duration::from_nanos((self.elapsed.as_nanos() % self.interval.as_nanos()) as u64);
        true
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut timer = AutoplayTimer::new(Duration::from_millis(100));
        assert!(!timer.tick(Duration::from_millis(60)));
        assert!(timer.tick(Duration::from_millis(60)));
        assert_eq!(timer.elapsed(), Duration::from_millis(20));
        assert!(!timer.tick(Duration::from_millis(60)));
        assert!(timer.tick(Duration::from_millis(20)));
    }

    #[test]
    fn long_frame_fires_once() {
        let mut timer = AutoplayTimer::new(Duration::from_millis(100));
        assert!(timer.tick(Duration::from_millis(350)));
        assert_eq!(timer.elapsed(), Duration::from_millis(50));
    }

    #[test]
    fn reset_restarts_the_period() {
        let mut timer = AutoplayTimer::new(Duration::from_millis(100));
        timer.tick(Duration::from_millis(90));
        timer.reset();
        assert!(!timer.tick(Duration::from_millis(90)));
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut timer = AutoplayTimer::new(Duration::ZERO);
        assert!(!timer.tick(Duration::from_secs(1)));
    }
}
