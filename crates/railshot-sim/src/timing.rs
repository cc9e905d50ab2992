//! The two independent event sources: display refresh and the spawn timer.
//!
//! Both are driven by monotonic timestamps supplied by the caller, so the
//! real-time loop and the tests share one implementation.

use std::time::Duration;

/// Measures elapsed time between consecutive frame cycles.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first call after construction or
    /// `reset` returns 0.
    pub fn delta(&mut self, now: Duration) -> f64 {
        let dt = match self.last {
            Some(last) => now.saturating_sub(last).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous timestamp so the next delta starts from zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Fixed-period timer, like a repeating interval callback.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Duration>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of periods that elapsed up to `now`. The first poll arms the
    /// timer and never fires.
    pub fn poll(&mut self, now: Duration) -> u32 {
        let Some(mut due) = self.next_due else {
            self.next_due = Some(now + self.period);
            return 0;
        };

        let mut fired = 0;
        while now >= due {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_first_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(Duration::from_secs(5)), 0.0);
        assert!((clock.delta(Duration::from_millis(5_016)) - 0.016).abs() < 1e-12);
    }

    #[test]
    fn test_frame_clock_reset_skips_gap() {
        let mut clock = FrameClock::new();
        clock.delta(Duration::from_secs(1));
        clock.reset();
        assert_eq!(clock.delta(Duration::from_secs(60)), 0.0);
        assert!((clock.delta(Duration::from_secs(61)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_clock_ignores_time_going_backwards() {
        let mut clock = FrameClock::new();
        clock.delta(Duration::from_secs(10));
        assert_eq!(clock.delta(Duration::from_secs(9)), 0.0);
    }

    #[test]
    fn test_interval_timer_fires_once_per_period() {
        let mut timer = IntervalTimer::new(Duration::from_millis(1000));
        assert_eq!(timer.poll(Duration::ZERO), 0);
        assert_eq!(timer.poll(Duration::from_millis(999)), 0);
        assert_eq!(timer.poll(Duration::from_millis(1000)), 1);
        assert_eq!(timer.poll(Duration::from_millis(1500)), 0);
        assert_eq!(timer.poll(Duration::from_millis(2000)), 1);
    }

    #[test]
    fn test_interval_timer_catches_up() {
        let mut timer = IntervalTimer::new(Duration::from_millis(1000));
        timer.poll(Duration::ZERO);
        assert_eq!(timer.poll(Duration::from_millis(3500)), 3);
        assert_eq!(timer.poll(Duration::from_millis(4000)), 1);
    }
}
