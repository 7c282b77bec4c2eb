use std::time::{Duration, Instant};

/// Single-slot delayed advance. At most one deadline is outstanding at a
/// time: arming again replaces the old deadline, canceling with nothing
/// armed is a no-op. The deadline is polled from the tick loop, so firing
/// and cancellation are serialized on one thread and a cancel issued before
/// the fire always wins.
#[derive(Debug, Default)]
pub struct AutoAdvanceTimer {
    deadline: Option<Instant>,
}

impl AutoAdvanceTimer {
    pub fn arm(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when `now` has reached the armed deadline,
    /// disarming in the same step.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_timer_never_fires() {
        let mut timer = AutoAdvanceTimer::default();
        assert!(!timer.is_armed());
        assert!(!timer.poll(Instant::now()));
    }

    #[test]
    fn test_cancel_without_arm_is_noop() {
        let mut timer = AutoAdvanceTimer::default();
        timer.cancel();
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_fires_once_when_due() {
        let mut timer = AutoAdvanceTimer::default();
        timer.arm(Duration::ZERO);
        let now = Instant::now();
        assert!(timer.poll(now));
        // Disarmed by the fire: no second trigger
        assert!(!timer.poll(now));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_does_not_fire_before_deadline() {
        let mut timer = AutoAdvanceTimer::default();
        timer.arm(Duration::from_secs(3600));
        assert!(timer.is_armed());
        assert!(!timer.poll(Instant::now()));
        // Still armed after a premature poll
        assert!(timer.is_armed());
    }

    #[test]
    fn test_cancel_before_fire_wins() {
        let mut timer = AutoAdvanceTimer::default();
        timer.arm(Duration::ZERO);
        timer.cancel();
        assert!(!timer.poll(Instant::now()));
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut timer = AutoAdvanceTimer::default();
        timer.arm(Duration::ZERO);
        // Re-arm far in the future: the already-due deadline is gone
        timer.arm(Duration::from_secs(3600));
        assert!(!timer.poll(Instant::now()));
        assert!(timer.is_armed());
    }
}
