//! Fixed-period recurring schedules.

use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

/// Default period between animation ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Shortest period a [`Schedule`] accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A recurring schedule driven by an external clock.
///
/// The owner reports how much time has passed since the schedule started and
/// gets back how many ticks fell due. The first tick is due one full period
/// after the start. Once cancelled the schedule never reports another tick.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Time between ticks.
    period: Duration,
    /// Offset from the start at which the next tick is due.
    next_due: Duration,
    /// Whether the schedule has been released.
    cancelled: bool,
}

impl Schedule {
    /// Create a schedule ticking every `period` (at least 1 ms).
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next_due: period,
            cancelled: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Release the schedule. Returns `true` only for the call that cancelled it.
    pub fn cancel(&mut self) -> bool {
        !std::mem::replace(&mut self.cancelled, true)
    }

    /// Number of ticks that fell due up to `elapsed`, consuming them.
    pub fn due_ticks(&mut self, elapsed: Duration) -> u32 {
        if self.cancelled || elapsed < self.next_due {
            return 0;
        }

        let behind = (elapsed - self.next_due).as_nanos() / self.period.as_nanos();
        let due = u32::try_from(behind.saturating_add(1)).unwrap_or(u32::MAX);
        self.next_due += self.period * due;
        due
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

/// Call `step` every `period` on the current thread until it breaks.
///
/// Sleeps before each call, so the first call happens one period after the
/// start. Returns the number of calls made.
pub fn run_blocking(period: Duration, mut step: impl FnMut() -> ControlFlow<()>) -> u32 {
    let mut calls = 0;
    loop {
        thread::sleep(period);
        calls += 1;
        if step().is_break() {
            return calls;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_after_one_period() {
        let mut schedule = Schedule::new(Duration::from_millis(10));
        assert_eq!(schedule.due_ticks(Duration::from_millis(0)), 0);
        assert_eq!(schedule.due_ticks(Duration::from_millis(9)), 0);
        assert_eq!(schedule.due_ticks(Duration::from_millis(10)), 1);
        assert_eq!(schedule.due_ticks(Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_catches_up_after_long_frame() {
        let mut schedule = Schedule::new(Duration::from_millis(10));
        assert_eq!(schedule.due_ticks(Duration::from_millis(35)), 3);
        assert_eq!(schedule.due_ticks(Duration::from_millis(39)), 0);
        assert_eq!(schedule.due_ticks(Duration::from_millis(40)), 1);
    }

    #[test]
    fn test_cancel_happens_once() {
        let mut schedule = Schedule::default();
        assert!(schedule.cancel());
        assert!(!schedule.cancel());
        assert!(schedule.is_cancelled());
        assert_eq!(schedule.due_ticks(Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let schedule = Schedule::new(Duration::ZERO);
        assert_eq!(schedule.period(), MIN_PERIOD);
    }

    #[test]
    fn test_run_blocking_stops_on_break() {
        let mut remaining = 3;
        let calls = run_blocking(Duration::ZERO, || {
            remaining -= 1;
            if remaining == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(calls, 3);
    }
}
