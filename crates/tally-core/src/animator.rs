//! Balance count-up animation.

use std::ops::ControlFlow;
use std::time::Duration;

use tracing::debug;

use crate::format::format_amount;
use crate::schedule::run_blocking;

/// The target is reached in this many equal steps.
pub const STEP_DIVISOR: f64 = 100.0;

/// Hard cap on ticks per run. One extra step covers accumulated rounding,
/// and also ends runs whose step underflows to zero.
pub const MAX_TICKS: u32 = STEP_DIVISOR as u32 + 1;

/// Lifecycle of one animation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
    Done,
}

/// Text produced by one tick of the animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The running value, still below the target.
    Progress(String),
    /// The exact target. Always the last tick of a run.
    Finished(String),
}

impl Tick {
    /// The text to show.
    pub fn text(&self) -> &str {
        match self {
            Tick::Progress(text) | Tick::Finished(text) => text,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Tick::Finished(_))
    }
}

/// Ramps a displayed amount from zero up to a target in fixed steps.
///
/// Each [`tick`](Self::tick) adds `target / 100` to the running value. The
/// first tick where the running value reaches the target yields the target
/// itself, so accumulated rounding error never shows up in the final text.
#[derive(Debug, Clone)]
pub struct BalanceAnimator {
    /// Value to count up to.
    target: f64,
    /// Increment added per tick.
    step: f64,
    /// Running value shown while the animation is in progress.
    displayed: f64,
    /// Current lifecycle state.
    state: AnimationState,
    /// Ticks taken so far.
    ticks: u32,
}

impl BalanceAnimator {
    /// Create an idle animator for `target`.
    pub fn new(target: f64) -> Self {
        Self {
            target,
            step: target / STEP_DIVISOR,
            displayed: 0.0,
            state: AnimationState::Idle,
            ticks: 0,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_done(&self) -> bool {
        self.state == AnimationState::Done
    }

    /// Move from idle to running. Returns `false` if the run already started.
    pub fn start(&mut self) -> bool {
        if self.state != AnimationState::Idle {
            return false;
        }
        self.state = AnimationState::Running;
        true
    }

    /// Advance one step. Returns `None` unless the animation is running.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.state != AnimationState::Running {
            return None;
        }

        self.displayed += self.step;
        self.ticks += 1;

        if self.displayed >= self.target || self.ticks >= MAX_TICKS {
            self.state = AnimationState::Done;
            debug!(balance = self.target, ticks = self.ticks, "balance animation finished");
            Some(Tick::Finished(format_amount(self.target)))
        } else {
            Some(Tick::Progress(format_amount(self.displayed)))
        }
    }

    /// Take up to `count` ticks, rendering each one. Stops early once done.
    pub fn advance(&mut self, count: u32, mut render: impl FnMut(&str)) -> u32 {
        let mut taken = 0;
        while taken < count {
            let Some(tick) = self.tick() else { break };
            taken += 1;
            render(tick.text());
            if tick.is_finished() {
                break;
            }
        }
        taken
    }
}

/// Count up to `target`, calling `render` every `period` on this thread.
///
/// Blocks until the final render. Returns the number of renders.
pub fn animate(target: f64, period: Duration, mut render: impl FnMut(&str)) -> u32 {
    let mut animator = BalanceAnimator::new(target);
    animator.start();

    run_blocking(period, || match animator.tick() {
        Some(Tick::Progress(text)) => {
            render(&text);
            ControlFlow::Continue(())
        }
        Some(Tick::Finished(text)) => {
            render(&text);
            ControlFlow::Break(())
        }
        None => ControlFlow::Break(()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run to completion, collecting the running value and text of every tick.
    fn collect(target: f64) -> Vec<(f64, Tick)> {
        let mut animator = BalanceAnimator::new(target);
        animator.start();
        let mut ticks = Vec::new();
        while let Some(tick) = animator.tick() {
            ticks.push((animator.displayed(), tick));
        }
        ticks
    }

    #[test]
    fn test_new_animator_is_idle() {
        let mut animator = BalanceAnimator::new(100.0);
        assert_eq!(animator.state(), AnimationState::Idle);
        assert_eq!(animator.step(), 1.0);
        assert_eq!(animator.tick(), None);
        assert_eq!(animator.displayed(), 0.0);
    }

    #[test]
    fn test_start_only_once() {
        let mut animator = BalanceAnimator::new(0.0);
        assert!(animator.start());
        assert!(!animator.start());
        assert_eq!(animator.tick(), Some(Tick::Finished("0.00".to_string())));
        assert!(!animator.start());
        assert_eq!(animator.state(), AnimationState::Done);
    }

    #[test]
    fn test_zero_target_renders_once() {
        let ticks = collect(0.0);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].1, Tick::Finished("0.00".to_string()));
    }

    #[test]
    fn test_final_render_is_exact_target() {
        for target in [0.01, 1.0, 10.0, 99.99, 1234.56, 2550.5, 1_000_000.0] {
            let ticks = collect(target);
            let (_, last) = ticks.last().expect("at least one tick");
            assert_eq!(last, &Tick::Finished(format_amount(target)));
            assert_eq!(ticks.iter().filter(|(_, t)| t.is_finished()).count(), 1);
        }
    }

    #[test]
    fn test_values_before_final_are_below_target() {
        for target in [0.3, 10.0, 2550.5, 777.77] {
            let ticks = collect(target);
            for (displayed, tick) in &ticks[..ticks.len() - 1] {
                assert!(*displayed < target, "{displayed} >= {target}");
                assert!(!tick.is_finished());
            }
        }
    }

    #[test]
    fn test_render_count_is_bounded() {
        for target in [0.01, 0.1, 10.0, 2550.5, 1e9] {
            let count = collect(target).len();
            assert!((100..=101).contains(&count), "{target}: {count} renders");
        }
    }

    #[test]
    fn test_tiny_targets_still_finish() {
        // 1e-322 / 100 underflows to zero, the others lose precision.
        for target in [1e-322, f64::from_bits(149), f64::MIN_POSITIVE] {
            let ticks = collect(target);
            assert!(ticks.len() <= MAX_TICKS as usize, "{target:e}: {} renders", ticks.len());
            assert_eq!(
                ticks.last().map(|(_, t)| t.clone()),
                Some(Tick::Finished("0.00".to_string()))
            );
        }
    }

    #[test]
    fn test_rendered_text_never_decreases() {
        let ticks = collect(2550.5);
        let values: Vec<f64> = ticks
            .iter()
            .map(|(_, t)| t.text().parse().expect("numeric text"))
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_target_2550_5() {
        let ticks = collect(2550.5);
        assert_eq!(ticks[0].1, Tick::Progress("25.50".to_string()));
        assert_eq!(ticks[1].1, Tick::Progress("51.01".to_string()));
        assert_eq!(
            ticks.last().map(|(_, t)| t.clone()),
            Some(Tick::Finished("2550.50".to_string()))
        );
    }

    #[test]
    fn test_target_10_drifts_below_then_snaps() {
        let ticks = collect(10.0);
        assert_eq!(ticks.len(), 101);
        let (before_last, _) = &ticks[ticks.len() - 2];
        assert!(*before_last < 10.0);
        assert_eq!(ticks[ticks.len() - 3].1.text(), "9.90");
        assert_eq!(
            ticks.last().map(|(_, t)| t.clone()),
            Some(Tick::Finished("10.00".to_string()))
        );
    }

    #[test]
    fn test_negative_target_finishes_immediately() {
        let ticks = collect(-5.0);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].1, Tick::Finished("-5.00".to_string()));
    }

    #[test]
    fn test_advance_stops_at_finish() {
        let mut animator = BalanceAnimator::new(1.0);
        animator.start();
        let mut rendered = Vec::new();
        assert_eq!(animator.advance(40, |t| rendered.push(t.to_string())), 40);
        assert_eq!(rendered.last().map(String::as_str), Some("0.40"));

        let taken = animator.advance(500, |t| rendered.push(t.to_string()));
        assert!(taken <= 61);
        assert!(animator.is_done());
        assert_eq!(rendered.last().map(String::as_str), Some("1.00"));
        assert_eq!(animator.advance(10, |_| panic!("rendered after done")), 0);
    }

    #[test]
    fn test_animate_renders_until_target() {
        let mut rendered = Vec::new();
        let renders = animate(2.0, Duration::ZERO, |t| rendered.push(t.to_string()));
        assert_eq!(renders as usize, rendered.len());
        assert_eq!(rendered.first().map(String::as_str), Some("0.02"));
        assert_eq!(rendered.last().map(String::as_str), Some("2.00"));
    }
}
