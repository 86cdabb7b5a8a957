//! Core types for the tally balance dashboard.
//!
//! This crate holds the balance count-up animation (a tick-driven state
//! machine plus the schedule that drives it), the page model the dashboard
//! reads its target value from, the particle background configuration record,
//! and the shared color theme.

mod animator;
mod format;
mod page;
mod particles;
mod schedule;
mod theme;

pub use animator::{AnimationState, BalanceAnimator, MAX_TICKS, STEP_DIVISOR, Tick, animate};
pub use format::format_amount;
pub use page::{BALANCE_ELEMENT_ID, Element, Page, TargetError, VALUE_ATTRIBUTE, initialize};
pub use particles::{
    HoverEvent, HoverMode, InteractivityConfig, InteractivityEvents, LineLinkedConfig,
    MoveConfig, ParticleConfig, ParticlesSection, ValueConfig,
};
pub use schedule::{DEFAULT_TICK_PERIOD, Schedule, run_blocking};
pub use theme::ColorTheme;
