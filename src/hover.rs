//! Debounced show/hide state for the per-block revert control.
//!
//! Pointer movement across change lines must not flicker the control:
//! leaving the lines arms a short hide deadline, and re-entering the
//! lines or the control itself cancels it. The machine never spawns
//! timers; the caller supplies `Instant`s and drives expiry through
//! `tick`, which keeps it deterministic under test.

use std::time::{Duration, Instant};

use crate::model::ChangeBlockId;

pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug)]
pub struct HoverControl {
    hide_delay: Duration,
    target: Option<ChangeBlockId>,
    hide_at: Option<Instant>,
}

impl HoverControl {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            hide_delay,
            target: None,
            hide_at: None,
        }
    }

    /// The pointer moved onto a change line owned by `block`. Shows the
    /// control for that block immediately and cancels any pending hide;
    /// moving onto a different block's lines retargets the control.
    pub fn enter_line(&mut self, block: ChangeBlockId) {
        self.target = Some(block);
        self.hide_at = None;
    }

    /// The pointer left the change lines. Arms the hide deadline.
    pub fn leave_line(&mut self, now: Instant) {
        if self.target.is_some() {
            self.hide_at = Some(now + self.hide_delay);
        }
    }

    /// The pointer reached the control itself before the deadline, so
    /// the pending hide is cancelled.
    pub fn enter_control(&mut self) {
        self.hide_at = None;
    }

    /// The pointer left the control. Arms the hide deadline.
    pub fn leave_control(&mut self, now: Instant) {
        if self.target.is_some() {
            self.hide_at = Some(now + self.hide_delay);
        }
    }

    /// Expire a due deadline. Call from the event loop before reading
    /// `visible_block`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.hide_at
            && now >= deadline
        {
            self.target = None;
            self.hide_at = None;
        }
    }

    /// Block whose control is currently visible, if any
    pub fn visible_block(&self) -> Option<ChangeBlockId> {
        self.target
    }
}

impl Default for HoverControl {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}
