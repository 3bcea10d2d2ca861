//! Resting/active opacity state machine with a debounced return to rest.
//!
//! At most one quiet-period timer is outstanding. Every scroll cancels the
//! pending timer and schedules a fresh one, so only a full quiet period after
//! the last scroll brings the indicator back to rest.

use std::time::Duration;

use crate::config::HoverLeavePolicy;
use crate::constants::{ACTIVE_OPACITY, RESTING_OPACITY};
use crate::environment::{Scheduler, TimerHandle};

/// Opacity state of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Low opacity, no recent activity
    #[default]
    Resting,
    /// Full opacity while scrolling or hovered
    Active,
}

impl Visibility {
    /// Opacity value for this state (0.0 to 1.0)
    pub fn opacity(&self) -> f32 {
        match self {
            Visibility::Resting => RESTING_OPACITY,
            Visibility::Active => ACTIVE_OPACITY,
        }
    }
}

/// Tracks visibility, hover and the pending quiet timer.
///
/// Methods return `Some(state)` when the opacity must be re-applied.
#[derive(Debug, Default)]
pub struct VisibilityMachine {
    state: Visibility,
    hovered: bool,
    pending: Option<TimerHandle>,
}

impl VisibilityMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Handle of the outstanding quiet timer, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// A scroll happened: go active and restart the quiet period.
    ///
    /// If no timer can be armed the indicator rests at once instead of
    /// staying active forever.
    pub fn on_scroll<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        quiet: Duration,
    ) -> Option<Visibility> {
        if !self.restart_timer(scheduler, quiet) {
            return self.transition(Visibility::Resting);
        }
        self.transition(Visibility::Active)
    }

    /// The pointer entered the track: go active and drop any pending rest.
    pub fn on_pointer_enter<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Option<Visibility> {
        self.hovered = true;
        self.cancel_timer(scheduler);
        self.transition(Visibility::Active)
    }

    /// The pointer left the track.
    pub fn on_pointer_leave<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        policy: HoverLeavePolicy,
        quiet: Duration,
    ) -> Option<Visibility> {
        self.hovered = false;
        match policy {
            HoverLeavePolicy::Immediate => {
                self.cancel_timer(scheduler);
                self.transition(Visibility::Resting)
            }
            HoverLeavePolicy::Debounced => {
                if self.state == Visibility::Active && !self.restart_timer(scheduler, quiet) {
                    return self.transition(Visibility::Resting);
                }
                None
            }
        }
    }

    /// A quiet timer fired. Stale handles are ignored.
    pub fn on_quiet_elapsed(&mut self, handle: TimerHandle) -> Option<Visibility> {
        if self.pending != Some(handle) {
            log::trace!("Visibility: ignoring stale timer {:?}", handle);
            return None;
        }
        self.pending = None;

        if self.hovered {
            return None;
        }
        self.transition(Visibility::Resting)
    }

    /// Force the resting state, e.g. after a layout pass.
    pub fn reset<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Visibility {
        self.cancel_timer(scheduler);
        self.state = Visibility::Resting;
        self.state
    }

    /// Cancel the outstanding timer without changing state.
    pub fn cancel_timer<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            log::trace!("Visibility: cancel timer {:?}", handle);
            scheduler.cancel(handle);
        }
    }

    /// Replace the pending timer. Returns false if none could be armed.
    fn restart_timer<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        quiet: Duration,
    ) -> bool {
        self.cancel_timer(scheduler);
        match scheduler.schedule(quiet) {
            Some(handle) => {
                log::trace!("Visibility: scheduled timer {:?}", handle);
                self.pending = Some(handle);
                true
            }
            None => {
                log::warn!("Visibility: quiet timer unavailable, resting now");
                false
            }
        }
    }

    fn transition(&mut self, next: Visibility) -> Option<Visibility> {
        if self.state == next {
            return None;
        }
        self.state = next;
        Some(next)
    }
}
