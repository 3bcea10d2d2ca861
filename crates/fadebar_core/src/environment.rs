//! Traits the indicator uses to talk to its surroundings.
//!
//! The engine never touches a document tree directly. It reads host metrics
//! through [`ScrollHost`], applies styles through [`StyleSink`] and defers the
//! quiet-period callback through [`Scheduler`]. An environment implements all
//! three and is then an [`Environment`].

use std::time::Duration;

use crate::color::Color;
use crate::geometry::{HostKind, HostMetrics};

/// The two visual parts of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Track,
    Thumb,
}

/// Opaque id of a scheduled quiet-period callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Read access to the scrolled region plus the ability to scroll it.
pub trait ScrollHost {
    /// Whether the host is the page root or a nested element.
    fn kind(&self) -> HostKind;

    /// Current metrics of the host and viewport.
    fn metrics(&self) -> HostMetrics;

    /// Rendered height of a mounted part, if the environment can measure it.
    fn rendered_height(&self, _part: Part) -> Option<f32> {
        None
    }

    /// Set the host's absolute scroll offset. The host clamps it.
    fn set_scroll_offset(&mut self, offset: f32);
}

/// Style-application interface for the indicator's parts.
pub trait StyleSink {
    /// Create the track and thumb. Called once, only when a scrollbar is needed.
    fn mount_parts(&mut self);

    /// Remove the track and thumb.
    fn unmount_parts(&mut self);

    fn set_opacity(&mut self, part: Part, opacity: f32);
    fn set_height(&mut self, part: Part, px: f32);
    fn set_top(&mut self, part: Part, px: f32);
    fn set_right(&mut self, part: Part, px: f32);
    fn set_background(&mut self, part: Part, color: Color);
    fn set_translate_y(&mut self, part: Part, px: f32);

    /// Toggle document-wide text selection.
    fn set_text_selection_disabled(&mut self, disabled: bool);
}

/// Fire-once deferred callbacks.
///
/// `schedule` returns `None` when the environment could not arm the timer.
/// When a scheduled timer fires, the environment must deliver
/// [`IndicatorEvent::QuietElapsed`](crate::IndicatorEvent::QuietElapsed)
/// with the same handle.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> Option<TimerHandle>;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Everything a [`ScrollIndicator`](crate::ScrollIndicator) needs.
pub trait Environment: ScrollHost + StyleSink + Scheduler {}

impl<T: ScrollHost + StyleSink + Scheduler> Environment for T {}
