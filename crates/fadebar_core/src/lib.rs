//! fadebar_core - geometry and state engine for a fading custom scroll indicator
//!
//! The crate computes track and thumb geometry from scroll-host metrics, runs
//! the resting/active opacity state machine and maps thumb drags onto scroll
//! offsets. Platform glue implements [`Environment`] and feeds
//! [`IndicatorEvent`]s into a [`ScrollIndicator`].

pub mod color;
pub mod config;
pub mod constants;
pub mod drag;
pub mod environment;
mod error;
mod event;
pub mod geometry;
mod indicator;
pub mod visibility;

pub use color::Color;
pub use config::{HoverLeavePolicy, IndicatorConfig};
pub use drag::{DragController, DragSession};
pub use environment::{Environment, Part, Scheduler, ScrollHost, StyleSink, TimerHandle};
pub use error::{IndicatorError, Result};
pub use event::IndicatorEvent;
pub use geometry::{HostKind, HostMetrics, ThumbLayout, TrackLayout};
pub use indicator::{Mounted, ScrollIndicator};
pub use visibility::{Visibility, VisibilityMachine};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::{HoverLeavePolicy, IndicatorConfig};
    pub use crate::environment::{Environment, Part, Scheduler, ScrollHost, StyleSink, TimerHandle};
    pub use crate::event::IndicatorEvent;
    pub use crate::geometry::{HostKind, HostMetrics};
    pub use crate::indicator::{Mounted, ScrollIndicator};
    pub use crate::visibility::Visibility;
}
