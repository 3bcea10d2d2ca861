use crate::environment::{Part, TimerHandle};

/// Input events an indicator responds to.
///
/// Pointer coordinates are viewport Y positions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorEvent {
    /// The host scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// Pointer pressed over one of the parts.
    PointerDown { y: f32, target: Part },
    /// Pointer moved anywhere in the viewport.
    PointerMove { y: f32 },
    /// Pointer released anywhere in the viewport.
    PointerUp,
    /// Pointer entered the track's hit area.
    PointerEnter,
    /// Pointer left the track's hit area.
    PointerLeave,
    /// A quiet-period timer fired.
    QuietElapsed(TimerHandle),
}
