//! Drag-to-scroll controller.
//!
//! A drag captures the pointer Y and the host's scroll offset when it starts.
//! Every later move maps the pointer delta onto the full scrollable range,
//! scaled by the configured velocity, relative to that starting offset.

use crate::geometry::drag_scroll_offset;

/// State captured when a drag gesture begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer Y when the drag started
    pub start_pointer_y: f32,
    /// Host scroll offset when the drag started
    pub start_scroll_offset: f32,
}

/// Idle/dragging state machine.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a drag. Returns false if one was already in progress.
    pub fn begin(&mut self, pointer_y: f32, scroll_offset: f32) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            start_pointer_y: pointer_y,
            start_scroll_offset: scroll_offset,
        });
        true
    }

    /// Scroll offset for the current pointer position, or `None` when idle.
    pub fn target_offset(
        &self,
        pointer_y: f32,
        velocity: f32,
        track_height: f32,
        total_scrollable: f32,
    ) -> Option<f32> {
        let session = self.session.as_ref()?;
        let delta_y = pointer_y - session.start_pointer_y;
        Some(drag_scroll_offset(
            session.start_scroll_offset,
            delta_y,
            velocity,
            track_height,
            total_scrollable,
        ))
    }

    /// End the drag. Returns false if none was active.
    pub fn end(&mut self) -> bool {
        self.session.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_target() {
        let drag = DragController::new();
        assert!(!drag.is_dragging());
        assert_eq!(drag.target_offset(100.0, 1.0, 850.0, 2000.0), None);
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut drag = DragController::new();
        assert!(drag.begin(200.0, 500.0));
        assert!(!drag.begin(250.0, 0.0));
        assert_eq!(drag.session().unwrap().start_pointer_y, 200.0);

        let target = drag.target_offset(300.0, 2.0, 850.0, 2000.0).unwrap();
        assert!((target - 970.59).abs() < 0.01);

        assert!(drag.end());
        assert!(!drag.end());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_no_movement_keeps_offset() {
        let mut drag = DragController::new();
        drag.begin(80.0, 321.0);
        assert_eq!(drag.target_offset(80.0, 3.0, 850.0, 2000.0), Some(321.0));
    }
}
