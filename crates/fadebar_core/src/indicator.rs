//! The scroll indicator: geometry, visibility and dragging around one
//! shared piece of state.
//!
//! An indicator only exists in a ready state. [`ScrollIndicator::mount`]
//! validates the configuration, checks whether the host overflows at all and,
//! if so, mounts the parts and runs the first layout before handing the
//! indicator back.

use crate::config::IndicatorConfig;
use crate::drag::DragController;
use crate::environment::{Environment, Part};
use crate::error::Result;
use crate::event::IndicatorEvent;
use crate::geometry::{compute_thumb, compute_track, needs_scrollbar, ThumbLayout, TrackLayout};
use crate::visibility::{Visibility, VisibilityMachine};

/// Outcome of [`ScrollIndicator::mount`].
#[derive(Debug)]
pub enum Mounted<E: Environment> {
    /// The host overflows; the indicator is wired and laid out.
    Ready(ScrollIndicator<E>),
    /// The host fits its viewport. Nothing was mounted and the environment
    /// is returned untouched.
    NotNeeded(E),
}

impl<E: Environment> Mounted<E> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Mounted::Ready(_))
    }

    /// The indicator, if one was mounted.
    pub fn into_indicator(self) -> Option<ScrollIndicator<E>> {
        match self {
            Mounted::Ready(indicator) => Some(indicator),
            Mounted::NotNeeded(_) => None,
        }
    }
}

/// A custom vertical scroll indicator bound to one environment.
#[derive(Debug)]
pub struct ScrollIndicator<E: Environment> {
    config: IndicatorConfig,
    env: E,
    track: TrackLayout,
    thumb: ThumbLayout,
    visibility: VisibilityMachine,
    drag: DragController,
}

impl<E: Environment> ScrollIndicator<E> {
    /// Validate `config`, run the needs-scrollbar check and, when the host
    /// overflows, mount and lay out the indicator.
    pub fn mount(config: IndicatorConfig, mut env: E) -> Result<Mounted<E>> {
        config.validate()?;

        let kind = env.kind();
        let metrics = env.metrics();
        if !needs_scrollbar(kind, &metrics) {
            log::debug!(
                "ScrollIndicator: {:?} host fits its viewport ({} <= {}), not mounting",
                kind,
                metrics.scroll_height,
                metrics.viewport_height
            );
            return Ok(Mounted::NotNeeded(env));
        }

        env.mount_parts();
        if let Some(color) = config.track_color {
            env.set_background(Part::Track, color);
        }
        if let Some(color) = config.thumb_color {
            env.set_background(Part::Thumb, color);
        }

        let mut indicator = Self {
            track: compute_track(&metrics, config.height_fraction, config.right_offset),
            thumb: compute_thumb(&metrics, 0.0),
            config,
            env,
            visibility: VisibilityMachine::new(),
            drag: DragController::new(),
        };
        indicator.recompute_layout();
        indicator.update_thumb();

        log::debug!(
            "ScrollIndicator: mounted on {:?} host (track {:.1}px, thumb {:.1}px)",
            kind,
            indicator.track.height,
            indicator.thumb.height
        );
        Ok(Mounted::Ready(indicator))
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: IndicatorEvent) {
        match event {
            IndicatorEvent::Scroll => {
                self.update_thumb();
                let quiet = self.config.quiet_period_duration();
                if let Some(state) = self.visibility.on_scroll(&mut self.env, quiet) {
                    self.apply_visibility(state);
                }
            }
            IndicatorEvent::Resize => {
                self.recompute_layout();
                self.update_thumb();
            }
            IndicatorEvent::PointerDown { y, target } => {
                if target == Part::Thumb {
                    self.begin_drag(y);
                }
            }
            IndicatorEvent::PointerMove { y } => self.drag_to(y),
            IndicatorEvent::PointerUp => self.end_drag(),
            IndicatorEvent::PointerEnter => {
                if let Some(state) = self.visibility.on_pointer_enter(&mut self.env) {
                    self.apply_visibility(state);
                }
            }
            IndicatorEvent::PointerLeave => {
                let policy = self.config.hover_leave;
                let quiet = self.config.quiet_period_duration();
                if let Some(state) = self.visibility.on_pointer_leave(&mut self.env, policy, quiet)
                {
                    self.apply_visibility(state);
                }
            }
            IndicatorEvent::QuietElapsed(handle) => {
                if let Some(state) = self.visibility.on_quiet_elapsed(handle) {
                    self.apply_visibility(state);
                }
            }
        }
    }

    /// Recompute the track from current metrics and reset to resting opacity.
    pub fn recompute_layout(&mut self) {
        let metrics = self.env.metrics();
        self.track = compute_track(&metrics, self.config.height_fraction, self.config.right_offset);

        self.env.set_height(Part::Track, self.track.height);
        self.env.set_top(Part::Track, self.track.top);
        if let Some(right) = self.track.right {
            self.env.set_right(Part::Track, right);
        }

        let state = self.visibility.reset(&mut self.env);
        self.apply_visibility(state);

        log::debug!(
            "ScrollIndicator: layout track height={:.1} top={:.1}",
            self.track.height,
            self.track.top
        );
    }

    /// Resize and translate the thumb for the current scroll offset.
    pub fn update_thumb(&mut self) {
        let metrics = self.env.metrics();
        self.thumb = compute_thumb(&metrics, self.track_height());

        self.env.set_height(Part::Thumb, self.thumb.height);
        self.env.set_translate_y(Part::Thumb, self.thumb.offset);

        log::trace!(
            "ScrollIndicator: thumb height={:.1} offset={:.1} (scroll {:.1})",
            self.thumb.height,
            self.thumb.offset,
            metrics.scroll_offset
        );
    }

    /// Tear the indicator down and hand the environment back.
    ///
    /// Cancels the pending quiet timer, ends any drag and unmounts the parts.
    pub fn dispose(self) -> E {
        let Self {
            mut env,
            mut visibility,
            mut drag,
            ..
        } = self;

        visibility.cancel_timer(&mut env);
        if drag.end() {
            env.set_text_selection_disabled(false);
        }
        env.unmount_parts();

        log::debug!("ScrollIndicator: disposed");
        env
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.state()
    }

    pub fn is_hovered(&self) -> bool {
        self.visibility.is_hovered()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn track(&self) -> TrackLayout {
        self.track
    }

    pub fn thumb(&self) -> ThumbLayout {
        self.thumb
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    fn track_height(&self) -> f32 {
        self.env
            .rendered_height(Part::Track)
            .unwrap_or(self.track.height)
    }

    fn apply_visibility(&mut self, state: Visibility) {
        self.env.set_opacity(Part::Track, state.opacity());
    }

    fn begin_drag(&mut self, pointer_y: f32) {
        let scroll_offset = self.env.metrics().scroll_offset;
        if self.drag.begin(pointer_y, scroll_offset) {
            self.env.set_text_selection_disabled(true);
            log::debug!(
                "ScrollIndicator: drag start at y={:.1}, scroll={:.1}",
                pointer_y,
                scroll_offset
            );
        }
    }

    fn drag_to(&mut self, pointer_y: f32) {
        let total_scrollable = self.env.metrics().max_scroll();
        let target = self.drag.target_offset(
            pointer_y,
            self.config.velocity,
            self.track_height(),
            total_scrollable,
        );
        if let Some(offset) = target {
            self.env.set_scroll_offset(offset);
        }
    }

    fn end_drag(&mut self) {
        if self.drag.end() {
            self.env.set_text_selection_disabled(false);
            log::debug!("ScrollIndicator: drag end");
        }
    }
}
