//! In-memory page for driving an indicator without a browser.
//!
//! `SimulatedPage` implements every environment trait. It keeps the style
//! values the indicator writes, queues the scroll events a real host would
//! emit, and runs quiet timers against a virtual clock that only moves when
//! [`advance`] is called.

use std::collections::VecDeque;
use std::time::Duration;

use fadebar_core::prelude::*;
use serde::Serialize;
use web_time::Instant;

/// Inline style values written to one part.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartStyle {
    pub opacity: Option<f32>,
    pub height: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub translate_y: Option<f32>,
    /// Background as `#rrggbbaa`
    pub background: Option<String>,
}

/// Serializable view of the page state.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub elapsed_ms: u128,
    pub scroll_offset: f32,
    pub viewport_height: f32,
    pub track: Option<PartStyle>,
    pub thumb: Option<PartStyle>,
    pub text_selection_disabled: bool,
    pub pending_timers: usize,
}

#[derive(Debug)]
struct Timer {
    handle: TimerHandle,
    due: Instant,
}

/// A scrollable page or element living entirely in memory.
#[derive(Debug)]
pub struct SimulatedPage {
    kind: HostKind,
    metrics: HostMetrics,
    started: Instant,
    now: Instant,
    next_timer: u64,
    timers: Vec<Timer>,
    events: VecDeque<IndicatorEvent>,
    track: Option<PartStyle>,
    thumb: Option<PartStyle>,
    text_selection_disabled: bool,
}

impl SimulatedPage {
    /// A page whose body is the scroll host.
    pub fn page(content_height: f32, viewport_height: f32) -> Self {
        Self::new(
            HostKind::PageRoot,
            HostMetrics {
                scroll_offset: 0.0,
                scroll_height: content_height,
                client_height: viewport_height,
                viewport_height,
                document_height: content_height,
            },
        )
    }

    /// A nested scrollable element inside a page that itself fits the window.
    pub fn element(scroll_height: f32, client_height: f32, viewport_height: f32) -> Self {
        Self::new(
            HostKind::Element,
            HostMetrics {
                scroll_offset: 0.0,
                scroll_height,
                client_height,
                viewport_height,
                document_height: viewport_height,
            },
        )
    }

    fn new(kind: HostKind, metrics: HostMetrics) -> Self {
        let now = Instant::now();
        Self {
            kind,
            metrics,
            started: now,
            now,
            next_timer: 0,
            timers: Vec::new(),
            events: VecDeque::new(),
            track: None,
            thumb: None,
            text_selection_disabled: false,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Scroll the host as a user would (wheel, keyboard). Queues a scroll
    /// event if the offset actually changed.
    pub fn scroll_to(&mut self, offset: f32) {
        let clamped = offset.clamp(0.0, self.host_max_scroll());
        if clamped != self.metrics.scroll_offset {
            self.metrics.scroll_offset = clamped;
            self.events.push_back(IndicatorEvent::Scroll);
        }
    }

    /// Resize the viewport and queue a resize event.
    pub fn resize(&mut self, viewport_height: f32) {
        self.metrics.viewport_height = viewport_height;
        if self.kind == HostKind::PageRoot {
            self.metrics.client_height = viewport_height;
        }
        self.metrics.scroll_offset = self.metrics.scroll_offset.min(self.host_max_scroll());
        self.events.push_back(IndicatorEvent::Resize);
    }

    /// Native scroll range of the host: the window for the page root, the
    /// element's own client box otherwise.
    fn host_max_scroll(&self) -> f32 {
        let visible = match self.kind {
            HostKind::PageRoot => self.metrics.viewport_height,
            HostKind::Element => self.metrics.client_height,
        };
        (self.metrics.scroll_height - visible).max(0.0)
    }

    /// Next queued host event.
    pub fn take_event(&mut self) -> Option<IndicatorEvent> {
        self.events.pop_front()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Instant) -> Option<IndicatorEvent> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| t.due)
            .map(|(i, _)| i)?;

        let timer = self.timers.remove(index);
        self.now = self.now.max(timer.due);
        Some(IndicatorEvent::QuietElapsed(timer.handle))
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Instant) {
        self.now = self.now.max(now);
    }

    pub fn scroll_offset(&self) -> f32 {
        self.metrics.scroll_offset
    }

    pub fn is_mounted(&self) -> bool {
        self.track.is_some()
    }

    pub fn style(&self, part: Part) -> Option<&PartStyle> {
        match part {
            Part::Track => self.track.as_ref(),
            Part::Thumb => self.thumb.as_ref(),
        }
    }

    pub fn text_selection_disabled(&self) -> bool {
        self.text_selection_disabled
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            elapsed_ms: self.now.duration_since(self.started).as_millis(),
            scroll_offset: self.metrics.scroll_offset,
            viewport_height: self.metrics.viewport_height,
            track: self.track.clone(),
            thumb: self.thumb.clone(),
            text_selection_disabled: self.text_selection_disabled,
            pending_timers: self.timers.len(),
        }
    }

    fn part_mut(&mut self, part: Part) -> Option<&mut PartStyle> {
        let style = match part {
            Part::Track => self.track.as_mut(),
            Part::Thumb => self.thumb.as_mut(),
        };
        if style.is_none() {
            log::warn!("SimulatedPage: style write to unmounted {:?}", part);
        }
        style
    }
}

impl ScrollHost for SimulatedPage {
    fn kind(&self) -> HostKind {
        self.kind
    }

    fn metrics(&self) -> HostMetrics {
        self.metrics
    }

    fn rendered_height(&self, part: Part) -> Option<f32> {
        self.style(part).and_then(|s| s.height)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_to(offset);
    }
}

impl StyleSink for SimulatedPage {
    fn mount_parts(&mut self) {
        self.track = Some(PartStyle::default());
        self.thumb = Some(PartStyle::default());
    }

    fn unmount_parts(&mut self) {
        self.track = None;
        self.thumb = None;
    }

    fn set_opacity(&mut self, part: Part, opacity: f32) {
        if let Some(style) = self.part_mut(part) {
            style.opacity = Some(opacity);
        }
    }

    fn set_height(&mut self, part: Part, px: f32) {
        if let Some(style) = self.part_mut(part) {
            style.height = Some(px);
        }
    }

    fn set_top(&mut self, part: Part, px: f32) {
        if let Some(style) = self.part_mut(part) {
            style.top = Some(px);
        }
    }

    fn set_right(&mut self, part: Part, px: f32) {
        if let Some(style) = self.part_mut(part) {
            style.right = Some(px);
        }
    }

    fn set_background(&mut self, part: Part, color: Color) {
        if let Some(style) = self.part_mut(part) {
            style.background = Some(color.to_hex());
        }
    }

    fn set_translate_y(&mut self, part: Part, px: f32) {
        if let Some(style) = self.part_mut(part) {
            style.translate_y = Some(px);
        }
    }

    fn set_text_selection_disabled(&mut self, disabled: bool) {
        self.text_selection_disabled = disabled;
    }
}

impl Scheduler for SimulatedPage {
    fn schedule(&mut self, delay: Duration) -> Option<TimerHandle> {
        self.next_timer += 1;
        let handle = TimerHandle(self.next_timer);
        self.timers.push(Timer {
            handle,
            due: self.now + delay,
        });
        Some(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}

/// Deliver every queued host event to the indicator. Returns how many were
/// delivered.
pub fn pump(indicator: &mut ScrollIndicator<SimulatedPage>) -> usize {
    let mut delivered = 0;
    while let Some(event) = indicator.env_mut().take_event() {
        indicator.handle(event);
        delivered += 1;
    }
    delivered
}

/// Run the virtual clock forward, firing due timers in order.
pub fn advance(indicator: &mut ScrollIndicator<SimulatedPage>, by: Duration) {
    pump(indicator);
    let until = indicator.env().now() + by;
    while let Some(event) = indicator.env_mut().pop_due(until) {
        indicator.handle(event);
        pump(indicator);
    }
    indicator.env_mut().set_now(until);
}
