//! Browser environment for the indicator.
//!
//! `DomEnvironment` maps the style-application interface onto inline styles of
//! two `div`s, reads metrics from the host element (or the document root when
//! the host is `body`) and backs the quiet timer with `setTimeout`. Every
//! listener belongs to one [`IndicatorHandle`]; disposing or dropping the
//! handle removes them all, so several indicators can live on one page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use fadebar_core::prelude::*;
use fadebar_core::IndicatorError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, MouseEvent, Window};

type Slot = Rc<RefCell<Option<ScrollIndicator<DomEnvironment>>>>;
type WeakSlot = Weak<RefCell<Option<ScrollIndicator<DomEnvironment>>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::log_1(&"fadebar: logger already initialized".into());
    }
}

/// Deliver an event to the indicator in `slot`, if it is still alive.
fn deliver(slot: &WeakSlot, event: IndicatorEvent) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        log::warn!("fadebar: dropped re-entrant {:?}", event);
        return;
    };
    if let Some(indicator) = guard.as_mut() {
        indicator.handle(event);
    }
}

fn to_js(err: IndicatorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// =============================================================================
// Environment
// =============================================================================

struct PendingTimer {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// DOM-backed [`Environment`].
pub struct DomEnvironment {
    window: Window,
    document: Document,
    host: HtmlElement,
    kind: HostKind,
    track: Option<HtmlElement>,
    thumb: Option<HtmlElement>,
    next_timer: u64,
    timers: HashMap<TimerHandle, PendingTimer>,
    fired: Rc<RefCell<Vec<TimerHandle>>>,
    slot: WeakSlot,
}

impl DomEnvironment {
    fn new(window: Window, document: Document, host: HtmlElement, slot: WeakSlot) -> Self {
        let is_body = document.body().is_some_and(|body| body == host);
        let kind = if is_body {
            HostKind::PageRoot
        } else {
            HostKind::Element
        };

        Self {
            window,
            document,
            host,
            kind,
            track: None,
            thumb: None,
            next_timer: 0,
            timers: HashMap::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
            slot,
        }
    }

    fn part(&self, part: Part) -> Option<&HtmlElement> {
        match part {
            Part::Track => self.track.as_ref(),
            Part::Thumb => self.thumb.as_ref(),
        }
    }

    fn set_style(&self, part: Part, name: &str, value: &str) {
        let Some(element) = self.part(part) else {
            return;
        };
        if element.style().set_property(name, value).is_err() {
            log::warn!("fadebar: failed to set {} on {:?}", name, part);
        }
    }

    fn create_div(&self, css: &str) -> Option<HtmlElement> {
        let element = self.document.create_element("div").ok()?;
        let element: HtmlElement = element.dyn_into().ok()?;
        element.style().set_css_text(css);
        Some(element)
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0) as f32
    }

    /// Drop closures of timers that already fired.
    fn prune_fired(&mut self) {
        let fired: Vec<TimerHandle> = self.fired.borrow_mut().drain(..).collect();
        for handle in fired {
            self.timers.remove(&handle);
        }
    }
}

impl ScrollHost for DomEnvironment {
    fn kind(&self) -> HostKind {
        self.kind
    }

    fn metrics(&self) -> HostMetrics {
        let viewport_height = self.viewport_height();
        let root = self.document.document_element();
        let document_height = root.as_ref().map_or(0, |r| r.scroll_height()) as f32;

        match self.kind {
            HostKind::PageRoot => HostMetrics {
                scroll_offset: self.window.scroll_y().unwrap_or(0.0) as f32,
                scroll_height: document_height,
                client_height: root.as_ref().map_or(0, |r| r.client_height()) as f32,
                viewport_height,
                document_height,
            },
            HostKind::Element => HostMetrics {
                scroll_offset: self.host.scroll_top() as f32,
                scroll_height: self.host.scroll_height() as f32,
                client_height: self.host.client_height() as f32,
                viewport_height,
                document_height,
            },
        }
    }

    fn rendered_height(&self, part: Part) -> Option<f32> {
        let height = self.part(part)?.offset_height();
        (height > 0).then_some(height as f32)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        match self.kind {
            HostKind::PageRoot => {
                let x = self.window.scroll_x().unwrap_or(0.0);
                self.window.scroll_to_with_x_and_y(x, offset as f64);
            }
            HostKind::Element => self.host.set_scroll_top(offset.round() as i32),
        }
    }
}

impl StyleSink for DomEnvironment {
    fn mount_parts(&mut self) {
        let position = match self.kind {
            HostKind::PageRoot => "fixed",
            HostKind::Element => "absolute",
        };
        let track_css = format!(
            "position:{position};right:0;width:8px;border-radius:4px;z-index:1000;\
             transition:opacity 0.3s;background:{}",
            Color::DEFAULT_TRACK.to_css()
        );
        let thumb_css = format!(
            "width:100%;border-radius:4px;cursor:pointer;background:{}",
            Color::DEFAULT_THUMB.to_css()
        );

        let (Some(track), Some(thumb)) = (self.create_div(&track_css), self.create_div(&thumb_css))
        else {
            log::error!("fadebar: could not create indicator elements");
            return;
        };

        let parent = match self.kind {
            HostKind::PageRoot => Some(self.host.clone()),
            HostKind::Element => self
                .host
                .parent_element()
                .and_then(|p| p.dyn_into::<HtmlElement>().ok()),
        };
        let Some(parent) = parent else {
            log::error!("fadebar: scroll host has no parent to attach to");
            return;
        };

        let attached = track.append_child(&thumb).is_ok() && parent.append_child(&track).is_ok();
        if !attached {
            log::error!("fadebar: could not attach indicator elements");
            return;
        }

        // Hide the native scrollbar
        let native = if self.kind == HostKind::PageRoot {
            self.document
                .document_element()
                .and_then(|r| r.dyn_into::<HtmlElement>().ok())
        } else {
            Some(self.host.clone())
        };
        if let Some(element) = native {
            if element.style().set_property("scrollbar-width", "none").is_err() {
                log::warn!("fadebar: failed to hide the native scrollbar");
            }
        }

        self.track = Some(track);
        self.thumb = Some(thumb);
    }

    fn unmount_parts(&mut self) {
        if let Some(track) = self.track.take() {
            track.remove();
        }
        self.thumb = None;
    }

    fn set_opacity(&mut self, part: Part, opacity: f32) {
        self.set_style(part, "opacity", &opacity.to_string());
    }

    fn set_height(&mut self, part: Part, px: f32) {
        self.set_style(part, "height", &format!("{px}px"));
    }

    fn set_top(&mut self, part: Part, px: f32) {
        self.set_style(part, "top", &format!("{px}px"));
    }

    fn set_right(&mut self, part: Part, px: f32) {
        self.set_style(part, "right", &format!("{px}px"));
    }

    fn set_background(&mut self, part: Part, color: Color) {
        self.set_style(part, "background", &color.to_css());
    }

    fn set_translate_y(&mut self, part: Part, px: f32) {
        self.set_style(part, "transform", &format!("translateY({px}px)"));
    }

    fn set_text_selection_disabled(&mut self, disabled: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let result = if disabled {
            style.set_property("user-select", "none")
        } else {
            style.remove_property("user-select").map(|_| ())
        };
        if result.is_err() {
            log::warn!("fadebar: failed to toggle text selection");
        }
    }
}

impl Scheduler for DomEnvironment {
    fn schedule(&mut self, delay: Duration) -> Option<TimerHandle> {
        self.prune_fired();
        self.next_timer += 1;
        let handle = TimerHandle(self.next_timer);

        let slot = self.slot.clone();
        let fired = Rc::clone(&self.fired);
        let callback = Closure::<dyn FnMut()>::new(move || {
            fired.borrow_mut().push(handle);
            deliver(&slot, IndicatorEvent::QuietElapsed(handle));
        });

        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay.as_millis() as i32,
            );
        match id {
            Ok(id) => {
                self.timers.insert(
                    handle,
                    PendingTimer {
                        id,
                        _callback: callback,
                    },
                );
                Some(handle)
            }
            Err(_) => {
                log::error!("fadebar: setTimeout failed for {:?}", handle);
                None
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.timers.remove(&handle) {
            self.window.clear_timeout_with_handle(timer.id);
        }
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// One registered DOM listener; removed on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        kind: &'static str,
        slot: &Slot,
        map: impl Fn(&Event) -> Option<IndicatorEvent> + 'static,
    ) -> Result<Self, JsValue> {
        let slot = Rc::downgrade(slot);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(indicator_event) = map(&event) {
                deliver(&slot, indicator_event);
            }
        });
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

fn pointer_y(event: &Event) -> Option<f32> {
    event.dyn_ref::<MouseEvent>().map(|e| e.client_y() as f32)
}

fn register(slot: &Slot, window: &Window) -> Result<Vec<Listener>, JsValue> {
    let (host, kind, track, thumb) = {
        let guard = slot.borrow();
        let Some(indicator) = guard.as_ref() else {
            return Ok(Vec::new());
        };
        let env = indicator.env();
        (env.host.clone(), env.kind, env.track.clone(), env.thumb.clone())
    };
    let (Some(track), Some(thumb)) = (track, thumb) else {
        return Err(JsValue::from_str("fadebar: indicator elements were not mounted"));
    };

    let window_target: &EventTarget = window.as_ref();
    let scroll_target: &EventTarget = match kind {
        HostKind::PageRoot => window_target,
        HostKind::Element => host.as_ref(),
    };

    Ok(vec![
        Listener::new(scroll_target, "scroll", slot, |_| Some(IndicatorEvent::Scroll))?,
        Listener::new(window_target, "resize", slot, |_| Some(IndicatorEvent::Resize))?,
        Listener::new(thumb.as_ref(), "mousedown", slot, |event| {
            event.prevent_default();
            pointer_y(event).map(|y| IndicatorEvent::PointerDown {
                y,
                target: Part::Thumb,
            })
        })?,
        Listener::new(window_target, "mousemove", slot, |event| {
            pointer_y(event).map(|y| IndicatorEvent::PointerMove { y })
        })?,
        Listener::new(window_target, "mouseup", slot, |_| {
            Some(IndicatorEvent::PointerUp)
        })?,
        Listener::new(track.as_ref(), "mouseenter", slot, |_| {
            Some(IndicatorEvent::PointerEnter)
        })?,
        Listener::new(track.as_ref(), "mouseleave", slot, |_| {
            Some(IndicatorEvent::PointerLeave)
        })?,
    ])
}

// =============================================================================
// JS entry point
// =============================================================================

/// A mounted indicator and the listeners that feed it.
#[wasm_bindgen]
pub struct IndicatorHandle {
    slot: Slot,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl IndicatorHandle {
    /// Remove every listener, cancel the pending timer and remove the parts.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        let indicator = self.slot.borrow_mut().take();
        if let Some(indicator) = indicator {
            indicator.dispose();
        }
    }

    /// Current opacity state, `"resting"` or `"active"`.
    #[wasm_bindgen(getter)]
    pub fn visibility(&self) -> String {
        match self.slot.borrow().as_ref().map(|i| i.visibility()) {
            Some(Visibility::Active) => "active".to_string(),
            _ => "resting".to_string(),
        }
    }
}

impl Drop for IndicatorHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Attach an indicator to the element matching `selector`.
///
/// `config_json` is an `IndicatorConfig` in JSON form, e.g.
/// `{"heightFraction": 0.85, "velocity": 2}`. Returns `undefined` when the
/// host does not overflow and throws on a bad selector or configuration.
#[wasm_bindgen]
pub fn attach(selector: &str, config_json: &str) -> Result<Option<IndicatorHandle>, JsValue> {
    let config = IndicatorConfig::from_json(config_json).map_err(to_js)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("fadebar: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("fadebar: no document"))?;
    let host = document
        .query_selector(selector)?
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| to_js(IndicatorError::HostNotFound(selector.to_string())))?;

    let slot: Slot = Rc::new(RefCell::new(None));
    let env = DomEnvironment::new(window.clone(), document, host, Rc::downgrade(&slot));

    let indicator = match ScrollIndicator::mount(config, env).map_err(to_js)? {
        Mounted::Ready(indicator) => indicator,
        Mounted::NotNeeded(_) => {
            log::info!("fadebar: {} does not overflow, no indicator", selector);
            return Ok(None);
        }
    };
    *slot.borrow_mut() = Some(indicator);

    let listeners = match register(&slot, &window) {
        Ok(listeners) => listeners,
        Err(err) => {
            if let Some(indicator) = slot.borrow_mut().take() {
                indicator.dispose();
            }
            return Err(err);
        }
    };

    log::debug!("fadebar: attached to {}", selector);
    Ok(Some(IndicatorHandle { slot, listeners }))
}
