//! Track and thumb geometry.
//!
//! Pure functions that turn host metrics into the track's size and position
//! and the thumb's size and translation. Every division is guarded so that a
//! host whose content fits its viewport yields zeros rather than NaN.

/// Whether the scroll host is the top-level page or a nested element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// The document body; overflow is judged against the window
    PageRoot,
    /// A scrollable element; overflow is judged against its own client box
    Element,
}

/// Snapshot of the scroll host's metrics, read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostMetrics {
    /// Current vertical scroll distance
    pub scroll_offset: f32,
    /// Total content height of the host
    pub scroll_height: f32,
    /// Visible height of the host's own box
    pub client_height: f32,
    /// Height of the browser viewport / window
    pub viewport_height: f32,
    /// Total scroll height of the document (page-root check only)
    pub document_height: f32,
}

impl HostMetrics {
    /// Distance the indicator maps onto its track, floored at zero.
    ///
    /// Measured against the viewport, not the host's client box. For an
    /// element host shorter than the viewport this is less than the host's
    /// real scroll range, so the thumb reaches the end of the track early and
    /// stays there for the last `viewport_height - client_height` pixels.
    pub fn max_scroll(&self) -> f32 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }

    /// Region the track is sized against: the smaller of the host's visible
    /// box and the viewport.
    pub fn visible_base(&self) -> f32 {
        self.client_height.min(self.viewport_height).max(0.0)
    }
}

/// Computed track placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub height: f32,
    pub top: f32,
    pub right: Option<f32>,
}

/// Computed thumb size and translation within the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbLayout {
    pub height: f32,
    pub offset: f32,
}

/// Decide whether the host overflows and needs an indicator at all.
pub fn needs_scrollbar(kind: HostKind, metrics: &HostMetrics) -> bool {
    match kind {
        HostKind::PageRoot => metrics.document_height > metrics.viewport_height,
        HostKind::Element => metrics.scroll_height > metrics.client_height,
    }
}

/// Size the track as a fraction of the visible base and center it vertically.
pub fn compute_track(
    metrics: &HostMetrics,
    height_fraction: f32,
    right_offset: Option<f32>,
) -> TrackLayout {
    let base = metrics.visible_base();
    let height = base * height_fraction;

    TrackLayout {
        height,
        top: (base - height) / 2.0,
        right: right_offset,
    }
}

/// Fraction of the scrollable range already scrolled, clamped to [0, 1].
///
/// Returns 0 when the host cannot scroll.
pub fn scroll_fraction(scroll_offset: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = scroll_height - viewport_height;
    if max_scroll <= 0.0 || !max_scroll.is_finite() {
        return 0.0;
    }

    let fraction = scroll_offset / max_scroll;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Size the thumb by the visible/content ratio and translate it by the
/// scroll fraction.
pub fn compute_thumb(metrics: &HostMetrics, track_height: f32) -> ThumbLayout {
    let visible_ratio = if metrics.scroll_height > 0.0 {
        (metrics.viewport_height / metrics.scroll_height).min(1.0)
    } else {
        1.0
    };
    let height = visible_ratio * track_height;

    let fraction = scroll_fraction(
        metrics.scroll_offset,
        metrics.scroll_height,
        metrics.viewport_height,
    );

    ThumbLayout {
        height,
        offset: fraction * (track_height - height),
    }
}

/// Map a pointer drag onto an absolute scroll offset.
///
/// The result is not clamped; the host clamps it to its valid range.
pub fn drag_scroll_offset(
    start_scroll_offset: f32,
    delta_y: f32,
    velocity: f32,
    track_height: f32,
    total_scrollable: f32,
) -> f32 {
    if track_height <= 0.0 {
        return start_scroll_offset;
    }

    let fraction = (delta_y * velocity) / track_height;
    start_scroll_offset + fraction * total_scrollable
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.01;

    fn metrics(scroll_height: f32, client_height: f32, viewport_height: f32) -> HostMetrics {
        HostMetrics {
            scroll_offset: 0.0,
            scroll_height,
            client_height,
            viewport_height,
            document_height: scroll_height,
        }
    }

    #[test]
    fn test_needs_scrollbar_element() {
        let m = metrics(3000.0, 500.0, 1000.0);
        assert!(needs_scrollbar(HostKind::Element, &m));

        let m = metrics(500.0, 500.0, 1000.0);
        assert!(!needs_scrollbar(HostKind::Element, &m));
    }

    #[test]
    fn test_needs_scrollbar_page_root_uses_document() {
        let mut m = metrics(800.0, 800.0, 1000.0);
        assert!(!needs_scrollbar(HostKind::PageRoot, &m));

        m.document_height = 1200.0;
        assert!(needs_scrollbar(HostKind::PageRoot, &m));
    }

    #[test]
    fn test_track_clamps_to_viewport() {
        for fraction in [0.1, 0.5, 0.85, 1.0] {
            let track = compute_track(&metrics(5000.0, 2000.0, 1000.0), fraction, None);
            assert!((track.height - 1000.0 * fraction).abs() < EPS);
        }
    }

    #[test]
    fn test_track_uses_smaller_host() {
        for fraction in [0.1, 0.5, 0.85, 1.0] {
            let track = compute_track(&metrics(5000.0, 400.0, 1000.0), fraction, Some(6.0));
            assert!((track.height - 400.0 * fraction).abs() < EPS);
            assert_eq!(track.right, Some(6.0));
        }
    }

    #[test]
    fn test_track_is_centered() {
        for (client, viewport, fraction) in [
            (1000.0, 1000.0, 0.85),
            (400.0, 900.0, 0.3),
            (2000.0, 700.0, 1.0),
        ] {
            let m = metrics(5000.0, client, viewport);
            let track = compute_track(&m, fraction, None);
            let base = m.visible_base();
            assert!((track.top + track.height / 2.0 - base / 2.0).abs() < EPS);
        }
    }

    #[test]
    fn test_thumb_shrinks_as_content_grows() {
        let mut last = f32::INFINITY;
        for content in [1500.0, 2000.0, 4000.0, 10000.0] {
            let thumb = compute_thumb(&metrics(content, 1000.0, 1000.0), 850.0);
            assert!(thumb.height < last);
            last = thumb.height;
        }
    }

    #[test]
    fn test_thumb_extremes() {
        let mut m = metrics(3000.0, 1000.0, 1000.0);
        let thumb = compute_thumb(&m, 850.0);
        assert_eq!(thumb.offset, 0.0);

        m.scroll_offset = m.max_scroll();
        let thumb = compute_thumb(&m, 850.0);
        assert!((thumb.offset - (850.0 - thumb.height)).abs() < EPS);
    }

    #[test]
    fn test_reference_page() {
        let mut m = metrics(3000.0, 1000.0, 1000.0);
        let track = compute_track(&m, 0.85, None);
        assert!((track.height - 850.0).abs() < EPS);
        assert!((track.top - 75.0).abs() < EPS);

        let thumb = compute_thumb(&m, track.height);
        assert!((thumb.height - 283.33).abs() < EPS);
        assert_eq!(thumb.offset, 0.0);

        m.scroll_offset = 2000.0;
        let thumb = compute_thumb(&m, track.height);
        assert!((thumb.offset - 566.67).abs() < EPS);
    }

    #[test]
    fn test_degenerate_range_is_zero() {
        assert_eq!(scroll_fraction(0.0, 1000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(50.0, 1000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(50.0, 800.0, 1000.0), 0.0);

        let thumb = compute_thumb(&metrics(1000.0, 1000.0, 1000.0), 850.0);
        assert!(thumb.offset.is_finite());
        assert_eq!(thumb.offset, 0.0);
        assert!((thumb.height - 850.0).abs() < EPS);
    }

    #[test]
    fn test_element_host_thumb_saturates_early() {
        // Host range is 1600 (2000 - 400), mapped range is 1000 (2000 - 1000)
        let mut m = metrics(2000.0, 400.0, 1000.0);
        let track = compute_track(&m, 1.0, None);
        assert!((track.height - 400.0).abs() < EPS);
        assert_eq!(m.max_scroll(), 1000.0);

        for offset in [1000.0, 1300.0, 1600.0] {
            m.scroll_offset = offset;
            let thumb = compute_thumb(&m, track.height);
            assert!((thumb.height - 200.0).abs() < EPS);
            assert!((thumb.offset - 200.0).abs() < EPS);
        }
    }

    #[test]
    fn test_scroll_fraction_clamped() {
        assert_eq!(scroll_fraction(-20.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(2100.5, 3000.0, 1000.0), 1.0);
        assert!((scroll_fraction(1000.0, 3000.0, 1000.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_drag_mapping() {
        let offset = drag_scroll_offset(500.0, 100.0, 2.0, 850.0, 2000.0);
        assert!((offset - 970.59).abs() < EPS);

        // Upward drags and overshoot are left for the host to clamp
        let offset = drag_scroll_offset(500.0, -900.0, 1.0, 850.0, 2000.0);
        assert!(offset < 0.0);
    }

    #[test]
    fn test_drag_mapping_without_track() {
        assert_eq!(drag_scroll_offset(120.0, 40.0, 1.0, 0.0, 2000.0), 120.0);
    }
}
