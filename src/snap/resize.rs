//! Edge snapping while a widget is being resized

use serde::Serialize;

use crate::geometry::{Anchor, Axis, Rect};

use super::config::SnapConfig;
use super::guide::Guides;

/// Which edges a resize gesture is dragging (a corner drags two)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResizeEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ResizeEdges {
    pub const LEFT: ResizeEdges = ResizeEdges {
        left: true,
        right: false,
        top: false,
        bottom: false,
    };
    pub const RIGHT: ResizeEdges = ResizeEdges {
        left: false,
        right: true,
        top: false,
        bottom: false,
    };
    pub const TOP: ResizeEdges = ResizeEdges {
        left: false,
        right: false,
        top: true,
        bottom: false,
    };
    pub const BOTTOM: ResizeEdges = ResizeEdges {
        left: false,
        right: false,
        top: false,
        bottom: true,
    };

    /// Combine two edge sets, e.g. `RIGHT.with(BOTTOM)` for a corner
    pub fn with(self, other: ResizeEdges) -> ResizeEdges {
        ResizeEdges {
            left: self.left || other.left,
            right: self.right || other.right,
            top: self.top || other.top,
            bottom: self.bottom || other.bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }

    /// Active (leading, trailing) edges on an axis
    fn on(&self, axis: Axis) -> (bool, bool) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.top, self.bottom),
        }
    }
}

/// Pointer displacement of each edge since the gesture started
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeltaRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DeltaRect {
    /// Change in width implied by the edge deltas
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Change in height implied by the edge deltas
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    fn on(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.top, self.bottom),
        }
    }
}

/// Result of snapping a resize step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeSnap {
    pub rect: Rect,
    pub guides: Guides,
}

/// Span of the rectangle along one axis after snapping
struct AxisSpan {
    start: f64,
    end: f64,
    guide: Option<f64>,
}

/// Snap the dragged edges of a resize gesture.
///
/// Each active edge is compared against the sibling edges on its axis and
/// locks onto the first one within tolerance. Edges that are not being dragged
/// stay at their start-of-gesture coordinate. The minimum size floor is applied
/// last and wins over any snap; it grows the rectangle away from the pinned
/// edge.
pub fn snap_resize(
    edges: ResizeEdges,
    start: &Rect,
    delta: &DeltaRect,
    siblings: &[Rect],
    config: &SnapConfig,
    bypass: bool,
) -> ResizeSnap {
    let snapping = config.active(bypass) && config.edges_enabled;
    let x = resize_axis(
        Axis::X,
        edges,
        start,
        delta,
        siblings,
        config,
        snapping,
        config.min_width,
    );
    let y = resize_axis(
        Axis::Y,
        edges,
        start,
        delta,
        siblings,
        config,
        snapping,
        config.min_height,
    );

    ResizeSnap {
        rect: Rect::new(x.start, y.start, x.end - x.start, y.end - y.start),
        guides: Guides {
            vertical: x.guide,
            horizontal: y.guide,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn resize_axis(
    axis: Axis,
    edges: ResizeEdges,
    start_rect: &Rect,
    delta: &DeltaRect,
    siblings: &[Rect],
    config: &SnapConfig,
    snapping: bool,
    min_extent: f64,
) -> AxisSpan {
    let (lead_active, trail_active) = edges.on(axis);
    let (lead_delta, trail_delta) = delta.on(axis);
    let snap_to = |candidate: f64| {
        if snapping {
            snap_edge(candidate, axis, siblings, config)
        } else {
            None
        }
    };
    let mut span = AxisSpan {
        start: start_rect.start(axis),
        end: start_rect.start(axis) + start_rect.extent(axis),
        guide: None,
    };

    if lead_active {
        let candidate = span.start + lead_delta;
        span.start = match snap_to(candidate) {
            Some(target) => {
                span.guide = Some(target);
                target
            }
            None => candidate,
        };
    }
    if trail_active {
        let candidate = span.end + trail_delta;
        span.end = match snap_to(candidate) {
            Some(target) => {
                span.guide.get_or_insert(target);
                target
            }
            None => candidate,
        };
    }

    if span.end - span.start < min_extent {
        if lead_active && !trail_active {
            span.start = span.end - min_extent;
        } else {
            span.end = span.start + min_extent;
        }
        if let Some(guide) = span.guide {
            if guide != span.start && guide != span.end {
                span.guide = None;
            }
        }
    }
    span
}

/// First sibling edge within tolerance of `candidate`
fn snap_edge(candidate: f64, axis: Axis, siblings: &[Rect], config: &SnapConfig) -> Option<f64> {
    let family = [Anchor::leading(axis), Anchor::trailing(axis)];
    siblings.iter().find_map(|sibling| {
        family
            .iter()
            .map(|&anchor| sibling.anchor(anchor))
            .find(|&target| config.within(candidate, target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Rect {
        Rect::new(10.0, 10.0, 50.0, 30.0)
    }

    #[test]
    fn test_right_edge_drag_pins_left() {
        let delta = DeltaRect {
            right: 20.0,
            ..Default::default()
        };
        assert_eq!(delta.width(), 20.0);
        let snap = snap_resize(
            ResizeEdges::RIGHT,
            &start(),
            &delta,
            &[],
            &SnapConfig::new().with_enabled(false),
            false,
        );
        assert_eq!(snap.rect, Rect::new(10.0, 10.0, 70.0, 30.0));
        assert!(snap.guides.is_empty());
    }

    #[test]
    fn test_left_edge_drag_pins_right() {
        let delta = DeltaRect {
            left: -15.0,
            ..Default::default()
        };
        let snap = snap_resize(ResizeEdges::LEFT, &start(), &delta, &[], &SnapConfig::new(), false);
        assert_eq!(snap.rect, Rect::new(-5.0, 10.0, 65.0, 30.0));
        assert_eq!(snap.rect.right(), start().right());
    }

    #[test]
    fn test_right_edge_snaps_to_sibling_edge() {
        let sibling = Rect::new(82.0, 200.0, 10.0, 10.0);
        let delta = DeltaRect {
            right: 20.0,
            ..Default::default()
        };
        let config = SnapConfig::new();
        let snap = snap_resize(ResizeEdges::RIGHT, &start(), &delta, &[sibling], &config, false);
        assert_eq!(snap.rect, Rect::new(10.0, 10.0, 72.0, 30.0));
        assert_eq!(snap.guides.vertical, Some(82.0));
    }

    #[test]
    fn test_first_sibling_wins_on_resize() {
        let first = Rect::new(81.0, 200.0, 10.0, 10.0);
        let second = Rect::new(80.0, 300.0, 10.0, 10.0);
        let delta = DeltaRect {
            right: 20.0,
            ..Default::default()
        };
        let snap = snap_resize(
            ResizeEdges::RIGHT,
            &start(),
            &delta,
            &[first, second],
            &SnapConfig::new(),
            false,
        );
        assert_eq!(snap.rect.right(), 81.0);
    }

    #[test]
    fn test_no_center_snapping_on_resize() {
        // sibling center at 80, edges far away
        let sibling = Rect::new(40.0, 200.0, 80.0, 10.0);
        let delta = DeltaRect {
            right: 21.0,
            ..Default::default()
        };
        let config = SnapConfig::new();
        let snap = snap_resize(ResizeEdges::RIGHT, &start(), &delta, &[sibling], &config, false);
        assert_eq!(snap.rect.right(), 81.0);
        assert_eq!(snap.guides.vertical, None);
    }

    #[test]
    fn test_corner_drag_snaps_both_axes() {
        let sibling = Rect::new(0.0, 0.0, 79.0, 52.0);
        let delta = DeltaRect {
            right: 20.0,
            bottom: 10.0,
            ..Default::default()
        };
        let snap = snap_resize(
            ResizeEdges::RIGHT.with(ResizeEdges::BOTTOM),
            &start(),
            &delta,
            &[sibling],
            &SnapConfig::new(),
            false,
        );
        assert_eq!(snap.rect, Rect::new(10.0, 10.0, 69.0, 42.0));
        assert_eq!(snap.guides.vertical, Some(79.0));
        assert_eq!(snap.guides.horizontal, Some(52.0));
    }

    #[test]
    fn test_min_size_beats_snap() {
        // dragging the right edge left towards a sibling edge at 35 would
        // leave width 25, below the 40 floor
        let sibling = Rect::new(35.0, 200.0, 10.0, 10.0);
        let delta = DeltaRect {
            right: -24.0,
            ..Default::default()
        };
        let config = SnapConfig::new();
        let snap = snap_resize(ResizeEdges::RIGHT, &start(), &delta, &[sibling], &config, false);
        assert_eq!(snap.rect, Rect::new(10.0, 10.0, 40.0, 30.0));
        assert_eq!(snap.guides.vertical, None);
    }

    #[test]
    fn test_min_size_keeps_pinned_edge_on_left_drag() {
        let delta = DeltaRect {
            left: 45.0,
            ..Default::default()
        };
        let snap = snap_resize(ResizeEdges::LEFT, &start(), &delta, &[], &SnapConfig::new(), false);
        assert_eq!(snap.rect, Rect::new(20.0, 10.0, 40.0, 30.0));
    }

    #[test]
    fn test_bypass_skips_snapping_but_keeps_floor() {
        let sibling = Rect::new(82.0, 200.0, 10.0, 10.0);
        let delta = DeltaRect {
            right: 20.0,
            bottom: -20.0,
            ..Default::default()
        };
        let snap = snap_resize(
            ResizeEdges::RIGHT.with(ResizeEdges::BOTTOM),
            &start(),
            &delta,
            &[sibling],
            &SnapConfig::new(),
            true,
        );
        assert_eq!(snap.rect, Rect::new(10.0, 10.0, 70.0, 30.0));
        assert!(snap.guides.is_empty());
    }
}
