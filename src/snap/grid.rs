//! Grid rounding applied to candidates before alignment snapping

use crate::geometry::Rect;

use super::resize::{DeltaRect, ResizeEdges};

/// Round a coordinate to the nearest multiple of `step`.
///
/// Non-positive or non-finite steps leave the value unchanged.
pub fn round_to_grid(value: f64, step: f64) -> f64 {
    if step > 0.0 && step.is_finite() {
        (value / step).round() * step
    } else {
        value
    }
}

/// Adjust the active edge deltas so each dragged edge lands on the grid
pub fn round_resize_delta(
    edges: ResizeEdges,
    start: &Rect,
    delta: &DeltaRect,
    step: f64,
) -> DeltaRect {
    let snap = |active: bool, origin: f64, d: f64| {
        if active {
            round_to_grid(origin + d, step) - origin
        } else {
            d
        }
    };
    DeltaRect {
        left: snap(edges.left, start.left(), delta.left),
        top: snap(edges.top, start.top(), delta.top),
        right: snap(edges.right, start.right(), delta.right),
        bottom: snap(edges.bottom, start.bottom(), delta.bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_grid() {
        assert_eq!(round_to_grid(14.0, 10.0), 10.0);
        assert_eq!(round_to_grid(15.0, 10.0), 20.0);
        assert_eq!(round_to_grid(-14.0, 10.0), -10.0);
        assert_eq!(round_to_grid(7.3, 0.0), 7.3);
    }

    #[test]
    fn test_round_resize_delta_only_touches_active_edges() {
        let start = Rect::new(10.0, 10.0, 50.0, 30.0);
        let delta = DeltaRect {
            left: 3.0,
            right: 17.0,
            ..Default::default()
        };
        let rounded = round_resize_delta(ResizeEdges::RIGHT, &start, &delta, 10.0);
        // right edge 60 + 17 = 77 -> 80
        assert_eq!(rounded.right, 20.0);
        assert_eq!(rounded.left, 3.0);
    }
}
