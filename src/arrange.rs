//! Align and distribute commands over a selection of widgets

use std::collections::BTreeSet;

use crate::constraint::{ConstraintError, WidgetId};
use crate::geometry::{Anchor, Axis, Rect};
use crate::port::WidgetPort;

fn rects_of<P: WidgetPort + ?Sized>(
    port: &P,
    ids: &[WidgetId],
) -> Result<Vec<(WidgetId, Rect)>, ConstraintError> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .filter(|id| seen.insert(*id))
        .map(|id| {
            port.rect(id)
                .map(|rect| (id.clone(), rect))
                .ok_or_else(|| ConstraintError::unknown(id.as_str()))
        })
        .collect()
}

/// Line up a selection on one anchor.
///
/// Leading anchors go to the smallest leading edge in the selection, trailing
/// anchors to the largest trailing edge, centers to the middle of the
/// selection's overall span. Selections of fewer than two widgets are left
/// alone. Returns the widgets that moved.
pub fn align<P: WidgetPort + ?Sized>(
    port: &mut P,
    ids: &[WidgetId],
    anchor: Anchor,
) -> Result<Vec<WidgetId>, ConstraintError> {
    let rects = rects_of(port, ids)?;
    if rects.len() < 2 {
        return Ok(Vec::new());
    }

    let axis = anchor.axis();
    let lo = rects
        .iter()
        .map(|(_, r)| r.anchor(Anchor::leading(axis)))
        .fold(f64::INFINITY, f64::min);
    let hi = rects
        .iter()
        .map(|(_, r)| r.anchor(Anchor::trailing(axis)))
        .fold(f64::NEG_INFINITY, f64::max);
    let target = if anchor == Anchor::leading(axis) {
        lo
    } else if anchor == Anchor::trailing(axis) {
        hi
    } else {
        (lo + hi) / 2.0
    };

    let mut moved = Vec::new();
    for (id, rect) in rects {
        let delta = target - rect.anchor(anchor);
        if delta != 0.0 {
            let next = rect.translated(axis, delta);
            port.set_position(&id, next.x, next.y)?;
            moved.push(id);
        }
    }
    Ok(moved)
}

/// Space a selection evenly along an axis.
///
/// Widgets are ordered by leading edge; the first and last stay put and the
/// gaps between neighbours are made equal. Needs at least three widgets.
/// Returns the widgets that moved.
pub fn distribute<P: WidgetPort + ?Sized>(
    port: &mut P,
    ids: &[WidgetId],
    axis: Axis,
) -> Result<Vec<WidgetId>, ConstraintError> {
    let mut rects = rects_of(port, ids)?;
    if rects.len() < 3 {
        return Ok(Vec::new());
    }
    rects.sort_by(|(_, l), (_, r)| l.start(axis).total_cmp(&r.start(axis)));

    let first = rects[0].1.start(axis);
    let last = &rects[rects.len() - 1].1;
    let end = last.start(axis) + last.extent(axis);
    let total: f64 = rects.iter().map(|(_, r)| r.extent(axis)).sum();
    let gap = (end - first - total) / (rects.len() - 1) as f64;

    let mut moved = Vec::new();
    let mut cursor = first;
    for (id, rect) in rects {
        if rect.start(axis) != cursor {
            let next = rect.with_start(axis, cursor);
            port.set_position(&id, next.x, next.y)?;
            moved.push(id);
        }
        cursor += rect.extent(axis) + gap;
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Canvas;

    fn ids(names: &[&str]) -> Vec<WidgetId> {
        names.iter().map(|n| WidgetId::new(*n)).collect()
    }

    fn canvas() -> Canvas {
        let mut c = Canvas::new();
        c.add("a", Rect::new(10.0, 0.0, 20.0, 10.0)).unwrap();
        c.add("b", Rect::new(50.0, 40.0, 40.0, 20.0)).unwrap();
        c.add("c", Rect::new(130.0, 5.0, 10.0, 30.0)).unwrap();
        c
    }

    #[test]
    fn test_align_left() {
        let mut c = canvas();
        let moved = align(&mut c, &ids(&["a", "b", "c"]), Anchor::LEFT).unwrap();
        assert_eq!(moved, ids(&["b", "c"]));
        for w in c.widgets() {
            assert_eq!(w.rect.x, 10.0);
        }
    }

    #[test]
    fn test_align_bottom() {
        let mut c = canvas();
        align(&mut c, &ids(&["a", "b"]), Anchor::BOTTOM).unwrap();
        assert_eq!(c.rect(&"a".into()).map(|r| r.bottom()), Some(60.0));
        assert_eq!(c.rect(&"b".into()).map(|r| r.bottom()), Some(60.0));
    }

    #[test]
    fn test_align_center_uses_span_midpoint() {
        let mut c = canvas();
        align(&mut c, &ids(&["a", "c"]), Anchor::CENTER_X).unwrap();
        // span 10..140, midpoint 75
        assert_eq!(c.rect(&"a".into()).map(|r| r.center_x()), Some(75.0));
        assert_eq!(c.rect(&"c".into()).map(|r| r.center_x()), Some(75.0));
    }

    #[test]
    fn test_align_single_widget_is_noop() {
        let mut c = canvas();
        assert!(align(&mut c, &ids(&["a"]), Anchor::TOP).unwrap().is_empty());
    }

    #[test]
    fn test_align_unknown_widget() {
        let mut c = canvas();
        let err = align(&mut c, &ids(&["a", "zz"]), Anchor::TOP).unwrap_err();
        assert_eq!(err, ConstraintError::unknown("zz"));
    }

    #[test]
    fn test_distribute_horizontal() {
        let mut c = canvas();
        // span 10..140, widths 20 + 40 + 10 = 70, gap (130 - 70) / 2 = 30
        let moved = distribute(&mut c, &ids(&["c", "a", "b"]), Axis::X).unwrap();
        assert_eq!(moved, ids(&["b"]));
        assert_eq!(c.rect(&"b".into()).map(|r| r.x), Some(60.0));
        assert_eq!(c.rect(&"c".into()).map(|r| r.x), Some(130.0));
    }

    #[test]
    fn test_repeated_ids_count_once() {
        let mut c = canvas();
        assert!(distribute(&mut c, &ids(&["a", "a", "b"]), Axis::X).unwrap().is_empty());
        assert_eq!(c.rect(&"b".into()).map(|r| r.x), Some(50.0));

        let moved = distribute(&mut c, &ids(&["c", "a", "b", "c", "a"]), Axis::X).unwrap();
        assert_eq!(moved, ids(&["b"]));
        assert_eq!(c.rect(&"b".into()).map(|r| r.x), Some(60.0));
    }

    #[test]
    fn test_distribute_needs_three() {
        let mut c = canvas();
        assert!(distribute(&mut c, &ids(&["a", "b"]), Axis::Y).unwrap().is_empty());
    }
}
