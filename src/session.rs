//! Engine context owned by the host: the constraint store and snap options,
//! plus the gesture steps that tie snapping, geometry writes and propagation
//! together.

use std::collections::BTreeSet;

use crate::arrange;
use crate::constraint::{
    apply_around, apply_constraints, persist, Cascade, Constraint, ConstraintError, ConstraintId,
    ConstraintStore, Endpoint, PersistError, Relaxation, WidgetId, DEFAULT_MAX_DEPTH,
};
use crate::geometry::{Anchor, Axis, Rect};
use crate::port::WidgetPort;
use crate::snap::{
    round_resize_delta, round_to_grid, snap_move, snap_resize, DeltaRect, Guides, ResizeEdges,
    SnapConfig,
};

/// Result of one drag or resize step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Rectangle written for the gesture's widget
    pub rect: Rect,
    /// Guides to render this frame
    pub guides: Guides,
    /// Widgets repositioned by constraint propagation
    pub cascade: Cascade,
}

/// Result of moving a whole selection
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStepOutcome {
    pub dx: f64,
    pub dy: f64,
    pub guides: Guides,
    pub cascades: Vec<Cascade>,
}

/// Result of an align or distribute command
#[derive(Debug, Clone, PartialEq)]
pub struct ArrangeOutcome {
    /// Selection members the command repositioned
    pub moved: Vec<WidgetId>,
    pub cascades: Vec<Cascade>,
}

/// Everything the engine keeps between calls.
///
/// One context per canvas; nothing is shared between contexts.
#[derive(Debug, Clone, Default)]
pub struct EngineContext {
    pub constraints: ConstraintStore,
    pub snap: SnapConfig,
    /// Hop limit used for every cascade
    pub max_depth: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_snap(SnapConfig::default())
    }

    pub fn with_snap(snap: SnapConfig) -> Self {
        Self {
            constraints: ConstraintStore::new(),
            snap,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a constraint (dependent `a` tracks reference `b`), then cascade
    /// from `a` so widgets hanging off it follow.
    pub fn link<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        a: Endpoint,
        b: Endpoint,
    ) -> Result<ConstraintId, ConstraintError> {
        let dependent = a.id.clone();
        let id = self.constraints.create(port, a, b)?;
        apply_around(&self.constraints, port, &dependent, self.max_depth);
        Ok(id)
    }

    /// Delete a constraint; unknown ids are ignored
    pub fn unlink(&mut self, id: &ConstraintId) -> Option<Constraint> {
        self.constraints.delete(id)
    }

    /// Drop a widget's constraints before the host deletes the widget
    pub fn remove_widget(&mut self, widget: &WidgetId) -> Vec<Constraint> {
        self.constraints.remove_widget(widget)
    }

    /// One pointer-move of a drag: grid, snap, write, propagate.
    pub fn drag_to<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        widget: &WidgetId,
        candidate_x: f64,
        candidate_y: f64,
        bypass: bool,
    ) -> Result<StepOutcome, ConstraintError> {
        let rect = port
            .rect(widget)
            .ok_or_else(|| ConstraintError::unknown(widget.as_str()))?;
        let (cx, cy) = self.grid_point(candidate_x, candidate_y, bypass);
        let siblings = port.sibling_rects(widget);
        let snapped = snap_move(&rect, cx, cy, &siblings, &self.snap, bypass);

        port.set_position(widget, snapped.x, snapped.y)?;
        let cascade = apply_around(&self.constraints, port, widget, self.max_depth);
        Ok(StepOutcome {
            rect: rect.moved_to(snapped.x, snapped.y),
            guides: snapped.guides,
            cascade,
        })
    }

    /// Drag a selection. The primary widget is snapped against everything
    /// outside the selection and the rest of the selection follows by the same
    /// offset.
    pub fn drag_group<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        primary: &WidgetId,
        selection: &[WidgetId],
        candidate_x: f64,
        candidate_y: f64,
        bypass: bool,
    ) -> Result<GroupStepOutcome, ConstraintError> {
        let rect = port
            .rect(primary)
            .ok_or_else(|| ConstraintError::unknown(primary.as_str()))?;
        let (cx, cy) = self.grid_point(candidate_x, candidate_y, bypass);
        let siblings: Vec<Rect> = port
            .other_widgets(primary)
            .iter()
            .filter(|id| !selection.contains(id))
            .filter_map(|id| port.rect(id))
            .collect();
        let snapped = snap_move(&rect, cx, cy, &siblings, &self.snap, bypass);
        let (dx, dy) = (snapped.x - rect.x, snapped.y - rect.y);

        let mut seen = BTreeSet::new();
        let members = std::iter::once(primary)
            .chain(selection)
            .filter(|id| seen.insert(*id))
            .map(|id| {
                port.rect(id)
                    .map(|current| (id.clone(), current))
                    .ok_or_else(|| ConstraintError::unknown(id.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (id, current) in &members {
            port.set_position(id, current.x + dx, current.y + dy)?;
        }
        let cascades = members
            .iter()
            .map(|(id, _)| apply_around(&self.constraints, port, id, self.max_depth))
            .collect();

        Ok(GroupStepOutcome {
            dx,
            dy,
            guides: snapped.guides,
            cascades,
        })
    }

    /// One pointer-move of a resize gesture that started at `start`
    pub fn resize<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        widget: &WidgetId,
        edges: ResizeEdges,
        start: &Rect,
        delta: &DeltaRect,
        bypass: bool,
    ) -> Result<StepOutcome, ConstraintError> {
        if port.rect(widget).is_none() {
            return Err(ConstraintError::unknown(widget.as_str()));
        }
        let delta = match self.snap.grid {
            Some(step) if self.snap.active(bypass) => round_resize_delta(edges, start, delta, step),
            _ => *delta,
        };
        let siblings = port.sibling_rects(widget);
        let snapped = snap_resize(edges, start, &delta, &siblings, &self.snap, bypass);

        port.write_rect(widget, snapped.rect)?;
        let cascade = apply_around(&self.constraints, port, widget, self.max_depth);
        Ok(StepOutcome {
            rect: snapped.rect,
            guides: snapped.guides,
            cascade,
        })
    }

    /// Align a selection and propagate from every widget that moved
    pub fn align<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        ids: &[WidgetId],
        anchor: Anchor,
    ) -> Result<ArrangeOutcome, ConstraintError> {
        let moved = arrange::align(port, ids, anchor)?;
        let cascades = self.cascade_all(port, &moved);
        Ok(ArrangeOutcome { moved, cascades })
    }

    /// Distribute a selection and propagate from every widget that moved
    pub fn distribute<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        ids: &[WidgetId],
        axis: Axis,
    ) -> Result<ArrangeOutcome, ConstraintError> {
        let moved = arrange::distribute(port, ids, axis)?;
        let cascades = self.cascade_all(port, &moved);
        Ok(ArrangeOutcome { moved, cascades })
    }

    /// Global relaxation of every constraint
    pub fn settle<P: WidgetPort + ?Sized>(&self, port: &mut P) -> Relaxation {
        apply_constraints(&self.constraints, port)
    }

    /// Serialize the constraint list
    pub fn export_constraints(&self) -> Result<String, PersistError> {
        persist::export(&self.constraints)
    }

    /// Replace the constraint list and relax the layout
    pub fn import_constraints<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        json: &str,
    ) -> Result<Relaxation, PersistError> {
        persist::import(&mut self.constraints, port, json)
    }

    fn grid_point(&self, x: f64, y: f64, bypass: bool) -> (f64, f64) {
        match self.snap.grid {
            Some(step) if self.snap.active(bypass) => {
                (round_to_grid(x, step), round_to_grid(y, step))
            }
            _ => (x, y),
        }
    }

    fn cascade_all<P: WidgetPort + ?Sized>(
        &self,
        port: &mut P,
        moved: &[WidgetId],
    ) -> Vec<Cascade> {
        moved
            .iter()
            .map(|id| apply_around(&self.constraints, port, id, self.max_depth))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Canvas;

    fn setup() -> (Canvas, EngineContext) {
        let mut canvas = Canvas::new();
        canvas.add("a", Rect::new(0.0, 0.0, 50.0, 30.0)).unwrap();
        canvas.add("b", Rect::new(200.0, 100.0, 50.0, 30.0)).unwrap();
        canvas.add("c", Rect::new(400.0, 300.0, 50.0, 30.0)).unwrap();
        (canvas, EngineContext::new())
    }

    #[test]
    fn test_drag_snaps_then_propagates() {
        let (mut canvas, mut ctx) = setup();
        ctx.link(
            &mut canvas,
            Endpoint::new("c", Anchor::TOP),
            Endpoint::new("a", Anchor::BOTTOM),
        )
        .unwrap();

        // left edge lands 2 units from b's left edge
        let step = ctx.drag_to(&mut canvas, &"a".into(), 198.0, 50.0, false).unwrap();
        assert_eq!(step.rect, Rect::new(200.0, 50.0, 50.0, 30.0));
        assert_eq!(step.guides.vertical, Some(200.0));
        assert_eq!(step.cascade.moved, vec![WidgetId::new("c")]);
        assert_eq!(canvas.rect(&"c".into()).map(|r| r.y), Some(80.0));
    }

    #[test]
    fn test_drag_with_grid() {
        let (mut canvas, mut ctx) = setup();
        ctx.snap = SnapConfig::new().with_grid(Some(10.0));
        let step = ctx.drag_to(&mut canvas, &"a".into(), 14.0, 26.0, false).unwrap();
        assert_eq!((step.rect.x, step.rect.y), (10.0, 30.0));

        let bypassed = ctx.drag_to(&mut canvas, &"a".into(), 14.0, 26.0, true).unwrap();
        assert_eq!((bypassed.rect.x, bypassed.rect.y), (14.0, 26.0));
    }

    #[test]
    fn test_drag_unknown_widget() {
        let (mut canvas, mut ctx) = setup();
        let err = ctx.drag_to(&mut canvas, &"zz".into(), 0.0, 0.0, false).unwrap_err();
        assert_eq!(err, ConstraintError::unknown("zz"));
    }

    #[test]
    fn test_group_drag_moves_selection_together() {
        let (mut canvas, mut ctx) = setup();
        let selection = vec![WidgetId::new("a"), WidgetId::new("b")];
        // c's left edge is at 400; a lands at 401 and snaps onto it
        let step = ctx
            .drag_group(&mut canvas, &"a".into(), &selection, 401.0, 1000.0, false)
            .unwrap();
        assert_eq!((step.dx, step.dy), (400.0, 1000.0));
        assert_eq!(canvas.rect(&"b".into()).map(|r| (r.x, r.y)), Some((600.0, 1100.0)));
        assert_eq!(step.cascades.len(), 2);
    }

    #[test]
    fn test_group_drag_moves_repeated_member_once() {
        let (mut canvas, mut ctx) = setup();
        let selection = vec![WidgetId::new("b"), WidgetId::new("b"), WidgetId::new("a")];
        let step = ctx
            .drag_group(&mut canvas, &"a".into(), &selection, 10.0, 0.0, true)
            .unwrap();
        assert_eq!(canvas.rect(&"a".into()).map(|r| r.x), Some(10.0));
        assert_eq!(canvas.rect(&"b".into()).map(|r| r.x), Some(210.0));
        assert_eq!(step.cascades.len(), 2);
    }

    #[test]
    fn test_group_drag_unknown_member_leaves_canvas_untouched() {
        let (mut canvas, mut ctx) = setup();
        let before = canvas.clone();
        let selection = vec![WidgetId::new("b"), WidgetId::new("ghost")];
        let err = ctx
            .drag_group(&mut canvas, &"a".into(), &selection, 10.0, 0.0, true)
            .unwrap_err();
        assert_eq!(err, ConstraintError::unknown("ghost"));
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_resize_propagates() {
        let (mut canvas, mut ctx) = setup();
        ctx.link(
            &mut canvas,
            Endpoint::new("b", Anchor::LEFT),
            Endpoint::new("a", Anchor::RIGHT),
        )
        .unwrap();
        let start = canvas.rect(&"a".into()).unwrap();
        let delta = DeltaRect {
            right: 25.0,
            ..Default::default()
        };
        let step = ctx
            .resize(&mut canvas, &"a".into(), ResizeEdges::RIGHT, &start, &delta, false)
            .unwrap();
        assert_eq!(step.rect.width, 75.0);
        assert_eq!(canvas.rect(&"b".into()).map(|r| r.x), Some(75.0));
    }

    #[test]
    fn test_align_cascades_to_linked_widget() {
        let (mut canvas, mut ctx) = setup();
        ctx.link(
            &mut canvas,
            Endpoint::new("c", Anchor::LEFT),
            Endpoint::new("b", Anchor::RIGHT),
        )
        .unwrap();
        let selection = vec![WidgetId::new("a"), WidgetId::new("b")];
        let outcome = ctx.align(&mut canvas, &selection, Anchor::LEFT).unwrap();
        assert_eq!(outcome.moved, vec![WidgetId::new("b")]);
        assert_eq!(outcome.cascades[0].moved, vec![WidgetId::new("c")]);
        assert_eq!(canvas.rect(&"c".into()).map(|r| r.x), Some(50.0));
    }

    #[test]
    fn test_remove_widget_prunes_constraints() {
        let (mut canvas, mut ctx) = setup();
        ctx.link(
            &mut canvas,
            Endpoint::new("b", Anchor::LEFT),
            Endpoint::new("a", Anchor::RIGHT),
        )
        .unwrap();
        assert_eq!(ctx.remove_widget(&"a".into()).len(), 1);
        assert!(ctx.constraints.is_empty());
    }

    #[test]
    fn test_independent_contexts() {
        let (mut canvas, mut first) = setup();
        let second = EngineContext::new();
        first
            .link(
                &mut canvas,
                Endpoint::new("b", Anchor::TOP),
                Endpoint::new("a", Anchor::TOP),
            )
            .unwrap();
        assert_eq!(first.constraints.len(), 1);
        assert!(second.constraints.is_empty());
    }
}
