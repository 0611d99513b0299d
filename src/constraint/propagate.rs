//! Constraint application: single links, depth-capped cascades around a moved
//! widget, and the global relaxation sweep.

use std::collections::{HashSet, VecDeque};

use crate::port::WidgetPort;

use super::store::ConstraintStore;
use super::types::{Constraint, ConstraintId, Endpoint, WidgetId};

/// Default hop limit for [`apply_around`]
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Anchor gap below which [`apply_constraints`] treats a link as satisfied
pub const SETTLE_EPSILON: f64 = 0.5;

/// Sweep ceiling for [`apply_constraints`]
pub const MAX_SETTLE_ITERATIONS: usize = 10;

/// Move `mover`'s widget along the anchor axis so that its anchor lands on
/// `target`'s anchor. Returns the applied shift, or `None` when either widget
/// is gone.
pub fn align_endpoint<P: WidgetPort + ?Sized>(
    port: &mut P,
    mover: &Endpoint,
    target: &Endpoint,
) -> Option<f64> {
    let moving = port.rect(&mover.id)?;
    let reference = port.rect(&target.id)?;
    let axis = mover.anchor.axis();
    let delta = reference.anchor(target.anchor) - moving.anchor(mover.anchor);
    let moved = moving.translated(axis, delta);
    port.set_position(&mover.id, moved.x, moved.y).ok()?;
    Some(delta)
}

/// Apply one constraint in its natural direction: the dependent side `a`
/// moves to match the reference side `b`.
pub fn apply_constraint<P: WidgetPort + ?Sized>(
    port: &mut P,
    constraint: &Constraint,
) -> Option<f64> {
    let applied = align_endpoint(port, &constraint.a, &constraint.b);
    match applied {
        Some(delta) => log::trace!("apply {} (shift {})", constraint, delta),
        None => log::trace!("skip stale constraint {}", constraint.id),
    }
    applied
}

/// What a call to [`apply_around`] touched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cascade {
    /// Widgets processed as "the side that just moved", in BFS order
    pub visited: Vec<WidgetId>,
    /// Widgets whose position actually changed
    pub moved: Vec<WidgetId>,
    /// Widgets reached at the depth limit and left unprocessed
    pub frontier: Vec<WidgetId>,
    /// Constraints skipped because an endpoint no longer exists
    pub skipped: Vec<ConstraintId>,
}

/// Cascade a move outwards from `start` along the constraint graph.
///
/// Each processed widget acts as the reference for its incident constraints:
/// the widget on the other end is shifted so the two anchors coincide, then
/// queued. A widget already processed in this call is never shifted again,
/// so the widget being dragged stays where the host put it. Widgets more than
/// `max_depth` hops away are left for a later call (see [`Cascade::frontier`]).
pub fn apply_around<P: WidgetPort + ?Sized>(
    store: &ConstraintStore,
    port: &mut P,
    start: &WidgetId,
    max_depth: usize,
) -> Cascade {
    let mut cascade = Cascade::default();
    let mut visited: HashSet<WidgetId> = HashSet::new();
    let mut queue: VecDeque<(WidgetId, usize)> = VecDeque::new();
    queue.push_back((start.clone(), 0));

    while let Some((current, depth)) = queue.pop_front() {
        if visited.contains(&current) {
            continue;
        }
        if depth >= max_depth {
            if !cascade.frontier.contains(&current) {
                cascade.frontier.push(current);
            }
            continue;
        }
        visited.insert(current.clone());

        for constraint in store.incident_to(&current) {
            let (Some(source), Some(target)) =
                (constraint.side(&current), constraint.other(&current))
            else {
                continue;
            };
            if visited.contains(&target.id) {
                continue;
            }
            match align_endpoint(port, target, source) {
                Some(delta) => {
                    log::trace!("cascade {} -> {} (shift {})", current, target.id, delta);
                    if delta != 0.0 && !cascade.moved.contains(&target.id) {
                        cascade.moved.push(target.id.clone());
                    }
                    queue.push_back((target.id.clone(), depth + 1));
                }
                None => {
                    log::trace!("skip stale constraint {}", constraint.id);
                    cascade.skipped.push(constraint.id.clone());
                }
            }
        }
        cascade.visited.push(current);
    }

    log::debug!(
        "cascade from {}: {} visited, {} moved, {} at frontier",
        start,
        cascade.visited.len(),
        cascade.moved.len(),
        cascade.frontier.len()
    );
    cascade
}

/// Outcome of a global relaxation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relaxation {
    /// Sweeps performed, including the final no-change sweep
    pub iterations: usize,
    /// A full sweep moved nothing
    pub converged: bool,
}

/// Gauss-Seidel style relaxation over every constraint.
///
/// Each sweep moves the dependent widget of every link whose anchors are more
/// than [`SETTLE_EPSILON`] apart. Stops after a sweep that changes nothing or
/// after [`MAX_SETTLE_ITERATIONS`] sweeps; the latter is reported through
/// [`Relaxation::converged`] rather than as an error.
pub fn apply_constraints<P: WidgetPort + ?Sized>(
    store: &ConstraintStore,
    port: &mut P,
) -> Relaxation {
    let mut iterations = 0;
    loop {
        iterations += 1;
        let mut changed = false;

        for constraint in store.iter() {
            let (Some(a), Some(b)) = (port.rect(&constraint.a.id), port.rect(&constraint.b.id))
            else {
                log::trace!("skip stale constraint {}", constraint.id);
                continue;
            };
            let gap = b.anchor(constraint.b.anchor) - a.anchor(constraint.a.anchor);
            if gap.abs() > SETTLE_EPSILON {
                let moved = a.translated(constraint.axis, gap);
                if port.set_position(&constraint.a.id, moved.x, moved.y).is_ok() {
                    changed = true;
                }
            }
        }

        if !changed {
            return Relaxation {
                iterations,
                converged: true,
            };
        }
        if iterations >= MAX_SETTLE_ITERATIONS {
            log::debug!(
                "relaxation stopped after {} sweeps without converging",
                iterations
            );
            return Relaxation {
                iterations,
                converged: false,
            };
        }
    }
}
