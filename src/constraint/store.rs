//! Constraint store with a widget -> constraint adjacency index

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::geometry::{Anchor, Axis};
use crate::port::WidgetPort;

use super::error::ConstraintError;
use super::propagate::apply_constraint;
use super::types::{Constraint, ConstraintId, Endpoint, WidgetId};

/// Hop ceiling for [`ConstraintStore::connected`]
pub const CONNECTIVITY_DEPTH_LIMIT: usize = 20;

/// A constraint seen from one widget's side, for anchor badges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorLink {
    pub constraint: ConstraintId,
    pub other: Endpoint,
}

/// Holds every constraint plus the per-widget incidence index.
///
/// The index is only ever touched by `insert`/`delete`, so it cannot drift
/// from the primary map.
#[derive(Debug, Clone, Default)]
pub struct ConstraintStore {
    constraints: BTreeMap<ConstraintId, Constraint>,
    by_widget: HashMap<WidgetId, HashSet<ConstraintId>>,
    next_seq: u64,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that two endpoints can be linked and derive their axis
    pub fn validate(a: &Endpoint, b: &Endpoint) -> Result<Axis, ConstraintError> {
        if a.id == b.id {
            return Err(ConstraintError::invalid(format!(
                "widget '{}' cannot be constrained to itself",
                a.id
            )));
        }
        let axis = a.anchor.axis();
        if b.anchor.axis() != axis {
            return Err(ConstraintError::invalid(format!(
                "anchors '{}' and '{}' are on different axes",
                a.anchor, b.anchor
            )));
        }
        Ok(axis)
    }

    /// Link `a` (dependent) to `b` (reference) and apply the link once so it
    /// holds immediately.
    pub fn create<P: WidgetPort + ?Sized>(
        &mut self,
        port: &mut P,
        a: Endpoint,
        b: Endpoint,
    ) -> Result<ConstraintId, ConstraintError> {
        let axis = Self::validate(&a, &b)?;
        for endpoint in [&a, &b] {
            if port.rect(&endpoint.id).is_none() {
                return Err(ConstraintError::unknown(endpoint.id.as_str()));
            }
        }

        let id = self.next_id();
        let constraint = Constraint {
            id: id.clone(),
            axis,
            a,
            b,
        };
        log::debug!("create constraint {}: {}", id, constraint);
        apply_constraint(port, &constraint);
        self.insert(constraint);
        Ok(id)
    }

    /// Add an already-identified constraint without applying it
    pub fn register(&mut self, constraint: Constraint) -> Result<(), ConstraintError> {
        let axis = Self::validate(&constraint.a, &constraint.b)?;
        if axis != constraint.axis {
            return Err(ConstraintError::invalid(format!(
                "declared axis '{}' does not match anchors '{}' and '{}'",
                constraint.axis, constraint.a.anchor, constraint.b.anchor
            )));
        }
        if self.constraints.contains_key(&constraint.id) {
            return Err(ConstraintError::invalid(format!(
                "constraint id '{}' is already in use",
                constraint.id
            )));
        }
        self.insert(constraint);
        Ok(())
    }

    /// Remove a constraint. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &ConstraintId) -> Option<Constraint> {
        let constraint = self.constraints.remove(id)?;
        self.unindex(&constraint.a.id, id);
        self.unindex(&constraint.b.id, id);
        log::debug!("delete constraint {}", id);
        Some(constraint)
    }

    /// Drop every constraint touching a widget (call before the widget goes away)
    pub fn remove_widget(&mut self, widget: &WidgetId) -> Vec<Constraint> {
        let ids: Vec<ConstraintId> = self
            .by_widget
            .get(widget)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        let mut removed: Vec<Constraint> = ids.iter().filter_map(|id| self.delete(id)).collect();
        removed.sort_by(|l, r| l.id.cmp(&r.id));
        removed
    }

    /// Every constraint touching a widget, ordered by id
    pub fn incident_to(&self, widget: &WidgetId) -> Vec<&Constraint> {
        let mut out: Vec<&Constraint> = self
            .by_widget
            .get(widget)
            .into_iter()
            .flatten()
            .filter_map(|id| self.constraints.get(id))
            .collect();
        out.sort_by(|l, r| l.id.cmp(&r.id));
        out
    }

    /// Whether two widgets are linked, directly or through other widgets.
    ///
    /// The search stops after [`CONNECTIVITY_DEPTH_LIMIT`] hops.
    pub fn connected(&self, from: &WidgetId, to: &WidgetId) -> bool {
        if from == to {
            return true;
        }
        let mut visited: HashSet<&WidgetId> = HashSet::new();
        let mut queue: VecDeque<(&WidgetId, usize)> = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= CONNECTIVITY_DEPTH_LIMIT {
                continue;
            }
            for constraint in self.incident_to(current) {
                let Some(other) = constraint.other(current) else {
                    continue;
                };
                if other.id == *to {
                    return true;
                }
                if visited.insert(&other.id) {
                    queue.push_back((&other.id, depth + 1));
                }
            }
        }
        false
    }

    /// The widget's incident constraints grouped by the widget's own anchor
    pub fn used_anchors(&self, widget: &WidgetId) -> BTreeMap<Anchor, Vec<AnchorLink>> {
        let mut out: BTreeMap<Anchor, Vec<AnchorLink>> = BTreeMap::new();
        for constraint in self.incident_to(widget) {
            let (Some(side), Some(other)) = (constraint.side(widget), constraint.other(widget))
            else {
                continue;
            };
            out.entry(side.anchor).or_default().push(AnchorLink {
                constraint: constraint.id.clone(),
                other: other.clone(),
            });
        }
        out
    }

    /// Find a constraint linking exactly these two endpoints
    pub fn find(&self, a: &Endpoint, b: &Endpoint) -> Option<&Constraint> {
        self.incident_to(&a.id)
            .into_iter()
            .find(|c| c.a == *a && c.b == *b)
    }

    pub fn get(&self, id: &ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id)
    }

    /// All constraints, ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.constraints.clear();
        self.by_widget.clear();
    }

    fn next_id(&mut self) -> ConstraintId {
        loop {
            self.next_seq += 1;
            let id = ConstraintId::new(format!("c_{}", self.next_seq));
            if !self.constraints.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert(&mut self, constraint: Constraint) {
        for widget in [&constraint.a.id, &constraint.b.id] {
            self.by_widget
                .entry(widget.clone())
                .or_default()
                .insert(constraint.id.clone());
        }
        self.constraints.insert(constraint.id.clone(), constraint);
    }

    fn unindex(&mut self, widget: &WidgetId, id: &ConstraintId) {
        if let Some(set) = self.by_widget.get_mut(widget) {
            set.remove(id);
            if set.is_empty() {
                self.by_widget.remove(widget);
            }
        }
    }

    #[cfg(test)]
    fn index_consistent(&self) -> bool {
        let indexed: usize = self.by_widget.values().map(|s| s.len()).sum();
        indexed == self.constraints.len() * 2
            && self.by_widget.iter().all(|(widget, ids)| {
                ids.iter().all(|id| {
                    self.constraints
                        .get(id)
                        .map(|c| c.touches(widget))
                        .unwrap_or(false)
                })
            })
    }
}
