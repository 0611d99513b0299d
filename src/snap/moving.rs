//! Alignment snapping for a widget being dragged

use serde::Serialize;

use crate::geometry::{Anchor, Axis, Rect};

use super::config::SnapConfig;
use super::guide::Guides;

/// Result of snapping a drag candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveSnap {
    pub x: f64,
    pub y: f64,
    pub guides: Guides,
}

/// A locked match on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisMatch {
    /// New leading-edge coordinate of the moving widget
    start: f64,
    /// Sibling anchor coordinate the widget locked onto
    guide: f64,
}

/// Snap a drag candidate against sibling rectangles.
///
/// `moving` supplies the widget's size; its position is replaced by the
/// candidate. Each axis is resolved independently. Per axis, edge pairs are
/// tried before center pairs; within a family siblings are scanned in the
/// order given, the widget's leading anchor before its trailing one, and the
/// sibling's leading anchor before its trailing one. The first pair within
/// tolerance wins and later pairs cannot override it.
///
/// With `bypass` set or snapping disabled the candidate passes through and no
/// guides are reported.
pub fn snap_move(
    moving: &Rect,
    candidate_x: f64,
    candidate_y: f64,
    siblings: &[Rect],
    config: &SnapConfig,
    bypass: bool,
) -> MoveSnap {
    if !config.active(bypass) {
        return MoveSnap {
            x: candidate_x,
            y: candidate_y,
            guides: Guides::none(),
        };
    }

    let candidate = moving.moved_to(candidate_x, candidate_y);
    let x = snap_axis(&candidate, Axis::X, siblings, config);
    let y = snap_axis(&candidate, Axis::Y, siblings, config);

    MoveSnap {
        x: x.map_or(candidate_x, |m| m.start),
        y: y.map_or(candidate_y, |m| m.start),
        guides: Guides {
            vertical: x.map(|m| m.guide),
            horizontal: y.map(|m| m.guide),
        },
    }
}

fn snap_axis(
    candidate: &Rect,
    axis: Axis,
    siblings: &[Rect],
    config: &SnapConfig,
) -> Option<AxisMatch> {
    let edges = [Anchor::leading(axis), Anchor::trailing(axis)];
    let centers = [Anchor::center(axis)];

    let mut families: Vec<&[Anchor]> = Vec::with_capacity(2);
    if config.edges_enabled {
        families.push(&edges[..]);
    }
    if config.centers_enabled {
        families.push(&centers[..]);
    }

    for family in families {
        for sibling in siblings {
            for &own in family {
                for &theirs in family {
                    let target = sibling.anchor(theirs);
                    if config.within(candidate.anchor(own), target) {
                        return Some(AxisMatch {
                            start: target - candidate.anchor_offset(own),
                            guide: target,
                        });
                    }
                }
            }
        }
    }
    None
}
