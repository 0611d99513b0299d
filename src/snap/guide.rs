//! Guide lines produced by a snap evaluation

use serde::Serialize;

/// Orientation of a guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GuideAxis {
    /// Vertical line at an x coordinate
    #[serde(rename = "v")]
    Vertical,
    /// Horizontal line at a y coordinate
    #[serde(rename = "h")]
    Horizontal,
}

/// A single render-only guide
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Guide {
    pub axis: GuideAxis,
    pub position: f64,
}

/// At most one vertical and one horizontal guide per evaluation.
///
/// `None` means no alignment was found on that axis this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Guides {
    pub vertical: Option<f64>,
    pub horizontal: Option<f64>,
}

impl Guides {
    /// No guides
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    /// The guides as a list, vertical first
    pub fn lines(&self) -> Vec<Guide> {
        let vertical = self.vertical.map(|position| Guide {
            axis: GuideAxis::Vertical,
            position,
        });
        let horizontal = self.horizontal.map(|position| Guide {
            axis: GuideAxis::Horizontal,
            position,
        });
        vertical.into_iter().chain(horizontal).collect()
    }
}
