//! Widget Position Port: the narrow geometry interface the engine reads and
//! writes through, plus an in-memory canvas implementing it.

use serde::{Deserialize, Serialize};

use crate::constraint::{ConstraintError, WidgetId};
use crate::geometry::Rect;

/// Geometry access implemented by the host application.
///
/// The engine never creates or destroys widgets; it only moves and resizes
/// the ones the host hands out.
pub trait WidgetPort {
    /// Current rectangle of a widget, `None` if the widget does not exist
    fn rect(&self, id: &WidgetId) -> Option<Rect>;

    /// Write a new position, and optionally a new size
    fn set_rect(
        &mut self,
        id: &WidgetId,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), ConstraintError>;

    /// Every widget except `exclude`, in the host's stacking order
    fn other_widgets(&self, exclude: &WidgetId) -> Vec<WidgetId>;

    /// Move without resizing
    fn set_position(&mut self, id: &WidgetId, x: f64, y: f64) -> Result<(), ConstraintError> {
        self.set_rect(id, x, y, None, None)
    }

    /// Write a whole rectangle
    fn write_rect(&mut self, id: &WidgetId, rect: Rect) -> Result<(), ConstraintError> {
        self.set_rect(id, rect.x, rect.y, Some(rect.width), Some(rect.height))
    }

    /// Rectangles of every widget except `exclude`, skipping any that vanished
    fn sibling_rects(&self, exclude: &WidgetId) -> Vec<Rect> {
        self.other_widgets(exclude)
            .iter()
            .filter_map(|id| self.rect(id))
            .collect()
    }
}

/// A widget placed on a [`Canvas`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(flatten)]
    pub rect: Rect,
}

/// In-memory host: widgets kept in insertion order, which is also the
/// sibling scan order seen by the snap engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    widgets: Vec<Widget>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget; fails if the id is taken
    pub fn add(&mut self, id: impl Into<WidgetId>, rect: Rect) -> Result<(), ConstraintError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(ConstraintError::invalid(format!(
                "widget '{}' already exists",
                id
            )));
        }
        self.widgets.push(Widget { id, rect });
        Ok(())
    }

    /// Remove a widget, returning it if it existed
    pub fn remove(&mut self, id: &WidgetId) -> Option<Widget> {
        let index = self.widgets.iter().position(|w| w.id == *id)?;
        Some(self.widgets.remove(index))
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.widgets.iter().any(|w| w.id == *id)
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == *id)
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl WidgetPort for Canvas {
    fn rect(&self, id: &WidgetId) -> Option<Rect> {
        self.get(id).map(|w| w.rect)
    }

    fn set_rect(
        &mut self,
        id: &WidgetId,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), ConstraintError> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.id == *id)
            .ok_or_else(|| ConstraintError::unknown(id.as_str()))?;
        widget.rect.x = x;
        widget.rect.y = y;
        if let Some(width) = width {
            widget.rect.width = width;
        }
        if let Some(height) = height {
            widget.rect.height = height;
        }
        Ok(())
    }

    fn other_widgets(&self, exclude: &WidgetId) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|w| w.id != *exclude)
            .map(|w| w.id.clone())
            .collect()
    }
}
