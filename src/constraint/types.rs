//! Identifiers and the constraint record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Anchor, Axis};

/// Opaque widget identity, owned by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub String);

impl WidgetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Generated constraint identity (`c_1`, `c_2`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintId(pub String);

impl ConstraintId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConstraintId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One side of a constraint: a widget and one of its anchors
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: WidgetId,
    pub anchor: Anchor,
}

impl Endpoint {
    pub fn new(id: impl Into<WidgetId>, anchor: Anchor) -> Self {
        Self {
            id: id.into(),
            anchor,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.anchor)
    }
}

/// "Endpoint `a` tracks endpoint `b`" along one axis.
///
/// `a` is the dependent side and `b` the reference side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: ConstraintId,
    pub axis: Axis,
    pub a: Endpoint,
    pub b: Endpoint,
}

impl Constraint {
    /// Whether the constraint touches a widget
    pub fn touches(&self, widget: &WidgetId) -> bool {
        self.a.id == *widget || self.b.id == *widget
    }

    /// The endpoint on `widget`, if any (dependent side wins for self-links)
    pub fn side(&self, widget: &WidgetId) -> Option<&Endpoint> {
        if self.a.id == *widget {
            Some(&self.a)
        } else if self.b.id == *widget {
            Some(&self.b)
        } else {
            None
        }
    }

    /// The endpoint opposite to `widget`
    pub fn other(&self, widget: &WidgetId) -> Option<&Endpoint> {
        if self.a.id == *widget {
            Some(&self.b)
        } else if self.b.id == *widget {
            Some(&self.a)
        } else {
            None
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.a, self.b)
    }
}
