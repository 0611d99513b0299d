//! Axis-aligned rectangle geometry and the six anchors derived from it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two layout axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Anchors on the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum XAnchor {
    Left,
    CenterX,
    Right,
}

/// Anchors on the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YAnchor {
    Top,
    CenterY,
    Bottom,
}

/// A named reference line on a rectangle.
///
/// Splitting the anchors per axis makes it impossible to build an anchor that
/// does not know which axis it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Anchor {
    X(XAnchor),
    Y(YAnchor),
}

impl Anchor {
    pub const LEFT: Anchor = Anchor::X(XAnchor::Left);
    pub const CENTER_X: Anchor = Anchor::X(XAnchor::CenterX);
    pub const RIGHT: Anchor = Anchor::X(XAnchor::Right);
    pub const TOP: Anchor = Anchor::Y(YAnchor::Top);
    pub const CENTER_Y: Anchor = Anchor::Y(YAnchor::CenterY);
    pub const BOTTOM: Anchor = Anchor::Y(YAnchor::Bottom);

    /// All six anchors, X axis first
    pub fn all() -> &'static [Anchor] {
        &[
            Self::LEFT,
            Self::CENTER_X,
            Self::RIGHT,
            Self::TOP,
            Self::CENTER_Y,
            Self::BOTTOM,
        ]
    }

    /// The axis this anchor measures along
    pub fn axis(self) -> Axis {
        match self {
            Anchor::X(_) => Axis::X,
            Anchor::Y(_) => Axis::Y,
        }
    }

    /// True for the two center anchors
    pub fn is_center(self) -> bool {
        matches!(self, Anchor::X(XAnchor::CenterX) | Anchor::Y(YAnchor::CenterY))
    }

    /// Leading edge of an axis (left or top)
    pub fn leading(axis: Axis) -> Anchor {
        match axis {
            Axis::X => Self::LEFT,
            Axis::Y => Self::TOP,
        }
    }

    /// Trailing edge of an axis (right or bottom)
    pub fn trailing(axis: Axis) -> Anchor {
        match axis {
            Axis::X => Self::RIGHT,
            Axis::Y => Self::BOTTOM,
        }
    }

    /// Center anchor of an axis
    pub fn center(axis: Axis) -> Anchor {
        match axis {
            Axis::X => Self::CENTER_X,
            Axis::Y => Self::CENTER_Y,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::X(XAnchor::Left) => "left",
            Anchor::X(XAnchor::CenterX) => "centerX",
            Anchor::X(XAnchor::Right) => "right",
            Anchor::Y(YAnchor::Top) => "top",
            Anchor::Y(YAnchor::CenterY) => "centerY",
            Anchor::Y(YAnchor::Bottom) => "bottom",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for anchor names that are not one of the six anchors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown anchor '{0}' (valid anchors: left, centerX, right, top, centerY, bottom)")]
pub struct UnknownAnchor(pub String);

impl FromStr for Anchor {
    type Err = UnknownAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::LEFT),
            "centerX" | "center_x" => Ok(Self::CENTER_X),
            "right" => Ok(Self::RIGHT),
            "top" => Ok(Self::TOP),
            "centerY" | "center_y" => Ok(Self::CENTER_Y),
            "bottom" => Ok(Self::BOTTOM),
            other => Err(UnknownAnchor(other.to_string())),
        }
    }
}

impl TryFrom<String> for Anchor {
    type Error = UnknownAnchor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.as_str().to_string()
    }
}

/// A widget rectangle: top-left position plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its top-left corner and size
    pub fn from_position(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width, height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Midpoint of left and right
    pub fn center_x(&self) -> f64 {
        (self.left() + self.right()) / 2.0
    }

    /// Midpoint of top and bottom
    pub fn center_y(&self) -> f64 {
        (self.top() + self.bottom()) / 2.0
    }

    /// Resolve an anchor to its world coordinate
    pub fn anchor(&self, anchor: Anchor) -> f64 {
        match anchor {
            Anchor::X(XAnchor::Left) => self.left(),
            Anchor::X(XAnchor::CenterX) => self.center_x(),
            Anchor::X(XAnchor::Right) => self.right(),
            Anchor::Y(YAnchor::Top) => self.top(),
            Anchor::Y(YAnchor::CenterY) => self.center_y(),
            Anchor::Y(YAnchor::Bottom) => self.bottom(),
        }
    }

    /// Position of the leading edge along an axis
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Size along an axis
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Distance from the leading edge to an anchor on the same axis
    pub fn anchor_offset(&self, anchor: Anchor) -> f64 {
        self.anchor(anchor) - self.start(anchor.axis())
    }

    /// Same size, shifted along one axis
    pub fn translated(&self, axis: Axis, delta: f64) -> Rect {
        match axis {
            Axis::X => Rect::new(self.x + delta, self.y, self.width, self.height),
            Axis::Y => Rect::new(self.x, self.y + delta, self.width, self.height),
        }
    }

    /// Same size, leading edge placed at `start` along one axis
    pub fn with_start(&self, axis: Axis, start: f64) -> Rect {
        self.translated(axis, start - self.start(axis))
    }

    /// Same size at a new top-left corner
    pub fn moved_to(&self, x: f64, y: f64) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

/// Resolve an anchor on a rectangle
pub fn anchor_value(rect: &Rect, anchor: Anchor) -> f64 {
    rect.anchor(anchor)
}
