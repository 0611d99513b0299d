//! Syntax tree for gesture scripts

use crate::geometry::{Anchor, Axis};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Widget name as written in the script
pub type Name = Spanned<String>;

/// A whole script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `widget a [x: 10, y: 10, width: 50, height: 30]`
    Widget(WidgetDecl),
    /// `constrain b.left = a.right`
    Constrain(LinkDecl),
    /// `unconstrain b.left = a.right`
    Unconstrain(LinkDecl),
    /// `snap [tolerance: 4, centers: off]`
    Snap(Vec<SnapSetting>),
    /// `move a to 40, 12` or `move a with b by 5, 0 bypass`
    Move(MoveStep),
    /// `resize a [right: 20, bottom: -5]`
    Resize(ResizeStep),
    /// `align top a, b`
    Align { anchor: Anchor, widgets: Vec<Name> },
    /// `distribute horizontal a, b, c`
    Distribute { axis: Axis, widgets: Vec<Name> },
    /// `settle`
    Settle,
    /// `remove a`
    Remove(Name),
}

impl Statement {
    /// Short name used when reporting frames
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Widget(_) => "widget",
            Statement::Constrain(_) => "constrain",
            Statement::Unconstrain(_) => "unconstrain",
            Statement::Snap(_) => "snap",
            Statement::Move(_) => "move",
            Statement::Resize(_) => "resize",
            Statement::Align { .. } => "align",
            Statement::Distribute { .. } => "distribute",
            Statement::Settle => "settle",
            Statement::Remove(_) => "remove",
        }
    }
}

/// Numeric `key: value` pair inside brackets
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Spanned<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDecl {
    pub name: Name,
    pub properties: Vec<Property>,
}

/// `widget.anchor`
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRef {
    pub widget: Name,
    pub anchor: Anchor,
}

/// `dependent = reference`
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDecl {
    pub dependent: AnchorRef,
    pub reference: AnchorRef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SnapValue {
    Number(f64),
    Switch(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapSetting {
    pub key: Spanned<String>,
    pub value: Spanned<SnapValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    /// Absolute candidate position for the primary widget
    To,
    /// Offset from the primary widget's current position
    By,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveStep {
    pub widget: Name,
    /// Other members of the selection dragged along
    pub with: Vec<Name>,
    pub mode: MoveMode,
    pub x: f64,
    pub y: f64,
    pub bypass: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeStep {
    pub widget: Name,
    /// Dragged edge and its displacement
    pub edges: Vec<(Spanned<Anchor>, f64)>,
    pub bypass: bool,
}
