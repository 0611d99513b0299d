//! Executes a parsed script against an in-memory canvas

use serde::Serialize;

use crate::constraint::{Constraint, ConstraintError, Endpoint, WidgetId};
use crate::geometry::{Anchor, Rect, XAnchor, YAnchor};
use crate::port::{Canvas, Widget, WidgetPort};
use crate::session::EngineContext;
use crate::snap::{DeltaRect, Guide, ResizeEdges, SnapConfig};

use super::ast::*;
use super::error::ScriptError;

/// What one gesture statement did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// 1-based statement index
    pub step: usize,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    pub guides: Vec<Guide>,
    /// Widgets repositioned as a consequence, in the order they moved
    pub moved: Vec<WidgetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converged: Option<bool>,
}

impl Frame {
    fn new(step: usize, action: &'static str) -> Self {
        Self {
            step,
            action,
            widget: None,
            rect: None,
            guides: Vec::new(),
            moved: Vec::new(),
            converged: None,
        }
    }
}

/// Final state after a script has run
#[derive(Debug, Clone, Serialize)]
pub struct ScriptOutcome {
    pub widgets: Vec<Widget>,
    pub constraints: Vec<Constraint>,
    pub frames: Vec<Frame>,
}

/// Drives an [`EngineContext`] over a [`Canvas`], one statement at a time
#[derive(Debug, Clone)]
pub struct Runner {
    canvas: Canvas,
    context: EngineContext,
    frames: Vec<Frame>,
}

impl Runner {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            canvas: Canvas::new(),
            context: EngineContext::with_snap(config),
            frames: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Run every statement in order, stopping at the first failure
    pub fn run(&mut self, script: &Script) -> Result<(), ScriptError> {
        for (index, statement) in script.statements.iter().enumerate() {
            log::debug!("step {}: {}", index + 1, statement.node.keyword());
            self.execute(index + 1, statement)?;
        }
        Ok(())
    }

    pub fn finish(self) -> ScriptOutcome {
        ScriptOutcome {
            widgets: self.canvas.widgets().to_vec(),
            constraints: self.context.constraints.iter().cloned().collect(),
            frames: self.frames,
        }
    }

    fn execute(&mut self, step: usize, statement: &Spanned<Statement>) -> Result<(), ScriptError> {
        let span = &statement.span;
        let engine = |e: ConstraintError| ScriptError::engine(span.clone(), e);

        match &statement.node {
            Statement::Widget(decl) => {
                let rect = widget_rect(decl, span)?;
                self.canvas
                    .add(decl.name.node.as_str(), rect)
                    .map_err(engine)?;
            }
            Statement::Constrain(link) => {
                let (a, b) = endpoints(link);
                self.context
                    .link(&mut self.canvas, a, b)
                    .map_err(engine)?;
            }
            Statement::Unconstrain(link) => {
                let (a, b) = endpoints(link);
                let id = self
                    .context
                    .constraints
                    .find(&a, &b)
                    .map(|c| c.id.clone())
                    .ok_or_else(|| ScriptError::NoSuchLink {
                        link: format!("{} = {}", a, b),
                        span: span.clone(),
                    })?;
                self.context.unlink(&id);
            }
            Statement::Snap(settings) => {
                for setting in settings {
                    apply_setting(&mut self.context.snap, setting)?;
                }
            }
            Statement::Move(step_decl) => {
                let frame = self.drag(step, step_decl).map_err(engine)?;
                self.frames.push(frame);
            }
            Statement::Resize(step_decl) => {
                let frame = self.resize(step, step_decl).map_err(engine)?;
                self.frames.push(frame);
            }
            Statement::Align { anchor, widgets } => {
                let ids = widget_ids(widgets);
                let outcome = self
                    .context
                    .align(&mut self.canvas, &ids, *anchor)
                    .map_err(engine)?;
                let mut frame = Frame::new(step, "align");
                let cascaded = outcome.cascades.iter().map(|c| &c.moved);
                frame.moved = collect_moved(outcome.moved, cascaded);
                self.frames.push(frame);
            }
            Statement::Distribute { axis, widgets } => {
                let ids = widget_ids(widgets);
                let outcome = self
                    .context
                    .distribute(&mut self.canvas, &ids, *axis)
                    .map_err(engine)?;
                let mut frame = Frame::new(step, "distribute");
                let cascaded = outcome.cascades.iter().map(|c| &c.moved);
                frame.moved = collect_moved(outcome.moved, cascaded);
                self.frames.push(frame);
            }
            Statement::Settle => {
                let relaxation = self.context.settle(&mut self.canvas);
                if !relaxation.converged {
                    log::warn!(
                        "settle at step {} did not converge after {} sweeps",
                        step,
                        relaxation.iterations
                    );
                }
                let mut frame = Frame::new(step, "settle");
                frame.converged = Some(relaxation.converged);
                self.frames.push(frame);
            }
            Statement::Remove(name) => {
                let id = WidgetId::new(name.node.as_str());
                if !self.canvas.contains(&id) {
                    return Err(engine(ConstraintError::unknown(id.as_str())));
                }
                let dropped = self.context.remove_widget(&id);
                log::debug!("removed {} with {} constraints", id, dropped.len());
                self.canvas.remove(&id);
            }
        }
        Ok(())
    }

    fn drag(&mut self, step: usize, decl: &MoveStep) -> Result<Frame, ConstraintError> {
        let primary = WidgetId::new(decl.widget.node.as_str());
        let current = self
            .canvas
            .rect(&primary)
            .ok_or_else(|| ConstraintError::unknown(primary.as_str()))?;
        let (cx, cy) = match decl.mode {
            MoveMode::To => (decl.x, decl.y),
            MoveMode::By => (current.x + decl.x, current.y + decl.y),
        };

        let mut frame = Frame::new(step, "move");
        if decl.with.is_empty() {
            let outcome = self
                .context
                .drag_to(&mut self.canvas, &primary, cx, cy, decl.bypass)?;
            frame.guides = outcome.guides.lines();
            frame.moved = outcome.cascade.moved;
        } else {
            let mut selection = vec![primary.clone()];
            selection.extend(widget_ids(&decl.with));
            let outcome = self.context.drag_group(
                &mut self.canvas,
                &primary,
                &selection,
                cx,
                cy,
                decl.bypass,
            )?;
            frame.guides = outcome.guides.lines();
            frame.moved = collect_moved(Vec::new(), outcome.cascades.iter().map(|c| &c.moved));
        }
        frame.rect = self.canvas.rect(&primary);
        frame.widget = Some(primary);
        Ok(frame)
    }

    fn resize(&mut self, step: usize, decl: &ResizeStep) -> Result<Frame, ConstraintError> {
        let id = WidgetId::new(decl.widget.node.as_str());
        let start = self
            .canvas
            .rect(&id)
            .ok_or_else(|| ConstraintError::unknown(id.as_str()))?;

        let mut edges = ResizeEdges::default();
        let mut delta = DeltaRect::default();
        for (edge, amount) in &decl.edges {
            match edge.node {
                Anchor::X(XAnchor::Left) => {
                    edges.left = true;
                    delta.left = *amount;
                }
                Anchor::X(XAnchor::Right) => {
                    edges.right = true;
                    delta.right = *amount;
                }
                Anchor::Y(YAnchor::Top) => {
                    edges.top = true;
                    delta.top = *amount;
                }
                Anchor::Y(YAnchor::Bottom) => {
                    edges.bottom = true;
                    delta.bottom = *amount;
                }
                // the grammar only produces edge handles
                Anchor::X(XAnchor::CenterX) | Anchor::Y(YAnchor::CenterY) => {}
            }
        }

        let outcome = self
            .context
            .resize(&mut self.canvas, &id, edges, &start, &delta, decl.bypass)?;
        let mut frame = Frame::new(step, "resize");
        frame.rect = Some(outcome.rect);
        frame.guides = outcome.guides.lines();
        frame.moved = outcome.cascade.moved;
        frame.widget = Some(id);
        Ok(frame)
    }
}

/// Parse-free entry point: run a script on a fresh canvas
pub fn execute(script: &Script, config: SnapConfig) -> Result<ScriptOutcome, ScriptError> {
    let mut runner = Runner::new(config);
    runner.run(script)?;
    Ok(runner.finish())
}

fn widget_ids(names: &[Name]) -> Vec<WidgetId> {
    names.iter().map(|n| WidgetId::new(n.node.as_str())).collect()
}

fn endpoints(link: &LinkDecl) -> (Endpoint, Endpoint) {
    (
        Endpoint::new(link.dependent.widget.node.as_str(), link.dependent.anchor),
        Endpoint::new(link.reference.widget.node.as_str(), link.reference.anchor),
    )
}

/// Merge widget lists, keeping first occurrences
fn collect_moved<'a>(
    mut moved: Vec<WidgetId>,
    more: impl Iterator<Item = &'a Vec<WidgetId>>,
) -> Vec<WidgetId> {
    for id in more.flatten() {
        if !moved.contains(id) {
            moved.push(id.clone());
        }
    }
    moved
}

fn widget_rect(decl: &WidgetDecl, span: &Span) -> Result<Rect, ScriptError> {
    let (mut x, mut y) = (0.0, 0.0);
    let (mut width, mut height) = (None, None);
    for prop in &decl.properties {
        match prop.key.node.as_str() {
            "x" => x = prop.value,
            "y" => y = prop.value,
            "width" | "w" => width = Some(positive_size(prop)?),
            "height" | "h" => height = Some(positive_size(prop)?),
            other => {
                return Err(ScriptError::UnknownProperty {
                    key: other.to_string(),
                    context: "widget",
                    span: prop.key.span.clone(),
                })
            }
        }
    }
    let missing = |key| ScriptError::MissingProperty {
        widget: decl.name.node.clone(),
        key,
        span: span.clone(),
    };
    Ok(Rect::new(
        x,
        y,
        width.ok_or_else(|| missing("width"))?,
        height.ok_or_else(|| missing("height"))?,
    ))
}

fn positive_size(prop: &Property) -> Result<f64, ScriptError> {
    if prop.value > 0.0 {
        Ok(prop.value)
    } else {
        Err(ScriptError::InvalidValue {
            key: prop.key.node.clone(),
            expected: "a positive size",
            span: prop.key.span.clone(),
        })
    }
}

fn apply_setting(config: &mut SnapConfig, setting: &SnapSetting) -> Result<(), ScriptError> {
    let key = setting.key.node.as_str();
    let invalid = |expected| ScriptError::InvalidValue {
        key: key.to_string(),
        expected,
        span: setting.value.span.clone(),
    };
    match (key, &setting.value.node) {
        ("enabled", SnapValue::Switch(on)) => config.enabled = *on,
        ("edges", SnapValue::Switch(on)) => config.edges_enabled = *on,
        ("centers", SnapValue::Switch(on)) => config.centers_enabled = *on,
        ("tolerance", SnapValue::Number(n)) => config.tolerance = *n,
        ("grid", SnapValue::Number(n)) => config.grid = Some(*n),
        ("grid", SnapValue::Switch(false)) => config.grid = None,
        ("min_width", SnapValue::Number(n)) => config.min_width = *n,
        ("min_height", SnapValue::Number(n)) => config.min_height = *n,
        ("enabled" | "edges" | "centers", _) => return Err(invalid("on or off")),
        ("grid", _) => return Err(invalid("a step or off")),
        ("tolerance" | "min_width" | "min_height", _) => return Err(invalid("a number")),
        (other, _) => {
            return Err(ScriptError::UnknownProperty {
                key: other.to_string(),
                context: "snap",
                span: setting.key.span.clone(),
            })
        }
    }
    Ok(())
}
