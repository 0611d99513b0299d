//! Canvas Align - anchor constraints and snap alignment for 2D widget canvases
//!
//! Widgets are axis-aligned rectangles. Constraints tie an anchor of one
//! widget (an edge or a center line) to an anchor of another, and moving one
//! end repositions the other. While a widget is dragged or resized, its
//! anchors snap onto nearby sibling anchors and guide lines are reported for
//! the host to draw.
//!
//! # Example
//!
//! ```rust
//! use canvas_align::run;
//!
//! let outcome = run(r#"
//!     widget a [x: 10, y: 10, width: 50, height: 30]
//!     widget b [x: 200, y: 10, width: 40, height: 30]
//!     constrain b.left = a.right
//!     move a to 30, 10
//! "#).unwrap();
//!
//! let b = outcome.widgets.iter().find(|w| w.id.as_str() == "b").unwrap();
//! assert_eq!(b.rect.x, 80.0);
//! ```

pub mod arrange;
pub mod constraint;
pub mod error;
pub mod geometry;
pub mod port;
pub mod script;
pub mod session;
pub mod snap;

pub use constraint::{
    Cascade, Constraint, ConstraintError, ConstraintId, ConstraintStore, Endpoint, PersistError,
    Relaxation, WidgetId,
};
pub use error::ParseError;
pub use geometry::{Anchor, Axis, Rect};
pub use port::{Canvas, Widget, WidgetPort};
pub use script::{parse, Frame, Script, ScriptError, ScriptOutcome};
pub use session::EngineContext;
pub use snap::{Guides, SnapConfig, SnapConfigError};

use thiserror::Error;

/// Errors that can occur while running a gesture script
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while executing a statement
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

impl RunError {
    /// Format every diagnostic with source context
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RunError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RunError::Script(err) => err.format(source, filename),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run a gesture script with default snap settings
pub fn run(source: &str) -> Result<ScriptOutcome, RunError> {
    run_with_config(source, SnapConfig::default())
}

/// Run a gesture script with custom snap settings
///
/// # Example
///
/// ```rust
/// use canvas_align::{run_with_config, SnapConfig};
///
/// let config = SnapConfig::new().with_enabled(false);
/// let outcome = run_with_config(
///     "widget a [width: 50, height: 30]\nwidget b [x: 100, width: 50, height: 30]\nmove a to 48, 0",
///     config,
/// ).unwrap();
/// assert_eq!(outcome.widgets[0].rect.x, 48.0);
/// ```
pub fn run_with_config(source: &str, config: SnapConfig) -> Result<ScriptOutcome, RunError> {
    let script = parse(source)?;
    let outcome = script::execute(&script, config)?;
    log::info!(
        "ran {} statements: {} widgets, {} constraints",
        script.statements.len(),
        outcome.widgets.len(),
        outcome.constraints.len()
    );
    Ok(outcome)
}
