//! Gesture scripts: a small text format for replaying drags, resizes and
//! constraint edits against an in-memory canvas.
//!
//! ```text
//! widget a [x: 10, y: 10, width: 50, height: 30]
//! widget b [x: 120, y: 40, width: 40, height: 40]
//! constrain b.left = a.right
//! move a to 40, 12
//! resize a [right: 20]
//! ```

pub mod ast;
pub mod error;
mod grammar;
pub mod lexer;
pub mod runner;

pub use ast::{Script, Statement};
pub use error::ScriptError;
pub use grammar::parse;
pub use runner::{execute, Frame, Runner, ScriptOutcome};
