//! Errors raised while running a parsed script

use thiserror::Error;

use crate::constraint::ConstraintError;
use crate::error::render_report;

use super::ast::Span;

/// Errors that stop a script at a given statement
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The engine rejected the statement
    #[error("{source}")]
    Engine {
        span: Span,
        #[source]
        source: ConstraintError,
    },

    /// A bracketed key that the statement does not understand
    #[error("unknown {context} property '{key}'")]
    UnknownProperty {
        key: String,
        context: &'static str,
        span: Span,
    },

    /// A required widget property was not given
    #[error("widget '{widget}' is missing '{key}'")]
    MissingProperty {
        widget: String,
        key: &'static str,
        span: Span,
    },

    /// A snap setting with the wrong kind of value
    #[error("snap setting '{key}' expects {expected}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        span: Span,
    },

    /// `unconstrain` named a link that does not exist
    #[error("no constraint links {link}")]
    NoSuchLink { link: String, span: Span },
}

impl ScriptError {
    pub fn engine(span: Span, source: ConstraintError) -> Self {
        Self::Engine { span, source }
    }

    /// Statement the error belongs to
    pub fn span(&self) -> &Span {
        match self {
            ScriptError::Engine { span, .. }
            | ScriptError::UnknownProperty { span, .. }
            | ScriptError::MissingProperty { span, .. }
            | ScriptError::InvalidValue { span, .. }
            | ScriptError::NoSuchLink { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = self.to_string();
        render_report(source, filename, self.span(), &message, &message)
    }
}
