//! Error types for the constraint engine

use thiserror::Error;

use super::types::ConstraintId;

/// Errors raised at the constraint API boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    /// Self-reference, or anchors on different axes
    #[error("invalid constraint: {reason}")]
    InvalidConstraint { reason: String },

    /// A widget or constraint id that does not resolve
    #[error("unknown reference '{id}'")]
    UnknownReference { id: String },
}

impl ConstraintError {
    /// Create an invalid constraint error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            reason: reason.into(),
        }
    }

    /// Create an unknown reference error
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownReference { id: id.into() }
    }
}

/// Errors from importing a persisted constraint list
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("malformed constraint list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("constraint '{id}' rejected: {source}")]
    Invalid {
        id: ConstraintId,
        #[source]
        source: ConstraintError,
    },

    #[error("duplicate constraint id '{0}'")]
    DuplicateId(ConstraintId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let err = ConstraintError::invalid("self-reference on 'w'");
        assert_eq!(err.to_string(), "invalid constraint: self-reference on 'w'");
    }

    #[test]
    fn test_unknown_display() {
        let err = ConstraintError::unknown("ghost");
        assert!(err.to_string().contains("ghost"));
    }
}
