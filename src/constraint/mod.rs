//! Constraint graph: links between widget anchors and their propagation
//!
//! A constraint says "this widget's anchor tracks that widget's anchor". The
//! store keeps the links and an incidence index; the propagator repositions
//! linked widgets after a move, either as a depth-capped cascade around the
//! moved widget or as a global relaxation.

pub mod error;
pub mod persist;
pub mod propagate;
pub mod store;
pub mod types;

pub use error::{ConstraintError, PersistError};
pub use persist::{export, import, ConstraintDocument};
pub use propagate::{
    align_endpoint, apply_around, apply_constraint, apply_constraints, Cascade, Relaxation,
    DEFAULT_MAX_DEPTH, MAX_SETTLE_ITERATIONS, SETTLE_EPSILON,
};
pub use store::{AnchorLink, ConstraintStore, CONNECTIVITY_DEPTH_LIMIT};
pub use types::{Constraint, ConstraintId, Endpoint, WidgetId};
