//! JSON persistence of the constraint list

use serde::{Deserialize, Serialize};

use crate::port::WidgetPort;

use super::error::PersistError;
use super::propagate::{apply_constraints, Relaxation};
use super::store::ConstraintStore;
use super::types::Constraint;

/// On-disk shape: `{"list": [{id, axis, a: {id, anchor}, b: {id, anchor}}, ...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDocument {
    #[serde(default)]
    pub list: Vec<Constraint>,
}

impl ConstraintDocument {
    /// Snapshot a store, ordered by constraint id
    pub fn from_store(store: &ConstraintStore) -> Self {
        Self {
            list: store.iter().cloned().collect(),
        }
    }
}

/// Serialize every constraint in the store
pub fn export(store: &ConstraintStore) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&ConstraintDocument::from_store(store))?)
}

/// Replace the store's contents with a serialized list, then relax the
/// layout so every imported link holds.
///
/// Every record is validated before anything is replaced; on error the store
/// is left untouched.
pub fn import<P: WidgetPort + ?Sized>(
    store: &mut ConstraintStore,
    port: &mut P,
    json: &str,
) -> Result<Relaxation, PersistError> {
    let document: ConstraintDocument = serde_json::from_str(json)?;

    let mut staged = ConstraintStore::new();
    for constraint in document.list {
        let id = constraint.id.clone();
        if staged.get(&id).is_some() {
            log::warn!("import rejected: duplicate constraint id {}", id);
            return Err(PersistError::DuplicateId(id));
        }
        if let Err(source) = staged.register(constraint) {
            log::warn!("import rejected constraint {}: {}", id, source);
            return Err(PersistError::Invalid { id, source });
        }
    }

    *store = staged;
    Ok(apply_constraints(store, port))
}
