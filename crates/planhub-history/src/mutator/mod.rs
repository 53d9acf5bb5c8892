//! Entity mutators and their dispatch registry.
//!
//! A mutator applies a snapshot back onto one stored entity as a sparse
//! patch: only columns present in the snapshot are updated. Mutators write
//! through the transaction handle passed in by the replay engine, so the
//! engine's transaction boundary covers their writes.

pub mod note;
pub mod project;
pub mod task;

pub use note::NoteMutator;
pub use project::ProjectMutator;
pub use task::TaskMutator;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use planhub_core::{AppError, AppResult};
use planhub_entity::action::{ItemType, Snapshot};

/// Applies a snapshot's fields back onto a concrete stored entity.
#[async_trait]
pub trait EntityMutator: Send + Sync {
    /// The item type this mutator handles.
    fn item_type(&self) -> ItemType;

    /// Check that a snapshot matches this entity's patch schema.
    fn validate(&self, snapshot: &Snapshot) -> AppResult<()>;

    /// Apply the snapshot as a sparse patch to the entity with `item_id`.
    ///
    /// Columns absent from the snapshot are left untouched. Fails with
    /// `NotFound` when the target entity no longer exists.
    async fn apply_patch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item_id: Uuid,
        snapshot: &Snapshot,
    ) -> AppResult<()>;
}

/// Lookup table mapping an item type to its registered mutator.
///
/// Unknown types fail fast instead of silently doing nothing; workspace and
/// user are deliberately unregistered.
pub struct MutatorRegistry {
    mutators: HashMap<ItemType, Arc<dyn EntityMutator>>,
}

impl MutatorRegistry {
    /// Build the registry with the standard task, project, and note mutators.
    pub fn new() -> Self {
        let mut registry = Self {
            mutators: HashMap::new(),
        };
        registry.register(Arc::new(TaskMutator));
        registry.register(Arc::new(ProjectMutator));
        registry.register(Arc::new(NoteMutator));
        registry
    }

    /// Register a mutator under its item type.
    pub fn register(&mut self, mutator: Arc<dyn EntityMutator>) {
        self.mutators.insert(mutator.item_type(), mutator);
    }

    /// Resolve the mutator for an item type.
    pub fn resolve(&self, item_type: ItemType) -> AppResult<&Arc<dyn EntityMutator>> {
        self.mutators.get(&item_type).ok_or_else(|| {
            AppError::unsupported_item_type(format!(
                "No entity mutator registered for item type '{item_type}'"
            ))
        })
    }

    /// Whether an item type has a registered mutator.
    pub fn is_registered(&self, item_type: ItemType) -> bool {
        self.mutators.contains_key(&item_type)
    }
}

impl Default for MutatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MutatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutatorRegistry")
            .field("registered", &self.mutators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planhub_core::error::ErrorKind;

    #[test]
    fn test_replayable_types_are_registered() {
        let registry = MutatorRegistry::new();
        assert!(registry.is_registered(ItemType::Task));
        assert!(registry.is_registered(ItemType::Project));
        assert!(registry.is_registered(ItemType::Note));
    }

    #[test]
    fn test_workspace_and_user_fail_fast() {
        let registry = MutatorRegistry::new();
        for item_type in [ItemType::Workspace, ItemType::User] {
            let err = registry.resolve(item_type).err().unwrap();
            assert_eq!(err.kind, ErrorKind::UnsupportedItemType);
        }
    }

    #[test]
    fn test_resolved_mutator_matches_type() {
        let registry = MutatorRegistry::new();
        let mutator = registry.resolve(ItemType::Note).unwrap();
        assert_eq!(mutator.item_type(), ItemType::Note);
    }
}
