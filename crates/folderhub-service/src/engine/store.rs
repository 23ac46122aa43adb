//! Shared ownership of the entity index.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use folderhub_index::EntityIndex;

/// The single owned index. Renderers and other collaborators hold an
/// `Arc<IndexStore>` and read through it; only the engine writes.
///
/// Locks are never held across a remote call.
#[derive(Debug, Default)]
pub struct IndexStore {
    index: RwLock<EntityIndex>,
}

impl IndexStore {
    /// Wrap an index.
    pub fn new(index: EntityIndex) -> Self {
        Self {
            index: RwLock::new(index),
        }
    }

    /// Read access for rendering and lookups.
    pub async fn read(&self) -> RwLockReadGuard<'_, EntityIndex> {
        self.index.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, EntityIndex> {
        self.index.write().await
    }
}
