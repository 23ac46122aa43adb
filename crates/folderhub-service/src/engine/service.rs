//! Remote-first mutations of the entity index.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::traits::{Confirmation, RemoteBackend};
use folderhub_core::types::{
    EntityId, EntityKind, FileSummary, RemoteReply, SearchQuery, UploadBlob,
};
use folderhub_entity::Entity;
use folderhub_index::{EntityIndex, check_move};

use super::activity::ActivityTracker;
use super::conflict::resolve_conflict;
use super::outcome::MutationOutcome;
use super::store::IndexStore;

/// Pairs each backend request with the matching index update.
///
/// The index is written only once the backend has answered with success or
/// conflict, so a failed request never needs a rollback. Operations are not
/// serialized against each other: two requests racing on the same entity
/// are applied in the order their responses arrive.
#[derive(Clone)]
pub struct MutationEngine {
    /// Backend, authoritative for identity and naming.
    remote: Arc<dyn RemoteBackend>,
    /// Delete confirmation prompt.
    confirmation: Arc<dyn Confirmation>,
    /// The index mirror.
    store: Arc<IndexStore>,
    /// Advisory busy indicator.
    activity: ActivityTracker,
}

impl std::fmt::Debug for MutationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationEngine")
            .field("remote", &self.remote)
            .field("store", &self.store)
            .field("activity", &self.activity)
            .finish_non_exhaustive()
    }
}

impl MutationEngine {
    /// Create an engine over an empty index. Call [`MutationEngine::reload`]
    /// before issuing mutations.
    pub fn new(remote: Arc<dyn RemoteBackend>, confirmation: Arc<dyn Confirmation>) -> Self {
        Self::with_index(remote, confirmation, EntityIndex::new())
    }

    /// Create an engine over an already ingested index.
    pub fn with_index(
        remote: Arc<dyn RemoteBackend>,
        confirmation: Arc<dyn Confirmation>,
        index: EntityIndex,
    ) -> Self {
        Self {
            remote,
            confirmation,
            store: Arc::new(IndexStore::new(index)),
            activity: ActivityTracker::new(),
        }
    }

    /// The index store, for rendering and lookups.
    pub fn store(&self) -> Arc<IndexStore> {
        Arc::clone(&self.store)
    }

    /// The busy indicator.
    pub fn activity(&self) -> &ActivityTracker {
        &self.activity
    }

    /// Rebuild the index from a fresh copy of the backend tree.
    pub async fn reload(&self) -> AppResult<usize> {
        let payload = self.dispatch("fetch_tree", self.remote.fetch_tree()).await?;
        let index = EntityIndex::from_payload(&payload)?;
        let count = index.len();
        *self.store.write().await = index;

        info!(entities = count, "Loaded tree");
        Ok(count)
    }

    /// Move `source` into the folder `target`, or to top level when `target`
    /// is `None`.
    pub async fn move_entity(
        &self,
        source: &EntityId,
        target: Option<&EntityId>,
    ) -> AppResult<MutationOutcome> {
        let plan = {
            let index = self.store.read().await;
            match check_move(&index, source, target) {
                Ok(plan) => plan,
                Err(rejection) if rejection.is_noop() => {
                    debug!(entity_id = %source, "Move skipped: {rejection}");
                    return Ok(MutationOutcome::Unchanged);
                }
                Err(rejection) => return Err(rejection.into()),
            }
        };

        let reply = self
            .dispatch("move", self.remote.move_entity(&plan.request()))
            .await?;

        let mut index = self.store.write().await;
        match reply {
            RemoteReply::Success(titled) => {
                index.reparent(&plan.source, &plan.target).inspect_err(|e| {
                    warn!(entity_id = %plan.source, error = %e, "Discarding stale move completion");
                })?;
                if !titled.title.is_empty() {
                    index.rename(&plan.source, &titled.title)?;
                }
                let entity = index.require(&plan.source)?.clone();

                info!(
                    entity_id = %entity.id,
                    parent_id = %plan.target,
                    title = %entity.display_name,
                    "Entity moved"
                );
                Ok(MutationOutcome::Applied(entity))
            }
            RemoteReply::Conflict(conflict) => Ok(MutationOutcome::Conflict(resolve_conflict(
                &mut index,
                &plan.target,
                conflict,
                plan.source_kind,
            )?)),
        }
    }

    /// Create a folder named `name` inside `parent` (top level when `None`).
    pub async fn create_folder(
        &self,
        parent: Option<&EntityId>,
        name: &str,
    ) -> AppResult<MutationOutcome> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Title missing"));
        }
        let parent = self.resolve_parent(parent).await?;
        let raw_parent = (!parent.is_root()).then(|| parent.untag());

        let reply = self
            .dispatch(
                "create_folder",
                self.remote.create_folder(raw_parent.as_ref(), name),
            )
            .await?;

        let mut index = self.store.write().await;
        match reply {
            RemoteReply::Success(raw) => {
                let entity = index
                    .ingest_single(&raw, EntityKind::Folder, &parent)?
                    .clone();

                info!(
                    entity_id = %entity.id,
                    parent_id = %parent,
                    title = %entity.display_name,
                    "Folder created"
                );
                Ok(MutationOutcome::Applied(entity))
            }
            RemoteReply::Conflict(conflict) => Ok(MutationOutcome::Conflict(resolve_conflict(
                &mut index,
                &parent,
                conflict,
                EntityKind::Folder,
            )?)),
        }
    }

    /// Upload one batch of images into `parent` (top level when `None`).
    ///
    /// Each entity the backend accepted becomes one new file in the index.
    pub async fn upload_files(
        &self,
        parent: Option<&EntityId>,
        blobs: &[UploadBlob],
    ) -> AppResult<Vec<Entity>> {
        if blobs.is_empty() {
            return Err(AppError::validation("No files selected"));
        }
        let parent = self.resolve_parent(parent).await?;
        let raw_parent = (!parent.is_root()).then(|| parent.untag());

        let accepted = self
            .dispatch(
                "upload_files",
                self.remote.upload_files(raw_parent.as_ref(), blobs),
            )
            .await?;

        let mut index = self.store.write().await;
        let mut created = Vec::with_capacity(accepted.len());
        for raw in &accepted {
            match index.ingest_single(raw, EntityKind::File, &parent) {
                Ok(entity) => created.push(entity.clone()),
                Err(e) => {
                    warn!(raw_id = %raw.id, parent_id = %parent, error = %e, "Skipping uploaded entity");
                }
            }
        }

        info!(
            parent_id = %parent,
            uploaded = blobs.len(),
            accepted = created.len(),
            "Files uploaded"
        );
        Ok(created)
    }

    /// Rename `id` to `name`.
    pub async fn rename(&self, id: &EntityId, name: &str) -> AppResult<MutationOutcome> {
        if id.is_root() {
            return Err(AppError::validation("The root folder cannot be renamed"));
        }
        if name.trim().is_empty() {
            return Err(AppError::validation("Title missing"));
        }
        let (kind, parent) = {
            let index = self.store.read().await;
            let entity = index.require(id)?;
            (
                entity.kind(),
                entity.parent_id.clone().unwrap_or_else(EntityId::root),
            )
        };

        let reply = self
            .dispatch("rename", self.remote.rename(&id.untag(), kind, name))
            .await?;

        let mut index = self.store.write().await;
        match reply {
            RemoteReply::Success(titled) => {
                let title = if titled.title.is_empty() {
                    name
                } else {
                    titled.title.as_str()
                };
                index.rename(id, title).inspect_err(|e| {
                    warn!(entity_id = %id, error = %e, "Discarding stale rename completion");
                })?;
                let entity = index.require(id)?.clone();

                info!(entity_id = %id, title = %entity.display_name, "Entity renamed");
                Ok(MutationOutcome::Applied(entity))
            }
            RemoteReply::Conflict(conflict) => {
                // The entity may have moved while the request was in flight.
                let target = index
                    .get(id)
                    .and_then(|e| e.parent_id.clone())
                    .unwrap_or(parent);
                Ok(MutationOutcome::Conflict(resolve_conflict(
                    &mut index, &target, conflict, kind,
                )?))
            }
        }
    }

    /// Delete `id` after the user confirms.
    ///
    /// The backend cascades folder deletion; the index mirrors that by
    /// dropping the whole subtree.
    pub async fn delete(&self, id: &EntityId) -> AppResult<MutationOutcome> {
        if id.is_root() {
            return Err(AppError::validation("The root folder cannot be deleted"));
        }
        let kind = self.store.read().await.require(id)?.kind();

        let prompt = format!("Are you sure you want to delete this {}?", kind.noun());
        if !self.confirmation.confirm(&prompt).await {
            debug!(entity_id = %id, "Delete declined");
            return Err(AppError::declined(format!("Deletion of {id} cancelled")));
        }

        self.dispatch("delete", self.remote.delete(&id.untag(), kind))
            .await?;

        let removed = self.store.write().await.remove_subtree(id).inspect_err(|e| {
            warn!(entity_id = %id, error = %e, "Discarding stale delete completion");
        })?;

        info!(
            entity_id = %id,
            descendants = removed.len().saturating_sub(1),
            "Entity deleted"
        );
        removed
            .into_iter()
            .next()
            .map(MutationOutcome::Applied)
            .ok_or_else(|| AppError::internal(format!("Removal of {id} returned nothing")))
    }

    /// Search images by free text, optionally inside one folder.
    ///
    /// Results are not ingested; they are handed to the caller as-is.
    pub async fn search(
        &self,
        query: &str,
        within: Option<&EntityId>,
    ) -> AppResult<Vec<FileSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query is empty"));
        }
        let folder = self.resolve_parent(within).await?;
        let request = SearchQuery {
            query: query.to_string(),
            folder_id: (!folder.is_root()).then(|| folder.untag()),
        };

        let results = self.dispatch("search", self.remote.search(&request)).await?;
        debug!(query, hits = results.len(), "Search completed");
        Ok(results)
    }

    async fn resolve_parent(&self, parent: Option<&EntityId>) -> AppResult<EntityId> {
        let parent = parent.cloned().unwrap_or_else(EntityId::root);
        self.store.read().await.require_folder(&parent)?;
        Ok(parent)
    }

    async fn dispatch<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        let _busy = self.activity.begin();
        debug!(operation, "Dispatching request");
        request.await.inspect_err(|e| {
            warn!(operation, error = %e, "Request failed");
        })
    }
}
