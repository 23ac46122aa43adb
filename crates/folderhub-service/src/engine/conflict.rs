//! Duplicate-name conflict resolution.

use tracing::warn;

use folderhub_core::result::AppResult;
use folderhub_core::types::{Conflict, EntityId, EntityKind};
use folderhub_entity::Entity;
use folderhub_index::EntityIndex;

/// The entity the backend stored in place of the requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictResolution {
    /// The backend's explanation, to show to the user.
    pub message: Option<String>,
    /// The newly ingested, server-named entity.
    pub entity: Entity,
}

/// Ingest the server-disambiguated entity of `conflict` as a new child of
/// `target`.
///
/// The kind comes from the conflict payload when the backend states it, and
/// otherwise from the entity the interrupted mutation was about. The entity
/// the mutation meant to produce is discarded; nothing else is touched.
pub fn resolve_conflict(
    index: &mut EntityIndex,
    target: &EntityId,
    conflict: Conflict,
    subject_kind: EntityKind,
) -> AppResult<ConflictResolution> {
    let kind = conflict.entity.kind.unwrap_or(subject_kind);
    let entity = index
        .ingest_single(&conflict.entity, kind, target)?
        .clone();

    warn!(
        entity_id = %entity.id,
        parent_id = %target,
        title = %entity.display_name,
        backend_message = conflict.message.as_deref().unwrap_or_default(),
        "Backend resolved a duplicate name"
    );

    Ok(ConflictResolution {
        message: conflict.message,
        entity,
    })
}
