//! Pre-flight checks run before a move request is sent.
//!
//! Only cheap checks run here. Whether a folder is being moved into one of
//! its own descendants is decided by the backend.

use thiserror::Error;

use folderhub_core::error::AppError;
use folderhub_core::types::{EntityId, EntityKind, MoveRequest};

use crate::index::EntityIndex;

/// Why a move was not sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    /// Source and target are the same entity.
    #[error("Cannot move the {0} into itself")]
    IntoItself(EntityKind),
    /// The source already sits directly in the target.
    #[error("{0} is already in the target folder")]
    AlreadyInTarget(EntityId),
    /// The root cannot be moved.
    #[error("The root folder cannot be moved")]
    RootSource,
    /// The source is not in the index.
    #[error("Entity {0} not found")]
    SourceMissing(EntityId),
    /// The target is not in the index.
    #[error("Target folder {0} not found")]
    TargetMissing(EntityId),
    /// The target is a file.
    #[error("{0} is not a folder")]
    TargetNotFolder(EntityId),
}

impl MoveRejection {
    /// Whether the move would change nothing and can be dropped silently.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::AlreadyInTarget(_))
    }
}

impl From<MoveRejection> for AppError {
    fn from(rejection: MoveRejection) -> Self {
        match rejection {
            MoveRejection::SourceMissing(_) | MoveRejection::TargetMissing(_) => {
                AppError::not_found(rejection.to_string())
            }
            _ => AppError::validation(rejection.to_string()),
        }
    }
}

/// A move that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Entity being moved.
    pub source: EntityId,
    /// Its kind.
    pub source_kind: EntityKind,
    /// Destination folder; the root id for top level.
    pub target: EntityId,
}

impl MovePlan {
    /// The untagged request body for the backend.
    pub fn request(&self) -> MoveRequest {
        MoveRequest {
            source_id: self.source.untag(),
            target_id: (!self.target.is_root()).then(|| self.target.untag()),
            source_kind: self.source_kind,
        }
    }
}

/// Validate moving `source` into `target` (`None` or the root id meaning
/// top level).
pub fn check_move(
    index: &EntityIndex,
    source: &EntityId,
    target: Option<&EntityId>,
) -> Result<MovePlan, MoveRejection> {
    let target = target.cloned().unwrap_or_else(EntityId::root);

    if source == &target {
        let kind = index
            .get(source)
            .map(|e| e.kind())
            .or_else(|| source.kind())
            .unwrap_or(EntityKind::Folder);
        return Err(MoveRejection::IntoItself(kind));
    }

    let entity = index
        .get(source)
        .ok_or_else(|| MoveRejection::SourceMissing(source.clone()))?;
    if entity.is_root() {
        return Err(MoveRejection::RootSource);
    }

    let destination = index
        .get(&target)
        .ok_or_else(|| MoveRejection::TargetMissing(target.clone()))?;
    if !destination.is_folder() {
        return Err(MoveRejection::TargetNotFolder(target));
    }

    if entity.parent_id.as_ref() == Some(&target) {
        return Err(MoveRejection::AlreadyInTarget(source.clone()));
    }

    Ok(MovePlan {
        source: source.clone(),
        source_kind: entity.kind(),
        target,
    })
}
