//! Building the index from backend payloads.

use tracing::debug;

use folderhub_core::result::AppResult;
use folderhub_core::types::{EntityId, EntityKind, RawEntity, RawFile, RawFolder, RawNode};
use folderhub_entity::Entity;

use crate::index::EntityIndex;

impl EntityIndex {
    /// Build a fresh index from the bulk tree payload.
    pub fn from_payload(payload: &[RawNode]) -> AppResult<Self> {
        let mut index = Self::new();
        index.ingest_bulk(payload)?;
        Ok(index)
    }

    /// Install every top-level item of `payload` under the root, tagging all
    /// ids on the way down.
    ///
    /// Folders are registered before their children so parent lookups never
    /// fail. The index is left untouched if any node is rejected.
    pub fn ingest_bulk(&mut self, payload: &[RawNode]) -> AppResult<usize> {
        let mut staged = self.clone();
        let root = EntityId::root();
        let mut count = 0;
        for node in payload {
            count += match node {
                RawNode::Folder(folder) => staged.ingest_folder(folder, &root)?,
                RawNode::File(file) => {
                    staged.ingest_file(file, &root)?;
                    1
                }
            };
        }
        *self = staged;

        debug!(top_level = payload.len(), entities = count, "Ingested bulk payload");
        Ok(count)
    }

    /// Insert one entity returned by a create, upload, or conflict response
    /// as the last child of `parent`.
    pub fn ingest_single(
        &mut self,
        raw: &RawEntity,
        kind: EntityKind,
        parent: &EntityId,
    ) -> AppResult<&Entity> {
        let id = EntityId::tag(&raw.id, kind);
        let entity = match kind {
            EntityKind::Folder => Entity::folder(id.clone(), raw.title.clone(), parent.clone()),
            EntityKind::File => {
                Entity::file(id.clone(), raw.title.clone(), parent.clone(), raw.url.clone())
            }
        };
        self.insert_child(entity)?;

        debug!(entity_id = %id, parent_id = %parent, "Ingested entity");
        self.require(&id)
    }

    fn ingest_folder(&mut self, folder: &RawFolder, parent: &EntityId) -> AppResult<usize> {
        let id = EntityId::tag(&folder.id, EntityKind::Folder);
        self.insert_child(Entity::folder(
            id.clone(),
            folder.title.clone(),
            parent.clone(),
        ))?;

        let mut count = 1;
        for sub_folder in &folder.sub_folders {
            count += self.ingest_folder(sub_folder, &id)?;
        }
        for file in &folder.images {
            self.ingest_file(file, &id)?;
            count += 1;
        }
        Ok(count)
    }

    fn ingest_file(&mut self, file: &RawFile, parent: &EntityId) -> AppResult<()> {
        self.insert_child(Entity::file(
            EntityId::tag(&file.id, EntityKind::File),
            file.title.clone(),
            parent.clone(),
            file.url.clone(),
        ))
    }
}
