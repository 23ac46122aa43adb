//! The in-memory mirror of the backend tree.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use folderhub_core::error::AppError;
use folderhub_core::result::AppResult;
use folderhub_core::types::{EntityId, EntityKind};
use folderhub_entity::{Entity, FolderContents};

/// Mapping from namespaced id to [`Entity`], rooted at the synthetic root
/// folder.
///
/// Between operations the index guarantees:
/// 1. every entity reaches the root by following `parent_id` links;
/// 2. every id listed by a folder points back at that folder;
/// 3. ids are unique, folders and files never share one;
/// 4. nothing but the root uses the root id.
///
/// [`EntityIndex::verify`] checks all four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIndex {
    entities: HashMap<EntityId, Entity>,
}

impl Default for EntityIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIndex {
    /// An index holding only the root folder.
    pub fn new() -> Self {
        let root = Entity::root();
        let mut entities = HashMap::new();
        entities.insert(root.id.clone(), root);
        Self { entities }
    }

    /// The root pseudo-entity.
    pub fn root(&self) -> &Entity {
        &self.entities[&EntityId::root()]
    }

    /// Look up an entity.
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up an entity, failing with `NotFound`.
    pub fn require(&self, id: &EntityId) -> AppResult<&Entity> {
        self.get(id)
            .ok_or_else(|| AppError::not_found(format!("Entity {id} not found")))
    }

    /// Look up a folder, failing when the id is missing or names a file.
    pub fn require_folder(&self, id: &EntityId) -> AppResult<&Entity> {
        let entity = self.require(id)?;
        if !entity.is_folder() {
            return Err(AppError::validation(format!("{id} is not a folder")));
        }
        Ok(entity)
    }

    /// Whether `id` is in the index.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of entities, not counting the root.
    pub fn len(&self) -> usize {
        self.entities.len() - 1
    }

    /// Whether the index holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entities, root included, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Children of `folder` of one kind, in display order.
    pub fn children(&self, folder: &EntityId, kind: EntityKind) -> AppResult<Vec<&Entity>> {
        let contents = self.contents_of(folder)?;
        Ok(contents
            .list(kind)
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect())
    }

    /// Everything directly inside `folder`: folders first, then files.
    pub fn contents(&self, folder: &EntityId) -> AppResult<Vec<&Entity>> {
        let contents = self.contents_of(folder)?;
        Ok(contents
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect())
    }

    /// The folders above `id`, nearest first, stopping before the root.
    pub fn ancestors(&self, id: &EntityId) -> AppResult<Vec<&Entity>> {
        let mut chain = Vec::new();
        let mut current = self.require(id)?;
        while let Some(parent_id) = current.parent_id.as_ref() {
            if parent_id.is_root() {
                break;
            }
            current = self.require(parent_id)?;
            if chain.len() > self.entities.len() {
                return Err(AppError::integrity(format!("Parent cycle above {id}")));
            }
            chain.push(current);
        }
        Ok(chain)
    }

    /// A child of `parent` of the given kind named exactly `name`.
    ///
    /// Informational only: the backend decides what counts as a duplicate.
    pub fn find_child_by_name(
        &self,
        parent: &EntityId,
        kind: EntityKind,
        name: &str,
    ) -> Option<&Entity> {
        self.children(parent, kind)
            .ok()?
            .into_iter()
            .find(|child| child.display_name == name)
    }

    /// Insert a new entity and append it to its parent's matching child list.
    pub fn insert_child(&mut self, entity: Entity) -> AppResult<()> {
        if entity.is_root() {
            return Err(AppError::integrity("The root id is reserved"));
        }
        if self.contains(&entity.id) {
            return Err(AppError::integrity(format!(
                "Entity {} is already indexed",
                entity.id
            )));
        }
        let parent_id = entity
            .parent_id
            .clone()
            .ok_or_else(|| AppError::integrity(format!("Entity {} has no parent", entity.id)))?;

        let kind = entity.kind();
        self.contents_of_mut(&parent_id)?
            .push(kind, entity.id.clone());
        self.entities.insert(entity.id.clone(), entity);
        Ok(())
    }

    /// Move `id` under `new_parent`, appending it to the end of the new
    /// parent's child list.
    pub fn reparent(&mut self, id: &EntityId, new_parent: &EntityId) -> AppResult<()> {
        let entity = self.require(id)?;
        if entity.is_root() {
            return Err(AppError::validation("The root folder cannot be moved"));
        }
        let kind = entity.kind();
        let old_parent = entity.parent_id.clone();
        self.require_folder(new_parent)?;
        if new_parent == id || self.is_descendant(new_parent, id) {
            return Err(AppError::integrity(format!(
                "Moving {id} under {new_parent} would create a cycle"
            )));
        }

        if let Some(old_parent) = old_parent {
            if let Ok(contents) = self.contents_of_mut(&old_parent) {
                contents.remove(kind, id);
            }
        }
        self.contents_of_mut(new_parent)?.push(kind, id.clone());
        if let Some(entity) = self.entities.get_mut(id) {
            entity.parent_id = Some(new_parent.clone());
        }

        debug!(entity_id = %id, parent_id = %new_parent, "Reparented entity");
        Ok(())
    }

    /// Set the display name of `id`.
    ///
    /// Child lists hold ids, so the parent's view of the name follows.
    pub fn rename(&mut self, id: &EntityId, name: &str) -> AppResult<()> {
        if id.is_root() {
            return Err(AppError::validation("The root folder cannot be renamed"));
        }
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Entity {id} not found")))?;
        entity.display_name = name.to_string();
        Ok(())
    }

    /// Remove `id` and everything below it, detaching it from its parent.
    ///
    /// Returns the removed entities, `id` first.
    pub fn remove_subtree(&mut self, id: &EntityId) -> AppResult<Vec<Entity>> {
        let entity = self.require(id)?;
        if entity.is_root() {
            return Err(AppError::validation("The root folder cannot be deleted"));
        }
        let kind = entity.kind();
        if let Some(parent_id) = entity.parent_id.clone() {
            if let Ok(contents) = self.contents_of_mut(&parent_id) {
                contents.remove(kind, id);
            }
        }

        let mut removed = Vec::new();
        let mut pending = vec![id.clone()];
        while let Some(next) = pending.pop() {
            if let Some(entity) = self.entities.remove(&next) {
                if let Some(contents) = entity.contents() {
                    pending.extend(contents.iter().rev().cloned());
                }
                removed.push(entity);
            }
        }

        debug!(entity_id = %id, removed = removed.len(), "Removed subtree");
        Ok(removed)
    }

    /// Whether `candidate` lies strictly below `ancestor`.
    pub fn is_descendant(&self, candidate: &EntityId, ancestor: &EntityId) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.get(candidate).and_then(|e| e.parent_id.as_ref());
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            if !seen.insert(parent_id) {
                return false;
            }
            current = self.get(parent_id).and_then(|e| e.parent_id.as_ref());
        }
        false
    }

    /// Check the structural invariants of the index.
    pub fn verify(&self) -> AppResult<()> {
        let root = self
            .entities
            .get(&EntityId::root())
            .ok_or_else(|| AppError::integrity("Root folder missing"))?;
        if root.parent_id.is_some() || !root.is_folder() {
            return Err(AppError::integrity("Root must be a parentless folder"));
        }

        for (key, entity) in &self.entities {
            if key != &entity.id {
                return Err(AppError::integrity(format!(
                    "Entity {} is stored under key {key}",
                    entity.id
                )));
            }
            if let Some(contents) = entity.contents() {
                self.verify_children(entity, contents)?;
            }
            if entity.is_root() {
                continue;
            }
            if entity.id.kind() != Some(entity.kind()) {
                return Err(AppError::integrity(format!(
                    "Entity {} is not tagged as a {}",
                    entity.id,
                    entity.kind()
                )));
            }

            let parent_id = entity.parent_id.as_ref().ok_or_else(|| {
                AppError::integrity(format!("Entity {} has no parent", entity.id))
            })?;
            let parent = self.entities.get(parent_id).ok_or_else(|| {
                AppError::integrity(format!(
                    "Entity {} points at missing parent {parent_id}",
                    entity.id
                ))
            })?;
            let listed = parent
                .contents()
                .is_some_and(|c| c.contains(entity.kind(), &entity.id));
            if !listed {
                return Err(AppError::integrity(format!(
                    "Entity {} is missing from its parent's child list",
                    entity.id
                )));
            }
            if !self.reaches_root(&entity.id) {
                return Err(AppError::integrity(format!(
                    "Entity {} is not reachable from the root",
                    entity.id
                )));
            }
        }
        Ok(())
    }

    fn verify_children(&self, folder: &Entity, contents: &FolderContents) -> AppResult<()> {
        let mut seen = HashSet::new();
        for kind in EntityKind::ALL {
            for child_id in contents.list(kind) {
                if !seen.insert(child_id) {
                    return Err(AppError::integrity(format!(
                        "{child_id} is listed twice under {}",
                        folder.id
                    )));
                }
                let child = self.entities.get(child_id).ok_or_else(|| {
                    AppError::integrity(format!(
                        "{} lists missing child {child_id}",
                        folder.id
                    ))
                })?;
                if child.kind() != kind || child.parent_id.as_ref() != Some(&folder.id) {
                    return Err(AppError::integrity(format!(
                        "{child_id} is listed under {} but does not belong there",
                        folder.id
                    )));
                }
            }
        }
        Ok(())
    }

    fn reaches_root(&self, id: &EntityId) -> bool {
        let mut steps = 0;
        let mut current = self.get(id);
        while let Some(entity) = current {
            if entity.is_root() {
                return true;
            }
            steps += 1;
            if steps > self.entities.len() {
                return false;
            }
            current = entity.parent_id.as_ref().and_then(|p| self.get(p));
        }
        false
    }

    fn contents_of(&self, folder: &EntityId) -> AppResult<&FolderContents> {
        self.require(folder)?
            .contents()
            .ok_or_else(|| AppError::validation(format!("{folder} is not a folder")))
    }

    fn contents_of_mut(&mut self, folder: &EntityId) -> AppResult<&mut FolderContents> {
        self.entities
            .get_mut(folder)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder} not found")))?
            .contents_mut()
            .ok_or_else(|| AppError::validation(format!("{folder} is not a folder")))
    }
}
