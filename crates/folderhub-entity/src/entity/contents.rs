//! Ordered child lists of a folder.

use serde::{Deserialize, Serialize};

use folderhub_core::types::{EntityId, EntityKind};

/// The children of a folder, split by kind. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContents {
    /// Child folder ids.
    pub folders: Vec<EntityId>,
    /// Child file ids.
    pub files: Vec<EntityId>,
}

impl FolderContents {
    /// The child list holding entities of `kind`.
    pub fn list(&self, kind: EntityKind) -> &[EntityId] {
        match kind {
            EntityKind::Folder => &self.folders,
            EntityKind::File => &self.files,
        }
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut Vec<EntityId> {
        match kind {
            EntityKind::Folder => &mut self.folders,
            EntityKind::File => &mut self.files,
        }
    }

    /// Append `id` to the list for `kind`.
    pub fn push(&mut self, kind: EntityKind, id: EntityId) {
        self.list_mut(kind).push(id);
    }

    /// Position of `id` in the list for `kind`.
    pub fn position(&self, kind: EntityKind, id: &EntityId) -> Option<usize> {
        self.list(kind).iter().position(|child| child == id)
    }

    /// Remove `id` from the list for `kind`, returning its former position.
    pub fn remove(&mut self, kind: EntityKind, id: &EntityId) -> Option<usize> {
        let index = self.position(kind, id)?;
        self.list_mut(kind).remove(index);
        Some(index)
    }

    /// Whether `id` is listed under `kind`.
    pub fn contains(&self, kind: EntityKind, id: &EntityId) -> bool {
        self.position(kind, id).is_some()
    }

    /// All child ids, folders first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EntityId> {
        self.folders.iter().chain(self.files.iter())
    }

    /// Number of children of both kinds.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    /// Whether the folder has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove_keep_order() {
        let mut contents = FolderContents::default();
        contents.push(EntityKind::File, "file_1".into());
        contents.push(EntityKind::File, "file_2".into());
        contents.push(EntityKind::File, "file_3".into());
        contents.push(EntityKind::Folder, "folder_1".into());

        assert_eq!(contents.remove(EntityKind::File, &"file_2".into()), Some(1));
        assert_eq!(
            contents.list(EntityKind::File),
            [EntityId::from("file_1"), EntityId::from("file_3")]
        );
        assert_eq!(contents.remove(EntityKind::File, &"file_2".into()), None);
        // Removal is kind-specific.
        assert_eq!(contents.remove(EntityKind::File, &"folder_1".into()), None);

        let order: Vec<&str> = contents.iter().map(EntityId::as_str).collect();
        assert_eq!(order, ["folder_1", "file_1", "file_3"]);
        assert_eq!(contents.len(), 3);
    }
}
