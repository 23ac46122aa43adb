//! Entity model.

use serde::{Deserialize, Serialize};

use folderhub_core::types::{EntityId, EntityKind};

use super::contents::FolderContents;

/// One node of the tree: a folder or an image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Namespaced id, unique across the index.
    pub id: EntityId,
    /// Name shown to the user.
    pub display_name: String,
    /// Containing folder. `None` only for the root pseudo-entity.
    pub parent_id: Option<EntityId>,
    /// Kind-specific data.
    #[serde(flatten)]
    pub body: EntityBody,
}

/// Kind-specific part of an [`Entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityBody {
    /// A folder and its ordered children.
    Folder {
        /// Child ids by kind.
        contents: FolderContents,
    },
    /// An image file.
    File {
        /// Preview reference. Never implies ownership.
        resource_url: Option<String>,
    },
}

impl Entity {
    /// The synthetic root folder.
    pub fn root() -> Self {
        Self {
            id: EntityId::root(),
            display_name: String::new(),
            parent_id: None,
            body: EntityBody::Folder {
                contents: FolderContents::default(),
            },
        }
    }

    /// A folder with no children yet.
    pub fn folder(id: EntityId, display_name: impl Into<String>, parent_id: EntityId) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            parent_id: Some(parent_id),
            body: EntityBody::Folder {
                contents: FolderContents::default(),
            },
        }
    }

    /// An image file.
    pub fn file(
        id: EntityId,
        display_name: impl Into<String>,
        parent_id: EntityId,
        resource_url: Option<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            parent_id: Some(parent_id),
            body: EntityBody::File { resource_url },
        }
    }

    /// The kind of this entity.
    pub fn kind(&self) -> EntityKind {
        match self.body {
            EntityBody::Folder { .. } => EntityKind::Folder,
            EntityBody::File { .. } => EntityKind::File,
        }
    }

    /// Whether this is a folder (the root included).
    pub fn is_folder(&self) -> bool {
        self.kind() == EntityKind::Folder
    }

    /// Whether this is the root pseudo-entity.
    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Children of a folder; `None` for files.
    pub fn contents(&self) -> Option<&FolderContents> {
        match &self.body {
            EntityBody::Folder { contents } => Some(contents),
            EntityBody::File { .. } => None,
        }
    }

    /// Mutable children of a folder; `None` for files.
    pub fn contents_mut(&mut self) -> Option<&mut FolderContents> {
        match &mut self.body {
            EntityBody::Folder { contents } => Some(contents),
            EntityBody::File { .. } => None,
        }
    }

    /// Preview reference of a file.
    pub fn resource_url(&self) -> Option<&str> {
        match &self.body {
            EntityBody::File { resource_url } => resource_url.as_deref(),
            EntityBody::Folder { .. } => None,
        }
    }
}
