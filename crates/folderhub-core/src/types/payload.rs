//! Typed records for the payloads the backend sends and receives.
//!
//! The bulk tree arrives as freeform nested JSON where a top-level item is a
//! folder only because it carries a children field. That shape is resolved
//! once, here, into the [`RawNode`] variant; nothing downstream inspects
//! field presence again.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::id::{EntityKind, RawId};

/// One top-level item of the bulk tree payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireItem")]
pub enum RawNode {
    /// A folder with its nested contents.
    Folder(RawFolder),
    /// An image sitting at top level.
    File(RawFile),
}

impl RawNode {
    /// The kind of this node.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Folder(_) => EntityKind::Folder,
            Self::File(_) => EntityKind::File,
        }
    }
}

/// A folder as the backend describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFolder {
    /// Backend id.
    pub id: RawId,
    /// Folder title.
    #[serde(default)]
    pub title: String,
    /// Nested folders, in display order.
    #[serde(default)]
    pub sub_folders: Vec<RawFolder>,
    /// Images directly inside this folder, in display order.
    #[serde(default)]
    pub images: Vec<RawFile>,
}

impl RawFolder {
    /// Total number of nodes in this subtree, including the folder itself.
    pub fn node_count(&self) -> usize {
        1 + self.images.len()
            + self
                .sub_folders
                .iter()
                .map(RawFolder::node_count)
                .sum::<usize>()
    }
}

/// An image as the backend describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFile {
    /// Backend id.
    pub id: RawId,
    /// Image title.
    #[serde(default)]
    pub title: String,
    /// Preview reference.
    #[serde(default)]
    pub url: Option<String>,
}

/// Search hits are plain image records.
pub type FileSummary = RawFile;

/// A single entity returned by a create, upload, or conflict response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    /// Backend id.
    pub id: RawId,
    /// Title as stored by the backend.
    #[serde(default)]
    pub title: String,
    /// Preview reference, for images.
    #[serde(default)]
    pub url: Option<String>,
    /// Explicit kind of the entity, when the backend states it.
    #[serde(default)]
    pub kind: Option<EntityKind>,
}

/// The `data` of a move or rename success: the canonical title.
///
/// Empty when the backend did not echo one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titled {
    /// Title as stored by the backend.
    #[serde(default)]
    pub title: String,
}

/// A file handed to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBlob {
    /// Original file name.
    pub file_name: String,
    /// Title to store; the backend requires one, so callers default it to
    /// the file stem.
    pub title: String,
    /// File content.
    pub content: Bytes,
}

impl UploadBlob {
    /// Build a blob whose title is the file name without its extension.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let title = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => file_name.clone(),
        };
        Self {
            file_name,
            title,
            content: content.into(),
        }
    }
}

/// Request body of the move endpoint, with ids already untagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Entity being moved.
    pub source_id: RawId,
    /// Destination folder; `None` moves to top level.
    pub target_id: Option<RawId>,
    /// Kind of the entity being moved.
    pub source_kind: EntityKind,
}

/// Free-text image search, optionally scoped to one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Query string as typed.
    pub query: String,
    /// Folder to restrict the search to.
    pub folder_id: Option<RawId>,
}

/// Either one item or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single item.
    One(T),
    /// Several items.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

#[derive(Deserialize)]
struct WireItem {
    id: RawId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    sub_folders: Option<Vec<RawFolder>>,
    #[serde(default)]
    images: Option<Vec<RawFile>>,
}

impl From<WireItem> for RawNode {
    fn from(item: WireItem) -> Self {
        if item.sub_folders.is_some() || item.images.is_some() {
            Self::Folder(RawFolder {
                id: item.id,
                title: item.title,
                sub_folders: item.sub_folders.unwrap_or_default(),
                images: item.images.unwrap_or_default(),
            })
        } else {
            Self::File(RawFile {
                id: item.id,
                title: item.title,
                url: item.url,
            })
        }
    }
}
