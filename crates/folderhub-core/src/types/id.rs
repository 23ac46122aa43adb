//! Identifier namespacing for folders and files.
//!
//! The backend numbers folders and images independently, so a folder and an
//! image may share the same raw id. Inside the index every id is tagged with
//! its kind prefix (`folder_12`, `file_12`) which keeps them globally unique.
//! Requests to the backend always carry the untagged [`RawId`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The reserved id of the synthetic root folder.
///
/// It never starts with a kind prefix, so it cannot collide with a tagged id.
pub const ROOT_ID: &str = "rootfolder";

/// The kind of an entity in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A folder, which may contain folders and files.
    Folder,
    /// An image file.
    #[serde(alias = "image")]
    File,
}

impl EntityKind {
    /// Both kinds, folders first (display order).
    pub const ALL: [EntityKind; 2] = [EntityKind::Folder, EntityKind::File];

    /// The namespacing prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Folder => "folder_",
            Self::File => "file_",
        }
    }

    /// The `source_type` value the backend expects for this kind.
    pub fn source_type(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "image",
        }
    }

    /// Parse a backend `source_type` / `kind` value.
    pub fn from_source_type(value: &str) -> Option<Self> {
        match value {
            "folder" => Some(Self::Folder),
            "image" | "file" => Some(Self::File),
            _ => None,
        }
    }

    /// The URL collection segment for this kind (`folders` / `images`).
    pub fn collection(self) -> &'static str {
        match self {
            Self::Folder => "folders",
            Self::File => "images",
        }
    }

    /// The word shown to users for this kind.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "image",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// An id as the backend knows it: untagged and kind-agnostic.
///
/// The backend emits numeric ids; they are kept as strings so the index
/// never has to care about their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RawId(String);

impl RawId {
    /// Wrap a raw id.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for RawId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RawId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Self(n.to_string()),
            Wire::Text(s) => Self(s),
        })
    }
}

/// A namespaced id, unique across the whole index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// The id of the synthetic root folder.
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// Tag a raw backend id with the prefix of `kind`.
    ///
    /// Applied exactly once per entity, at ingestion or creation time.
    pub fn tag(raw: &RawId, kind: EntityKind) -> Self {
        Self(format!("{}{}", kind.prefix(), raw.as_str()))
    }

    /// Strip the kind prefix, yielding the id the backend understands.
    pub fn untag(&self) -> RawId {
        untag(&self.0)
    }

    /// The kind encoded in the prefix, if any.
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| self.0.starts_with(kind.prefix()))
    }

    /// Whether this is the root id.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// The namespaced id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Strip one known kind prefix from `namespaced`; unknown shapes pass through.
pub fn untag(namespaced: &str) -> RawId {
    EntityKind::ALL
        .into_iter()
        .find_map(|kind| namespaced.strip_prefix(kind.prefix()))
        .map_or_else(|| RawId::from(namespaced), RawId::from)
}
