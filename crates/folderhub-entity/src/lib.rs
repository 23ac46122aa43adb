//! # folderhub-entity
//!
//! Domain records held by the FolderHub index. Every [`Entity`] carries an
//! explicit [`EntityBody`] discriminant; the kind of a node is never
//! re-derived from which fields happen to be present.

pub mod entity;

pub use entity::{Entity, EntityBody, FolderContents};
