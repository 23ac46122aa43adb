//! Folder and file entities.

pub mod contents;
pub mod model;

pub use contents::FolderContents;
pub use model::{Entity, EntityBody};
