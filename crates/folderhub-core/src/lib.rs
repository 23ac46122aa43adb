//! # folderhub-core
//!
//! Core crate for FolderHub. Contains the identifier namespacing scheme,
//! configuration schemas, wire envelopes shared with the backend, the
//! collaborator traits the mutation engine talks to, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other FolderHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::id::{EntityId, EntityKind, RawId};
