//! # folderhub-index
//!
//! The authoritative in-memory mirror of the backend's folder tree: the
//! [`EntityIndex`], tree ingestion from bulk and single-entity payloads, and
//! the local move pre-checks.

pub mod index;
pub mod ingest;
pub mod validate;

pub use index::EntityIndex;
pub use validate::{MovePlan, MoveRejection, check_move};
