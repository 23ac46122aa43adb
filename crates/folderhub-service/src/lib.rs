//! # folderhub-service
//!
//! The mutation engine: every operation pairs one remote call with one
//! local index update, applied only after the backend has answered.
//!
//! Services follow constructor injection. The backend and the confirmation
//! prompt are provided at construction time via `Arc` references; the index
//! is owned by an [`IndexStore`] that collaborators read through.

pub mod engine;

pub use engine::{
    ActivityGuard, ActivityTracker, ConflictResolution, IndexStore, MutationEngine,
    MutationOutcome, resolve_conflict,
};
