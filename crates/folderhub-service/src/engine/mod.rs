//! Mutation engine, conflict resolution, and request activity tracking.

pub mod activity;
pub mod conflict;
pub mod outcome;
pub mod service;
pub mod store;

pub use activity::{ActivityGuard, ActivityTracker};
pub use conflict::{ConflictResolution, resolve_conflict};
pub use outcome::MutationOutcome;
pub use service::MutationEngine;
pub use store::IndexStore;
