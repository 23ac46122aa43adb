//! Results of mutation engine operations.

use folderhub_entity::Entity;

use super::conflict::ConflictResolution;

/// What a mutation did to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend accepted the request and the index now reflects it.
    /// Carries the entity after the change (the removed record for deletes).
    Applied(Entity),
    /// Nothing to do; no request was sent.
    Unchanged,
    /// The backend reported a duplicate name and stored a disambiguated
    /// entity instead, which has been ingested.
    Conflict(ConflictResolution),
}

impl MutationOutcome {
    /// The entity the outcome refers to, if any.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Self::Applied(entity) => Some(entity),
            Self::Conflict(resolution) => Some(&resolution.entity),
            Self::Unchanged => None,
        }
    }

    /// Message for the user, if the backend sent one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Conflict(resolution) => resolution.message.as_deref(),
            _ => None,
        }
    }
}
