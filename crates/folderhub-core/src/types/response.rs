//! Response envelopes exchanged with the backend.

use serde::{Deserialize, Serialize};

use super::payload::RawEntity;

/// The `{ message, data }` body the backend wraps its answers in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, absent on failures.
    pub data: Option<T>,
}

/// The backend's answer to a mutating request that can hit a duplicate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteReply<T> {
    /// The request was applied as asked.
    Success(T),
    /// The name already existed; the backend stored a disambiguated entity.
    Conflict(Conflict),
}

/// Payload of a duplicate-name response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Message to surface to the user.
    #[serde(default)]
    pub message: Option<String>,
    /// The entity the backend created under a server-chosen name.
    #[serde(rename = "data")]
    pub entity: RawEntity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::RawId;

    #[test]
    fn test_conflict_body_parses() {
        let body = r#"{"message": "Folder already exists", "data": {"id": 31, "title": "Pics (1)"}}"#;
        let conflict: Conflict = serde_json::from_str(body).expect("deserialize");
        assert_eq!(conflict.message.as_deref(), Some("Folder already exists"));
        assert_eq!(conflict.entity.id, RawId::from(31));
        assert_eq!(conflict.entity.kind, None);
    }

    #[test]
    fn test_failure_envelope_has_no_data() {
        let body = r#"{"message": "User does not have permission"}"#;
        let envelope: Envelope<RawEntity> = serde_json::from_str(body).expect("deserialize");
        assert!(envelope.data.is_none());
    }
}
