//! Shared types: namespaced identifiers and backend payloads.

pub mod id;
pub mod payload;
pub mod response;

pub use id::{EntityId, EntityKind, ROOT_ID, RawId};
pub use payload::{
    FileSummary, MoveRequest, OneOrMany, RawEntity, RawFile, RawFolder, RawNode, SearchQuery,
    Titled, UploadBlob,
};
pub use response::{Conflict, Envelope, RemoteReply};
