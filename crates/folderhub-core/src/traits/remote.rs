//! Remote backend trait: the source of truth for identity and naming.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::{EntityKind, RawId};
use crate::types::payload::{
    FileSummary, MoveRequest, RawEntity, RawNode, SearchQuery, Titled, UploadBlob,
};
use crate::types::response::RemoteReply;

/// The remote collaborator behind every mutation.
///
/// Implementations speak raw ids only. A failed request (anything that is
/// neither success nor duplicate-name conflict) is an `Err` carrying the
/// backend's message. The HTTP implementation lives in `folderhub-remote`.
#[async_trait]
pub trait RemoteBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the complete folder/image tree.
    async fn fetch_tree(&self) -> AppResult<Vec<RawNode>>;

    /// Move an entity under another folder, or to top level.
    async fn move_entity(&self, request: &MoveRequest) -> AppResult<RemoteReply<Titled>>;

    /// Create a folder; `parent` of `None` creates it at top level.
    async fn create_folder(
        &self,
        parent: Option<&RawId>,
        title: &str,
    ) -> AppResult<RemoteReply<RawEntity>>;

    /// Upload a batch of images into `parent` (top level when `None`).
    ///
    /// Returns one entity per accepted file.
    async fn upload_files(
        &self,
        parent: Option<&RawId>,
        blobs: &[UploadBlob],
    ) -> AppResult<Vec<RawEntity>>;

    /// Rename an entity.
    async fn rename(
        &self,
        id: &RawId,
        kind: EntityKind,
        title: &str,
    ) -> AppResult<RemoteReply<Titled>>;

    /// Delete an entity. The backend cascades folder deletion.
    async fn delete(&self, id: &RawId, kind: EntityKind) -> AppResult<()>;

    /// Search images by free text.
    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<FileSummary>>;
}
