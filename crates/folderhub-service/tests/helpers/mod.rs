//! Shared test helpers for mutation engine tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use folderhub_core::result::AppResult;
use folderhub_core::traits::{Confirmation, RemoteBackend};
use folderhub_core::types::{
    Conflict, EntityKind, FileSummary, MoveRequest, RawEntity, RawId, RawNode, RemoteReply,
    SearchQuery, Titled, UploadBlob,
};
use folderhub_service::MutationEngine;

/// Two folders under the root, one nested folder and two images.
pub const SAMPLE_TREE: &str = r#"[
    {"id": 1, "title": "Pics", "sub_folders": [
        {"id": 4, "title": "Holiday", "images": [{"id": 7, "title": "beach.jpg", "url": "/beach.jpg"}]}
    ], "images": [{"id": 5, "title": "a.jpg", "url": "/a.jpg"}]},
    {"id": 2, "title": "Docs", "images": []},
    {"id": 3, "title": "Archive", "images": []}
]"#;

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchTree,
    Move(MoveRequest),
    CreateFolder {
        parent: Option<RawId>,
        title: String,
    },
    Upload {
        parent: Option<RawId>,
        files: Vec<String>,
    },
    Rename {
        id: RawId,
        kind: EntityKind,
        title: String,
    },
    Delete {
        id: RawId,
        kind: EntityKind,
    },
    Search(SearchQuery),
}

/// Queued replies for one endpoint, each answered after an optional delay.
#[derive(Debug)]
pub struct Script<T> {
    queue: Mutex<VecDeque<(Duration, AppResult<T>)>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T: Send> Script<T> {
    /// Queue an immediate reply.
    pub fn reply(&self, reply: AppResult<T>) {
        self.reply_after(Duration::ZERO, reply);
    }

    /// Queue a reply delivered after `delay`.
    pub fn reply_after(&self, delay: Duration, reply: AppResult<T>) {
        self.queue
            .lock()
            .expect("script lock")
            .push_back((delay, reply));
    }

    async fn next(&self, operation: &str) -> AppResult<T> {
        let scripted = self.queue.lock().expect("script lock").pop_front();
        let (delay, reply) =
            scripted.unwrap_or_else(|| panic!("no scripted reply for {operation}"));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

/// A backend that records every request and answers from scripts.
#[derive(Debug, Default)]
pub struct FakeBackend {
    tree: Mutex<Vec<RawNode>>,
    calls: Mutex<Vec<Call>>,
    pub moves: Script<RemoteReply<Titled>>,
    pub creates: Script<RemoteReply<RawEntity>>,
    pub uploads: Script<Vec<RawEntity>>,
    pub renames: Script<RemoteReply<Titled>>,
    pub deletes: Script<()>,
    pub searches: Script<Vec<FileSummary>>,
}

impl FakeBackend {
    /// A backend serving `json` as its tree.
    pub fn with_tree(json: &str) -> Arc<Self> {
        let backend = Self::default();
        *backend.tree.lock().expect("tree lock") =
            serde_json::from_str(json).expect("tree payload");
        Arc::new(backend)
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Requests received so far, excluding tree fetches.
    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::FetchTree)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl RemoteBackend for FakeBackend {
    async fn fetch_tree(&self) -> AppResult<Vec<RawNode>> {
        self.record(Call::FetchTree);
        Ok(self.tree.lock().expect("tree lock").clone())
    }

    async fn move_entity(&self, request: &MoveRequest) -> AppResult<RemoteReply<Titled>> {
        self.record(Call::Move(request.clone()));
        self.moves.next("move").await
    }

    async fn create_folder(
        &self,
        parent: Option<&RawId>,
        title: &str,
    ) -> AppResult<RemoteReply<RawEntity>> {
        self.record(Call::CreateFolder {
            parent: parent.cloned(),
            title: title.to_string(),
        });
        self.creates.next("create_folder").await
    }

    async fn upload_files(
        &self,
        parent: Option<&RawId>,
        blobs: &[UploadBlob],
    ) -> AppResult<Vec<RawEntity>> {
        self.record(Call::Upload {
            parent: parent.cloned(),
            files: blobs.iter().map(|b| b.file_name.clone()).collect(),
        });
        self.uploads.next("upload_files").await
    }

    async fn rename(
        &self,
        id: &RawId,
        kind: EntityKind,
        title: &str,
    ) -> AppResult<RemoteReply<Titled>> {
        self.record(Call::Rename {
            id: id.clone(),
            kind,
            title: title.to_string(),
        });
        self.renames.next("rename").await
    }

    async fn delete(&self, id: &RawId, kind: EntityKind) -> AppResult<()> {
        self.record(Call::Delete {
            id: id.clone(),
            kind,
        });
        self.deletes.next("delete").await
    }

    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<FileSummary>> {
        self.record(Call::Search(query.clone()));
        self.searches.next("search").await
    }
}

/// Answers every prompt the same way and remembers what was asked.
#[derive(Debug)]
pub struct ScriptedPrompt {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl Confirmation for ScriptedPrompt {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompt lock")
            .push(prompt.to_string());
        self.answer
    }
}

/// An engine loaded from [`SAMPLE_TREE`] that confirms every prompt.
pub async fn loaded_engine() -> (Arc<FakeBackend>, MutationEngine) {
    loaded_engine_with(SAMPLE_TREE, ScriptedPrompt::answering(true)).await
}

/// An engine loaded from `tree` using `prompt` for confirmations.
pub async fn loaded_engine_with(
    tree: &str,
    prompt: Arc<ScriptedPrompt>,
) -> (Arc<FakeBackend>, MutationEngine) {
    let backend = FakeBackend::with_tree(tree);
    let engine = MutationEngine::new(backend.clone(), prompt);
    engine.reload().await.expect("load tree");
    (backend, engine)
}

/// A move or rename success carrying `title`.
pub fn titled(title: &str) -> AppResult<RemoteReply<Titled>> {
    Ok(RemoteReply::Success(Titled {
        title: title.to_string(),
    }))
}

/// A raw entity as returned by create, upload, and conflict responses.
pub fn raw_entity(id: u64, title: &str) -> RawEntity {
    RawEntity {
        id: RawId::from(id),
        title: title.to_string(),
        url: None,
        kind: None,
    }
}

/// A duplicate-name reply carrying `entity`.
pub fn conflict<T>(message: &str, entity: RawEntity) -> AppResult<RemoteReply<T>> {
    Ok(RemoteReply::Conflict(Conflict {
        message: Some(message.to_string()),
        entity,
    }))
}
