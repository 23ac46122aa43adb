//! HTTP backend speaking the image folder API.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use folderhub_core::config::RemoteConfig;
use folderhub_core::error::{AppError, ErrorKind};
use folderhub_core::result::AppResult;
use folderhub_core::traits::RemoteBackend;
use folderhub_core::types::{
    EntityKind, FileSummary, MoveRequest, OneOrMany, RawEntity, RawId, RawNode, RemoteReply,
    SearchQuery, Titled, UploadBlob,
};

use crate::response::{
    Classified, classify, decode_data, decode_data_or_default, decode_envelope,
};

/// Header the backend reads the CSRF token from.
const CSRF_HEADER: &str = "x-csrftoken";

/// Backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    /// Base URL, always ending in `/`.
    base_url: String,
}

impl HttpBackend {
    /// Build a backend from configuration.
    pub fn new(config: &RemoteConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = config.csrf_token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(token).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid CSRF token", e)
            })?;
            headers.insert(HeaderName::from_static(CSRF_HEADER), value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url)?,
        })
    }

    /// Absolute URL of an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return its status and body.
    async fn execute(&self, request: RequestBuilder) -> AppResult<(reqwest::StatusCode, bytes::Bytes)> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Transport, "Request failed to send", e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(ErrorKind::Transport, "Failed to read response body", e)
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");
        Ok((status, body))
    }

    /// Send a request to an endpoint that may answer with a conflict,
    /// decoding a success body with `decode`.
    async fn send_reply<T>(
        &self,
        request: RequestBuilder,
        decode: fn(&[u8]) -> AppResult<T>,
    ) -> AppResult<RemoteReply<T>> {
        let (status, body) = self.execute(request).await?;
        match classify(status, &body, true)? {
            Classified::Success(body) => Ok(RemoteReply::Success(decode(body)?)),
            Classified::Conflict(conflict) => Ok(RemoteReply::Conflict(conflict)),
        }
    }

    /// Send a request to an endpoint that cannot conflict, returning the
    /// success body.
    async fn send_plain(&self, request: RequestBuilder) -> AppResult<bytes::Bytes> {
        let (status, body) = self.execute(request).await?;
        classify(status, &body, false)?;
        Ok(body)
    }
}

/// Ensure the base URL parses and ends with a slash, so paths join onto it.
fn normalize_base(base_url: &str) -> AppResult<String> {
    let trimmed = base_url.trim();
    reqwest::Url::parse(trimmed).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid backend URL: {trimmed}"),
            e,
        )
    })?;
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}

/// Path of an entity-scoped endpoint such as `images/5/edit/`.
fn entity_path(kind: EntityKind, id: &RawId, action: &str) -> String {
    format!("{}/{id}/{action}/", kind.collection())
}

/// Path of the create-folder endpoint.
fn create_folder_path(parent: Option<&RawId>) -> String {
    match parent {
        Some(parent) => format!("folders/{parent}/add/"),
        None => "folders/add/".to_string(),
    }
}

/// Form fields of a move request; an empty `target_id` means top level.
fn move_form(request: &MoveRequest) -> [(&'static str, String); 3] {
    [
        ("source_id", request.source_id.to_string()),
        (
            "target_id",
            request
                .target_id
                .as_ref()
                .map(RawId::to_string)
                .unwrap_or_default(),
        ),
        ("source_type", request.source_kind.source_type().to_string()),
    ]
}

/// Query parameters of a search request.
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("query_string", query.query.clone())];
    if let Some(folder) = &query.folder_id {
        params.push(("folder_id", folder.to_string()));
    }
    params
}

fn upload_form(parent: Option<&RawId>, blobs: &[UploadBlob]) -> Form {
    let mut form = Form::new();
    if let Some(parent) = parent {
        form = form.text("folder_id", parent.to_string());
    }
    for blob in blobs {
        let part = Part::bytes(blob.content.to_vec()).file_name(blob.file_name.clone());
        form = form
            .part("files[]", part)
            .text("title", blob.title.clone());
    }
    form
}

#[async_trait]
impl RemoteBackend for HttpBackend {
    async fn fetch_tree(&self) -> AppResult<Vec<RawNode>> {
        let body = self.send_plain(self.client.get(self.url("folders/"))).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn move_entity(&self, request: &MoveRequest) -> AppResult<RemoteReply<Titled>> {
        let form = move_form(request);
        let request = self.client.post(self.url("folders/move/")).form(&form);
        self.send_reply(request, decode_data_or_default).await
    }

    async fn create_folder(
        &self,
        parent: Option<&RawId>,
        title: &str,
    ) -> AppResult<RemoteReply<RawEntity>> {
        let request = self
            .client
            .post(self.url(&create_folder_path(parent)))
            .form(&[("title", title)]);
        self.send_reply(request, decode_data).await
    }

    async fn upload_files(
        &self,
        parent: Option<&RawId>,
        blobs: &[UploadBlob],
    ) -> AppResult<Vec<RawEntity>> {
        let request = self
            .client
            .post(self.url("images/add/"))
            .multipart(upload_form(parent, blobs));
        let body = self.send_plain(request).await?;

        let envelope = decode_envelope::<OneOrMany<RawEntity>>(&body)?;
        if envelope.data.is_none() {
            debug!(files = blobs.len(), "Upload response listed no entities");
        }
        Ok(envelope.data.map(OneOrMany::into_vec).unwrap_or_default())
    }

    async fn rename(
        &self,
        id: &RawId,
        kind: EntityKind,
        title: &str,
    ) -> AppResult<RemoteReply<Titled>> {
        let request = self
            .client
            .post(self.url(&entity_path(kind, id, "edit")))
            .form(&[("title", title)]);
        self.send_reply(request, decode_data_or_default).await
    }

    async fn delete(&self, id: &RawId, kind: EntityKind) -> AppResult<()> {
        self.send_plain(self.client.post(self.url(&entity_path(kind, id, "delete"))))
            .await?;
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<FileSummary>> {
        let request = self
            .client
            .get(self.url("images/search/"))
            .query(&search_params(query));
        let body = self.send_plain(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
