//! Shared test helpers: a local axum server standing in for the image
//! folder API, recording every request it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Form, Multipart, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{MethodRouter, get, post};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use folderhub_core::config::RemoteConfig;
use folderhub_remote::HttpBackend;

/// Path the test API is mounted under.
pub const API_PREFIX: &str = "/cms/images/custom-api";

/// CSRF token the backend under test is configured with.
pub const CSRF_TOKEN: &str = "test-csrf-token";

/// A form field, query parameter, or multipart part as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub file_name: Option<String>,
    pub value: String,
}

impl Field {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: None,
            value: value.to_string(),
        }
    }

    pub fn file(name: &str, file_name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: Some(file_name.to_string()),
            value: value.to_string(),
        }
    }
}

/// One request received by the test server.
#[derive(Debug, Clone)]
pub struct Received {
    pub csrf_token: Option<String>,
    pub fields: Vec<Field>,
}

/// Requests received so far, shared between handlers and the test.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    received: Arc<Mutex<Vec<Received>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, headers: &HeaderMap, fields: Vec<Field>) {
        let csrf_token = headers
            .get("x-csrftoken")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.received
            .lock()
            .expect("recorder lock")
            .push(Received { csrf_token, fields });
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().expect("recorder lock").clone()
    }

    /// The only request received; panics on zero or several.
    pub fn single(&self) -> Received {
        let mut received = self.received();
        assert_eq!(received.len(), 1, "expected exactly one request");
        received.remove(0)
    }
}

fn pairs(pairs: Vec<(String, String)>) -> Vec<Field> {
    pairs
        .into_iter()
        .map(|(name, value)| Field {
            name,
            file_name: None,
            value,
        })
        .collect()
}

async fn parts(mut multipart: Multipart) -> Vec<Field> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let value = field.text().await.expect("multipart text");
        fields.push(Field {
            name,
            file_name,
            value,
        });
    }
    fields
}

/// A POST endpoint taking a url-encoded form.
pub fn form_reply(recorder: &Recorder, status: StatusCode, body: Value) -> MethodRouter {
    let recorder = recorder.clone();
    post(
        move |headers: HeaderMap, Form(form): Form<Vec<(String, String)>>| async move {
            recorder.record(&headers, pairs(form));
            (status, Json(body))
        },
    )
}

/// A POST endpoint taking a multipart body.
pub fn multipart_reply(recorder: &Recorder, status: StatusCode, body: Value) -> MethodRouter {
    let recorder = recorder.clone();
    post(
        move |headers: HeaderMap, multipart: Multipart| async move {
            recorder.record(&headers, parts(multipart).await);
            (status, Json(body))
        },
    )
}

/// A POST endpoint without a body.
pub fn empty_post_reply(recorder: &Recorder, status: StatusCode, body: Value) -> MethodRouter {
    let recorder = recorder.clone();
    post(move |headers: HeaderMap| async move {
        recorder.record(&headers, Vec::new());
        (status, Json(body))
    })
}

/// A GET endpoint, recording its query parameters.
pub fn query_reply(recorder: &Recorder, body: Value) -> MethodRouter {
    let recorder = recorder.clone();
    get(
        move |headers: HeaderMap, Query(query): Query<Vec<(String, String)>>| async move {
            recorder.record(&headers, pairs(query));
            Json(body)
        },
    )
}

/// Serve `routes` under [`API_PREFIX`] on a free local port and return a
/// backend pointed at it.
pub async fn serve(routes: Router) -> HttpBackend {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new().nest(API_PREFIX, routes);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    HttpBackend::new(&RemoteConfig {
        base_url: format!("http://{addr}{API_PREFIX}"),
        csrf_token: Some(CSRF_TOKEN.to_string()),
        ..RemoteConfig::default()
    })
    .expect("backend")
}
