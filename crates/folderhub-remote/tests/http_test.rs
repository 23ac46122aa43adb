//! Integration tests for the HTTP backend against a local test server.

mod helpers;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::json;

use folderhub_core::error::ErrorKind;
use folderhub_core::traits::{AlwaysConfirm, RemoteBackend};
use folderhub_core::types::{
    EntityId, EntityKind, MoveRequest, RawId, RemoteReply, SearchQuery, Titled, UploadBlob,
};
use folderhub_service::{MutationEngine, MutationOutcome};

use helpers::{
    CSRF_TOKEN, Field, Recorder, empty_post_reply, form_reply, multipart_reply, query_reply, serve,
};

#[tokio::test]
async fn test_move_posts_form_with_csrf_token() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/folders/move/",
        form_reply(
            &recorder,
            StatusCode::OK,
            json!({"message": "Success", "data": {"title": "a.jpg"}}),
        ),
    ))
    .await;

    let reply = backend
        .move_entity(&MoveRequest {
            source_id: RawId::from(5),
            target_id: Some(RawId::from(4)),
            source_kind: EntityKind::File,
        })
        .await
        .expect("move");

    assert_eq!(
        reply,
        RemoteReply::Success(Titled {
            title: "a.jpg".into()
        })
    );
    let request = recorder.single();
    assert_eq!(request.csrf_token.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(
        request.fields,
        vec![
            Field::text("source_id", "5"),
            Field::text("target_id", "4"),
            Field::text("source_type", "image"),
        ]
    );
}

#[tokio::test]
async fn test_create_folder_conflict_is_reported() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/folders/3/add/",
        form_reply(
            &recorder,
            StatusCode::ACCEPTED,
            json!({"message": "Folder already exists", "data": {"id": 9, "title": "Pics (1)"}}),
        ),
    ))
    .await;

    let reply = backend
        .create_folder(Some(&RawId::from(3)), "Pics")
        .await
        .expect("create");

    match reply {
        RemoteReply::Conflict(conflict) => {
            assert_eq!(conflict.message.as_deref(), Some("Folder already exists"));
            assert_eq!(conflict.entity.id, RawId::from(9));
            assert_eq!(conflict.entity.title, "Pics (1)");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(recorder.single().fields, vec![Field::text("title", "Pics")]);
}

#[tokio::test]
async fn test_rename_succeeds_without_title_echo() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/images/5/edit/",
        form_reply(&recorder, StatusCode::OK, json!({"message": "Success"})),
    ))
    .await;

    let reply = backend
        .rename(&RawId::from(5), EntityKind::File, "b.jpg")
        .await
        .expect("rename");

    assert_eq!(reply, RemoteReply::Success(Titled::default()));
    assert_eq!(recorder.single().fields, vec![Field::text("title", "b.jpg")]);
}

#[tokio::test]
async fn test_rename_failure_surfaces_backend_message() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/folders/2/edit/",
        form_reply(
            &recorder,
            StatusCode::FORBIDDEN,
            json!({"message": "User does not have permission"}),
        ),
    ))
    .await;

    let err = backend
        .rename(&RawId::from(2), EntityKind::Folder, "Papers")
        .await
        .expect_err("forbidden");

    assert_eq!(err.kind, ErrorKind::Remote);
    assert_eq!(err.message, "User does not have permission");
}

#[tokio::test]
async fn test_upload_sends_multipart_parts() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/images/add/",
        multipart_reply(
            &recorder,
            StatusCode::OK,
            json!({"message": "Success", "data": [
                {"id": 11, "title": "beach", "url": "/media/beach.jpg"},
                {"id": 12, "title": "dune", "url": "/media/dune.png"}
            ]}),
        ),
    ))
    .await;
    let blobs = [
        UploadBlob::new("beach.jpg", Bytes::from_static(b"jpeg one")),
        UploadBlob::new("dune.png", Bytes::from_static(b"png two")),
    ];

    let accepted = backend
        .upload_files(Some(&RawId::from(4)), &blobs)
        .await
        .expect("upload");

    let ids: Vec<&RawId> = accepted.iter().map(|e| &e.id).collect();
    assert_eq!(ids, [&RawId::from(11), &RawId::from(12)]);
    let request = recorder.single();
    assert_eq!(request.csrf_token.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(
        request.fields,
        vec![
            Field::text("folder_id", "4"),
            Field::file("files[]", "beach.jpg", "jpeg one"),
            Field::text("title", "beach"),
            Field::file("files[]", "dune.png", "png two"),
            Field::text("title", "dune"),
        ]
    );
}

#[tokio::test]
async fn test_delete_posts_to_entity_path() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/folders/2/delete/",
        empty_post_reply(&recorder, StatusCode::OK, json!({"message": "Success"})),
    ))
    .await;

    backend
        .delete(&RawId::from(2), EntityKind::Folder)
        .await
        .expect("delete");

    assert_eq!(recorder.single().csrf_token.as_deref(), Some(CSRF_TOKEN));
}

#[tokio::test]
async fn test_search_sends_query_string() {
    let recorder = Recorder::new();
    let backend = serve(Router::new().route(
        "/images/search/",
        query_reply(
            &recorder,
            json!([{"id": 7, "title": "beach.jpg", "url": "/media/beach.jpg"}]),
        ),
    ))
    .await;

    let hits = backend
        .search(&SearchQuery {
            query: "beach".into(),
            folder_id: Some(RawId::from(4)),
        })
        .await
        .expect("search");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "beach.jpg");
    assert_eq!(
        recorder.single().fields,
        vec![
            Field::text("query_string", "beach"),
            Field::text("folder_id", "4"),
        ]
    );
}

const TREE: &str = r#"[{"id": 1, "title": "Pics", "sub_folders": [], "images": [{"id": 5, "title": "a.jpg"}]}]"#;

async fn engine_over(routes: Router) -> MutationEngine {
    let tree: serde_json::Value = serde_json::from_str(TREE).expect("tree");
    let tree_recorder = Recorder::new();
    let backend = serve(routes.route("/folders/", query_reply(&tree_recorder, tree))).await;

    let engine = MutationEngine::new(Arc::new(backend), Arc::new(AlwaysConfirm));
    assert_eq!(engine.reload().await.expect("reload"), 2);
    engine
}

#[tokio::test]
async fn test_engine_ingests_conflict_from_accepted_status() {
    let recorder = Recorder::new();
    let engine = engine_over(Router::new().route(
        "/folders/1/add/",
        form_reply(
            &recorder,
            StatusCode::ACCEPTED,
            json!({"message": "Folder already exists", "data": {"id": 9, "title": "Holiday (1)"}}),
        ),
    ))
    .await;

    let outcome = engine
        .create_folder(Some(&EntityId::from("folder_1")), "Holiday")
        .await
        .expect("create");

    let MutationOutcome::Conflict(resolution) = &outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(resolution.message.as_deref(), Some("Folder already exists"));
    assert_eq!(resolution.entity.id, EntityId::from("folder_9"));

    let store = engine.store();
    let index = store.read().await;
    assert!(
        index
            .find_child_by_name(&EntityId::from("folder_1"), EntityKind::Folder, "Holiday (1)")
            .is_some()
    );
    index.verify().expect("invariants");
}

#[tokio::test]
async fn test_engine_applies_rename_confirmed_by_message_only() {
    let recorder = Recorder::new();
    let engine = engine_over(Router::new().route(
        "/folders/1/edit/",
        form_reply(&recorder, StatusCode::OK, json!({"message": "Success"})),
    ))
    .await;

    let outcome = engine
        .rename(&EntityId::from("folder_1"), "Albums")
        .await
        .expect("rename");

    assert!(matches!(outcome, MutationOutcome::Applied(_)));
    let store = engine.store();
    let index = store.read().await;
    assert_eq!(
        index
            .require(&EntityId::from("folder_1"))
            .expect("folder")
            .display_name,
        "Albums"
    );
}
