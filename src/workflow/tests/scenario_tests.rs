//! Full upload → analyze cycles against an in-process mock API.

use super::*;
use crate::error::ValidationError;
use crate::test_support::{client_for, png_file, spawn_mock_api, uploaded_ok, verdict, MockReply};
use crate::upload::FileReference;
use axum::http::StatusCode;

#[tokio::test]
async fn upload_success_leaves_reference_and_idle() {
    let (base_url, recorded) =
        spawn_mock_api(uploaded_ok("abc123"), MockReply::Status(StatusCode::OK)).await;
    let client = client_for(&base_url);
    let mut workflow = Workflow::new();

    let ticket = workflow.select(vec![png_file("desk.png")]).expect("select");
    let completion = upload(&client, ticket).await;
    assert_eq!(workflow.apply(completion), Applied::Applied);

    assert_eq!(workflow.status(), WorkflowStatus::Idle);
    assert_eq!(workflow.reference(), Some(&FileReference::new("abc123")));
    assert_eq!(recorded.uploads().len(), 1);
}

#[tokio::test]
async fn two_files_issue_no_request() {
    let (_base_url, recorded) =
        spawn_mock_api(uploaded_ok("abc123"), MockReply::Status(StatusCode::OK)).await;
    let mut workflow = Workflow::new();

    let err = workflow
        .select(vec![png_file("a.png"), png_file("b.png")])
        .expect_err("two files rejected");
    assert_eq!(err, ValidationError::TooManyFiles(2));
    assert_eq!(workflow.status(), WorkflowStatus::Idle);
    assert!(recorded.uploads().is_empty());
}

#[tokio::test]
async fn analysis_success_renders_clean_verdict() {
    let (base_url, recorded) = spawn_mock_api(
        uploaded_ok("abc123"),
        verdict("No visible debris", false),
    )
    .await;
    let client = client_for(&base_url);
    let mut workflow = Workflow::new();

    let ticket = workflow.select(vec![png_file("desk.png")]).unwrap();
    workflow.apply(upload(&client, ticket).await);

    let ticket = workflow.begin_analysis().expect("reference present");
    workflow.apply(analyze(&client, ticket).await);

    assert_eq!(workflow.status(), WorkflowStatus::Success);
    let view = present(&workflow);
    assert_eq!(
        view.status,
        StatusView::Verdict {
            verdict: Verdict::Clean,
            explanation: "No visible debris",
            imglink: "x",
        }
    );
    assert_eq!(recorded.analyses(), vec![serde_json::json!({ "ref": "abc123" })]);
}

#[tokio::test]
async fn analysis_failure_keeps_reference() {
    let (base_url, _recorded) = spawn_mock_api(
        uploaded_ok("abc123"),
        MockReply::Status(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .await;
    let client = client_for(&base_url);
    let mut workflow = Workflow::new();

    let ticket = workflow.select(vec![png_file("desk.png")]).unwrap();
    workflow.apply(upload(&client, ticket).await);
    let ticket = workflow.begin_analysis().unwrap();
    workflow.apply(analyze(&client, ticket).await);

    assert_eq!(workflow.status(), WorkflowStatus::Error);
    assert_eq!(present(&workflow).status, StatusView::Failure(FAILURE_MESSAGE));
    assert_eq!(workflow.reference(), Some(&FileReference::new("abc123")));
    assert!(present(&workflow).analyze_enabled);
}

#[tokio::test]
async fn upload_failure_stores_nothing_and_blocks_analysis() {
    let (base_url, recorded) = spawn_mock_api(
        MockReply::Status(StatusCode::INTERNAL_SERVER_ERROR),
        verdict("unused", false),
    )
    .await;
    let client = client_for(&base_url);
    let mut workflow = Workflow::new();

    let ticket = workflow.select(vec![png_file("desk.png")]).unwrap();
    workflow.apply(upload(&client, ticket).await);

    assert_eq!(workflow.status(), WorkflowStatus::Error);
    assert!(workflow.reference().is_none());
    assert!(!present(&workflow).analyze_enabled);

    assert_eq!(
        workflow.begin_analysis().unwrap_err(),
        ValidationError::NoReference
    );
    assert!(recorded.analyses().is_empty());
}

#[tokio::test]
async fn second_cycle_replaces_the_first() {
    let (base_url, recorded) = spawn_mock_api(
        uploaded_ok("abc123"),
        verdict("Clothes on the floor", true),
    )
    .await;
    let client = client_for(&base_url);
    let mut workflow = Workflow::new();

    let ticket = workflow.select(vec![png_file("first.png")]).unwrap();
    workflow.apply(upload(&client, ticket).await);
    let ticket = workflow.begin_analysis().unwrap();
    workflow.apply(analyze(&client, ticket).await);
    assert_eq!(workflow.status(), WorkflowStatus::Success);

    let ticket = workflow.select(vec![png_file("second.png")]).unwrap();
    assert!(workflow.reference().is_none());
    assert!(workflow.result().is_none());
    workflow.apply(upload(&client, ticket).await);

    assert_eq!(workflow.status(), WorkflowStatus::Idle);
    let uploads = recorded.uploads();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[1][0].file_name.as_deref(), Some("second.png"));
}
