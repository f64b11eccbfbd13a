//! In-process stand-ins for the storage and classification endpoints.

use crate::config::Settings;
use crate::upload::{ApiClient, SelectedFile};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub enum MockReply {
    Json(Value),
    Status(StatusCode),
    Malformed,
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        match self {
            MockReply::Json(body) => (StatusCode::OK, Json(body)).into_response(),
            MockReply::Status(status) => status.into_response(),
            MockReply::Malformed => (StatusCode::OK, "<html>not json</html>").into_response(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedPart {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct Recorded {
    uploads: Arc<Mutex<Vec<Vec<RecordedPart>>>>,
    analyses: Arc<Mutex<Vec<Value>>>,
}

impl Recorded {
    pub fn uploads(&self) -> Vec<Vec<RecordedPart>> {
        self.uploads.lock().expect("uploads lock").clone()
    }

    pub fn analyses(&self) -> Vec<Value> {
        self.analyses.lock().expect("analyses lock").clone()
    }
}

#[derive(Clone)]
struct MockState {
    upload: MockReply,
    analysis: MockReply,
    recorded: Recorded,
}

async fn save_image(State(state): State<MockState>, mut multipart: Multipart) -> Response {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(RecordedPart {
            field: field_name,
            file_name,
            content_type,
            bytes,
        });
    }
    state.recorded.uploads.lock().expect("uploads lock").push(parts);
    state.upload.into_response()
}

async fn question_whether_dirty(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Response {
    state
        .recorded
        .analyses
        .lock()
        .expect("analyses lock")
        .push(body);
    state.analysis.into_response()
}

pub async fn spawn_mock_api(upload: MockReply, analysis: MockReply) -> (String, Recorded) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock api");
    let addr = listener.local_addr().expect("mock api addr");
    let recorded = Recorded::default();
    let state = MockState {
        upload,
        analysis,
        recorded: recorded.clone(),
    };
    let app = Router::new()
        .route("/save_image", post(save_image))
        .route("/question-whether-dirty/", post(question_whether_dirty))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), recorded)
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> ApiClient {
    let settings = Settings {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Settings::default()
    };
    ApiClient::new(&settings).expect("api client")
}

pub fn png_file(name: &str) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        mime: "image/png".to_string(),
        bytes: Bytes::from_static(b"\x89PNG fake image"),
    }
}

pub fn uploaded_ok(reference: &str) -> MockReply {
    MockReply::Json(serde_json::json!({ "ref": reference }))
}

pub fn verdict(answer: &str, is_dirty: bool) -> MockReply {
    MockReply::Json(serde_json::json!({
        "anwer": answer,
        "is_dirty": is_dirty,
        "imglink": "x",
    }))
}
