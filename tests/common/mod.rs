//! In-process mock of the storage backend for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;

use cloudtui::api::CloudClient;
use cloudtui::services::ApiResponse;

pub const SESSION_COOKIE: &str = "session=test-session";
pub const VALID_TOKEN: &str = "good-token";

/// One uploaded multipart part: (field name, file name, content type, bytes)
pub type UploadedPart = (String, Option<String>, Option<String>, Vec<u8>);

#[derive(Default)]
pub struct Recorded {
    pub listed_paths: Vec<String>,
    pub upload_location: Option<String>,
    pub uploaded: Vec<UploadedPart>,
    pub saved_settings: Option<Value>,
    pub shared: Option<Value>,
}

#[derive(Clone, Default)]
pub struct MockState {
    pub recorded: Arc<Mutex<Recorded>>,
    /// Signed-in user without admin rights
    pub demoted: Arc<AtomicBool>,
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(SESSION_COOKIE))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Not authenticated" })),
    )
        .into_response()
}

fn folder(name: &str, relative_path: &str) -> Value {
    json!({
        "name": name,
        "full_path": format!("/media/usb/{}", relative_path),
        "relative_path": relative_path,
        "type": "folder",
        "modified": "2024-03-05T10:20:00"
    })
}

fn file(name: &str, relative_path: &str, size: &str) -> Value {
    json!({
        "name": name,
        "full_path": format!("/media/usb/{}", relative_path),
        "relative_path": relative_path,
        "type": "file",
        "size": size,
        "modified": "2024-03-05T10:20:00"
    })
}

async fn list_folder_items(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !has_session(&headers) {
        return unauthorized();
    }
    let path = query.get("path").cloned().unwrap_or_default();
    state.recorded.lock().unwrap().listed_paths.push(path.clone());

    let items = match path.as_str() {
        "" => json!([
            folder("Docs", "Docs"),
            folder("Photos", "Photos"),
            file("readme.txt", "readme.txt", "12 B"),
        ]),
        "Docs" => json!([
            folder("2024 trip", "Docs/2024 trip"),
            file("report.pdf", "Docs/report.pdf", "1.2 KB"),
        ]),
        "Docs/2024 trip" => json!([file("notes.txt", "Docs/2024 trip/notes.txt", "5 B")]),
        "Photos" => json!([]),
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Folder not found" })),
            )
                .into_response()
        }
    };
    Json(items).into_response()
}

async fn stream(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    if !has_session(&headers) {
        return unauthorized();
    }
    let name = query.get("file_name").cloned().unwrap_or_default();
    match name.as_str() {
        "readme.txt" => ([(header::CONTENT_TYPE, "text/plain")], "hello, cloud").into_response(),
        "Docs/report.pdf" => (
            [(header::CONTENT_TYPE, "application/pdf")],
            b"%PDF-1.4 Quarterly report".to_vec(),
        )
            .into_response(),
        "Docs/2024 trip/notes.txt" => {
            ([(header::CONTENT_TYPE, "text/plain")], "beach").into_response()
        }
        "slow.txt" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            ([(header::CONTENT_TYPE, "text/plain")], "slow").into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "File not found" })),
        )
            .into_response(),
    }
}

async fn browse(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    if !has_session(&headers) {
        return unauthorized();
    }
    let all = vec![
        json!({"name": "beach.jpg", "size": 2048, "type": "image/jpeg",
               "modified": "2024-03-05T10:20:00", "category": "photos"}),
        json!({"name": "report.pdf", "size": 1200, "type": "application/pdf",
               "modified": "2024-03-05T10:20:00", "category": "documents"}),
    ];
    let files: Vec<Value> = match query.get("category") {
        Some(category) => all
            .into_iter()
            .filter(|f| f["category"] == category.as_str())
            .collect(),
        None => all,
    };
    Json(json!({ "total_count": files.len(), "files": files })).into_response()
}

async fn upload(State(state): State<MockState>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !has_session(&headers) {
        return unauthorized();
    }
    let mut names = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default().to_vec();

        let mut recorded = state.recorded.lock().unwrap();
        if field_name == "file_path_location" {
            recorded.upload_location = Some(String::from_utf8_lossy(&bytes).into_owned());
        } else {
            if let Some(name) = &file_name {
                names.push(name.clone());
            }
            recorded.uploaded.push((field_name, file_name, content_type, bytes));
        }
    }
    Json(json!({ "uploaded_files": names })).into_response()
}

async fn get_settings(headers: HeaderMap) -> Response {
    if !has_session(&headers) {
        return unauthorized();
    }
    Json(Value::Null).into_response()
}

async fn put_settings(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !has_session(&headers) {
        return unauthorized();
    }
    if body["hard_drive_path_selection"] == "/media/missing" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Drive not mounted" })),
        )
            .into_response();
    }
    state.recorded.lock().unwrap().saved_settings = Some(body);
    Json(json!({ "status": "ok" })).into_response()
}

async fn drives() -> Response {
    Json(json!([{
        "device": "/dev/sdb1", "mountpoint": "/media/usb", "fstype": "ext4", "opts": "rw",
        "total": "100.00 GB", "used": "40.00 GB", "free": "60.00 GB", "percent_used": "40.0%"
    }]))
    .into_response()
}

fn user() -> Value {
    json!({ "email": "sam@example.com", "name": "Sam", "picture": null })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["token"] != VALID_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid token" })),
        )
            .into_response();
    }
    (
        [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))],
        Json(json!({ "message": "Logged in", "user": user() })),
    )
        .into_response()
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string())],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response()
}

async fn verify(headers: HeaderMap) -> Response {
    if has_session(&headers) {
        Json(json!({ "authenticated": true, "user": user() })).into_response()
    } else {
        Json(json!({ "authenticated": false, "user": null })).into_response()
    }
}

async fn admin_check(State(state): State<MockState>, headers: HeaderMap) -> Response {
    let is_admin = has_session(&headers) && !state.demoted.load(Ordering::SeqCst);
    Json(json!({ "is_admin": is_admin })).into_response()
}

async fn share(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    if state.demoted.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Unauthorized sharing access" })),
        )
            .into_response();
    }
    state.recorded.lock().unwrap().shared = Some(body);
    Json(json!({ "status": "ok" })).into_response()
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response()
}

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: MockState,
}

impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> CloudClient {
        CloudClient::new(self.base_url(), Duration::from_secs(5)).unwrap()
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.state.recorded.lock().unwrap()
    }

    /// Take admin rights away from the signed-in user
    pub fn demote(&self) {
        self.state.demoted.store(true, Ordering::SeqCst);
    }
}

/// Start the mock on an ephemeral port
pub async fn start_backend() -> MockBackend {
    let state = MockState::default();
    let router = Router::new()
        .route("/health_check/", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/file/list_folder_items/", get(list_folder_items))
        .route("/file/stream/", get(stream))
        .route("/file/browse/", get(browse))
        .route("/file/upload/", post(upload))
        .route("/file/user_settings/", get(get_settings).put(put_settings))
        .route("/file/list_mounted_drives/", get(drives))
        .route("/auth/login/", post(login))
        .route("/auth/logout/", post(logout))
        .route("/auth/verify/", get(verify))
        .route("/permissions/admin_check/", get(admin_check))
        .route("/permissions/share/", put(share))
        .route("/broken/health_check/", get(broken))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockBackend { addr, state }
}

/// A base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A server that promises `Content-Length: 1000`, sends `body` and hangs up
pub async fn truncated_body_url(body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 1000\r\n\r\n")
            .await
            .unwrap();
        socket.write_all(body).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}", addr)
}

/// Next worker response, failing the test after a few seconds
pub async fn next_response(rx: &mut UnboundedReceiver<ApiResponse>) -> ApiResponse {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for worker response")
        .expect("worker channel closed")
}
