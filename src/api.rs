use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

pub const HEALTH_CHECK: &str = "/health_check/";
pub const FILE_UPLOAD: &str = "/file/upload/";
pub const FILE_STREAM: &str = "/file/stream/";
pub const FILE_BROWSE: &str = "/file/browse/";
pub const LIST_FOLDER_ITEMS: &str = "/file/list_folder_items/";
pub const USER_SETTINGS: &str = "/file/user_settings/";
pub const MOUNTED_DRIVES: &str = "/file/list_mounted_drives/";
pub const AUTH_LOGIN: &str = "/auth/login/";
pub const AUTH_LOGOUT: &str = "/auth/logout/";
pub const AUTH_VERIFY: &str = "/auth/verify/";
pub const ADMIN_CHECK: &str = "/permissions/admin_check/";
pub const SHARE: &str = "/permissions/share/";

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Errors surfaced by the request gateway
///
/// The `Display` output of each variant is what ends up in a resource's
/// `error` field, so it has to read well on its own.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, body read)
    #[error("An unexpected error occurred")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response whose JSON body carried a message
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Non-2xx response without a usable body
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Unexpected response from server")]
    Decode(#[source] serde_json::Error),

    #[error("{}: {source}", path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Folder,
    File,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FolderItem {
    pub name: String,
    #[serde(default)]
    pub full_path: String,
    pub relative_path: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Human-readable size, already formatted by the server (absent for folders)
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub modified: String,
}

impl FolderItem {
    pub fn is_folder(&self) -> bool {
        self.item_type == ItemType::Folder
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub uploaded_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrowseFile {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrowseResponse {
    #[serde(default)]
    pub files: Vec<BrowseFile>,
    #[serde(default)]
    pub total_count: usize,
}

/// Body of `PUT /file/user_settings/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSettings {
    pub hard_drive_path_selection: String,
}

/// Stored settings as returned by `GET /file/user_settings/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSettingsRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub hard_drive_path_selection: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriveInfo {
    pub device: String,
    pub mountpoint: String,
    #[serde(default)]
    pub fstype: String,
    #[serde(default)]
    pub opts: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub used: String,
    #[serde(default)]
    pub free: String,
    #[serde(default)]
    pub percent_used: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AdminCheck {
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    pub name: String,
    pub email: String,
    pub hard_drive_path_selection: String,
}

/// Raw bytes of a streamed file plus the MIME type the server reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Pull a human-readable message out of an error body
///
/// Accepts `{message}`, `{detail: "..."}`, `{detail: [{msg}, ...]}` and `{error}`.
fn server_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;

    if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
        return Some(message);
    }

    match parsed.detail {
        Some(serde_json::Value::String(detail)) if !detail.is_empty() => return Some(detail),
        Some(serde_json::Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    parsed.error.filter(|e| !e.is_empty())
}

/// Build the error for a non-2xx response
pub fn error_from_body(status: StatusCode, body: &[u8]) -> ApiError {
    match server_message(body) {
        Some(message) => ApiError::Server {
            status: status.as_u16(),
            message,
        },
        None => ApiError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        },
    }
}

/// HTTP client for the cloud storage backend
///
/// Session cookies set by `/auth/login/` live in the client's cookie store,
/// so clones share one session.
#[derive(Clone)]
pub struct CloudClient {
    base_url: String,
    client: Client,
}

impl CloudClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request, turning non-2xx answers into `ApiError`
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(ApiError::Transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = error_from_body(status, &body);
        tracing::debug!(status = status.as_u16(), %error, "request failed");
        Err(error)
    }

    /// Send a request and decode its JSON body (empty bodies decode as `null`)
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;

        let empty =
            response.status() == StatusCode::NO_CONTENT || response.content_length() == Some(0);
        let body = response.bytes().await.map_err(ApiError::Transport)?;

        if empty || body.is_empty() {
            return serde_json::from_str("null").map_err(ApiError::Decode);
        }

        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.send_json(self.client.get(self.url(HEALTH_CHECK))).await
    }

    pub async fn list_folder_items(&self, path: &str) -> Result<Vec<FolderItem>, ApiError> {
        let url = format!(
            "{}?path={}",
            self.url(LIST_FOLDER_ITEMS),
            urlencoding::encode(path)
        );
        self.send_json(self.client.get(url)).await
    }

    pub async fn browse_files(&self, category: Option<&str>) -> Result<BrowseResponse, ApiError> {
        let mut url = self.url(FILE_BROWSE);
        if let Some(category) = category {
            url.push_str(&format!("?category={}", urlencoding::encode(category)));
        }
        self.send_json(self.client.get(url)).await
    }

    fn stream_url(&self, file_name: &str) -> String {
        format!(
            "{}?file_name={}",
            self.url(FILE_STREAM),
            urlencoding::encode(file_name)
        )
    }

    /// Fetch a file's full contents for previewing
    pub async fn stream_file(&self, file_name: &str) -> Result<StreamPayload, ApiError> {
        let response = self.send(self.client.get(self.stream_url(file_name))).await?;

        let mime_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();

        let bytes = response.bytes().await.map_err(ApiError::Transport)?;

        Ok(StreamPayload {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }

    /// Stream a file to `dest_dir` chunk by chunk, returning the written path
    ///
    /// Chunks land in a hidden partial file that only takes the real name once
    /// the body is complete; an existing file of that name gets a ` (n)` suffix.
    pub async fn download_file(&self, file_name: &str, dest_dir: &Path) -> Result<PathBuf, ApiError> {
        let mut response = self.send(self.client.get(self.stream_url(file_name))).await?;

        let local_name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "download".to_string());
        let requested = dest_dir.join(&local_name);

        let local_err = |source| ApiError::LocalFile {
            path: requested.clone(),
            source,
        };

        tokio::fs::create_dir_all(dest_dir).await.map_err(local_err)?;
        let (partial, partial_path) = tempfile::Builder::new()
            .prefix(".cloudtui-")
            .suffix(".part")
            .tempfile_in(dest_dir)
            .map_err(local_err)?
            .into_parts();

        // Dropping `partial_path` on any early return removes the partial file
        let mut file = tokio::fs::File::from_std(partial);
        while let Some(chunk) = response.chunk().await.map_err(ApiError::Transport)? {
            file.write_all(&chunk).await.map_err(local_err)?;
        }
        file.flush().await.map_err(local_err)?;
        drop(file);

        let target = available_target(dest_dir, &local_name);
        partial_path
            .persist_noclobber(&target)
            .map_err(|e| ApiError::LocalFile {
                path: target.clone(),
                source: e.error,
            })?;

        Ok(target)
    }

    /// Upload local files as one multipart request
    ///
    /// Each file becomes a `files` part carrying its name and a MIME type guessed
    /// from the extension; `location` is sent as `file_path_location`.
    pub async fn upload_files(&self, files: &[PathBuf], location: &str) -> Result<UploadResponse, ApiError> {
        let mut form = Form::new().text("file_path_location", location.to_string());

        for path in files {
            let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::LocalFile {
                path: path.clone(),
                source,
            })?;

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let mime = mime_guess::from_path(path).first_or_octet_stream();

            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime.as_ref())
                .map_err(ApiError::Transport)?;
            form = form.part("files", part);
        }

        self.send_json(self.client.post(self.url(FILE_UPLOAD)).multipart(form))
            .await
    }

    pub async fn get_user_settings(&self) -> Result<Option<UserSettingsRecord>, ApiError> {
        self.send_json(self.client.get(self.url(USER_SETTINGS))).await
    }

    pub async fn update_user_settings(&self, settings: &UserSettings) -> Result<StatusResponse, ApiError> {
        self.send_json(self.client.put(self.url(USER_SETTINGS)).json(settings))
            .await
    }

    pub async fn list_mounted_drives(&self) -> Result<Vec<DriveInfo>, ApiError> {
        self.send_json(self.client.get(self.url(MOUNTED_DRIVES))).await
    }

    /// Exchange an identity-provider token for a session cookie
    pub async fn login(&self, token: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "token": token });
        self.send_json(self.client.post(self.url(AUTH_LOGIN)).json(&body))
            .await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.send_json(self.client.post(self.url(AUTH_LOGOUT))).await
    }

    pub async fn verify(&self) -> Result<VerifyResponse, ApiError> {
        self.send_json(self.client.get(self.url(AUTH_VERIFY))).await
    }

    pub async fn admin_check(&self) -> Result<AdminCheck, ApiError> {
        self.send_json(self.client.get(self.url(ADMIN_CHECK))).await
    }

    pub async fn share(&self, request: &ShareRequest) -> Result<StatusResponse, ApiError> {
        self.send_json(self.client.put(self.url(SHARE)).json(request))
            .await
    }
}

/// `name` inside `dir`, numbered `stem (n).ext` when that path is taken
fn available_target(dir: &Path, name: &str) -> PathBuf {
    let target = dir.join(name);
    if !target.exists() {
        return target;
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, extension)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(target)
}
