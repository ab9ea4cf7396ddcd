use std::collections::VecDeque;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{
    AdminCheck, ApiError, BrowseResponse, CloudClient, DriveInfo, FolderItem, HealthStatus,
    LoginResponse, MessageResponse, ShareRequest, StatusResponse, StreamPayload, UploadResponse,
    UserSettings, UserSettingsRecord, VerifyResponse,
};
use crate::logic::errors::is_unauthorized;
use crate::logic::resource::Ticket;

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High, // User-initiated actions (navigation, streaming, saving)
    Low,  // Background checks (health, admin status)
}

/// API request types
///
/// Every request carries the ticket its model issued; the response hands it
/// back so the model can drop results that a newer request superseded.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    HealthCheck { ticket: Ticket },

    /// List a folder by relative path (`""` is the storage root)
    ListFolderItems { ticket: Ticket, path: String },

    /// Fetch a file's bytes for previewing
    StreamFile { ticket: Ticket, name: String },

    BrowseFiles {
        ticket: Ticket,
        category: Option<String>,
    },

    Upload {
        ticket: Ticket,
        files: Vec<PathBuf>,
        location: String,
    },

    /// Save a file into a local directory
    Download {
        ticket: Ticket,
        name: String,
        dest_dir: PathBuf,
    },

    GetSettings { ticket: Ticket },

    UpdateSettings {
        ticket: Ticket,
        settings: UserSettings,
    },

    ListDrives { ticket: Ticket },

    Login { ticket: Ticket, token: String },

    Logout { ticket: Ticket },

    Verify { ticket: Ticket },

    AdminCheck { ticket: Ticket },

    Share {
        ticket: Ticket,
        request: ShareRequest,
    },
}

impl ApiRequest {
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::HealthCheck { .. } | ApiRequest::AdminCheck { .. } => Priority::Low,
            _ => Priority::High,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ApiRequest::HealthCheck { .. } => "health_check",
            ApiRequest::ListFolderItems { .. } => "list_folder_items",
            ApiRequest::StreamFile { .. } => "stream_file",
            ApiRequest::BrowseFiles { .. } => "browse_files",
            ApiRequest::Upload { .. } => "upload",
            ApiRequest::Download { .. } => "download",
            ApiRequest::GetSettings { .. } => "get_settings",
            ApiRequest::UpdateSettings { .. } => "update_settings",
            ApiRequest::ListDrives { .. } => "list_drives",
            ApiRequest::Login { .. } => "login",
            ApiRequest::Logout { .. } => "logout",
            ApiRequest::Verify { .. } => "verify",
            ApiRequest::AdminCheck { .. } => "admin_check",
            ApiRequest::Share { .. } => "share",
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    HealthResult {
        ticket: Ticket,
        health: Result<HealthStatus, ApiError>,
    },

    FolderItemsResult {
        ticket: Ticket,
        path: String,
        items: Result<Vec<FolderItem>, ApiError>,
    },

    StreamResult {
        ticket: Ticket,
        name: String,
        payload: Result<StreamPayload, ApiError>,
    },

    BrowseResult {
        ticket: Ticket,
        files: Result<BrowseResponse, ApiError>,
    },

    UploadResult {
        ticket: Ticket,
        result: Result<UploadResponse, ApiError>,
    },

    DownloadResult {
        ticket: Ticket,
        name: String,
        path: Result<PathBuf, ApiError>,
    },

    SettingsResult {
        ticket: Ticket,
        settings: Result<Option<UserSettingsRecord>, ApiError>,
    },

    SettingsSaved {
        ticket: Ticket,
        result: Result<StatusResponse, ApiError>,
    },

    DrivesResult {
        ticket: Ticket,
        drives: Result<Vec<DriveInfo>, ApiError>,
    },

    LoginResult {
        ticket: Ticket,
        result: Result<LoginResponse, ApiError>,
    },

    LogoutResult {
        ticket: Ticket,
        result: Result<MessageResponse, ApiError>,
    },

    VerifyResult {
        ticket: Ticket,
        result: Result<VerifyResponse, ApiError>,
    },

    AdminCheckResult {
        ticket: Ticket,
        result: Result<AdminCheck, ApiError>,
    },

    ShareResult {
        ticket: Ticket,
        result: Result<StatusResponse, ApiError>,
    },
}

impl ApiResponse {
    /// The error carried by a failed response, if any
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiResponse::HealthResult { health, .. } => health.as_ref().err(),
            ApiResponse::FolderItemsResult { items, .. } => items.as_ref().err(),
            ApiResponse::StreamResult { payload, .. } => payload.as_ref().err(),
            ApiResponse::BrowseResult { files, .. } => files.as_ref().err(),
            ApiResponse::UploadResult { result, .. } => result.as_ref().err(),
            ApiResponse::DownloadResult { path, .. } => path.as_ref().err(),
            ApiResponse::SettingsResult { settings, .. } => settings.as_ref().err(),
            ApiResponse::SettingsSaved { result, .. } => result.as_ref().err(),
            ApiResponse::DrivesResult { drives, .. } => drives.as_ref().err(),
            ApiResponse::LoginResult { result, .. } => result.as_ref().err(),
            ApiResponse::LogoutResult { result, .. } => result.as_ref().err(),
            ApiResponse::VerifyResult { result, .. } => result.as_ref().err(),
            ApiResponse::AdminCheckResult { result, .. } => result.as_ref().err(),
            ApiResponse::ShareResult { result, .. } => result.as_ref().err(),
        }
    }

    /// A 401 here means the session cookie is no longer accepted
    ///
    /// Auth calls report their own 401s, and share answers 401 to a signed-in
    /// user who lacks sharing rights.
    pub fn expires_session(&self) -> bool {
        let own_401 = matches!(
            self,
            ApiResponse::LoginResult { .. }
                | ApiResponse::LogoutResult { .. }
                | ApiResponse::VerifyResult { .. }
                | ApiResponse::ShareResult { .. }
        );
        !own_401 && self.error().is_some_and(is_unauthorized)
    }
}

/// Internal message for tracking completed requests
enum InternalMessage {
    Completed,
}

/// API service worker that processes requests in the background
struct ApiService {
    client: CloudClient,
    request_queue: VecDeque<ApiRequest>,
    in_flight: usize,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    fn new(
        client: CloudClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: 0,
            response_tx,
            completion_tx,
            max_concurrent: 8,
        }
    }

    /// Add a request to the queue, ahead of lower-priority ones
    fn enqueue(&mut self, request: ApiRequest) {
        let priority = request.priority();

        let insert_pos = self
            .request_queue
            .iter()
            .position(|queued| queued.priority() > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, request);
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight >= self.max_concurrent {
            return;
        }

        let Some(request) = self.request_queue.pop_front() else {
            return;
        };

        self.in_flight += 1;

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No retries and no cancellation: a superseded request still runs to
        // completion and its response is dropped by the model as stale.
        tokio::spawn(async move {
            let name = request.name();
            tracing::debug!(request = name, "sending");

            let response = execute_request(&client, request).await;

            // The handler logs the error chain when it applies the response
            tracing::debug!(request = name, failed = response.error().is_some(), "completed");

            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed);
        });
    }
}

/// Execute an API request and return the response
pub async fn execute_request(client: &CloudClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::HealthCheck { ticket } => ApiResponse::HealthResult {
            ticket,
            health: client.health_check().await,
        },

        ApiRequest::ListFolderItems { ticket, path } => {
            let items = client.list_folder_items(&path).await;
            ApiResponse::FolderItemsResult {
                ticket,
                path,
                items,
            }
        }

        ApiRequest::StreamFile { ticket, name } => {
            let payload = client.stream_file(&name).await;
            ApiResponse::StreamResult {
                ticket,
                name,
                payload,
            }
        }

        ApiRequest::BrowseFiles { ticket, category } => ApiResponse::BrowseResult {
            ticket,
            files: client.browse_files(category.as_deref()).await,
        },

        ApiRequest::Upload {
            ticket,
            files,
            location,
        } => ApiResponse::UploadResult {
            ticket,
            result: client.upload_files(&files, &location).await,
        },

        ApiRequest::Download {
            ticket,
            name,
            dest_dir,
        } => {
            let path = client.download_file(&name, &dest_dir).await;
            ApiResponse::DownloadResult { ticket, name, path }
        }

        ApiRequest::GetSettings { ticket } => ApiResponse::SettingsResult {
            ticket,
            settings: client.get_user_settings().await,
        },

        ApiRequest::UpdateSettings { ticket, settings } => ApiResponse::SettingsSaved {
            ticket,
            result: client.update_user_settings(&settings).await,
        },

        ApiRequest::ListDrives { ticket } => ApiResponse::DrivesResult {
            ticket,
            drives: client.list_mounted_drives().await,
        },

        ApiRequest::Login { ticket, token } => ApiResponse::LoginResult {
            ticket,
            result: client.login(&token).await,
        },

        ApiRequest::Logout { ticket } => ApiResponse::LogoutResult {
            ticket,
            result: client.logout().await,
        },

        ApiRequest::Verify { ticket } => ApiResponse::VerifyResult {
            ticket,
            result: client.verify().await,
        },

        ApiRequest::AdminCheck { ticket } => ApiResponse::AdminCheckResult {
            ticket,
            result: client.admin_check().await,
        },

        ApiRequest::Share { ticket, request } => ApiResponse::ShareResult {
            ticket,
            result: client.share(&request).await,
        },
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: CloudClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // UI dropped its sender; the app is shutting down
                        None => break,
                    }
                }

                Some(InternalMessage::Completed) = completion_rx.recv() => {
                    service.in_flight = service.in_flight.saturating_sub(1);
                }

                _ = tick.tick() => {
                    while !service.request_queue.is_empty() && service.in_flight < service.max_concurrent {
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}
