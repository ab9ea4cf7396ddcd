//! Request gateway against the mock backend

mod common;

use std::time::Duration;

use cloudtui::api::{ApiError, CloudClient, ShareRequest, UserSettings};
use cloudtui::logic::errors::{format_error_message, is_unauthorized};
use common::{closed_port_url, start_backend, truncated_body_url, VALID_TOKEN};

async fn signed_in(backend: &common::MockBackend) -> CloudClient {
    let client = backend.client();
    client.login(VALID_TOKEN).await.unwrap();
    client
}

#[tokio::test]
async fn test_listing_sends_encoded_path() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let items = client.list_folder_items("Docs/2024 trip").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].relative_path, "Docs/2024 trip/notes.txt");
    assert!(!items[0].is_folder());
    assert_eq!(items[0].size.as_deref(), Some("5 B"));

    assert_eq!(backend.recorded().listed_paths, vec!["Docs/2024 trip".to_string()]);
}

#[tokio::test]
async fn test_root_listing_has_folders() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let items = client.list_folder_items("").await.unwrap();
    let folders: Vec<&str> = items
        .iter()
        .filter(|i| i.is_folder())
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(folders, vec!["Docs", "Photos"]);
}

#[tokio::test]
async fn test_server_detail_is_passed_through() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let err = client.list_folder_items("Nowhere").await.unwrap_err();
    assert_eq!(format_error_message(&err), "Folder not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unparseable_error_body_uses_status_line() {
    let backend = start_backend().await;
    // The mock serves an HTML 500 under this prefix
    let client = CloudClient::new(format!("{}/broken", backend.base_url()), Duration::from_secs(5)).unwrap();

    let err = client.health_check().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_missing_session_is_unauthorized() {
    let backend = start_backend().await;
    let client = backend.client();

    let err = client.list_folder_items("").await.unwrap_err();
    assert!(is_unauthorized(&err));
    assert_eq!(err.to_string(), "Not authenticated");
}

#[tokio::test]
async fn test_closed_port_is_generic_error() {
    let client = CloudClient::new(closed_port_url().await, Duration::from_secs(2)).unwrap();
    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.to_string(), "An unexpected error occurred");
}

#[tokio::test]
async fn test_stream_reports_content_type() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let payload = client.stream_file("Docs/report.pdf").await.unwrap();
    assert_eq!(payload.mime_type, "application/pdf");
    assert!(payload.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_login_cookie_is_sent_on_later_calls() {
    let backend = start_backend().await;
    let client = backend.client();

    let before = client.verify().await.unwrap();
    assert!(!before.authenticated);

    let login = client.login(VALID_TOKEN).await.unwrap();
    assert_eq!(login.user.email, "sam@example.com");

    let after = client.verify().await.unwrap();
    assert!(after.authenticated);
    assert_eq!(after.user.unwrap().name.as_deref(), Some("Sam"));
    assert!(client.admin_check().await.unwrap().is_admin);

    client.logout().await.unwrap();
    assert!(!client.verify().await.unwrap().authenticated);
}

#[tokio::test]
async fn test_bad_token_message() {
    let backend = start_backend().await;
    let err = backend.client().login("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid token");
}

#[tokio::test]
async fn test_multipart_upload() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.png");
    std::fs::write(&a, "alpha").unwrap();
    std::fs::write(&b, [0x89, b'P', b'N', b'G']).unwrap();

    let response = client.upload_files(&[a, b], "Docs").await.unwrap();
    assert_eq!(response.uploaded_files, vec!["a.txt", "b.png"]);

    let recorded = backend.recorded();
    assert_eq!(recorded.upload_location.as_deref(), Some("Docs"));
    assert_eq!(recorded.uploaded.len(), 2);
    let (field, name, content_type, bytes) = &recorded.uploaded[0];
    assert_eq!(field, "files");
    assert_eq!(name.as_deref(), Some("a.txt"));
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(bytes, b"alpha");
    assert_eq!(recorded.uploaded[1].2.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_upload_of_missing_file_is_local_error() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let err = client
        .upload_files(&["/definitely/not/here.txt".into()], "")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::LocalFile { .. }));
    assert!(backend.recorded().uploaded.is_empty());
}

#[tokio::test]
async fn test_settings_null_and_update() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    assert_eq!(client.get_user_settings().await.unwrap(), None);

    let status = client
        .update_user_settings(&UserSettings {
            hard_drive_path_selection: "/media/usb".into(),
        })
        .await
        .unwrap();
    assert_eq!(status.status, "ok");
    assert_eq!(
        backend.recorded().saved_settings.as_ref().unwrap()["hard_drive_path_selection"],
        "/media/usb"
    );

    let err = client
        .update_user_settings(&UserSettings {
            hard_drive_path_selection: "/media/missing".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Drive not mounted");
}

#[tokio::test]
async fn test_browse_category_filter() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let all = client.browse_files(None).await.unwrap();
    assert_eq!(all.total_count, 2);

    let photos = client.browse_files(Some("photos")).await.unwrap();
    assert_eq!(photos.total_count, 1);
    assert_eq!(photos.files[0].name, "beach.jpg");
    assert_eq!(photos.files[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_drives_and_share() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;

    let drives = client.list_mounted_drives().await.unwrap();
    assert_eq!(drives[0].mountpoint, "/media/usb");
    assert_eq!(drives[0].free, "60.00 GB");

    client
        .share(&ShareRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            hard_drive_path_selection: "/media/usb/Photos".into(),
        })
        .await
        .unwrap();
    let shared = backend.recorded().shared.clone().unwrap();
    assert_eq!(shared["email"], "ana@example.com");
    assert_eq!(shared["hard_drive_path_selection"], "/media/usb/Photos");
}

#[tokio::test]
async fn test_download_writes_file() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;
    let dir = tempfile::tempdir().unwrap();

    let path = client.download_file("readme.txt", dir.path()).await.unwrap();
    assert_eq!(path, dir.path().join("readme.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "hello, cloud");
}

#[tokio::test]
async fn test_download_keeps_existing_file() {
    let backend = start_backend().await;
    let client = signed_in(&backend).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), "mine").unwrap();

    let path = client.download_file("readme.txt", dir.path()).await.unwrap();
    assert_eq!(path, dir.path().join("readme (1).txt"));
    assert_eq!(std::fs::read_to_string(dir.path().join("readme.txt")).unwrap(), "mine");
    assert_eq!(std::fs::read_to_string(path).unwrap(), "hello, cloud");
}

#[tokio::test]
async fn test_truncated_download_leaves_nothing_behind() {
    let base_url = truncated_body_url(b"hello").await;
    let client = CloudClient::new(base_url, Duration::from_secs(5)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = client.download_file("big.bin", dir.path()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
