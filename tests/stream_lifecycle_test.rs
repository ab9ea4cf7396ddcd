//! Stream lifecycle: fetch through the worker, one live local reference at a time

mod common;

use cloudtui::logic::file::PreviewKind;
use cloudtui::services::{spawn_api_service, ApiRequest, ApiResponse};
use cloudtui::stream::{StreamManager, StreamOutcome};
use common::{next_response, start_backend, VALID_TOKEN};

async fn stream_result(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<ApiResponse>,
    manager: &mut StreamManager,
) -> StreamOutcome {
    match next_response(rx).await {
        ApiResponse::StreamResult { ticket, payload, .. } => {
            manager.complete(ticket, payload.map_err(|e| e.to_string()))
        }
        other => panic!("unexpected response {:?}", other),
    }
}

#[tokio::test]
async fn test_switching_files_releases_previous_reference() {
    let backend = start_backend().await;
    let client = backend.client();
    client.login(VALID_TOKEN).await.unwrap();
    let (tx, mut rx) = spawn_api_service(client);
    let scratch = tempfile::tempdir().unwrap();
    let mut manager = StreamManager::new(scratch.path());

    let ticket = manager.begin("readme.txt");
    assert!(manager.is_loading());
    tx.send(ApiRequest::StreamFile {
        ticket,
        name: "readme.txt".into(),
    })
    .unwrap();
    assert_eq!(stream_result(&mut rx, &mut manager).await, StreamOutcome::Ready);

    let first = manager.current().unwrap();
    assert_eq!(first.preview_kind(), PreviewKind::Text);
    assert_eq!(first.content, b"hello, cloud");
    let first_path = first.reference.path().to_path_buf();
    assert!(first_path.exists());
    assert_eq!(manager.live_references(), 1);

    let ticket = manager.begin("Docs/report.pdf");
    // Beginning a new stream drops the old preview straight away
    assert!(!first_path.exists());
    assert_eq!(manager.live_references(), 0);
    tx.send(ApiRequest::StreamFile {
        ticket,
        name: "Docs/report.pdf".into(),
    })
    .unwrap();
    assert_eq!(stream_result(&mut rx, &mut manager).await, StreamOutcome::Ready);

    let second = manager.current().unwrap();
    assert_eq!(second.mime_type, "application/pdf");
    assert_eq!(second.preview_kind(), PreviewKind::Pdf);
    assert_eq!(manager.live_references(), 1);

    let second_path = second.reference.path().to_path_buf();
    manager.reset();
    assert!(!second_path.exists());
    assert_eq!(manager.live_references(), 0);
    assert!(!manager.is_active());
}

#[tokio::test]
async fn test_slow_stream_is_superseded() {
    let backend = start_backend().await;
    let client = backend.client();
    client.login(VALID_TOKEN).await.unwrap();
    let (tx, mut rx) = spawn_api_service(client);
    let scratch = tempfile::tempdir().unwrap();
    let mut manager = StreamManager::new(scratch.path());

    let slow = manager.begin("slow.txt");
    tx.send(ApiRequest::StreamFile {
        ticket: slow,
        name: "slow.txt".into(),
    })
    .unwrap();
    let fast = manager.begin("readme.txt");
    tx.send(ApiRequest::StreamFile {
        ticket: fast,
        name: "readme.txt".into(),
    })
    .unwrap();

    assert_eq!(stream_result(&mut rx, &mut manager).await, StreamOutcome::Ready);
    assert_eq!(stream_result(&mut rx, &mut manager).await, StreamOutcome::Stale);

    assert_eq!(manager.current().unwrap().name, "readme.txt");
    assert_eq!(manager.live_references(), 1);
}

#[tokio::test]
async fn test_missing_file_sets_error() {
    let backend = start_backend().await;
    let client = backend.client();
    client.login(VALID_TOKEN).await.unwrap();
    let (tx, mut rx) = spawn_api_service(client);
    let scratch = tempfile::tempdir().unwrap();
    let mut manager = StreamManager::new(scratch.path());

    let ticket = manager.begin("ghost.bin");
    tx.send(ApiRequest::StreamFile {
        ticket,
        name: "ghost.bin".into(),
    })
    .unwrap();

    assert_eq!(
        stream_result(&mut rx, &mut manager).await,
        StreamOutcome::Failed("File not found".into())
    );
    assert_eq!(manager.error(), Some("File not found"));
    assert!(manager.current().is_none());
    assert!(manager.is_active());
    assert_eq!(manager.live_references(), 0);
}

#[tokio::test]
async fn test_save_copies_into_download_dir() {
    let backend = start_backend().await;
    let client = backend.client();
    client.login(VALID_TOKEN).await.unwrap();
    let (tx, mut rx) = spawn_api_service(client);
    let scratch = tempfile::tempdir().unwrap();
    let downloads = tempfile::tempdir().unwrap();
    let mut manager = StreamManager::new(scratch.path());

    let ticket = manager.begin("Docs/2024 trip/notes.txt");
    tx.send(ApiRequest::StreamFile {
        ticket,
        name: "Docs/2024 trip/notes.txt".into(),
    })
    .unwrap();
    stream_result(&mut rx, &mut manager).await;

    let saved = manager.save_to(downloads.path()).unwrap().unwrap();
    assert_eq!(saved, downloads.path().join("notes.txt"));
    assert_eq!(std::fs::read_to_string(saved).unwrap(), "beach");
}
