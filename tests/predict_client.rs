// End-to-end tests: the real reqwest client and intake controller against a
// local axum stand-in for the classification backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use threatsleuth::backend::{PredictClient, SubmissionOutcome, Submitter};
use threatsleuth::error::ErrorKind;
use threatsleuth::intake::{state_for_outcome, validate, FileCandidate, IntakeController};
use threatsleuth::interpret::RiskLevel;

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Mimics the backend's predict handler: requires a `file` part and reports
/// the uploaded name and size back.
async fn predict(
    State(hits): State<Arc<AtomicUsize>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = match field.bytes().await {
            Ok(d) => d,
            Err(_) => break,
        };
        return (
            StatusCode::OK,
            Json(json!({
                "filename": filename,
                "prediction": "malicious",
                "confidence": 0.92,
                "explanation": "File classified as MALICIOUS based on: ...",
                "features": {
                    "file_size": data.len(),
                    "entropy": 7.8,
                    "imports_count": 120
                }
            })),
        );
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "No file provided"})),
    )
}

fn predict_router(hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/api/predict", post(predict))
        .layer(DefaultBodyLimit::disable())
        .with_state(hits)
}

fn controller_for(base_url: &str) -> IntakeController {
    let client = PredictClient::new(base_url).unwrap();
    IntakeController::new(Arc::new(client))
}

#[tokio::test]
async fn malicious_sample_end_to_end() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base_url = spawn_backend(predict_router(hits.clone())).await;
    let controller = controller_for(&base_url);

    let candidate = FileCandidate::new("sample.exe", vec![0x4d; 2 * 1024 * 1024]);
    controller
        .select_file(candidate)
        .await
        .expect("sample.exe should be submitted")
        .settled()
        .await;

    let state = controller.state().await;
    let result = state.result().expect("analysis should succeed");
    let display = state.display().unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(result.filename, "sample.exe");
    assert_eq!(result.features.file_size, 2_097_152);
    assert_eq!(display.risk_level, RiskLevel::High);
    assert_eq!(display.confidence_percent, 92);
    assert_eq!(display.formatted_file_size, "2 MB");
}

#[tokio::test]
async fn unsupported_file_never_reaches_backend() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base_url = spawn_backend(predict_router(hits.clone())).await;
    let controller = controller_for(&base_url);

    let submission = controller
        .select_file(FileCandidate::new("notes.pdf", b"%PDF-1.7".to_vec()))
        .await;

    assert!(submission.is_none());
    let state = controller.state().await;
    assert_eq!(state.error().unwrap().kind(), ErrorKind::UnsupportedType);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn connection_refused_is_unreachable() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller = controller_for(&format!("http://{addr}"));
    controller
        .select_file(FileCandidate::new("sample.exe", vec![1, 2, 3]))
        .await
        .unwrap()
        .settled()
        .await;

    assert_eq!(
        controller.state().await.error_message().as_deref(),
        Some("Unable to connect to server. Please ensure the backend is running.")
    );
}

#[tokio::test]
async fn unresolvable_host_is_unreachable() {
    // `.invalid` is reserved and never resolves.
    let controller = controller_for("http://threatsleuth-backend.invalid");
    controller
        .select_file(FileCandidate::new("sample.exe", vec![1, 2, 3]))
        .await
        .unwrap()
        .settled()
        .await;

    let state = controller.state().await;
    assert_eq!(state.error().unwrap().kind(), ErrorKind::Unreachable);
    assert_eq!(
        state.error_message().as_deref(),
        Some("Unable to connect to server. Please ensure the backend is running.")
    );
}

#[tokio::test]
async fn error_status_with_truncated_body_is_server_rejected() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Drain the upload up to the closing multipart boundary.
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.ends_with(b"--\r\n") {
                break;
            }
        }
        // Promise 100 bytes, send a few, then hang up.
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\n{\"err")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = PredictClient::new(&format!("http://{addr}")).unwrap();
    let file = validate(FileCandidate::new("a.bin", vec![7; 64])).unwrap();
    let outcome = client.submit(file).await;
    assert!(
        matches!(outcome, SubmissionOutcome::HttpErrorResponse(500, _)),
        "unexpected outcome: {outcome:?}"
    );

    let state = state_for_outcome(outcome);
    assert_eq!(state.error().unwrap().kind(), ErrorKind::ServerRejected);
    assert_eq!(state.error_message().as_deref(), Some("Server error occurred"));
}

#[tokio::test]
async fn error_status_with_message() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "File type not allowed"})),
            )
        }),
    );
    let client = PredictClient::new(&spawn_backend(router).await).unwrap();

    let file = validate(FileCandidate::new("a.txt", b"hello".to_vec())).unwrap();
    let outcome = client.submit(file).await;
    assert_eq!(
        outcome,
        SubmissionOutcome::HttpErrorResponse(400, r#"{"error":"File type not allowed"}"#.into())
    );
}

#[tokio::test]
async fn error_status_without_body_uses_fallback_message() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let controller = controller_for(&spawn_backend(router).await);

    controller
        .select_file(FileCandidate::new("a.bin", vec![0; 16]))
        .await
        .unwrap()
        .settled()
        .await;

    let state = controller.state().await;
    assert_eq!(state.error().unwrap().kind(), ErrorKind::ServerRejected);
    assert_eq!(state.error_message().as_deref(), Some("Server error occurred"));
}

#[tokio::test]
async fn schema_violating_success_is_malformed() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { Json(json!({"prediction": "maybe", "confidence": "high"})) }),
    );
    let controller = controller_for(&spawn_backend(router).await);

    controller
        .select_file(FileCandidate::new("a.dll", vec![0; 16]))
        .await
        .unwrap()
        .settled()
        .await;

    let state = controller.state().await;
    assert_eq!(state.error().unwrap().kind(), ErrorKind::MalformedResponse);
    assert_eq!(
        state.error_message().as_deref(),
        Some("Malformed server response")
    );
}

#[tokio::test]
async fn health_and_stats() {
    let router = Router::new()
        .route(
            "/",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "service": "ThreatSleuth API",
                    "version": "1.0.0",
                    "model_loaded": false
                }))
            }),
        )
        .route(
            "/api/stats",
            get(|| async {
                Json(json!({
                    "allowed_extensions": ["exe", "zip", "txt", "bin", "dll"],
                    "max_file_size_mb": 50,
                    "model_status": "fallback_mode"
                }))
            }),
        );
    let client = PredictClient::new(&spawn_backend(router).await).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.model_loaded);

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.max_file_size_mb, 50);
    assert_eq!(stats.allowed_extensions.len(), 5);
    assert_eq!(stats.model_status, "fallback_mode");
}

#[tokio::test]
async fn health_fails_on_error_status() {
    let router = Router::new().route("/", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let client = PredictClient::new(&spawn_backend(router).await).unwrap();
    assert!(client.health().await.is_err());
}
