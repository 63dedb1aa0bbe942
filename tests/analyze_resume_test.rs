//! End-to-end tests against an in-process analysis server
//!
//! The stub server speaks the same contract as the SkillSync API: a multipart
//! `POST` with the résumé under `file`, answered with the analysis JSON.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;
use skillsync_client::page::{Region, Transition};
use skillsync_client::{
    AnalysisClient, AnalysisError, ClientConfig, ResumeAnalyzer, ResumeFile, SubmitOutcome,
    UploadController,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct ReceivedPart {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone, Default)]
struct ServerState {
    received: Arc<Mutex<Vec<ReceivedPart>>>,
}

async fn record_parts(state: &ServerState, mut multipart: Multipart) {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(String::from);
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.received.lock().unwrap().push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
}

async fn analyze_ok(State(state): State<ServerState>, multipart: Multipart) -> impl IntoResponse {
    record_parts(&state, multipart).await;
    Json(json!({
        "skills": ["python", "<b>sql</b>"],
        "experience": "Built REST APIs with FastAPI",
        "education": ["bachelor"],
        "job_matches": [
            {"job_title": "Backend Developer", "match_score": 2, "matched_skills": ["python", "sql"]},
            {"job_title": "Data Engineer", "match_score": 1, "matched_skills": ["sql"]}
        ]
    }))
}

async fn analyze_no_matches(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> impl IntoResponse {
    record_parts(&state, multipart).await;
    Json(json!({
        "skills": [],
        "experience": "",
        "education": [],
        "job_matches": []
    }))
}

async fn analyze_rejected(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> impl IntoResponse {
    record_parts(&state, multipart).await;
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Only PDF or DOCX files allowed"})),
    )
}

async fn analyze_garbage(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> impl IntoResponse {
    record_parts(&state, multipart).await;
    (StatusCode::OK, "<html>proxy login</html>")
}

async fn analyze_stalled(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> impl IntoResponse {
    record_parts(&state, multipart).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    StatusCode::OK
}

async fn spawn_analysis_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/analyze-resume", post(analyze_ok))
        .route("/no-matches", post(analyze_no_matches))
        .route("/rejected", post(analyze_rejected))
        .route("/garbage", post(analyze_garbage))
        .route("/stalled", post(analyze_stalled))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn controller_for(url: String) -> UploadController {
    let config = ClientConfig::default().with_endpoint(url).with_timeout(10);
    let client = AnalysisClient::new(&config).expect("client");
    UploadController::new(Arc::new(client))
}

fn pdf_resume() -> ResumeFile {
    ResumeFile::new("jane_doe.pdf", b"%PDF-1.4 resume body".to_vec())
}

#[tokio::test]
async fn uploads_file_field_and_renders_results() {
    let (base, state) = spawn_analysis_server().await;
    let controller = controller_for(format!("{base}/analyze-resume"));

    let outcome = controller.submit(Some(pdf_resume())).await;
    let analysis = match outcome {
        SubmitOutcome::Rendered(analysis) => analysis,
        other => panic!("expected rendered outcome, got {other:?}"),
    };
    assert_eq!(analysis.job_matches[0].matched_skills, vec!["python", "sql"]);

    let received = state.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name.as_deref(), Some("file"));
    assert_eq!(received[0].file_name.as_deref(), Some("jane_doe.pdf"));
    assert_eq!(received[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(received[0].bytes, b"%PDF-1.4 resume body".to_vec());

    let page = controller.page();
    assert_eq!(
        page.job_matches(),
        &[
            "Backend Developer (Match Score: 2)".to_string(),
            "Data Engineer (Match Score: 1)".to_string()
        ]
    );
    assert_eq!(page.skills()[1], "<b>sql</b>");
    assert_eq!(page.experience(), "Built REST APIs with FastAPI");
    assert_eq!(
        page.transitions().last().copied(),
        Some(Transition::Shown(Region::Results))
    );
    assert!(!page.is_visible(Region::Loading));
}

#[tokio::test]
async fn empty_matches_render_placeholder() {
    let (base, _state) = spawn_analysis_server().await;
    let controller = controller_for(format!("{base}/no-matches"));

    controller.submit(Some(pdf_resume())).await;

    let page = controller.page();
    assert_eq!(page.job_matches(), &["No matches found".to_string()]);
    assert!(page.skills().is_empty());
    assert!(page.is_visible(Region::Results));
}

#[tokio::test]
async fn rejected_upload_shows_generic_error() {
    let (base, _state) = spawn_analysis_server().await;
    let controller = controller_for(format!("{base}/rejected"));

    let outcome = controller.submit(Some(ResumeFile::new("notes.txt", b"hi".to_vec()))).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(AnalysisError::Server { status: 400 })
    );

    let page = controller.page();
    assert!(page.is_visible(Region::Error));
    assert!(!page.is_visible(Region::Results));
    assert_eq!(page.error_text(), "Error analyzing resume");
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let (base, _state) = spawn_analysis_server().await;
    let config = ClientConfig::default().with_endpoint(format!("{base}/garbage"));
    let client = AnalysisClient::new(&config).unwrap();

    let err = client.analyze(&pdf_resume()).await.unwrap_err();
    assert_eq!(err.kind(), "parse");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller = controller_for(format!("http://{addr}/analyze-resume"));
    let outcome = controller.submit(Some(pdf_resume())).await;

    let err = match outcome {
        SubmitOutcome::Failed(err) => err,
        other => panic!("expected failure, got {other:?}"),
    };
    assert_eq!(err.kind(), "network");
    let page = controller.page();
    assert!(page.is_visible(Region::Error));
    assert_eq!(page.error_text(), err.to_string());
}

#[tokio::test]
async fn missing_file_never_reaches_server() {
    let (base, state) = spawn_analysis_server().await;
    let controller = controller_for(format!("{base}/analyze-resume"));

    let outcome = controller.submit(None).await;
    assert!(matches!(outcome, SubmitOutcome::Alert(_)));
    assert!(state.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stalled_server_times_out_as_network_error() {
    let (base, _state) = spawn_analysis_server().await;
    let config = ClientConfig::default()
        .with_endpoint(format!("{base}/stalled"))
        .with_timeout(1);
    let controller = UploadController::new(Arc::new(AnalysisClient::new(&config).unwrap()));

    let outcome = tokio::time::timeout(Duration::from_secs(4), controller.submit(Some(pdf_resume())))
        .await
        .expect("request gave up before the server answered");

    let err = match outcome {
        SubmitOutcome::Failed(err) => err,
        other => panic!("expected failure, got {other:?}"),
    };
    assert_eq!(err.kind(), "network");
    let page = controller.page();
    assert!(page.is_visible(Region::Error));
    assert!(!page.is_visible(Region::Loading));
    assert!(!page.is_visible(Region::Results));
}
