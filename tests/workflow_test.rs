//! End-to-end workflow tests
//!
//! Runs the CLI workflow against an in-process axum backend stub that records
//! what it receives.

use axum::extract::{Multipart, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use patent_analysis::client::{ApiClient, UploadFile};
use patent_analysis::error::PatentError;
use patent_analysis::workflow::{self, Session};
use patent_analysis_common::{AnalyzeOptions, ColumnField, Status, ValidationError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const ANALYSIS_BODY: &str =
    r#"[{"relevance_score": 5, "SUMMARY": "ok", "reasoning": "r", "follow_up_recommended": true}]"#;

struct Stub {
    columns_status: StatusCode,
    columns_body: String,
    analyze_status: StatusCode,
    analyze_body: String,
    columns_hits: AtomicUsize,
    analyze_hits: AtomicUsize,
    fields: Mutex<HashMap<String, String>>,
    file_name: Mutex<Option<String>>,
    query: Mutex<Option<String>>,
}

impl Stub {
    fn new(columns_body: &str, analyze_status: StatusCode, analyze_body: &str) -> Self {
        Self {
            columns_status: StatusCode::OK,
            columns_body: columns_body.to_string(),
            analyze_status,
            analyze_body: analyze_body.to_string(),
            columns_hits: AtomicUsize::new(0),
            analyze_hits: AtomicUsize::new(0),
            fields: Mutex::new(HashMap::new()),
            file_name: Mutex::new(None),
            query: Mutex::new(None),
        }
    }

    fn standard() -> Self {
        Self::new(r#"{"columns": ["Title", "Abstract", "Claims"]}"#, StatusCode::OK, ANALYSIS_BODY)
    }

    fn field(&self, name: &str) -> Option<String> {
        self.fields.lock().unwrap().get(name).cloned()
    }
}

async fn columns(State(stub): State<Arc<Stub>>, mut multipart: Multipart) -> (StatusCode, String) {
    stub.columns_hits.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            *stub.file_name.lock().unwrap() = field.file_name().map(str::to_string);
        }
    }
    (stub.columns_status, stub.columns_body.clone())
}

async fn analyze(
    State(stub): State<Arc<Stub>>,
    RawQuery(query): RawQuery,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    stub.analyze_hits.fetch_add(1, Ordering::SeqCst);
    *stub.query.lock().unwrap() = query;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            continue;
        }
        let text = field.text().await.unwrap_or_default();
        stub.fields.lock().unwrap().insert(name, text);
    }
    (stub.analyze_status, stub.analyze_body.clone())
}

async fn ping() -> &'static str {
    r#"{"status": "ok"}"#
}

async fn spawn_backend(stub: Arc<Stub>) -> ApiClient {
    let app = Router::new()
        .route("/columns", post(columns))
        .route("/analyze", post(analyze))
        .route("/ping", get(ping))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(&format!("http://{}", addr), Duration::from_secs(10)).unwrap()
}

fn upload() -> UploadFile {
    UploadFile::new("patents.csv", b"Title,Abstract,Claims\nWidget,A widget,1. A widget\n".to_vec())
}

#[tokio::test]
async fn test_upload_select_submit_export() {
    let stub = Arc::new(Stub::standard());
    let client = spawn_backend(stub.clone()).await;

    let mut session = Session::with_prompt("X");
    workflow::discover_columns(&client, &mut session, upload()).await.unwrap();

    assert_eq!(session.columns(), &["Title", "Abstract", "Claims"]);
    assert_eq!(session.column(ColumnField::Claims), Some("Claims"));
    assert_eq!(stub.file_name.lock().unwrap().as_deref(), Some("patents.csv"));

    workflow::run_analysis(&client, &mut session, &AnalyzeOptions::default())
        .await
        .unwrap();

    assert_eq!(stub.analyze_hits.load(Ordering::SeqCst), 1);
    assert_eq!(stub.field("title_col").as_deref(), Some("Title"));
    assert_eq!(stub.field("abstract_col").as_deref(), Some("Abstract"));
    assert_eq!(stub.field("claims_col").as_deref(), Some("Claims"));
    assert_eq!(stub.field("custom_prompt").as_deref(), Some("X"));
    assert_eq!(*stub.query.lock().unwrap(), None);

    let rows = session.summary_rows().expect("rows missing");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells(), ["5", "ok", "r", "Yes"]);

    let export = session.export_csv().expect("export missing");
    assert_eq!(export.file_name, "patent_analysis_results.csv");
    assert_eq!(
        export.content,
        "\"relevance_score\",\"SUMMARY\",\"reasoning\",\"follow_up_recommended\"\n\"5\",\"ok\",\"r\",\"true\""
    );
}

#[tokio::test]
async fn test_analysis_server_error_is_shown() {
    let stub = Arc::new(Stub::new(
        r#"{"columns": ["Title", "Abstract", "Claims"]}"#,
        StatusCode::INTERNAL_SERVER_ERROR,
        "server error",
    ));
    let client = spawn_backend(stub).await;

    let mut session = Session::new();
    workflow::discover_columns(&client, &mut session, upload()).await.unwrap();
    let result = workflow::run_analysis(&client, &mut session, &AnalyzeOptions::default()).await;

    match result {
        Err(PatentError::Session(message)) => assert!(message.contains("server error")),
        other => panic!("expected session error, got {:?}", other),
    }
    assert_eq!(session.error_message(), Some("Analysis failed: server error"));
    assert!(session.results().is_empty());
    assert!(session.summary_rows().is_none());
    assert!(session.can_submit());
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let stub = Arc::new(Stub::new(r#"{"columns": ["Title", "Abstract"]}"#, StatusCode::OK, ANALYSIS_BODY));
    let client = spawn_backend(stub.clone()).await;

    let mut session = Session::new();
    workflow::discover_columns(&client, &mut session, upload()).await.unwrap();
    assert_eq!(session.column(ColumnField::Claims), None);

    let result = workflow::run_analysis(&client, &mut session, &AnalyzeOptions::default()).await;
    assert!(matches!(result, Err(PatentError::Validation(ValidationError::MissingFields))));
    assert_eq!(
        session.error_message(),
        Some("Please ensure all required fields are selected.")
    );
    assert_eq!(stub.analyze_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_columns_error_body() {
    let stub = Arc::new(Stub::new(r#"{"error": "Unsupported file format"}"#, StatusCode::OK, ANALYSIS_BODY));
    let client = spawn_backend(stub).await;

    let mut session = Session::new();
    let result = workflow::discover_columns(&client, &mut session, upload()).await;

    assert!(matches!(result, Err(PatentError::Session(_))));
    assert_eq!(
        session.error_message(),
        Some("Failed to load columns: Unsupported file format")
    );
    assert!(session.columns().is_empty());
    assert!(!session.can_submit());
}

#[tokio::test]
async fn test_columns_http_failure_uses_body() {
    let mut stub = Stub::new("bad spreadsheet", StatusCode::OK, ANALYSIS_BODY);
    stub.columns_status = StatusCode::BAD_REQUEST;
    let client = spawn_backend(Arc::new(stub)).await;

    let mut session = Session::new();
    let result = workflow::discover_columns(&client, &mut session, upload()).await;

    assert!(result.is_err());
    assert_eq!(session.error_message(), Some("Failed to load columns: bad spreadsheet"));
    assert!(matches!(session.status(), Status::Error(_)));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // nothing listens on the discard port
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let mut session = Session::new();
    let result = workflow::discover_columns(&client, &mut session, upload()).await;

    assert!(result.is_err());
    let message = session.error_message().expect("error missing");
    assert!(message.starts_with("Failed to load columns: "));
}

#[tokio::test]
async fn test_query_options_and_envelope() {
    let body = r#"{
        "results": [{"relevance_score": 9}, {"relevance_score": 4}],
        "metadata": {"page": 2, "page_size": 2, "total_items": 6, "total_pages": 3}
    }"#;
    let stub = Arc::new(Stub::new(
        r#"{"columns": ["Title", "Abstract", "Claims"]}"#,
        StatusCode::OK,
        body,
    ));
    let client = spawn_backend(stub.clone()).await;

    let mut session = Session::new();
    workflow::discover_columns(&client, &mut session, upload()).await.unwrap();

    let options = AnalyzeOptions {
        page: Some(2),
        page_size: Some(2),
        ..Default::default()
    };
    workflow::run_analysis(&client, &mut session, &options).await.unwrap();

    assert_eq!(stub.query.lock().unwrap().as_deref(), Some("page=2&page_size=2"));
    assert_eq!(session.results().len(), 2);
    let meta = session.metadata().expect("metadata missing");
    assert_eq!(meta.total_pages, 3);
}

#[tokio::test]
async fn test_invalid_page_size_sends_nothing() {
    let stub = Arc::new(Stub::standard());
    let client = spawn_backend(stub.clone()).await;

    let mut session = Session::new();
    workflow::discover_columns(&client, &mut session, upload()).await.unwrap();

    let options = AnalyzeOptions { page_size: Some(500), ..Default::default() };
    let result = workflow::run_analysis(&client, &mut session, &options).await;

    assert!(matches!(result, Err(PatentError::Common(_))));
    assert_eq!(stub.analyze_hits.load(Ordering::SeqCst), 0);
    assert_eq!(session.status(), &Status::Ready);
}

#[tokio::test]
async fn test_ping() {
    let client = spawn_backend(Arc::new(Stub::standard())).await;
    assert!(client.ping().await.unwrap());
}
