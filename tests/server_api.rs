use std::io::{Cursor, Read};
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use woopy::adapters::FilesystemProjectStore;
use woopy::domain::{AppError, GeneratedBundle};
use woopy::ports::{ProjectStore, StoredProject};
use woopy::{AppState, ServerConfig, router};

const ACME_ENV: &str = "SITE_TITLE=Acme\nSITE_URL=acme.example.com\n";

/// Rejects every save as if the slug were already taken.
struct ConflictStore;

impl ProjectStore for ConflictStore {
    fn save(&self, bundle: &GeneratedBundle) -> Result<StoredProject, AppError> {
        Err(AppError::ProjectExists(bundle.project_slug.clone()))
    }
}

fn app(store: Option<Arc<dyn ProjectStore>>) -> Router {
    router(AppState::new(ServerConfig::default(), store).unwrap())
}

async fn post(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder().method("POST").uri(uri).body(body.into()).unwrap();
    app.oneshot(request).await.unwrap()
}

async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn header_value(response: &Response, name: header::HeaderName) -> String {
    response.headers().get(name).unwrap().to_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_name_and_version() {
    let response = get(app(None), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "woopy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn swagger_document_is_openapi() {
    let response = get(app(None), "/swagger.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"].get("/dc").is_some());
}

#[tokio::test]
async fn manifest_is_yaml_attachment() {
    let response = post(app(None), "/dc", ACME_ENV).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/yaml");
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"docker-compose.yml\""
    );

    let yaml: serde_yaml::Value = serde_yaml::from_slice(&body_bytes(response).await).unwrap();
    let services = yaml["services"].as_mapping().unwrap();
    assert_eq!(services.len(), 14);
    for (name, _) in services {
        assert!(name.as_str().unwrap().starts_with("acme-"));
    }
    assert!(yaml["networks"].as_mapping().unwrap().len() == 1);
}

#[tokio::test]
async fn core_profile_manifest_has_ten_services() {
    let body = format!("{}SITE_PROFILE=core\n", ACME_ENV);
    let response = post(app(None), "/dc", body).await;

    let yaml: serde_yaml::Value = serde_yaml::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(yaml["services"].as_mapping().unwrap().len(), 10);
}

#[tokio::test]
async fn missing_title_is_bad_request() {
    let response = post(app(None), "/dc", "SITE_URL=acme.example.com\n").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing required key 'SITE_TITLE'");
}

#[tokio::test]
async fn empty_body_is_bad_request() {
    let response = post(app(None), "/", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn malformed_line_is_bad_request() {
    let response = post(app(None), "/report", "SITE_TITLE=Acme\nnot a pair\n").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("line 2"));
}

#[tokio::test]
async fn non_utf8_body_is_bad_request() {
    let response = post(app(None), "/dc", vec![0xff, 0xfe, 0x00]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_lists_every_service() {
    let response = post(app(None), "/report", ACME_ENV).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/plain"));
    let report = String::from_utf8(body_bytes(response).await).unwrap();
    let mut lines = report.lines();
    assert!(lines.next().unwrap().contains("sensitive information"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("Acme (acme.example.com)"));
    assert!(report.contains("Manifest SHA-256:"));
    for role in ["database", "cache", "mail", "website", "proxy", "vault", "code"] {
        assert!(report.contains(&format!("-{}", role)), "{}", role);
    }
}

#[tokio::test]
async fn bundle_is_zip_and_persisted() {
    let home = TempDir::new().unwrap();
    let store: Arc<dyn ProjectStore> = Arc::new(FilesystemProjectStore::new(home.path().into()));

    let response = post(app(Some(store)), "/", ACME_ENV).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/zip");
    let bytes = body_bytes(response).await;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut manifest = String::new();
    archive.by_name("docker-compose.yml").unwrap().read_to_string(&mut manifest).unwrap();
    assert!(manifest.contains("services:"));
    assert!(archive.by_name("credentials.txt").is_ok());
    assert!(archive.by_name("README.md").is_ok());

    let stored: Vec<_> = std::fs::read_dir(home.path()).unwrap().collect();
    assert_eq!(stored.len(), 1);
    let project = stored.into_iter().next().unwrap().unwrap().path();
    assert_eq!(std::fs::read_to_string(project.join("docker-compose.yml")).unwrap(), manifest);
}

#[tokio::test]
async fn persistence_conflict_is_409() {
    let store: Arc<dyn ProjectStore> = Arc::new(ConflictStore);
    let response = post(app(Some(store)), "/", ACME_ENV).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://shop.example.org")
        .body(Body::empty())
        .unwrap();
    let response = app(None).oneshot(request).await.unwrap();

    assert_eq!(header_value(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}

#[tokio::test]
async fn every_request_builds_a_new_project() {
    let first = body_bytes(post(app(None), "/dc", ACME_ENV).await).await;
    let second = body_bytes(post(app(None), "/dc", ACME_ENV).await).await;

    assert_ne!(first, second);
}
