use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use crate::adapters::assets::openapi_document;
use crate::adapters::zip_archive;
use crate::app::commands::generate;
use crate::app::server::error::ApiError;
use crate::app::server::state::AppState;
use crate::domain::{AppError, CredentialGenerator, GeneratedBundle};
use crate::ports::ArtifactKind;

fn env_text(body: &Bytes) -> Result<&str, ApiError> {
    std::str::from_utf8(body).map_err(|_| ApiError::bad_request("Request body must be UTF-8 text"))
}

fn attachment(content_type: &'static str, kind: ArtifactKind, body: impl IntoResponse) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", kind.file_name());
    ([(CONTENT_TYPE, content_type.to_string()), (CONTENT_DISPOSITION, disposition)], body)
        .into_response()
}

// Generation stays in sync functions: the thread-local RNG must not be held across an await.
fn build_bundle(state: &AppState, text: &str) -> Result<GeneratedBundle, AppError> {
    generate::bundle(text, &mut CredentialGenerator::new(), &state.renderer, Utc::now())
}

/// `POST /`: zip archive of the whole project.
pub async fn bundle(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let bundle = build_bundle(&state, env_text(&body)?)?;
    let archive = zip_archive::encode(&bundle)?;
    info!(project = %bundle.project_slug, files = bundle.files.len(), "bundle generated");

    if let Some(store) = state.store.clone() {
        let stored = tokio::task::spawn_blocking(move || store.save(&bundle))
            .await
            .map_err(|e| AppError::InternalError(format!("Persistence task failed: {}", e)))??;
        info!(project = %stored.slug, path = %stored.path.display(), "bundle persisted");
    }

    Ok(attachment("application/zip", ArtifactKind::Bundle, archive))
}

/// `POST /dc`: compose manifest only.
pub async fn manifest(body: Bytes) -> Result<Response, ApiError> {
    let text = env_text(&body)?;
    let artifacts = generate::artifacts(text, &mut CredentialGenerator::new())?;
    info!(project = %artifacts.project.slug(), "manifest generated");

    Ok(attachment("application/yaml", ArtifactKind::Manifest, artifacts.manifest))
}

/// `POST /report`: plain-text credentials report.
pub async fn report(body: Bytes) -> Result<Response, ApiError> {
    let text = env_text(&body)?;
    let artifacts = generate::artifacts(text, &mut CredentialGenerator::new())?;
    info!(project = %artifacts.project.slug(), "report generated");

    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], artifacts.report.to_string()).into_response())
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn swagger() -> Response {
    ([(CONTENT_TYPE, "application/json")], openapi_document()).into_response()
}
