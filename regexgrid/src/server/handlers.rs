// regexgrid/src/server/handlers.rs
//! Route handlers.
//!
//! `transform` and `download` accept the same multipart form: a `file` part (with a
//! filename), a JSON `payload` part and, for downloads, an optional `format` part.
//! Checks run in a fixed order: required parts, then the file, then the payload,
//! then pattern resolution.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, info};
use serde_json::{json, Value};

use regexgrid_core::{
    read_table, run_transform, write_table, OutputFormat, TransformOutcome, TransformPreview,
    TransformRequest,
};

use super::error::ApiError;
use super::AppState;

pub const MISSING_PARTS: &str = "file and payload are required";

/// The parts of a transform form we care about.
#[derive(Debug, Default)]
struct Upload {
    file_name: String,
    file: Bytes,
    payload: String,
    format: Option<String>,
}

async fn read_upload(multipart: Result<Multipart, MultipartRejection>) -> Result<Upload, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Request is not a usable multipart form: {}", e);
        ApiError::input(MISSING_PARTS)
    })?;

    let mut upload = Upload::default();
    let mut saw_file = false;
    let mut saw_payload = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::input(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field.file_name().unwrap_or_default().to_string();
                upload.file = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::input(format!("Invalid multipart body: {}", e)))?;
                saw_file = true;
            }
            "payload" => {
                upload.payload = field
                    .text()
                    .await
                    .map_err(|e| ApiError::input(format!("Invalid multipart body: {}", e)))?;
                saw_payload = true;
            }
            "format" => {
                let format = field
                    .text()
                    .await
                    .map_err(|e| ApiError::input(format!("Invalid multipart body: {}", e)))?;
                upload.format = Some(format);
            }
            other => debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    if !saw_file || !saw_payload || upload.file.is_empty() || upload.payload.trim().is_empty() {
        return Err(ApiError::input(MISSING_PARTS));
    }
    Ok(upload)
}

async fn process(state: &AppState, upload: &Upload) -> Result<TransformOutcome, ApiError> {
    let table = read_table(&upload.file, &upload.file_name)?;
    let request = TransformRequest::from_json(&upload.payload)?;
    Ok(run_transform(&state.synthesizer, table, &request).await?)
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "regexgrid backend is running",
        "endpoints": ["/health", "/api/transform", "/api/download"],
    }))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/transform`: JSON preview of the first rows before and after.
pub async fn transform(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TransformPreview>, ApiError> {
    let upload = read_upload(multipart).await?;
    let outcome = process(&state, &upload).await?;
    info!(
        "Transform of '{}' applied to {} column(s).",
        upload.file_name,
        outcome.columns_applied.len()
    );
    Ok(Json(TransformPreview::from_outcome(&outcome, state.preview_rows)))
}

/// `POST /api/download`: the whole transformed table as CSV or XLSX.
pub async fn download(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let format = upload
        .format
        .as_deref()
        .map(OutputFormat::parse)
        .unwrap_or_default();
    let outcome = process(&state, &upload).await?;
    let body = write_table(&outcome.output, format)?;

    info!(
        "Serving {} ({} bytes) for '{}'.",
        format.file_name(),
        body.len(),
        upload.file_name
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}
