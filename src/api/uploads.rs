//! Upload Routes
//!
//! Single-file ingestion and static retrieval of stored assets.
//!
//! Uploads land in a flat directory under generated names; the returned URL
//! is built from the inbound request's own scheme and host so the same
//! client can fetch it back without a configured server address.
//!
//! Routes:
//! - POST /upload - Ingest one multipart file part
//! - GET /uploads/:filename - Serve a stored file

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Host, Multipart, Path, State},
    http::{header, HeaderMap},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{config, AppState, Error, Result};

/// Multipart field the file part is expected under.
const FILE_FIELD: &str = "files";

/// Build upload routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/uploads/:filename", get(serve_upload))
        .layer(DefaultBodyLimit::max(config().storage.max_upload_size))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Upload response: the sole contract returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Ingest a single uploaded file.
///
/// POST /upload
///
/// Accepts multipart/form-data with one file part in the `files` field.
/// Parts under other field names are ignored. A request with no file part
/// is rejected with 400 before anything touches disk.
#[axum::debug_handler]
async fn upload_file(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let config = config();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name != FILE_FIELD {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".into());

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());

        // Read file data
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidInput(format!("Failed to read file: {}", e)))?;

        if data.len() > config.storage.max_upload_size {
            return Err(Error::FileTooLarge {
                max_size: config.storage.max_upload_size,
            });
        }

        // Write bytes verbatim; content is trusted as declared by the transport
        let extension = file_extension(&filename);
        let id = state.store.put(&data, extension.as_deref()).await?;

        tracing::info!(
            "Uploaded {} ({}, {} bytes) as {}",
            filename,
            content_type,
            data.len(),
            id
        );

        let url = format!("{}://{}/uploads/{}", request_scheme(&headers), host, id);
        return Ok(Json(UploadResponse { url }));
    }

    Err(Error::MissingFile)
}

/// Serve a stored file.
///
/// GET /uploads/:filename
///
/// Returns the raw bytes with a content type inferred from the file
/// extension. Unknown filenames yield 404.
#[axum::debug_handler]
async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let data = state
        .store
        .get(&filename)
        .await?
        .ok_or_else(|| Error::FileNotFound(filename.clone()))?;

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| Error::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Scheme the client reached us over. Proxies announce https via
/// X-Forwarded-Proto; a direct connection is plain http.
fn request_scheme(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http")
}

/// Get file extension from filename.
fn file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
