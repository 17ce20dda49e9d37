//! Shipment document routes.
//!
//! Uploads are recorded with a mock storage URL; no file content is stored.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smart_shipping_core::ShipmentId;

use super::extract::{ApiJson, ApiPath, lenient_id};
use super::require;
use crate::db::RepositoryError;
use crate::db::documents::DocumentRepository;
use crate::error::{AppError, Result};
use crate::models::document::mock_document_url;
use crate::models::{Document, NewDocument};
use crate::state::AppState;

/// Response of `GET /api/documents/{shipmentId}`.
#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub success: bool,
    pub documents: Vec<Document>,
}

/// Documents attached to a shipment, newest first.
///
/// GET /api/documents/{shipmentId}
///
/// # Errors
///
/// Returns 500 on database failure.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiPath(shipment_id): ApiPath<i32>,
) -> Result<Json<DocumentsResponse>> {
    let documents = DocumentRepository::new(state.pool())
        .list_for_shipment(ShipmentId::new(shipment_id))
        .await?;

    Ok(Json(DocumentsResponse {
        success: true,
        documents,
    }))
}

/// Body of `POST /api/documents/upload`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub shipment_id: Option<ShipmentId>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub filename: Option<String>,
}

/// Response of `POST /api/documents/upload`.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub success: bool,
    pub document: Document,
}

/// Record an uploaded document, pending review.
///
/// POST /api/documents/upload
///
/// # Errors
///
/// Returns 400 if a field is missing, 404 if the shipment does not exist.
#[instrument(skip(state, body))]
pub async fn upload(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UploadDocumentRequest>,
) -> Result<Json<DocumentResponse>> {
    let shipment_id = body
        .shipment_id
        .ok_or_else(|| AppError::BadRequest("shipmentId is required".to_string()))?;
    let doc_type = require(body.doc_type.as_deref(), "type")?.to_string();
    let filename = require(body.filename.as_deref(), "filename")?.to_string();

    let new = NewDocument {
        shipment_id,
        url: mock_document_url(shipment_id, &filename),
        doc_type,
        filename,
    };
    let document = DocumentRepository::new(state.pool())
        .create(&new)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Shipment not found".to_string()),
            other => other.into(),
        })?;

    tracing::info!(document_id = %document.id, shipment_id = %shipment_id, "Document recorded");

    Ok(Json(DocumentResponse {
        success: true,
        document,
    }))
}
