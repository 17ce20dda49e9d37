//! Shipment documents.

use chrono::{DateTime, Utc};
use serde::Serialize;

use smart_shipping_core::{DocumentId, DocumentStatus, ShipmentId};

/// A `documents` row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub shipment_id: ShipmentId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub doc_type: String,
    pub filename: String,
    pub url: Option<String>,
    pub status: DocumentStatus,
    pub uploaded_at: DateTime<Utc>,
}

/// Input for recording an uploaded document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub shipment_id: ShipmentId,
    pub doc_type: String,
    pub filename: String,
    pub url: String,
}

/// Storage URL recorded for an upload. There is no blob store behind it.
#[must_use]
pub fn mock_document_url(shipment_id: ShipmentId, filename: &str) -> String {
    format!("https://udocs.example.com/{shipment_id}/{filename}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_url_embeds_shipment_and_filename() {
        assert_eq!(
            mock_document_url(ShipmentId::new(12), "invoice.pdf"),
            "https://udocs.example.com/12/invoice.pdf"
        );
    }
}
