//! Container tracking route.

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::extract::ApiQuery;
use super::require;
use crate::error::Result;
use crate::services::tracking::{self, Tracking};

/// Query of `GET /api/tracking/search`.
#[derive(Debug, Default, Deserialize)]
pub struct TrackingQuery {
    pub id: Option<String>,
}

/// Response of `GET /api/tracking/search`.
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub success: bool,
    pub tracking: Tracking,
}

/// Live position and milestones of a container or booking.
///
/// GET /api/tracking/search?id=
///
/// # Errors
///
/// Returns 400 if `id` is missing or blank.
pub async fn search(ApiQuery(query): ApiQuery<TrackingQuery>) -> Result<Json<TrackingResponse>> {
    let id = require(query.id.as_deref(), "Tracking ID")?;

    Ok(Json(TrackingResponse {
        success: true,
        tracking: tracking::track(id, Utc::now()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_blank_id_is_rejected() {
        let query = TrackingQuery {
            id: Some("  ".to_string()),
        };
        let err = search(ApiQuery(query)).await.err();
        assert!(
            matches!(err, Some(AppError::BadRequest(ref m)) if m == "Tracking ID is required")
        );
    }

    #[tokio::test]
    async fn test_known_shape_for_any_id() {
        let query = TrackingQuery {
            id: Some("MSKU1234567".to_string()),
        };
        let Ok(Json(body)) = search(ApiQuery(query)).await else {
            panic!("tracking lookup failed");
        };
        assert!(body.success);
        assert_eq!(body.tracking.id, "MSKU1234567");
    }
}
