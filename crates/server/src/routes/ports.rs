//! Port recommendation route.

use axum::Json;
use serde::{Deserialize, Serialize};

use super::extract::ApiQuery;
use crate::services::ports::{self, Port};

/// Query of `GET /api/ports/recommend`.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    #[serde(default)]
    pub country: String,
}

/// Response of `GET /api/ports/recommend`.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub ports: Vec<Port>,
}

/// Ports for a country, or a manual-entry placeholder when it is unknown.
///
/// GET /api/ports/recommend?country=
pub async fn recommend(ApiQuery(query): ApiQuery<RecommendQuery>) -> Json<RecommendResponse> {
    Json(RecommendResponse {
        success: true,
        ports: ports::recommend(&query.country),
    })
}
