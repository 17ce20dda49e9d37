//! HS code lookup route.

use axum::Json;
use serde::{Deserialize, Serialize};

use super::extract::ApiQuery;
use crate::services::hscode::{self, HsCode};

/// Query of `GET /api/hscode/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Response of `GET /api/hscode/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<HsCode>,
}

/// Match HS codes by description or code prefix.
///
/// GET /api/hscode/search?q=
pub async fn search(ApiQuery(query): ApiQuery<SearchQuery>) -> Json<SearchResponse> {
    Json(SearchResponse {
        success: true,
        results: hscode::search(&query.q),
    })
}
