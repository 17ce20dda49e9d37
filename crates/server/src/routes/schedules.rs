//! Sailing schedule route.

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::extract::ApiQuery;
use crate::services::schedules::{self, Sailing};

/// Query of `GET /api/schedules/search`.
///
/// The lane is echoed to the logs only; sailings are generated regardless.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub origin: Option<String>,
    pub dest: Option<String>,
}

/// Response of `GET /api/schedules/search`.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub results: Vec<Sailing>,
}

/// Upcoming sailings on a lane.
///
/// GET /api/schedules/search?origin=&dest=
pub async fn search(ApiQuery(query): ApiQuery<ScheduleQuery>) -> Json<ScheduleResponse> {
    let results = schedules::search(&mut rand::rng(), Utc::now().date_naive());

    tracing::debug!(
        origin = query.origin.as_deref().unwrap_or_default(),
        dest = query.dest.as_deref().unwrap_or_default(),
        sailings = results.len(),
        "Generated sailings"
    );

    Json(ScheduleResponse {
        success: true,
        results,
    })
}
