//! Server time endpoint

use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::models::TimeResponse;

/// GET /api/time
pub async fn now() -> Json<TimeResponse> {
    Json(TimeResponse {
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
