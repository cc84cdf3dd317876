//! Response bodies.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeResponse {
    /// Current server time, ISO-8601 in UTC with millisecond precision.
    pub time: String,
}
