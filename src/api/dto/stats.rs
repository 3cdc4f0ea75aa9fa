//! DTOs for the statistics endpoint.

use serde::Serialize;

/// Click statistics for a single code.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub clicks: u64,
}
