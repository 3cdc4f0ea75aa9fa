//! Data Transfer Objects for the HTTP API.

pub mod health;
pub mod shorten;
pub mod stats;

pub use health::HealthResponse;
pub use shorten::{ShortenRequest, ShortenResponse};
pub use stats::StatsResponse;
