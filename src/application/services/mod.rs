//! Workflow services for the application layer.

pub mod rate_limiter;
pub mod resolve_service;
pub mod shorten_service;

pub use rate_limiter::FixedWindowLimiter;
pub use resolve_service::{ResolveService, Resolution};
pub use shorten_service::ShortenService;
