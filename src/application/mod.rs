//! Application layer implementing the core workflows.
//!
//! This layer orchestrates domain operations over the repository traits and
//! provides a clean API for HTTP handlers.
//!
//! # Components
//!
//! - [`router::ShardRouter`] - Owner-keyed writes and code-keyed fan-out reads
//! - [`services::ResolveService`] - Cache-aside code resolution
//! - [`services::FixedWindowLimiter`] - Fixed-window write-path rate limiting
//! - [`services::ShortenService`] - The create-URL workflow

pub mod router;
pub mod services;
