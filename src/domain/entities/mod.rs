//! Core domain entities representing the business data model.
//!
//! - [`ShortUrl`] - A shortened URL row owned by exactly one shard
//!
//! Entities are plain data structures without business logic. The click event
//! lives in [`crate::domain::click_event`] since it doubles as the queue wire
//! format.

pub mod short_url;

pub use short_url::ShortUrl;
