//! Domain layer containing business entities and logic.
//!
//! This module defines the core model of the service independent of
//! infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`sharding`] - Shard selection policy
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Non-blocking click hand-off and the publisher loop
//!
//! # Design Principles
//!
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Shard assignment is a pure function of the owner id, never of the code
//! - Workflow logic lives in services (see [`crate::application`])

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod sharding;
