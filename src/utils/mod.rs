//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Target URL validation
//! - [`client_ip`] - Client address extraction from requests

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
