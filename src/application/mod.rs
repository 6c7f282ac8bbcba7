//! Application layer orchestrating domain values and infrastructure collaborators.
//!
//! # Modules
//!
//! - [`services`] - Request-flow services used by the HTTP handlers

pub mod services;
