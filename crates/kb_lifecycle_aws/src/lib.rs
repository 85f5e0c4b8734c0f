//! AWS-oriented adapters and binaries for the knowledge base lifecycle.
//!
//! This crate owns SDK client construction, error classification and the
//! tokio bridge; the procedures themselves live in `kb_lifecycle_core`.

pub mod adapters;
pub mod config;
pub mod context;
pub mod logging;
