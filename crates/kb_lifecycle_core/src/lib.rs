//! Shared Bedrock Knowledge Base lifecycle primitives.
//!
//! This crate owns resource naming, the service ports, and the ordered
//! cleanup and setup procedures. It intentionally excludes AWS SDK and tokio
//! runtime concerns; `kb_lifecycle_aws` provides the adapters.

pub mod cleanup;
pub mod confirm;
pub mod error;
pub mod policy;
pub mod ports;
pub mod report;
pub mod resources;
pub mod setup;
