//! Runtime error types
//!
//! Failures inside the request loop are logged and counted rather than
//! returned; these types cover the handle and display seams.

/// Result type for runtime operations
pub type Result<T> = anyhow::Result<T>;

/// Runtime error (application-level, so anyhow)
pub type Error = anyhow::Error;
