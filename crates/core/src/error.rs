//! Error types for the Sportello domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context
//! (file ingestion, web ingestion) has its own enum; every variant maps to
//! one of the failure kinds the router renders as a single localized line.
//! Recovery paths (Latin-1 decode fallback, empty-extraction sentinels) are
//! deliberately *not* errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failures from the file ingestion sub-pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("extraction failed: {0}")]
    Parse(String),
}

/// Failures from the web ingestion sub-pipeline.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("empty query")]
    EmptyQuery,
}
