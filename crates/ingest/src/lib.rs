//! Content ingestion pipeline for Sportello.
//!
//! Two independently usable sub-pipelines turn external resources into
//! clipped text usable inside a prompt:
//!
//! - **File ingestion** — path normalization → existence/size checks →
//!   extension dispatch (PDF via `lopdf`, DOCX via `zip` + `quick-xml`,
//!   everything else as raw text with a UTF-8 → Latin-1 fallback).
//! - **Web ingestion** — the [`SearchProvider`] and [`PageFetcher`] trait
//!   seams with a DuckDuckGo/reqwest implementation behind them.
//!
//! Everything that can be tested without the network is a pure function
//! over bytes or markup.

pub mod docx;
pub mod file;
pub mod pdf;
pub mod web;

pub use file::{load_document, normalize_path};
pub use pdf::PageOutcome;
pub use web::{PageFetcher, SearchProvider, WebClient};
