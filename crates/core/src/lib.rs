//! # Sportello Core
//!
//! Domain types and pure logic for the Sportello console assistant:
//! session state, languages and modes, the language-detection heuristic,
//! the clipping primitive, error definitions, and the bilingual response
//! catalog.
//!
//! This crate has **zero framework dependencies** — it defines the domain
//! model that the engine, ingestion, prompt, and assistant crates implement
//! against. Everything here is synchronous and deterministic.

pub mod error;
pub mod lang;
pub mod locale;
pub mod session;
pub mod text;

// Re-export key types at crate root for ergonomics
pub use error::{IngestError, WebError};
pub use lang::{Lang, LangPref, Mode, detect};
pub use session::{DocKind, Document, Session, Speaker, Turn, WebSource};
pub use text::clip;
