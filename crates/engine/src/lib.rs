//! Engine trait — the abstraction over the local generative-text backend.
//!
//! An Engine takes a fully assembled prompt and returns the model's reply
//! as plain text. The contract is deliberately **total**: whatever goes
//! wrong (missing binary, crashed process, empty output), the caller gets a
//! displayable string back, never an error. The router relies on this —
//! every failure surfaces exactly once, as the response to the line that
//! caused it.

use async_trait::async_trait;
use sportello_core::Lang;

pub mod ollama;

pub use ollama::OllamaEngine;

/// A blocking text-in/text-out generative engine.
///
/// `lang` is the effective language of the current line; implementations
/// use it only to localize sentinels and diagnostic prefixes.
#[async_trait]
pub trait Engine: Send + Sync {
    /// A human-readable name for this engine (e.g. "ollama").
    fn name(&self) -> &str;

    /// Send a prompt to `model` and wait for the complete reply.
    ///
    /// Runs to completion — no timeout, no cancellation, no retry.
    async fn invoke(&self, model: &str, prompt: &str, lang: Lang) -> String;
}
