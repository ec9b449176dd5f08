//! Session state — the single mutable record of assistant configuration
//! and recent interaction state for one running process.
//!
//! There is exactly one `Session` per process. It is owned by the assistant
//! and passed by mutable reference into every router and ingestion call —
//! no globals. Nothing here is persisted: the record lives from process
//! start to process exit, with `reset()` clearing interaction state while
//! preserving configuration.

use crate::lang::{Lang, LangPref, Mode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One user or assistant message stored in history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
        }
    }

    /// Render as a prompt line. The labels are part of the wire format the
    /// model was prompted with from day one and are not localized.
    pub fn render(&self) -> String {
        match self.speaker {
            Speaker::User => format!("Utente: {}", self.content),
            Speaker::Assistant => format!("Assistente: {}", self.content),
        }
    }
}

/// The sniffed kind of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Text,
    Pdf,
    Docx,
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DocKind::Text => "text",
            DocKind::Pdf => "pdf",
            DocKind::Docx => "docx",
        })
    }
}

/// The currently loaded document. Last-write-wins: loading a new file
/// replaces the whole tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub kind: DocKind,
    pub path: PathBuf,
}

/// One web source: a search hit, or the synthetic source built by `/read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub title: String,
    pub url: String,
    pub excerpt: String,
}

/// Process-lifetime mutable session record.
#[derive(Debug, Clone)]
pub struct Session {
    /// Active instruction-block family.
    pub mode: Mode,
    /// Language preference; `Auto` recomputes per message.
    pub lang_pref: LangPref,
    /// Engine model identifier, mutable at runtime (`/model`).
    pub model: String,
    /// Append-only turn log. Only the trailing window is ever read.
    history: Vec<Turn>,
    /// Last successful conversational or web-query answer.
    pub last_answer: Option<String>,
    /// Loaded document, if any.
    pub document: Option<Document>,
    /// Sources behind the last `/web` or `/read` answer.
    pub web_sources: Vec<WebSource>,
    /// Auto-search heuristic flag for the conversational path.
    pub webmode: bool,
}

impl Session {
    pub fn new(mode: Mode, lang_pref: LangPref, model: impl Into<String>) -> Self {
        Self {
            mode,
            lang_pref,
            model: model.into(),
            history: Vec::new(),
            last_answer: None,
            document: None,
            web_sources: Vec::new(),
            webmode: false,
        }
    }

    /// Append a turn. History alternates user/assistant by construction:
    /// the conversational path always pushes the user turn and the
    /// assistant turn together.
    pub fn push_turn(&mut self, turn: Turn) {
        self.history.push(turn);
    }

    /// The trailing read window: at most `2 × max_turns` entries, in
    /// original order. Older entries remain stored but are never read
    /// into a prompt.
    pub fn history_window(&self, max_turns: usize) -> &[Turn] {
        let window = max_turns * 2;
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    /// Completed exchanges (user + assistant pairs).
    pub fn turn_count(&self) -> usize {
        self.history.len() / 2
    }

    /// Clear interaction state; configuration (mode, language preference,
    /// model, webmode) survives.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_answer = None;
        self.document = None;
        self.web_sources.clear();
    }

    pub fn effective_lang(&self, text: &str) -> Lang {
        self.lang_pref.effective(text)
    }
}
