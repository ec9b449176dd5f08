//! File ingestion — path normalization, type sniffing, extraction.
//!
//! The entry point is [`load_document`]: normalize the user-supplied path,
//! verify existence, then dispatch on the file extension. Failures are
//! typed ([`IngestError`]) and rendered as one localized line by the
//! router; the document in the session is never touched on failure.

use sportello_config::LimitsConfig;
use sportello_core::{DocKind, Document, IngestError, Lang};
use std::path::PathBuf;
use tracing::debug;

use crate::{docx, pdf};

/// Normalize a user-supplied path: trim surrounding quotes, expand a
/// leading `~`, and substitute `$VAR` / `${VAR}` environment references.
/// Unset variables are left literal.
pub fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim().trim_matches('"').trim_matches('\'');
    let expanded = expand_env(trimmed);

    if expanded == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = expanded.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(expanded)
}

fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        // `${VAR}` form
        if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            match std::env::var(&name) {
                Ok(value) if closed => out.push_str(&value),
                _ => {
                    out.push_str("${");
                    out.push_str(&name);
                    if closed {
                        out.push('}');
                    }
                }
            }
            continue;
        }
        // `$VAR` form
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            out.push('$');
        } else {
            match std::env::var(&name) {
                Ok(value) => out.push_str(&value),
                Err(_) => {
                    out.push('$');
                    out.push_str(&name);
                }
            }
        }
    }
    out
}

/// Load a document from a user-supplied path.
///
/// The `/file`, `/pdf`, and `/docx` commands all land here: the actual
/// kind is sniffed from the extension, not from the verb.
pub fn load_document(
    raw_path: &str,
    lang: Lang,
    limits: &LimitsConfig,
) -> Result<Document, IngestError> {
    let path = normalize_path(raw_path);
    if !path.exists() {
        return Err(IngestError::NotFound(path));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let (text, kind) = match ext.as_str() {
        "pdf" => (pdf::extract(&path, lang, limits.pdf_max_pages)?, DocKind::Pdf),
        "docx" => (
            docx::extract(&path, lang, limits.docx_max_paras)?,
            DocKind::Docx,
        ),
        _ => (read_text(&path, limits.file_read_max_bytes)?, DocKind::Text),
    };

    debug!(path = %path.display(), kind = %kind, chars = text.chars().count(), "document loaded");
    Ok(Document { text, kind, path })
}

/// Raw text read with a hard byte ceiling (checked before any read) and an
/// encoding fallback: UTF-8 first, then Latin-1, which maps every byte to
/// a character and therefore cannot fail.
fn read_text(path: &std::path::Path, max_bytes: u64) -> Result<String, IngestError> {
    let size = std::fs::metadata(path)
        .map_err(|e| IngestError::Parse(e.to_string()))?
        .len();
    if size > max_bytes {
        return Err(IngestError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| IngestError::Parse(e.to_string()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(path = %path.display(), "not valid UTF-8, decoding as Latin-1");
            Ok(e.into_bytes().iter().map(|&b| b as char).collect())
        }
    }
}
