//! PDF extraction — page-bounded, tolerant of per-page failures.
//!
//! A scanned or damaged page must never abort the whole read: each page
//! gets its own [`PageOutcome`], and the document text is assembled from
//! the pages that yielded something. Only when *every* page comes back
//! empty or failed does the result degrade to a sentinel string — still
//! not an error.

use sportello_core::{IngestError, Lang, locale};
use std::path::Path;
use tracing::{debug, warn};

/// Result of extracting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page yielded text.
    Text(String),
    /// Extraction succeeded but produced nothing (image-only page).
    Empty,
    /// Extraction failed; the reason is kept for logging.
    Failed(String),
}

/// Extract up to `max_pages` pages, one outcome per page, in page order.
pub fn extract_pages(
    path: &Path,
    max_pages: usize,
) -> Result<Vec<(u32, PageOutcome)>, IngestError> {
    let doc =
        lopdf::Document::load(path).map_err(|e| IngestError::Parse(format!("pdf: {e}")))?;

    let mut outcomes = Vec::new();
    for (&page, _) in doc.get_pages().iter().take(max_pages) {
        let outcome = match doc.extract_text(&[page]) {
            Ok(text) if !text.trim().is_empty() => PageOutcome::Text(text),
            Ok(_) => PageOutcome::Empty,
            Err(e) => {
                warn!(page, error = %e, "page extraction failed, continuing");
                PageOutcome::Failed(e.to_string())
            }
        };
        outcomes.push((page, outcome));
    }
    Ok(outcomes)
}

/// Join extracted pages into the document text, `--- Pagina N ---` headers
/// between them. All-empty input yields the localized sentinel.
pub fn assemble(outcomes: &[(u32, PageOutcome)], lang: Lang) -> String {
    let sections: Vec<String> = outcomes
        .iter()
        .filter_map(|(page, outcome)| match outcome {
            PageOutcome::Text(text) => Some(format!("\n--- Pagina {page} ---\n{text}")),
            PageOutcome::Empty | PageOutcome::Failed(_) => None,
        })
        .collect();

    if sections.is_empty() {
        locale::pdf_empty_sentinel(lang).to_string()
    } else {
        sections.join("\n")
    }
}

/// Full pipeline: extract page outcomes, assemble the document text.
pub fn extract(path: &Path, lang: Lang, max_pages: usize) -> Result<String, IngestError> {
    let outcomes = extract_pages(path, max_pages)?;
    let failed = outcomes
        .iter()
        .filter(|(_, o)| matches!(o, PageOutcome::Failed(_)))
        .count();
    debug!(
        pages = outcomes.len(),
        failed,
        path = %path.display(),
        "pdf extraction complete"
    );
    Ok(assemble(&outcomes, lang))
}
