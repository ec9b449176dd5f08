//! DOCX extraction — paragraph-bounded read of `word/document.xml`.
//!
//! A DOCX file is a zip archive; the body text lives in WordprocessingML
//! paragraphs (`<w:p>`). The reader streams the XML, collects text runs
//! per paragraph, drops blanks, and stops after `max_paras` paragraphs.
//! An empty result degrades to a sentinel string, not an error.

use quick_xml::Reader;
use quick_xml::events::Event;
use sportello_core::{IngestError, Lang, locale};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Extract paragraph text from a DOCX file.
pub fn extract(path: &Path, lang: Lang, max_paras: usize) -> Result<String, IngestError> {
    let file =
        std::fs::File::open(path).map_err(|e| IngestError::Parse(format!("docx: {e}")))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| IngestError::Parse(format!("docx: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| IngestError::Parse(format!("docx: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| IngestError::Parse(format!("docx: {e}")))?;

    debug!(path = %path.display(), xml_bytes = xml.len(), "docx body read");
    Ok(paragraphs_from_xml(&xml, max_paras, lang))
}

/// Collect up to `max_paras` paragraphs from WordprocessingML, blanks
/// dropped. A malformed tail ends the scan with whatever was collected.
pub(crate) fn paragraphs_from_xml(xml: &str, max_paras: usize, lang: Lang) -> String {
    let mut reader = Reader::from_str(xml);
    let mut paras: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_para = false;
    let mut seen = 0usize;

    loop {
        if seen >= max_paras {
            break;
        }
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:p" => {
                in_para = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                seen += 1;
                if in_para && !current.trim().is_empty() {
                    paras.push(current.trim().to_string());
                }
                in_para = false;
            }
            // Self-closing `<w:p/>` — an empty paragraph still counts
            // toward the bound.
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" => {
                seen += 1;
            }
            Ok(Event::Text(t)) if in_para => {
                if let Ok(text) = t.xml_content() {
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    if paras.is_empty() {
        locale::docx_empty_sentinel(lang).to_string()
    } else {
        paras.join("\n")
    }
}
