//! Bilingual response-string catalog.
//!
//! Every user-visible line the router produces comes from here, keyed by
//! the effective language of the current message. Centralizing the pairs
//! removes the copy-paste drift that parallel inline literals invite.
//! Usage strings that read identically in Italian and Spanish ("Uso: …")
//! are single constants.

use crate::error::{IngestError, WebError};
use crate::lang::{Lang, LangPref, Mode};
use crate::session::DocKind;
use std::path::Path;

// ── Generic pick helper ────────────────────────────────────────────────

fn pick(lang: Lang, it: &'static str, es: &'static str) -> &'static str {
    match lang {
        Lang::It => it,
        Lang::Es => es,
    }
}

// ── Clipping / sentinels ───────────────────────────────────────────────

/// Marker appended by `clip` when a payload is truncated.
pub fn truncation_marker(lang: Lang) -> &'static str {
    pick(
        lang,
        "\n…(testo tagliato per limite)…",
        "\n…(texto cortado por límite)…",
    )
}

/// Sentinel document text when no PDF page yielded anything.
pub fn pdf_empty_sentinel(lang: Lang) -> &'static str {
    pick(
        lang,
        "(Nessun testo estratto: PDF potrebbe essere scansionato/immagine.)",
        "(No se extrajo texto: el PDF podría ser escaneado/imagen.)",
    )
}

/// Sentinel document text for an empty DOCX.
pub fn docx_empty_sentinel(lang: Lang) -> &'static str {
    pick(
        lang,
        "(Documento vuoto o testo non estratto.)",
        "(Documento vacío o texto no extraído.)",
    )
}

// ── Engine ─────────────────────────────────────────────────────────────

/// Shown when the engine produced neither output nor diagnostics.
pub fn engine_no_response(lang: Lang) -> &'static str {
    pick(lang, "[Nessuna risposta]", "[Sin respuesta]")
}

/// Prefix marking surfaced engine diagnostics as an error.
pub fn engine_error_prefix(lang: Lang) -> &'static str {
    pick(lang, "[Errore Ollama]", "[Error de Ollama]")
}

// ── Router responses ───────────────────────────────────────────────────

pub fn reset_done(lang: Lang) -> &'static str {
    pick(lang, "🧠 Memoria azzerata.", "🧠 Memoria borrada.")
}

#[allow(clippy::too_many_arguments)]
pub fn status_line(
    lang: Lang,
    mode: Mode,
    pref: LangPref,
    model: &str,
    webmode: bool,
    has_document: bool,
    turns: usize,
    max_turns: usize,
) -> String {
    match lang {
        Lang::It => {
            let file = if has_document { "si" } else { "no" };
            format!(
                "📌 Stato: mode={mode}, lang={pref}, model={model}, webmode={webmode}, \
                 file_caricato={file}, turni={turns}/{max_turns}"
            )
        }
        Lang::Es => {
            let file = if has_document { "sí" } else { "no" };
            format!(
                "📌 Estado: mode={mode}, lang={pref}, model={model}, webmode={webmode}, \
                 archivo_cargado={file}, turnos={turns}/{max_turns}"
            )
        }
    }
}

pub const MODE_USAGE: &str = "Uso: /mode helpdesk | /mode tutor";
pub const LANG_USAGE: &str = "Uso: /lang auto | /lang it | /lang es";
pub const MODEL_USAGE: &str = "Uso: /model llama3.2";
pub const TRANSLATE_USAGE: &str = "Uso: /translate it | /translate es";
pub const FILE_USAGE: &str = "Uso: /file <path> | /pdf <path> | /docx <path>";
pub const READ_USAGE: &str = "Uso: /read <url>";
pub const WEBMODE_USAGE: &str = "Uso: /webmode on | /webmode off";

pub fn mode_invalid(lang: Lang) -> &'static str {
    pick(
        lang,
        "Valori validi: helpdesk, tutor",
        "Valores válidos: helpdesk, tutor",
    )
}

pub fn mode_set(lang: Lang, mode: Mode) -> String {
    match lang {
        Lang::It => format!("✅ Modalità impostata: {mode}"),
        Lang::Es => format!("✅ Modo configurado: {mode}"),
    }
}

pub fn lang_invalid(lang: Lang) -> &'static str {
    pick(lang, "Valori validi: auto, it, es", "Valores válidos: auto, it, es")
}

pub fn lang_set(lang: Lang, pref: LangPref) -> String {
    match lang {
        Lang::It => format!("✅ Lingua impostata: {pref}"),
        Lang::Es => format!("✅ Idioma configurado: {pref}"),
    }
}

pub fn model_set(lang: Lang, model: &str) -> String {
    match lang {
        Lang::It => format!("✅ Modello impostato: {model}"),
        Lang::Es => format!("✅ Modelo configurado: {model}"),
    }
}

pub fn translate_nothing(lang: Lang) -> &'static str {
    pick(lang, "Non ho nulla da tradurre.", "No hay nada que traducir.")
}

pub fn no_document(lang: Lang) -> &'static str {
    pick(lang, "Nessun file caricato.", "No hay archivo cargado.")
}

pub fn askfile_usage(lang: Lang) -> &'static str {
    pick(lang, "Uso: /askfile <domanda>", "Uso: /askfile <pregunta>")
}

pub fn web_usage(lang: Lang) -> &'static str {
    pick(lang, "Uso: /web <query>", "Uso: /web <consulta>")
}

pub fn web_no_results(lang: Lang) -> &'static str {
    pick(
        lang,
        "Nessun risultato web trovato.",
        "No se encontraron resultados.",
    )
}

pub fn webmode_invalid(lang: Lang) -> &'static str {
    pick(lang, "Valori validi: on, off", "Valores válidos: on, off")
}

pub fn webmode_set(enabled: bool) -> String {
    format!("✅ Webmode: {enabled}")
}

pub fn file_loaded(lang: Lang, kind: DocKind, path: &Path) -> String {
    match lang {
        Lang::It => format!(
            "✅ File caricato ({kind}): {}\nOra puoi usare: /filesum oppure /askfile <domanda>.",
            path.display()
        ),
        Lang::Es => format!(
            "✅ Archivo cargado ({kind}): {}\nAhora puedes usar: /filesum o /askfile <pregunta>.",
            path.display()
        ),
    }
}

pub fn help(lang: Lang) -> &'static str {
    pick(
        lang,
        "Comandi: /mode /lang /model /reset /sum /ticket /checknet /translate \
         /file /pdf /docx /filesum /askfile /web /read /webmode",
        "Comandos: /mode /lang /model /reset /sum /ticket /checknet /translate \
         /file /pdf /docx /filesum /askfile /web /read /webmode",
    )
}

// ── Error rendering ────────────────────────────────────────────────────

/// One localized line for a file-ingestion failure.
pub fn file_error(lang: Lang, err: &IngestError) -> String {
    let detail = match (lang, err) {
        (Lang::It, IngestError::NotFound(p)) => format!("file non trovato: {}", p.display()),
        (Lang::Es, IngestError::NotFound(p)) => {
            format!("archivo no encontrado: {}", p.display())
        }
        (Lang::It, IngestError::TooLarge { size, limit }) => {
            format!("file troppo grande ({size} bytes, limite {limit})")
        }
        (Lang::Es, IngestError::TooLarge { size, limit }) => {
            format!("archivo demasiado grande ({size} bytes, límite {limit})")
        }
        (Lang::It, IngestError::Parse(msg)) => format!("estrazione fallita: {msg}"),
        (Lang::Es, IngestError::Parse(msg)) => format!("extracción fallida: {msg}"),
    };
    match lang {
        Lang::It => format!("Errore lettura file: {detail}"),
        Lang::Es => format!("Error leyendo archivo: {detail}"),
    }
}

/// One localized line for a URL-fetch failure.
pub fn read_error(lang: Lang, err: &WebError) -> String {
    let detail = match (lang, err) {
        (Lang::It, WebError::Network(e)) => format!("richiesta fallita: {e}"),
        (Lang::Es, WebError::Network(e)) => format!("petición fallida: {e}"),
        (Lang::It, WebError::Status(code)) => format!("stato HTTP {code}"),
        (Lang::Es, WebError::Status(code)) => format!("estado HTTP {code}"),
        (Lang::It, WebError::EmptyQuery) => "query vuota".into(),
        (Lang::Es, WebError::EmptyQuery) => "consulta vacía".into(),
    };
    match lang {
        Lang::It => format!("Errore lettura URL: {detail}"),
        Lang::Es => format!("Error leyendo URL: {detail}"),
    }
}

// ── /read synthetics ───────────────────────────────────────────────────

pub fn read_page_title(lang: Lang) -> &'static str {
    pick(lang, "Pagina letta", "Página leída")
}

pub fn read_page_question(lang: Lang) -> &'static str {
    pick(
        lang,
        "Riassumi e spiega i punti principali della pagina.",
        "Resume y explica los puntos principales de la página.",
    )
}
