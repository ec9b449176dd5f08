//! Typed commands — the validating parse step in front of the router.
//!
//! Raw slash input is tokenized into `{verb, rest}` on the first whitespace
//! run and turned into a closed [`Command`] variant before anything
//! executes. Validation failures are typed too ([`ParseError`]), so the
//! router renders them as localized usage lines without re-inspecting the
//! input.

use sportello_core::{Lang, LangPref, Mode};

/// One parsed, validated command. Every variant carries exactly the
/// arguments its handler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Status,
    SetMode(Mode),
    SetLang(LangPref),
    /// Accepts any non-empty string verbatim — the deliberate escape hatch
    /// for user-supplied engine configuration.
    SetModel(String),
    Ticket,
    Checknet,
    Translate(Lang),
    /// `/file`, `/pdf`, and `/docx` all map here; the kind is sniffed from
    /// the file extension, not from the verb.
    LoadFile(String),
    SummarizeFile,
    AskFile(String),
    WebSearch(String),
    ReadUrl(String),
    SetWebmode(bool),
}

/// Why a slash line failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    ModeUsage,
    ModeInvalid,
    LangUsage,
    LangInvalid,
    ModelUsage,
    TranslateUsage,
    FileUsage,
    AskFileUsage,
    WebUsage,
    ReadUsage,
    WebmodeUsage,
    WebmodeInvalid,
    Unknown,
}

impl Command {
    /// Parse a slash-prefixed line. Verb matching is case-insensitive;
    /// the argument keeps its original casing.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let verb = parts.next().unwrap_or("").to_lowercase();
        let rest = parts.next().map(str::trim).unwrap_or("");

        match verb.as_str() {
            "/reset" => Ok(Command::Reset),
            "/sum" | "/status" => Ok(Command::Status),
            "/mode" => {
                if rest.is_empty() {
                    return Err(ParseError::ModeUsage);
                }
                Mode::parse(rest)
                    .map(Command::SetMode)
                    .ok_or(ParseError::ModeInvalid)
            }
            "/lang" => {
                if rest.is_empty() {
                    return Err(ParseError::LangUsage);
                }
                LangPref::parse(rest)
                    .map(Command::SetLang)
                    .ok_or(ParseError::LangInvalid)
            }
            "/model" => {
                if rest.is_empty() {
                    return Err(ParseError::ModelUsage);
                }
                Ok(Command::SetModel(rest.to_string()))
            }
            "/ticket" => Ok(Command::Ticket),
            "/checknet" => Ok(Command::Checknet),
            "/translate" => Lang::parse(rest)
                .map(Command::Translate)
                .ok_or(ParseError::TranslateUsage),
            "/file" | "/pdf" | "/docx" => {
                if rest.is_empty() {
                    return Err(ParseError::FileUsage);
                }
                Ok(Command::LoadFile(rest.to_string()))
            }
            "/filesum" => Ok(Command::SummarizeFile),
            "/askfile" => {
                if rest.is_empty() {
                    return Err(ParseError::AskFileUsage);
                }
                Ok(Command::AskFile(rest.to_string()))
            }
            "/web" => {
                if rest.is_empty() {
                    return Err(ParseError::WebUsage);
                }
                Ok(Command::WebSearch(rest.to_string()))
            }
            "/read" => {
                if rest.is_empty() {
                    return Err(ParseError::ReadUsage);
                }
                Ok(Command::ReadUrl(rest.to_string()))
            }
            "/webmode" => {
                if rest.is_empty() {
                    return Err(ParseError::WebmodeUsage);
                }
                match rest.to_lowercase().as_str() {
                    "on" => Ok(Command::SetWebmode(true)),
                    "off" => Ok(Command::SetWebmode(false)),
                    _ => Err(ParseError::WebmodeInvalid),
                }
            }
            _ => Err(ParseError::Unknown),
        }
    }
}
