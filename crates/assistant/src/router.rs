//! Command dispatch — the only place session state is mutated.
//!
//! Every arm returns one localized response line (or the engine's reply).
//! Preconditions are checked before any engine or network call, and a
//! failing command leaves the session exactly as it was.

use crate::command::{Command, ParseError};
use crate::templates;
use crate::Assistant;
use sportello_core::{Lang, WebSource, clip, locale};
use tracing::warn;

/// Render a parse failure as the localized usage / help line.
pub(crate) fn render_parse_error(lang: Lang, err: ParseError) -> String {
    match err {
        ParseError::ModeUsage => locale::MODE_USAGE.into(),
        ParseError::ModeInvalid => locale::mode_invalid(lang).into(),
        ParseError::LangUsage => locale::LANG_USAGE.into(),
        ParseError::LangInvalid => locale::lang_invalid(lang).into(),
        ParseError::ModelUsage => locale::MODEL_USAGE.into(),
        ParseError::TranslateUsage => locale::TRANSLATE_USAGE.into(),
        ParseError::FileUsage => locale::FILE_USAGE.into(),
        ParseError::AskFileUsage => locale::askfile_usage(lang).into(),
        ParseError::WebUsage => locale::web_usage(lang).into(),
        ParseError::ReadUsage => locale::READ_USAGE.into(),
        ParseError::WebmodeUsage => locale::WEBMODE_USAGE.into(),
        ParseError::WebmodeInvalid => locale::webmode_invalid(lang).into(),
        ParseError::Unknown => locale::help(lang).into(),
    }
}

impl Assistant {
    pub(crate) async fn dispatch(&mut self, command: Command, lang: Lang) -> String {
        match command {
            Command::Reset => {
                self.session.reset();
                locale::reset_done(lang).into()
            }

            Command::Status => locale::status_line(
                lang,
                self.session.mode,
                self.session.lang_pref,
                &self.session.model,
                self.session.webmode,
                self.session.document.is_some(),
                self.session.turn_count(),
                self.config.max_turns,
            ),

            Command::SetMode(mode) => {
                self.session.mode = mode;
                locale::mode_set(lang, mode)
            }

            Command::SetLang(pref) => {
                self.session.lang_pref = pref;
                locale::lang_set(lang, pref)
            }

            Command::SetModel(name) => {
                self.session.model = name;
                locale::model_set(lang, &self.session.model)
            }

            Command::Ticket => templates::ticket(lang).into(),

            Command::Checknet => templates::checknet(lang).into(),

            Command::Translate(target) => {
                let Some(last) = self.session.last_answer.as_deref() else {
                    return locale::translate_nothing(lang).into();
                };
                let prompt = sportello_prompt::translation(last, target);
                self.engine.invoke(&self.session.model, &prompt, lang).await
            }

            Command::LoadFile(raw_path) => {
                match sportello_ingest::load_document(&raw_path, lang, &self.config.limits) {
                    Ok(doc) => {
                        let confirmation = locale::file_loaded(lang, doc.kind, &doc.path);
                        self.session.document = Some(doc);
                        confirmation
                    }
                    Err(e) => locale::file_error(lang, &e),
                }
            }

            Command::SummarizeFile => {
                let Some(doc) = self.session.document.as_ref() else {
                    return locale::no_document(lang).into();
                };
                let prompt = sportello_prompt::document_summary(
                    doc,
                    lang,
                    self.config.limits.file_max_chars,
                );
                self.engine.invoke(&self.session.model, &prompt, lang).await
            }

            Command::AskFile(question) => {
                let Some(doc) = self.session.document.as_ref() else {
                    return locale::no_document(lang).into();
                };
                let prompt = sportello_prompt::document_question(
                    doc,
                    &question,
                    lang,
                    self.config.limits.file_max_chars,
                );
                self.engine.invoke(&self.session.model, &prompt, lang).await
            }

            Command::WebSearch(query) => {
                let results = match self.search.search(&query, self.config.web.top_k).await {
                    Ok(results) => results,
                    Err(e) => {
                        warn!(error = %e, "web search failed");
                        Vec::new()
                    }
                };
                if results.is_empty() {
                    return locale::web_no_results(lang).into();
                }
                let prompt = sportello_prompt::web_answer(&query, &results, lang);
                let answer = self.engine.invoke(&self.session.model, &prompt, lang).await;
                self.session.web_sources = results;
                self.session.last_answer = Some(answer.clone());
                answer
            }

            Command::ReadUrl(url) => {
                let text = match self.fetcher.fetch_text(&url).await {
                    Ok(text) => text,
                    Err(e) => return locale::read_error(lang, &e),
                };
                let excerpt = clip(
                    &text,
                    self.config.web.max_chars,
                    locale::truncation_marker(lang),
                );
                let sources = vec![WebSource {
                    title: locale::read_page_title(lang).into(),
                    url,
                    excerpt,
                }];
                let question = locale::read_page_question(lang);
                let prompt = sportello_prompt::web_answer(question, &sources, lang);
                let answer = self.engine.invoke(&self.session.model, &prompt, lang).await;
                self.session.web_sources = sources;
                self.session.last_answer = Some(answer.clone());
                answer
            }

            Command::SetWebmode(enabled) => {
                self.session.webmode = enabled;
                locale::webmode_set(enabled)
            }
        }
    }
}
