//! Session orchestration for Sportello.
//!
//! The [`Assistant`] owns the single [`Session`] and the trait objects for
//! the engine and the web sub-pipeline. One call, [`Assistant::handle_line`],
//! carries a raw terminal line through the whole flow: language detection →
//! command vs. conversation branch → ingestion → prompt assembly → engine →
//! session update → response string.
//!
//! Strictly sequential: the caller awaits each response before the next
//! line, so the session is touched by exactly one logical actor at a time.

use chrono::Local;
use sportello_config::AppConfig;
use sportello_core::{Lang, LangPref, Mode, Session, Turn};
use sportello_engine::Engine;
use sportello_ingest::{PageFetcher, SearchProvider};
use sportello_prompt::ConversationInput;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod command;
mod router;
pub mod templates;

pub use command::{Command, ParseError};

/// Keywords that let webmode auto-trigger a search from ordinary
/// conversational input.
const WEBMODE_TRIGGERS: [&str; 8] = [
    "cerca",
    "ultime",
    "latest",
    "oggi",
    "notizie",
    "prezzo",
    "versione",
    "documentazione",
];

/// The assistant: session state plus its external collaborators.
pub struct Assistant {
    session: Session,
    config: AppConfig,
    engine: Arc<dyn Engine>,
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
}

impl Assistant {
    /// Build an assistant from configuration and collaborators. Values
    /// outside their domains fall back to defaults — `AppConfig::validate`
    /// has already rejected them at startup.
    pub fn new(
        config: AppConfig,
        engine: Arc<dyn Engine>,
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let mode = Mode::parse(&config.mode).unwrap_or(Mode::Helpdesk);
        let lang_pref = LangPref::parse(&config.lang).unwrap_or(LangPref::Auto);
        let mut session = Session::new(mode, lang_pref, config.model.clone());
        session.webmode = config.web.webmode;
        Self {
            session,
            config,
            engine,
            search,
            fetcher,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// `exit` / `quit`, case-insensitive, terminate the loop.
    pub fn is_exit(line: &str) -> bool {
        matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
    }

    /// Process one terminal line and return the response to print.
    ///
    /// The effective language is resolved once here and threaded through
    /// every downstream call for this line; it is never persisted.
    pub async fn handle_line(&mut self, line: &str) -> String {
        let line = line.trim();
        let lang = self.session.effective_lang(line);
        debug!(lang = %lang, command = line.starts_with('/'), "handling line");

        if line.starts_with('/') {
            return match Command::parse(line) {
                Ok(command) => self.dispatch(command, lang).await,
                Err(e) => router::render_parse_error(lang, e),
            };
        }
        self.converse(line, lang).await
    }

    /// The conversational path: optional webmode auto-search, then the
    /// history-window prompt. History gains the user and assistant turns
    /// as a pair, keeping strict alternation.
    async fn converse(&mut self, message: &str, lang: Lang) -> String {
        if self.session.webmode && wants_web(message) {
            match self.search.search(message, self.config.web.top_k).await {
                Ok(results) if !results.is_empty() => {
                    let prompt = sportello_prompt::web_answer(message, &results, lang);
                    let answer =
                        self.engine.invoke(&self.session.model, &prompt, lang).await;
                    self.session.last_answer = Some(answer.clone());
                    return answer;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "webmode auto-search failed, falling back to conversation");
                }
            }
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let prompt = sportello_prompt::conversation(&ConversationInput {
            mode: self.session.mode,
            lang,
            temperature_hint: self.config.temperature_hint,
            timestamp: &timestamp,
            history: self.session.history_window(self.config.max_turns),
            user_message: message,
        });

        let answer = self.engine.invoke(&self.session.model, &prompt, lang).await;
        self.session.push_turn(Turn::user(message));
        self.session.push_turn(Turn::assistant(answer.clone()));
        self.session.last_answer = Some(answer.clone());
        answer
    }
}

fn wants_web(message: &str) -> bool {
    let m = message.to_lowercase();
    WEBMODE_TRIGGERS.iter().any(|k| m.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sportello_core::{WebError, WebSource};
    use std::io::Write;
    use std::sync::Mutex;

    // ── Mocks ──────────────────────────────────────────────────────────

    /// Engine mock: records every prompt, replies with a fixed string.
    struct MockEngine {
        prompts: Arc<Mutex<Vec<String>>>,
        reply: String,
    }

    impl MockEngine {
        fn new(reply: &str) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
            let prompts = Arc::new(Mutex::new(Vec::new()));
            let engine = Arc::new(Self {
                prompts: prompts.clone(),
                reply: reply.to_string(),
            });
            (engine, prompts)
        }
    }

    #[async_trait]
    impl Engine for MockEngine {
        fn name(&self) -> &str {
            "mock"
        }

        async fn invoke(&self, _model: &str, prompt: &str, _lang: Lang) -> String {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    /// Search mock: returns a canned result list, or fails.
    struct MockSearch {
        results: Result<Vec<WebSource>, ()>,
    }

    impl MockSearch {
        fn with_results(n: usize) -> Arc<Self> {
            let results = (1..=n)
                .map(|i| WebSource {
                    title: format!("Result {i}"),
                    url: format!("https://example.com/{i}"),
                    excerpt: format!("snippet {i}"),
                })
                .collect();
            Arc::new(Self {
                results: Ok(results),
            })
        }

        fn empty() -> Arc<Self> {
            Arc::new(Self {
                results: Ok(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { results: Err(()) })
        }
    }

    #[async_trait]
    impl SearchProvider for MockSearch {
        fn name(&self) -> &str {
            "mock"
        }

        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<WebSource>, WebError> {
            match &self.results {
                Ok(results) => Ok(results.clone()),
                Err(()) => Err(WebError::Network("mock offline".into())),
            }
        }
    }

    /// Fetcher mock: fixed page text, or an HTTP failure.
    struct MockFetcher {
        body: Result<String, u16>,
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch_text(&self, _url: &str) -> Result<String, WebError> {
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(WebError::Status(*status)),
            }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────

    fn assistant(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> (Assistant, Arc<Mutex<Vec<String>>>) {
        let (engine, prompts) = MockEngine::new("una risposta");
        let assistant = Assistant::new(AppConfig::default(), engine, search, fetcher);
        (assistant, prompts)
    }

    fn default_assistant() -> (Assistant, Arc<Mutex<Vec<String>>>) {
        assistant(
            MockSearch::empty(),
            Arc::new(MockFetcher {
                body: Ok("page text".into()),
            }),
        )
    }

    fn prompt_count(prompts: &Arc<Mutex<Vec<String>>>) -> usize {
        prompts.lock().unwrap().len()
    }

    // ── Command dispatch ───────────────────────────────────────────────

    #[tokio::test]
    async fn reset_clears_state_and_confirms() {
        let (mut a, _) = default_assistant();
        a.session_mut().last_answer = Some("x".into());
        let reply = a.handle_line("/reset").await;
        assert_eq!(reply, "🧠 Memoria azzerata.");
        assert!(a.session().last_answer.is_none());
    }

    #[tokio::test]
    async fn status_reports_without_mutation() {
        let (mut a, prompts) = default_assistant();
        let reply = a.handle_line("/sum").await;
        assert!(reply.contains("mode=helpdesk"));
        assert!(reply.contains("model=llama3.2"));
        assert!(reply.contains("turni=0/10"));
        assert_eq!(prompt_count(&prompts), 0);
    }

    #[tokio::test]
    async fn mode_and_lang_and_model_mutate_session() {
        let (mut a, _) = default_assistant();
        a.handle_line("/mode tutor").await;
        assert_eq!(a.session().mode, Mode::Tutor);

        a.handle_line("/lang es").await;
        assert_eq!(a.session().lang_pref, LangPref::Fixed(Lang::Es));

        a.handle_line("/model mistral:7b").await;
        assert_eq!(a.session().model, "mistral:7b");
    }

    #[tokio::test]
    async fn invalid_mode_is_rejected_with_enumerated_values() {
        let (mut a, _) = default_assistant();
        let reply = a.handle_line("/mode wizard").await;
        assert_eq!(reply, "Valori validi: helpdesk, tutor");
        assert_eq!(a.session().mode, Mode::Helpdesk);
    }

    #[tokio::test]
    async fn unknown_command_prints_help() {
        let (mut a, _) = default_assistant();
        let reply = a.handle_line("/frobnicate").await;
        assert!(reply.starts_with("Comandi:"));
    }

    #[tokio::test]
    async fn spanish_line_gets_spanish_responses() {
        let (mut a, _) = default_assistant();
        // "hola" trips the Spanish lexicon even for an unknown command's
        // argument-free line; use an invalid mode with Spanish pinned.
        a.handle_line("/lang es").await;
        let reply = a.handle_line("/mode wizard").await;
        assert_eq!(reply, "Valores válidos: helpdesk, tutor");
    }

    // ── Preconditions ──────────────────────────────────────────────────

    #[tokio::test]
    async fn translate_without_answer_short_circuits() {
        let (mut a, prompts) = default_assistant();
        let reply = a.handle_line("/translate es").await;
        assert_eq!(reply, "Non ho nulla da tradurre.");
        assert_eq!(prompt_count(&prompts), 0);
    }

    #[tokio::test]
    async fn translate_wraps_last_answer() {
        let (mut a, prompts) = default_assistant();
        a.session_mut().last_answer = Some("previous answer".into());
        a.handle_line("/translate es").await;
        let recorded = prompts.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].contains("TEXTO:\nprevious answer"));
    }

    #[tokio::test]
    async fn askfile_without_document_short_circuits() {
        let (mut a, prompts) = default_assistant();
        let reply = a.handle_line("/askfile qual è il totale?").await;
        assert_eq!(reply, "Nessun file caricato.");
        assert_eq!(prompt_count(&prompts), 0);
    }

    #[tokio::test]
    async fn filesum_without_document_short_circuits() {
        let (mut a, prompts) = default_assistant();
        assert_eq!(a.handle_line("/filesum").await, "Nessun file caricato.");
        assert_eq!(prompt_count(&prompts), 0);
    }

    // ── File commands ──────────────────────────────────────────────────

    #[tokio::test]
    async fn load_file_then_askfile_builds_document_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fattura.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Totale: 42 euro").unwrap();

        let (mut a, prompts) = default_assistant();
        let reply = a.handle_line(&format!("/file {}", path.display())).await;
        assert!(reply.starts_with("✅ File caricato (text):"));
        assert!(a.session().document.is_some());

        a.handle_line("/askfile qual è il totale?").await;
        let recorded = prompts.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].contains("Totale: 42 euro"));
        assert!(recorded[0].contains("DOMANDA: qual è il totale?"));
    }

    #[tokio::test]
    async fn failed_load_leaves_document_untouched() {
        let (mut a, _) = default_assistant();
        let reply = a.handle_line("/file /tmp/sportello-missing-9876.txt").await;
        assert!(reply.starts_with("Errore lettura file:"));
        assert!(a.session().document.is_none());
    }

    // ── Web commands ───────────────────────────────────────────────────

    #[tokio::test]
    async fn web_with_zero_results_mutates_nothing() {
        let (mut a, prompts) = assistant(
            MockSearch::empty(),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        let reply = a.handle_line("/web test query").await;
        assert_eq!(reply, "Nessun risultato web trovato.");
        assert!(a.session().web_sources.is_empty());
        assert!(a.session().last_answer.is_none());
        assert_eq!(prompt_count(&prompts), 0);
    }

    #[tokio::test]
    async fn web_failure_reads_as_no_results() {
        let (mut a, prompts) = assistant(
            MockSearch::failing(),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        let reply = a.handle_line("/web test query").await;
        assert_eq!(reply, "Nessun risultato web trovato.");
        assert_eq!(prompt_count(&prompts), 0);
    }

    #[tokio::test]
    async fn web_with_results_cites_by_index() {
        let (mut a, prompts) = assistant(
            MockSearch::with_results(3),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        let reply = a.handle_line("/web versione di rust").await;
        assert_eq!(reply, "una risposta");
        assert_eq!(a.session().web_sources.len(), 3);
        assert_eq!(a.session().last_answer.as_deref(), Some("una risposta"));

        let recorded = prompts.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].contains("[1] Result 1"));
        assert!(recorded[0].contains("[2] Result 2"));
        assert!(recorded[0].contains("[3] Result 3"));
    }

    #[tokio::test]
    async fn web_overwrites_previous_sources() {
        let (mut a, _) = assistant(
            MockSearch::with_results(2),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        a.handle_line("/web first").await;
        a.handle_line("/web second").await;
        assert_eq!(a.session().web_sources.len(), 2);
    }

    #[tokio::test]
    async fn read_url_builds_single_synthetic_source() {
        let (mut a, prompts) = assistant(
            MockSearch::empty(),
            Arc::new(MockFetcher {
                body: Ok("contenuto della pagina".into()),
            }),
        );
        let reply = a.handle_line("/read https://example.com/doc").await;
        assert_eq!(reply, "una risposta");
        assert_eq!(a.session().web_sources.len(), 1);
        let source = &a.session().web_sources[0];
        assert_eq!(source.title, "Pagina letta");
        assert_eq!(source.url, "https://example.com/doc");
        assert_eq!(source.excerpt, "contenuto della pagina");

        let recorded = prompts.lock().unwrap();
        assert!(recorded[0].contains("[1] Pagina letta"));
    }

    #[tokio::test]
    async fn read_failure_reports_status_and_mutates_nothing() {
        let (mut a, prompts) = assistant(
            MockSearch::empty(),
            Arc::new(MockFetcher { body: Err(404) }),
        );
        let reply = a.handle_line("/read https://example.com/gone").await;
        assert!(reply.starts_with("Errore lettura URL:"));
        assert!(reply.contains("404"));
        assert!(a.session().web_sources.is_empty());
        assert_eq!(prompt_count(&prompts), 0);
    }

    // ── Conversational path ────────────────────────────────────────────

    #[tokio::test]
    async fn conversation_appends_turn_pair_and_sets_last_answer() {
        let (mut a, prompts) = default_assistant();
        let reply = a.handle_line("il monitor non si accende").await;
        assert_eq!(reply, "una risposta");
        assert_eq!(a.session().turn_count(), 1);
        assert_eq!(a.session().last_answer.as_deref(), Some("una risposta"));

        let recorded = prompts.lock().unwrap();
        assert!(recorded[0].contains("Utente: il monitor non si accende"));
        assert!(recorded[0].ends_with("Assistente:"));
    }

    #[tokio::test]
    async fn tutor_mode_and_fixed_lang_select_instruction_block() {
        let (mut a, prompts) = default_assistant();
        a.handle_line("/mode tutor").await;
        a.handle_line("/lang it").await;
        a.handle_line("cos'è una subnet?").await;

        let recorded = prompts.lock().unwrap();
        let prompt = recorded.last().unwrap();
        assert!(prompt.contains("Docente senior di informatica"));
        assert!(!prompt.contains("Senior IT Support Engineer"));
        assert!(prompt.contains("lang=it"));
    }

    #[tokio::test]
    async fn conversation_prompt_windows_history() {
        let (mut a, prompts) = default_assistant();
        // 12 exchanges with max_turns = 10 → the prompt must contain the
        // last 20 entries only.
        for i in 0..12 {
            a.handle_line(&format!("messaggio numero {i}")).await;
        }
        let recorded = prompts.lock().unwrap();
        let last_prompt = recorded.last().unwrap();
        // The 12th send: window covers exchanges 1..=11 (20 entries).
        assert!(!last_prompt.contains("Utente: messaggio numero 0"));
        assert!(last_prompt.contains("Utente: messaggio numero 1"));
        assert!(last_prompt.contains("Utente: messaggio numero 10"));
    }

    // ── Webmode heuristic ──────────────────────────────────────────────

    #[tokio::test]
    async fn webmode_triggers_search_on_keywords() {
        let (mut a, prompts) = assistant(
            MockSearch::with_results(2),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        a.handle_line("/webmode on").await;
        let reply = a.handle_line("qual è la versione attuale?").await;
        assert_eq!(reply, "una risposta");

        let recorded = prompts.lock().unwrap();
        assert!(recorded.last().unwrap().contains("FONTI:"));
        // The heuristic path does not touch history.
        drop(recorded);
        assert_eq!(a.session().turn_count(), 0);
    }

    #[tokio::test]
    async fn webmode_off_never_searches() {
        let (mut a, prompts) = assistant(
            MockSearch::with_results(2),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        a.handle_line("qual è la versione attuale?").await;
        let recorded = prompts.lock().unwrap();
        assert!(!recorded.last().unwrap().contains("FONTI:"));
    }

    #[tokio::test]
    async fn webmode_search_failure_falls_back_to_conversation() {
        let (mut a, prompts) = assistant(
            MockSearch::failing(),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        a.handle_line("/webmode on").await;
        let reply = a.handle_line("cerca le ultime notizie").await;
        assert_eq!(reply, "una risposta");

        let recorded = prompts.lock().unwrap();
        // Fell through to the conversational shape.
        assert!(recorded.last().unwrap().ends_with("Assistente:"));
        drop(recorded);
        assert_eq!(a.session().turn_count(), 1);
    }

    #[tokio::test]
    async fn webmode_without_trigger_words_stays_conversational() {
        let (mut a, prompts) = assistant(
            MockSearch::with_results(2),
            Arc::new(MockFetcher {
                body: Ok(String::new()),
            }),
        );
        a.handle_line("/webmode on").await;
        a.handle_line("il mouse non funziona").await;
        let recorded = prompts.lock().unwrap();
        assert!(recorded.last().unwrap().ends_with("Assistente:"));
    }

    // ── Exit tokens ────────────────────────────────────────────────────

    #[test]
    fn exit_tokens_are_case_insensitive() {
        assert!(Assistant::is_exit("exit"));
        assert!(Assistant::is_exit("QUIT"));
        assert!(Assistant::is_exit("  Exit "));
        assert!(!Assistant::is_exit("/reset"));
        assert!(!Assistant::is_exit("exit now"));
    }
}
