//! Sportello CLI — the interactive terminal entry point.
//!
//! One terminal, one read-eval-print loop, strictly sequential turns: the
//! next line is not read until the previous response has been printed.
//! `exit` / `quit` terminate the loop with code 0.

use clap::Parser;
use sportello_assistant::Assistant;
use sportello_config::AppConfig;
use sportello_engine::OllamaEngine;
use sportello_ingest::WebClient;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "sportello",
    about = "Sportello — assistente console bilingue (Ollama + documenti locali + web)",
    version,
    author
)]
struct Cli {
    /// Override the engine model (e.g. llama3.2, mistral)
    #[arg(short, long)]
    model: Option<String>,

    /// Startup mode: helpdesk | tutor
    #[arg(long)]
    mode: Option<String>,

    /// Startup language: auto | it | es
    #[arg(long)]
    lang: Option<String>,

    /// Enable the web auto-search heuristic at startup
    #[arg(long)]
    webmode: bool,

    /// Explicit config file instead of ~/.sportello/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge flags over the loaded configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(mode) = &self.mode {
            config.mode = mode.clone();
        }
        if let Some(lang) = &self.lang {
            config.lang = lang.clone();
        }
        if self.webmode {
            config.web.webmode = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let mut loaded = AppConfig::load_from(path)?;
            loaded.apply_env_overrides();
            loaded
        }
        None => AppConfig::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;
    debug!(model = %config.model, mode = %config.mode, "configuration ready");

    let web = Arc::new(WebClient::new(Duration::from_secs(config.web.timeout_secs))?);
    let engine = Arc::new(OllamaEngine::new());
    let mut assistant = Assistant::new(config, engine, web.clone(), web);

    {
        let session = assistant.session();
        println!("🤖 Sportello — Helpdesk L2/L3 + Docente (Ollama + web)");
        println!(
            "Avvio: mode={} | lang={} | model={} | webmode={}",
            session.mode, session.lang_pref, session.model, session.webmode
        );
        println!("Comandi: /web <query>  /read <url>  /webmode on|off");
        println!("File: /file <path>  /pdf <path>  /docx <path>  /filesum  /askfile <domanda>");
        println!(
            "Altro: /mode helpdesk|tutor  /lang auto|it|es  /model NOME  /reset /sum /ticket /checknet /translate it|es  | exit\n"
        );
    }

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        {
            use std::io::Write as _;
            print!("Tu: ");
            std::io::stdout().flush()?;
        }

        match lines.next_line().await? {
            Some(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if Assistant::is_exit(&line) {
                    println!("Ciao Ciao 👋");
                    break;
                }
                let reply = assistant.handle_line(&line).await;
                println!("\nBot: {reply}\n");
            }
            None => break, // EOF (Ctrl+D)
        }
    }

    Ok(())
}
