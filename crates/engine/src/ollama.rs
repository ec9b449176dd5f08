//! Ollama engine — invokes a local model through the `ollama` CLI.
//!
//! Runs `ollama run <model>` as a subprocess, writes the prompt to its
//! stdin, and captures stdout as the reply. If the process produces no
//! output but writes diagnostics, the diagnostics become the visible
//! response, prefixed to mark them as an error; if both streams are empty,
//! a localized "no response" sentinel is returned. Spawn failures take the
//! same diagnostic path — `invoke` never raises.

use async_trait::async_trait;
use sportello_core::{Lang, locale};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::Engine;

/// Engine backed by the `ollama` command-line tool.
pub struct OllamaEngine {
    program: String,
}

impl OllamaEngine {
    pub fn new() -> Self {
        Self {
            program: "ollama".into(),
        }
    }

    /// Override the executable. Used by tests to substitute a stub binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OllamaEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for OllamaEngine {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn invoke(&self, model: &str, prompt: &str, lang: Lang) -> String {
        debug!(model = %model, prompt_chars = prompt.chars().count(), "invoking engine");

        let spawned = Command::new(&self.program)
            .arg("run")
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %self.program, error = %e, "engine spawn failed");
                return format!("{} {e}", locale::engine_error_prefix(lang));
            }
        };

        // Feed the prompt from a separate task while draining the output
        // pipes, so a large prompt cannot deadlock on pipe back-pressure.
        // Dropping stdin afterwards gives the model its EOF.
        let stdin = child.stdin.take();
        let prompt_bytes = prompt.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            if let Some(mut stdin) = stdin {
                if let Err(e) = stdin.write_all(&prompt_bytes).await {
                    warn!(error = %e, "failed writing prompt to engine stdin");
                }
            }
        });

        let output = match child.wait_with_output().await {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "engine process wait failed");
                return format!("{} {e}", locale::engine_error_prefix(lang));
            }
        };
        let _ = writer.await;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if stdout.is_empty() && !stderr.is_empty() {
            return format!("{} {stderr}", locale::engine_error_prefix(lang));
        }
        if stdout.is_empty() {
            return locale::engine_no_response(lang).to_string();
        }
        stdout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write an executable shell stub and return its path.
    #[cfg(unix)]
    fn stub_engine(dir: &tempfile::TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.path().join("engine-stub.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_returned_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        // Ignore the run/model args, echo stdin back.
        let engine = OllamaEngine::with_program(stub_engine(&dir, "cat -"));
        let reply = engine.invoke("llama3.2", "hello engine\n", Lang::It).await;
        assert_eq!(reply, "hello engine");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_surfaces_as_prefixed_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let engine =
            OllamaEngine::with_program(stub_engine(&dir, "echo 'model not found' >&2; exit 1"));
        let reply = engine.invoke("ghost", "hi", Lang::It).await;
        assert!(reply.starts_with("[Errore Ollama]"));
        assert!(reply.contains("model not found"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn silent_engine_yields_localized_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let engine = OllamaEngine::with_program(stub_engine(&dir, "exit 0"));
        assert_eq!(engine.invoke("m", "p", Lang::It).await, "[Nessuna risposta]");
        assert_eq!(engine.invoke("m", "p", Lang::Es).await, "[Sin respuesta]");
    }

    #[tokio::test]
    async fn missing_binary_never_raises() {
        let engine = OllamaEngine::with_program("/nonexistent/sportello-engine-test");
        let reply = engine.invoke("llama3.2", "hi", Lang::Es).await;
        assert!(reply.starts_with("[Error de Ollama]"));
    }
}
