//! Text generation backend: an external-process capability.
//!
//! The agent never links a model runtime. It shells out to a local backend
//! binary (Ollama by default): `<binary> list` for model discovery and
//! `<binary> run <model> <prompt>` for generation. The prompt travels as a
//! single argv element, so embedded text cannot break the invocation's
//! quoting; composition-level escaping lives in [`crate::prompts`].

use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Failure modes of the external backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend binary could not be spawned or produced no readable output.
    #[error("failed to run backend process: {0}")]
    Process(#[from] std::io::Error),

    /// The backend ran but exited unsuccessfully.
    #[error("backend exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// Model discovery returned no usable identifiers. Fatal at startup.
    #[error("no models reported by the backend")]
    NoModels,

    /// The in-flight generation was interrupted.
    #[error("generation cancelled")]
    Cancelled,
}

/// External text generation capability.
#[async_trait]
pub trait TextGenerationBackend: Send + Sync {
    /// Ordered list of available model identifiers.
    async fn list_models(&self) -> Result<Vec<String>, BackendError>;

    /// Generate text for `prompt` with the given model. Blocks the current
    /// turn until the backend returns, fails, or is cancelled by an
    /// interrupt signal.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError>;
}

/// Parse `list` output: one entry per line, header line skipped, first
/// whitespace-delimited token per line is the model identifier.
pub fn parse_model_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Backend over a local `ollama`-style binary.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    binary: String,
}

impl OllamaBackend {
    pub fn new() -> Self {
        Self::with_binary("ollama")
    }

    /// Use a different backend binary with the same command surface.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationBackend for OllamaBackend {
    async fn list_models(&self) -> Result<Vec<String>, BackendError> {
        let output = Command::new(&self.binary).arg("list").output().await?;
        if !output.status.success() {
            return Err(BackendError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let models = parse_model_list(&String::from_utf8_lossy(&output.stdout));
        if models.is_empty() {
            return Err(BackendError::NoModels);
        }
        tracing::debug!(count = models.len(), "backend models discovered");
        Ok(models)
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("run")
            .arg(model)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn()?;
        tracing::debug!(model, prompt_bytes = prompt.len(), "generation started");

        tokio::select! {
            result = child.wait_with_output() => {
                let output = result?;
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
                } else {
                    Err(BackendError::Failed {
                        status: output.status,
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    })
                }
            }
            _ = tokio::signal::ctrl_c() => {
                // Dropping the in-flight future tears down the child
                // (kill_on_drop); the stage sees a clean cancellation.
                tracing::warn!(model, "generation interrupted");
                Err(BackendError::Cancelled)
            }
        }
    }
}
