//! brainvat interactive binary.
//!
//! # Environment Variables
//!
//! - `BRAINVAT_BACKEND` — backend binary to invoke (default: "ollama")
//! - `RUST_LOG` — tracing filter (default: "info,brainvat=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin brainvat
//! ```

use brainvat::backend::OllamaBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,brainvat=debug".into()),
        )
        .init();

    let binary =
        std::env::var("BRAINVAT_BACKEND").unwrap_or_else(|_| "ollama".to_string());
    let backend = OllamaBackend::with_binary(binary);

    brainvat::cli::run(&backend).await
}
