//! # brainvat
//!
//! An interactive command-line agent that carries a multi-turn dialogue by
//! driving a local text-generation backend through a two-stage prompting
//! pipeline: a private reflection followed by the user-facing response.
//! Generation is modulated by a simulated personality and emotional state
//! that evolve across turns, and a novelty gate keeps the backend from
//! repeating itself.
//!
//! All state lives for one session; nothing is persisted across restarts.

pub mod affect;
pub mod backend;
pub mod cli;
pub mod knowledge;
pub mod language;
pub mod memory;
pub mod persona;
pub mod prompts;
pub mod session;
pub mod stages;
pub mod utilities;

// Re-exports
pub use affect::{Emotion, EmotionalState};
pub use backend::{BackendError, OllamaBackend, TextGenerationBackend};
pub use knowledge::KnowledgeBase;
pub use language::{
    jaccard_similarity, LexiconSentiment, SentimentProvider, Tokenizer, WordTokenizer,
};
pub use memory::MemoryBank;
pub use persona::{PersonalityProfile, TraitBand};
pub use session::{
    ConversationTurn, DialogueSession, SessionError, SessionPhase, TurnOutcome,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
