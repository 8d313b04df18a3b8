//! Response stage: user-facing text behind the novelty gate.
//!
//! Candidates too similar to the reflection or to the previous accepted
//! response are rejected and regenerated from the same prompt, up to a fixed
//! attempt ceiling. On exhaustion the last candidate is surfaced as a
//! degraded but responsive fallback.

use crate::backend::TextGenerationBackend;
use crate::language::jaccard_similarity;
use crate::prompts::response_prompt;
use crate::session::DialogueSession;

/// Reject a candidate whose token-set Jaccard similarity to the reflection or
/// to the previous response exceeds this.
pub const NOVELTY_THRESHOLD: f64 = 0.7;

/// Generation attempts from the same prompt before falling back.
pub const MAX_ATTEMPTS: u32 = 3;

/// Returned when the backend fails mid-loop; `previous_response` is left
/// unchanged in that case.
pub const RESPONSE_FAILURE_TEXT: &str =
    "Sorry, I had a problem processing your question. Could you rephrase it?";

/// Run the response stage for one user input and its reflection.
pub async fn run(
    session: &mut DialogueSession,
    backend: &dyn TextGenerationBackend,
    user_input: &str,
    reflection: &str,
) -> String {
    let dominant_emotion = session.emotions.dominant();
    let strongest_trait = session.personality.dominant_trait();
    let prompt = response_prompt(
        user_input,
        reflection,
        dominant_emotion.name(),
        strongest_trait,
    );

    let mut last_candidate = String::new();
    for attempt in 1..=MAX_ATTEMPTS {
        let candidate = match backend.generate(&session.model_id, &prompt).await {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(%error, attempt, "response generation failed");
                return RESPONSE_FAILURE_TEXT.to_string();
            }
        };

        let vs_reflection =
            jaccard_similarity(session.tokenizer.as_ref(), &candidate, reflection);
        let vs_previous = jaccard_similarity(
            session.tokenizer.as_ref(),
            &candidate,
            &session.turn.previous_response,
        );

        if vs_reflection <= NOVELTY_THRESHOLD && vs_previous <= NOVELTY_THRESHOLD {
            session.turn.previous_response = candidate.clone();
            tracing::debug!(attempt, "response accepted by novelty gate");
            return candidate;
        }

        tracing::debug!(
            attempt,
            vs_reflection,
            vs_previous,
            "candidate rejected by novelty gate"
        );
        last_candidate = candidate;
    }

    // Retry budget exhausted: surface the last candidate rather than loop.
    tracing::warn!("novelty gate exhausted after {MAX_ATTEMPTS} attempts; using last candidate");
    session.turn.previous_response = last_candidate.clone();
    last_candidate
}
