//! Reflection stage: private analytical text generated before the response.
//!
//! One backend call, no retries. Success commits the reflection, the
//! latency-blended confidence and the sentiment nudges; failure surfaces a
//! sentinel and leaves the session state untouched.

use std::time::{Duration, Instant};

use crate::affect::Emotion;
use crate::backend::TextGenerationBackend;
use crate::prompts::{reflection_prompt, ReflectionContext};
use crate::session::DialogueSession;
use crate::utilities::random::RandomSource;

/// Returned when the backend fails; the turn continues in degraded form.
pub const REFLECTION_FAILURE_TEXT: &str =
    "I was unable to complete my reflection this time.";

/// Baseline confidence before latency blending.
pub const CONFIDENCE_BASE: f64 = 0.5;

/// Elapsed time at which confidence becomes fully random.
pub const LATENCY_WINDOW: Duration = Duration::from_secs(10);

/// Emotion nudge applied from the reflection's sentiment.
const SENTIMENT_NUDGE: f64 = 0.1;

/// Blend the baseline confidence toward a random value as generation latency
/// approaches [`LATENCY_WINDOW`]. Always lands in `[0, 1]`.
pub fn confidence_after(elapsed: Duration, rng: &mut dyn RandomSource) -> f64 {
    let influence = (elapsed.as_secs_f64() / LATENCY_WINDOW.as_secs_f64()).min(1.0);
    CONFIDENCE_BASE * (1.0 - influence) + rng.next_unit() * influence
}

/// Run the reflection stage for one user input.
pub async fn run(
    session: &mut DialogueSession,
    backend: &dyn TextGenerationBackend,
    user_input: &str,
) -> String {
    let prompt = {
        let personality = session.personality.describe();
        let emotion = session.emotions.describe();
        reflection_prompt(&ReflectionContext {
            topic: &session.topic,
            user_input,
            previous_reflection: &session.turn.previous_reflection,
            previous_response: &session.turn.previous_response,
            personality: &personality,
            emotion: &emotion,
            confidence: session.turn.confidence,
        })
    };

    let started = Instant::now();
    match backend.generate(&session.model_id, &prompt).await {
        Ok(reflection) => {
            let elapsed = started.elapsed();
            // Mutations commit only now that the backend call has succeeded.
            session.turn.previous_reflection = reflection.clone();
            session.turn.confidence = confidence_after(elapsed, session.rng.as_mut());

            let sentiment = session.sentiment.score(&reflection);
            let joy = if sentiment > 0.0 { SENTIMENT_NUDGE } else { -SENTIMENT_NUDGE };
            let sadness = if sentiment < 0.0 { SENTIMENT_NUDGE } else { -SENTIMENT_NUDGE };
            session.emotions.update(Emotion::Joy, joy);
            session.emotions.update(Emotion::Sadness, sadness);

            tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                confidence = session.turn.confidence,
                sentiment,
                "reflection committed"
            );
            reflection
        }
        Err(error) => {
            tracing::warn!(%error, "reflection generation failed");
            REFLECTION_FAILURE_TEXT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::ScriptedBackend;
    use crate::backend::BackendError;
    use crate::language::{LexiconSentiment, WordTokenizer};
    use crate::utilities::random::FixedSequence;

    fn test_session() -> DialogueSession {
        // First five samples: personality; sixth: mood stability (0 damping).
        let rng = FixedSequence::new(vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.0]);
        let mut session = DialogueSession::with_parts(
            Box::new(rng),
            Box::new(WordTokenizer),
            Box::new(LexiconSentiment),
        );
        session.begin().expect("begin");
        session.select_model("scripted:latest").expect("model");
        session.set_topic("testing").expect("topic");
        session
    }

    #[test]
    fn test_confidence_stays_in_unit_interval() {
        let elapsed_cases = [
            Duration::ZERO,
            Duration::from_millis(1),
            Duration::from_secs(5),
            Duration::from_secs(10),
            Duration::from_secs(1000),
        ];
        for elapsed in elapsed_cases {
            for sample in [0.0, 0.5, 0.999] {
                let mut rng = FixedSequence::new(vec![sample]);
                let confidence = confidence_after(elapsed, &mut rng);
                assert!(
                    (0.0..=1.0).contains(&confidence),
                    "confidence {confidence} out of range for {elapsed:?}"
                );
            }
        }
    }

    #[test]
    fn test_confidence_is_baseline_at_zero_elapsed() {
        let mut rng = FixedSequence::new(vec![0.9]);
        assert_eq!(confidence_after(Duration::ZERO, &mut rng), CONFIDENCE_BASE);
    }

    #[test]
    fn test_confidence_is_fully_random_past_the_window() {
        let mut rng = FixedSequence::new(vec![0.9]);
        assert_eq!(confidence_after(Duration::from_secs(60), &mut rng), 0.9);
    }

    #[tokio::test]
    async fn test_success_commits_reflection_and_nudges_joy() {
        let mut session = test_session();
        let backend = ScriptedBackend::new(vec![Ok(
            "what a wonderful and amazing question to reflect on".to_string()
        )]);

        let joy_before = session.emotions().intensity(Emotion::Joy);
        let reflection = run(&mut session, &backend, "why?").await;

        assert!(reflection.contains("wonderful"));
        assert_eq!(session.turn().previous_reflection, reflection);
        assert!(session.emotions().intensity(Emotion::Joy) > joy_before);
        assert!((0.0..=1.0).contains(&session.turn().confidence));
    }

    #[tokio::test]
    async fn test_negative_reflection_nudges_sadness() {
        let mut session = test_session();
        let backend = ScriptedBackend::new(vec![Ok(
            "this is a terrible and hopeless disaster".to_string()
        )]);

        let sadness_before = session.emotions().intensity(Emotion::Sadness);
        run(&mut session, &backend, "why?").await;
        assert!(session.emotions().intensity(Emotion::Sadness) > sadness_before);
    }

    #[tokio::test]
    async fn test_failure_returns_sentinel_and_leaves_state_unchanged() {
        let mut session = test_session();
        let backend = ScriptedBackend::new(vec![Err(BackendError::Cancelled)]);

        let confidence_before = session.turn().confidence;
        let joy_before = session.emotions().intensity(Emotion::Joy);
        let sadness_before = session.emotions().intensity(Emotion::Sadness);

        let reflection = run(&mut session, &backend, "why?").await;

        assert_eq!(reflection, REFLECTION_FAILURE_TEXT);
        assert_eq!(session.turn().previous_reflection, "");
        assert_eq!(session.turn().confidence, confidence_before);
        assert_eq!(session.emotions().intensity(Emotion::Joy), joy_before);
        assert_eq!(session.emotions().intensity(Emotion::Sadness), sadness_before);
    }
}
