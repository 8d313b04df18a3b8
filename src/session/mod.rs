//! Dialogue session: the exclusive owner of all per-session state.
//!
//! Lifecycle: `Uninitialized -> AwaitingModelSelection -> AwaitingTopic ->
//! Ready -> Closed`, where `Ready` is the steady turn loop. Each turn runs
//! the reflection stage, then the response stage, then commits the turn
//! bookkeeping. Turns are strictly sequential; the backend invocation is the
//! only suspension point.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::affect::{Emotion, EmotionalState};
use crate::backend::TextGenerationBackend;
use crate::knowledge::KnowledgeBase;
use crate::language::{LexiconSentiment, SentimentProvider, Tokenizer, WordTokenizer};
use crate::memory::MemoryBank;
use crate::persona::PersonalityProfile;
use crate::stages::{reflection, response};
use crate::utilities::random::{RandomSource, ThreadRandom};

/// Case-insensitive keyword that ends the conversation.
pub const EXIT_KEYWORD: &str = "exit";

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Uninitialized,
    AwaitingModelSelection,
    AwaitingTopic,
    Ready,
    Closed,
}

/// Rolling record of the latest completed turn. Created empty at session
/// start, overwritten after every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub previous_reflection: String,
    pub previous_response: String,
    /// Confidence in the latest reflection, in `[0, 1]`.
    pub confidence: f64,
    /// When the latest turn committed; `None` before the first turn.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Default for ConversationTurn {
    fn default() -> Self {
        Self {
            previous_reflection: String::new(),
            previous_response: String::new(),
            confidence: 0.5,
            recorded_at: None,
        }
    }
}

/// Session-level failures. Stage-level backend failures are absorbed into
/// degraded output and never surface here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation was invoked in the wrong lifecycle phase.
    #[error("operation requires phase {expected:?}, session is {actual:?}")]
    Phase {
        expected: SessionPhase,
        actual: SessionPhase,
    },
}

/// Result of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reflection: String,
    pub response: String,
    /// Wall-clock duration of the reflection stage.
    pub reflection_elapsed: Duration,
    /// Wall-clock duration of the whole turn.
    pub elapsed: Duration,
}

/// Exclusive owner of all conversational state for one session. Stages
/// receive mutable references and mutate in place; no component owns a copy.
pub struct DialogueSession {
    id: Uuid,
    phase: SessionPhase,
    pub(crate) personality: PersonalityProfile,
    pub(crate) emotions: EmotionalState,
    pub(crate) memory: MemoryBank,
    pub(crate) knowledge: KnowledgeBase,
    pub(crate) turn: ConversationTurn,
    pub(crate) topic: String,
    pub(crate) model_id: String,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) tokenizer: Box<dyn Tokenizer>,
    pub(crate) sentiment: Box<dyn SentimentProvider>,
}

impl DialogueSession {
    /// New session with the production capability stack: thread RNG, regex
    /// word tokenizer, lexicon sentiment.
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(ThreadRandom),
            Box::new(WordTokenizer),
            Box::new(LexiconSentiment),
        )
    }

    /// Injectable construction for tests and alternative capability stacks.
    /// Personality and mood stability are drawn from `rng` immediately, in
    /// that order.
    pub fn with_parts(
        mut rng: Box<dyn RandomSource>,
        tokenizer: Box<dyn Tokenizer>,
        sentiment: Box<dyn SentimentProvider>,
    ) -> Self {
        let personality = PersonalityProfile::generate(rng.as_mut());
        let emotions = EmotionalState::generate(rng.as_mut());
        Self {
            id: Uuid::new_v4(),
            phase: SessionPhase::Uninitialized,
            personality,
            emotions,
            memory: MemoryBank::new(),
            knowledge: KnowledgeBase::new(),
            turn: ConversationTurn::default(),
            topic: String::new(),
            model_id: String::new(),
            rng,
            tokenizer,
            sentiment,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn personality(&self) -> &PersonalityProfile {
        &self.personality
    }

    pub fn emotions(&self) -> &EmotionalState {
        &self.emotions
    }

    pub fn memory(&self) -> &MemoryBank {
        &self.memory
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn turn(&self) -> &ConversationTurn {
        &self.turn
    }

    /// True when the input is the exit sentinel, case-insensitively.
    pub fn is_exit_command(input: &str) -> bool {
        input.trim().eq_ignore_ascii_case(EXIT_KEYWORD)
    }

    /// `Uninitialized -> AwaitingModelSelection`.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Uninitialized)?;
        self.phase = SessionPhase::AwaitingModelSelection;
        Ok(())
    }

    /// `AwaitingModelSelection -> AwaitingTopic`. The model is fixed for the
    /// rest of the session.
    pub fn select_model(&mut self, model_id: impl Into<String>) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::AwaitingModelSelection)?;
        self.model_id = model_id.into();
        self.phase = SessionPhase::AwaitingTopic;
        Ok(())
    }

    /// `AwaitingTopic -> Ready`. Also records the topic as the session's
    /// first fact.
    pub fn set_topic(&mut self, topic: impl Into<String>) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::AwaitingTopic)?;
        let topic = topic.into();
        self.knowledge
            .add_fact(format!("The main topic of the conversation is {topic}"));
        self.topic = topic;
        self.phase = SessionPhase::Ready;
        tracing::info!(session = %self.id, topic = %self.topic, "session ready");
        Ok(())
    }

    /// Terminal transition; the session accepts no further turns.
    pub fn close(&mut self) {
        self.phase = SessionPhase::Closed;
        tracing::info!(session = %self.id, "session closed");
    }

    /// Run one full turn: reflection stage, response stage, then commit the
    /// turn bookkeeping (short-term memory, response fact, input sentiment
    /// nudge, timestamp).
    pub async fn process_turn(
        &mut self,
        backend: &dyn TextGenerationBackend,
        user_input: &str,
    ) -> Result<TurnOutcome, SessionError> {
        self.expect_phase(SessionPhase::Ready)?;
        let started = Instant::now();

        let reflection = reflection::run(self, backend, user_input).await;
        let reflection_elapsed = started.elapsed();
        let response = response::run(self, backend, user_input, &reflection).await;

        // Turn bookkeeping commits even for degraded stage output: the input
        // was seen and whatever text was surfaced is on record.
        let sentiment = self.sentiment.score(user_input);
        self.emotions.update(Emotion::Joy, sentiment);
        self.memory.remember(user_input);
        self.knowledge.add_fact(response.clone());
        self.turn.recorded_at = Some(Utc::now());

        Ok(TurnOutcome {
            reflection,
            response,
            reflection_elapsed,
            elapsed: started.elapsed(),
        })
    }

    fn expect_phase(&self, expected: SessionPhase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::Phase {
                expected,
                actual: self.phase,
            })
        }
    }
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::ScriptedBackend;
    use crate::utilities::random::FixedSequence;

    fn ready_session() -> DialogueSession {
        let rng = FixedSequence::new(vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.0]);
        let mut session = DialogueSession::with_parts(
            Box::new(rng),
            Box::new(WordTokenizer),
            Box::new(LexiconSentiment),
        );
        session.begin().expect("begin");
        session.select_model("scripted:latest").expect("model");
        session.set_topic("rust programming").expect("topic");
        session
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut session = DialogueSession::with_parts(
            Box::new(FixedSequence::new(vec![0.5])),
            Box::new(WordTokenizer),
            Box::new(LexiconSentiment),
        );
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        session.begin().expect("begin");
        assert_eq!(session.phase(), SessionPhase::AwaitingModelSelection);
        session.select_model("m").expect("model");
        assert_eq!(session.phase(), SessionPhase::AwaitingTopic);
        session.set_topic("t").expect("topic");
        assert_eq!(session.phase(), SessionPhase::Ready);
        session.close();
        assert_eq!(session.phase(), SessionPhase::Closed);
    }

    #[test]
    fn test_wrong_phase_is_an_error_not_a_panic() {
        let mut session = DialogueSession::with_parts(
            Box::new(FixedSequence::new(vec![0.5])),
            Box::new(WordTokenizer),
            Box::new(LexiconSentiment),
        );
        let error = session.set_topic("too early").unwrap_err();
        assert!(matches!(
            error,
            SessionError::Phase {
                expected: SessionPhase::AwaitingTopic,
                actual: SessionPhase::Uninitialized,
            }
        ));
    }

    #[test]
    fn test_set_topic_records_the_topic_fact() {
        let session = ready_session();
        assert!(session
            .knowledge()
            .contains_fact("The main topic of the conversation is rust programming"));
    }

    #[test]
    fn test_exit_keyword_is_case_insensitive() {
        assert!(DialogueSession::is_exit_command("exit"));
        assert!(DialogueSession::is_exit_command("EXIT"));
        assert!(DialogueSession::is_exit_command("  Exit  "));
        assert!(!DialogueSession::is_exit_command("exit now"));
        assert!(!DialogueSession::is_exit_command("quit"));
    }

    #[tokio::test]
    async fn test_process_turn_commits_memory_knowledge_and_turn_record() {
        let mut session = ready_session();
        let backend = ScriptedBackend::new(vec![
            Ok("a reflective paragraph about ownership and borrowing".to_string()),
            Ok("Great question! Ownership is how Rust manages memory. \
                What part trips you up?"
                .to_string()),
        ]);

        let outcome = session
            .process_turn(&backend, "how does ownership work?")
            .await
            .expect("turn");

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.turn().previous_reflection, outcome.reflection);
        assert_eq!(session.turn().previous_response, outcome.response);
        assert!(session.turn().recorded_at.is_some());
        assert_eq!(
            session.memory().recall().last(),
            Some("how does ownership work?")
        );
        assert!(session.knowledge().contains_fact(&outcome.response));
        assert!(outcome.elapsed >= outcome.reflection_elapsed);
    }

    #[tokio::test]
    async fn test_process_turn_requires_ready_phase() {
        let mut session = DialogueSession::with_parts(
            Box::new(FixedSequence::new(vec![0.5])),
            Box::new(WordTokenizer),
            Box::new(LexiconSentiment),
        );
        let backend = ScriptedBackend::new(vec![]);
        let error = session.process_turn(&backend, "hello").await.unwrap_err();
        assert!(matches!(error, SessionError::Phase { .. }));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_turn_record_serializes() {
        let turn = ConversationTurn::default();
        let json = serde_json::to_string(&turn).expect("serialize");
        let back: ConversationTurn = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.confidence, 0.5);
        assert!(back.recorded_at.is_none());
    }
}
