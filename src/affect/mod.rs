//! Emotional state: eight Plutchik emotions damped by a fixed mood-stability
//! scalar.
//!
//! Every emotion value stays within `[0, 1]` after every update, and the
//! dominant emotion is deterministic: ties resolve to the earliest variant in
//! the canonical declaration order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utilities::random::RandomSource;

/// The eight emotions, in canonical order. Unknown emotion names are
/// unrepresentable; [`EmotionalState::dominant`] breaks ties by this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Trust,
    Anticipation,
}

impl Emotion {
    /// All emotions in canonical order.
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Surprise,
        Emotion::Trust,
        Emotion::Anticipation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Surprise => "surprise",
            Emotion::Trust => "trust",
            Emotion::Anticipation => "anticipation",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-session emotional state. All emotions start at the neutral midpoint;
/// mood stability is drawn once and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalState {
    values: [f64; 8],
    mood_stability: f64,
}

impl EmotionalState {
    /// Neutral state with the given mood stability (clamped to `[0, 1]`).
    pub fn new(mood_stability: f64) -> Self {
        Self {
            values: [0.5; 8],
            mood_stability: mood_stability.clamp(0.0, 1.0),
        }
    }

    /// Neutral state with mood stability drawn from the injected source.
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        Self::new(rng.next_unit())
    }

    pub fn mood_stability(&self) -> f64 {
        self.mood_stability
    }

    /// Current intensity of one emotion.
    pub fn intensity(&self, emotion: Emotion) -> f64 {
        self.values[emotion as usize]
    }

    /// Apply a delta damped by mood stability. The stored value is clamped to
    /// `[0, 1]` regardless of the delta's magnitude or sign.
    pub fn update(&mut self, emotion: Emotion, delta: f64) {
        let change = delta * (1.0 - self.mood_stability);
        let value = &mut self.values[emotion as usize];
        *value = (*value + change).clamp(0.0, 1.0);
    }

    /// The maximal emotion; ties resolve to the earliest variant in
    /// [`Emotion::ALL`].
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::Joy;
        for emotion in Emotion::ALL {
            if self.values[emotion as usize] > self.values[best as usize] {
                best = emotion;
            }
        }
        best
    }

    /// One-line description naming the dominant emotion to two decimals.
    pub fn describe(&self) -> String {
        let dominant = self.dominant();
        format!(
            "My dominant emotion is {} with intensity {:.2}.",
            dominant,
            self.intensity(dominant)
        )
    }
}
