//! Injectable randomness.
//!
//! Personality traits, mood stability and the latency-confidence blend all
//! draw uniform samples. Routing the draws through a trait lets tests pin
//! exact values and assert bucket assignments deterministically.

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource: Send {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Thread-RNG backed source used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Replays a fixed sequence of samples, cycling once exhausted.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    /// Sequence of samples to replay. An empty sequence always yields `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
