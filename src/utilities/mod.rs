//! Cross-cutting helpers shared by the rest of the crate.

pub mod random;

pub use random::{FixedSequence, RandomSource, ThreadRandom};
