//! The two-stage generation pipeline: a private reflection, then the
//! user-facing response behind the novelty gate.

pub mod reflection;
pub mod response;

pub use reflection::REFLECTION_FAILURE_TEXT;
pub use response::{MAX_ATTEMPTS, NOVELTY_THRESHOLD, RESPONSE_FAILURE_TEXT};
