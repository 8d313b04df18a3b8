//! Big Five personality profile, drawn once at session start and fixed
//! thereafter.
//!
//! Each trait scalar maps to a three-bucket descriptor; the self-description
//! sentence always lists the traits in declaration order so tests can assert
//! exact bucket assignments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utilities::random::RandomSource;

/// Trait names in canonical declaration order. Dominant-trait ties resolve
/// to the earliest entry.
pub const TRAIT_NAMES: [&str; 5] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];

/// Three-bucket descriptor for a trait scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitBand {
    Low,
    Moderate,
    High,
}

impl TraitBand {
    /// Bucket thresholds: `< 0.3` low, `< 0.7` moderate, else high.
    pub fn of(value: f64) -> Self {
        if value < 0.3 {
            TraitBand::Low
        } else if value < 0.7 {
            TraitBand::Moderate
        } else {
            TraitBand::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraitBand::Low => "low",
            TraitBand::Moderate => "moderate",
            TraitBand::High => "high",
        }
    }
}

impl fmt::Display for TraitBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Five fixed trait scalars in `[0, 1]`, immutable for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl PersonalityProfile {
    /// Draw a fresh profile, one uniform sample per trait, in canonical order.
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        Self {
            openness: rng.next_unit(),
            conscientiousness: rng.next_unit(),
            extraversion: rng.next_unit(),
            agreeableness: rng.next_unit(),
            neuroticism: rng.next_unit(),
        }
    }

    /// Trait scalars in canonical order, matching [`TRAIT_NAMES`].
    pub fn values(&self) -> [f64; 5] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }

    /// Name of the maximal trait; ties go to the earliest declared.
    pub fn dominant_trait(&self) -> &'static str {
        let values = self.values();
        let mut best = 0;
        for (index, value) in values.iter().enumerate().skip(1) {
            if *value > values[best] {
                best = index;
            }
        }
        TRAIT_NAMES[best]
    }

    /// Fixed five-clause self-description, always in canonical trait order.
    pub fn describe(&self) -> String {
        format!(
            "I am an AI with {} openness, {} conscientiousness, {} extraversion, \
             {} agreeableness and {} neuroticism.",
            TraitBand::of(self.openness),
            TraitBand::of(self.conscientiousness),
            TraitBand::of(self.extraversion),
            TraitBand::of(self.agreeableness),
            TraitBand::of(self.neuroticism),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::random::FixedSequence;

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(TraitBand::of(0.0), TraitBand::Low);
        assert_eq!(TraitBand::of(0.29), TraitBand::Low);
        assert_eq!(TraitBand::of(0.3), TraitBand::Moderate);
        assert_eq!(TraitBand::of(0.69), TraitBand::Moderate);
        assert_eq!(TraitBand::of(0.7), TraitBand::High);
        assert_eq!(TraitBand::of(1.0), TraitBand::High);
    }

    #[test]
    fn test_describe_bucket_assignment() {
        let profile = PersonalityProfile {
            openness: 0.1,
            conscientiousness: 0.9,
            extraversion: 0.5,
            agreeableness: 0.5,
            neuroticism: 0.5,
        };
        assert_eq!(
            profile.describe(),
            "I am an AI with low openness, high conscientiousness, moderate extraversion, \
             moderate agreeableness and moderate neuroticism."
        );
    }

    #[test]
    fn test_generate_draws_in_declaration_order() {
        let mut rng = FixedSequence::new(vec![0.1, 0.9, 0.5, 0.4, 0.3]);
        let profile = PersonalityProfile::generate(&mut rng);
        assert_eq!(profile.openness, 0.1);
        assert_eq!(profile.conscientiousness, 0.9);
        assert_eq!(profile.extraversion, 0.5);
        assert_eq!(profile.agreeableness, 0.4);
        assert_eq!(profile.neuroticism, 0.3);
    }

    #[test]
    fn test_dominant_trait_prefers_maximum() {
        let profile = PersonalityProfile {
            openness: 0.2,
            conscientiousness: 0.9,
            extraversion: 0.5,
            agreeableness: 0.5,
            neuroticism: 0.5,
        };
        assert_eq!(profile.dominant_trait(), "conscientiousness");
    }

    #[test]
    fn test_dominant_trait_tie_breaks_to_first_declared() {
        let profile = PersonalityProfile {
            openness: 0.8,
            conscientiousness: 0.8,
            extraversion: 0.8,
            agreeableness: 0.8,
            neuroticism: 0.8,
        };
        for _ in 0..10 {
            assert_eq!(profile.dominant_trait(), "openness");
        }
    }
}
