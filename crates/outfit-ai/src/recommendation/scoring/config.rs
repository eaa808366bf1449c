use serde::{Deserialize, Serialize};

use super::ScoringError;

/// Relative weight of each scoring strategy in the final confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub color_harmony: f32,
    pub style_consistency: f32,
    pub occasion_fitness: f32,
    pub season_fitness: f32,
    /// Only counted when a profile is supplied.
    pub preference_fitness: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            color_harmony: 0.30,
            style_consistency: 0.25,
            occasion_fitness: 0.20,
            season_fitness: 0.15,
            preference_fitness: 0.10,
        }
    }
}

impl ScoringWeights {
    pub(crate) fn validate(&self) -> Result<(), ScoringError> {
        let weights = [
            self.color_harmony,
            self.style_consistency,
            self.occasion_fitness,
            self.season_fitness,
            self.preference_fitness,
        ];
        if weights
            .iter()
            .any(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err(ScoringError::InvalidWeights(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        let base = self.color_harmony
            + self.style_consistency
            + self.occasion_fitness
            + self.season_fitness;
        if base <= 0.0 {
            return Err(ScoringError::InvalidWeights(
                "context weights must not sum to zero".to_string(),
            ));
        }
        Ok(())
    }
}
