mod config;
mod rules;

pub use config::ScoringWeights;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{OutfitCombination, RecommendationContext};
use super::knowledge::KnowledgeBase;
use crate::wardrobe::UserProfile;

/// Score substituted when a strategy cannot produce a value.
pub const NEUTRAL_SCORE: f32 = 0.5;

/// The independent heuristics that make up an outfit's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    ColorHarmony,
    StyleConsistency,
    OccasionFitness,
    SeasonFitness,
    PreferenceFitness,
}

/// One weighted contribution to a confidence score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub strategy: ScoringStrategy,
    pub score: f32,
    pub weight: f32,
    /// Set when the strategy failed and the neutral score was used instead.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub neutral_fallback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub confidence: f32,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn component(&self, strategy: ScoringStrategy) -> Option<f32> {
        self.components
            .iter()
            .find(|component| component.strategy == strategy)
            .map(|component| component.score)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("combination has no items")]
    EmptyCombination,
    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

/// Stateless scorer combining the strategies by fixed weights.
#[derive(Debug, Clone)]
pub struct OutfitScorer {
    knowledge: Arc<KnowledgeBase>,
    weights: ScoringWeights,
}

impl OutfitScorer {
    pub fn new(knowledge: Arc<KnowledgeBase>, weights: ScoringWeights) -> Self {
        Self { knowledge, weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Weighted confidence in `[0, 1]`.
    ///
    /// Without a profile the preference weight is dropped and the remaining
    /// weights are renormalised. A failing strategy contributes
    /// [`NEUTRAL_SCORE`] and never aborts the whole score.
    pub fn score(
        &self,
        combination: &OutfitCombination<'_>,
        profile: Option<&UserProfile>,
        context: &RecommendationContext,
    ) -> ScoreBreakdown {
        let knowledge = self.knowledge.as_ref();
        let mut components = vec![
            component(
                ScoringStrategy::ColorHarmony,
                self.weights.color_harmony,
                rules::color_harmony(combination, knowledge),
            ),
            component(
                ScoringStrategy::StyleConsistency,
                self.weights.style_consistency,
                rules::style_consistency(combination),
            ),
            component(
                ScoringStrategy::OccasionFitness,
                self.weights.occasion_fitness,
                rules::occasion_fitness(combination, knowledge, &context.occasion),
            ),
            component(
                ScoringStrategy::SeasonFitness,
                self.weights.season_fitness,
                rules::season_fitness(combination, knowledge, &context.season),
            ),
        ];

        if let Some(profile) = profile {
            components.push(component(
                ScoringStrategy::PreferenceFitness,
                self.weights.preference_fitness,
                rules::preference_fitness(combination, profile),
            ));
        }

        let weight_sum: f32 = components.iter().map(|component| component.weight).sum();
        let weighted: f32 = components
            .iter()
            .map(|component| component.score * component.weight)
            .sum();
        let confidence = if weight_sum > 0.0 {
            (weighted / weight_sum).clamp(0.0, 1.0)
        } else {
            0.0
        };

        ScoreBreakdown {
            confidence,
            components,
        }
    }
}

fn component(
    strategy: ScoringStrategy,
    weight: f32,
    result: Result<f32, ScoringError>,
) -> ScoreComponent {
    match result {
        Ok(score) => ScoreComponent {
            strategy,
            score: score.clamp(0.0, 1.0),
            weight,
            neutral_fallback: false,
        },
        Err(error) => {
            debug!(?strategy, %error, "scoring strategy fell back to neutral score");
            ScoreComponent {
                strategy,
                score: NEUTRAL_SCORE,
                weight,
                neutral_fallback: true,
            }
        }
    }
}
