use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{info, warn};

use super::combination::CombinationGenerator;
use super::domain::{RecommendationContext, ScoredOutfit};
use super::filter::eligible_items;
use super::gaps::{analyze_gaps, GapSuggestion};
use super::knowledge::KnowledgeBase;
use super::ranker::rank;
use super::reasoning::{reasoning, style_analysis};
use super::scoring::{OutfitScorer, ScoringError, ScoringWeights};
use crate::wardrobe::{ClothingItem, UserProfile};

/// Stateless pipeline: filter, generate, score, explain, rank.
///
/// Holds only read-only tables so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    knowledge: Arc<KnowledgeBase>,
    generator: CombinationGenerator,
    scorer: OutfitScorer,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeBase::standard()))
    }
}

impl RecommendationEngine {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_weights(knowledge, ScoringWeights::default())
    }

    pub fn with_weights(knowledge: Arc<KnowledgeBase>, weights: ScoringWeights) -> Self {
        let scorer = OutfitScorer::new(Arc::clone(&knowledge), weights);
        Self {
            knowledge,
            generator: CombinationGenerator::default(),
            scorer,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn scorer(&self) -> &OutfitScorer {
        &self.scorer
    }

    /// Ranked outfits for the context, using the thread-local RNG.
    pub fn recommend(
        &self,
        wardrobe: &[ClothingItem],
        profile: Option<&UserProfile>,
        context: &RecommendationContext,
        limit: usize,
    ) -> Vec<ScoredOutfit> {
        self.recommend_with_rng(wardrobe, profile, context, limit, &mut rand::thread_rng())
    }

    /// Never fails: pipeline errors are logged and surface as no outfits.
    pub fn recommend_with_rng<R: Rng>(
        &self,
        wardrobe: &[ClothingItem],
        profile: Option<&UserProfile>,
        context: &RecommendationContext,
        limit: usize,
        rng: &mut R,
    ) -> Vec<ScoredOutfit> {
        match self.try_recommend(wardrobe, profile, context, limit, rng) {
            Ok(outfits) => outfits,
            Err(error) => {
                warn!(%error, occasion = %context.occasion, "recommendation pipeline failed");
                Vec::new()
            }
        }
    }

    pub fn try_recommend<R: Rng>(
        &self,
        wardrobe: &[ClothingItem],
        profile: Option<&UserProfile>,
        context: &RecommendationContext,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<ScoredOutfit>, RecommendationError> {
        self.scorer.weights().validate()?;
        let started = Instant::now();

        let eligible = eligible_items(wardrobe, context);
        let combinations = self.generator.generate(&eligible, rng);

        let mut scored = Vec::with_capacity(combinations.len());
        for (index, combination) in combinations.iter().enumerate() {
            let breakdown = self.scorer.score(combination, profile, context);
            if !breakdown.confidence.is_finite() {
                return Err(RecommendationError::NonFiniteConfidence { index });
            }
            scored.push(ScoredOutfit {
                items: combination.to_owned_items(),
                confidence: breakdown.confidence,
                reasoning: reasoning(combination, context, &self.knowledge),
                style_analysis: style_analysis(combination),
                components: breakdown.components,
            });
        }

        let average_confidence = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|outfit| outfit.confidence).sum::<f32>() / scored.len() as f32
        };
        let generated = scored.len();
        let ranked = rank(scored, limit);

        info!(
            wardrobe = wardrobe.len(),
            eligible = eligible.len(),
            combinations = generated,
            returned = ranked.len(),
            average_confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "outfit recommendation completed"
        );

        Ok(ranked)
    }

    pub fn analyze_gaps(
        &self,
        wardrobe: &[ClothingItem],
        profile: Option<&UserProfile>,
    ) -> Vec<GapSuggestion> {
        analyze_gaps(wardrobe, profile)
    }
}

/// Failure inside the recommendation pipeline itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("combination {index} produced a non-finite confidence")]
    NonFiniteConfidence { index: usize },
}
