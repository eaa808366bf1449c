//! Outfit recommendation pipeline and the service seams around it.
//!
//! The engine itself is pure: it filters a wardrobe for the requested context,
//! enumerates a bounded set of candidate outfits, scores them with weighted
//! heuristics and ranks them. Storage is reached only through the repository
//! traits used by [`RecommendationService`].

pub mod combination;
pub mod domain;
pub mod engine;
pub mod filter;
pub mod gaps;
pub mod knowledge;
pub mod profiler;
pub mod ranker;
pub mod reasoning;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use combination::CombinationGenerator;
pub use domain::{
    FormalityLevel, OutfitCombination, RecommendationContext, ScoredOutfit, StyleAnalysis,
};
pub use engine::{RecommendationEngine, RecommendationError};
pub use gaps::{analyze_gaps, GapSuggestion, Priority, SuggestionKind};
pub use knowledge::{KnowledgeBase, StylePreset};
pub use profiler::{
    analyze_profile, analyze_profile_at, AgeGroup, PriceRange, ProfileAnalysis, StyleConfidence,
};
pub use repository::{
    Feedback, FeedbackKind, HistoryRepository, ProfileRepository, RecommendationRecord, RecordId,
    RepositoryError, WardrobeRepository,
};
pub use router::recommendation_router;
pub use scoring::{
    OutfitScorer, ScoreBreakdown, ScoreComponent, ScoringError, ScoringStrategy, ScoringWeights,
};
pub use service::{
    RecommendationRequest, RecommendationResponse, RecommendationService,
    RecommendationServiceError, ResponseContext,
};
