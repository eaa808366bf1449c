use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::domain::{RecommendationContext, ScoredOutfit, StyleAnalysis};
use super::engine::{RecommendationEngine, RecommendationError};
use super::gaps::GapSuggestion;
use super::profiler::{analyze_profile, ProfileAnalysis};
use super::ranker::MAX_LIMIT;
use super::repository::{
    Feedback, FeedbackKind, HistoryRepository, ProfileRepository, RecommendationRecord, RecordId,
    RepositoryError, WardrobeRepository,
};
use crate::config::RecommendationSettings;
use crate::wardrobe::{
    ClothingItem, Occasion, ProfileValidationError, Season, UserId, UserProfile, Weather,
};

pub const MAX_HISTORY_LIMIT: usize = 100;
const NO_OUTFIT_RATIONALE: &str = "暂无合适的搭配，建议添加更多衣物";

/// Inbound recommendation request; omitted fields fall back to everyday defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub occasion: Option<Occasion>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RecommendationRequest {
    pub fn context(&self) -> RecommendationContext {
        RecommendationContext::new(
            self.occasion.clone().unwrap_or_default(),
            self.weather.clone().unwrap_or_default(),
            self.season.clone().unwrap_or_default(),
        )
    }
}

/// Request context echoed back with every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseContext {
    pub occasion: Occasion,
    pub weather: Weather,
    pub season: Season,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub user_id: UserId,
    pub generated_at: DateTime<Utc>,
}

impl ResponseContext {
    pub fn recommendation_context(&self) -> RecommendationContext {
        RecommendationContext::new(
            self.occasion.clone(),
            self.weather.clone(),
            self.season.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub outfits: Vec<ScoredOutfit>,
    pub rationale: String,
    pub confidence: f32,
    #[serde(default)]
    pub style_analysis: Option<StyleAnalysis>,
    pub context: ResponseContext,
    pub total: usize,
}

/// Orchestrates wardrobe lookup, the engine, and recommendation history.
pub struct RecommendationService<W, P, H> {
    wardrobes: Arc<W>,
    profiles: Arc<P>,
    history: Arc<H>,
    engine: Arc<RecommendationEngine>,
    settings: RecommendationSettings,
}

static HISTORY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_record_id() -> RecordId {
    RecordId(HISTORY_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

impl<W, P, H> RecommendationService<W, P, H>
where
    W: WardrobeRepository + 'static,
    P: ProfileRepository + 'static,
    H: HistoryRepository + 'static,
{
    pub fn new(
        wardrobes: Arc<W>,
        profiles: Arc<P>,
        history: Arc<H>,
        settings: RecommendationSettings,
    ) -> Self {
        Self::with_engine(
            wardrobes,
            profiles,
            history,
            Arc::new(RecommendationEngine::default()),
            settings,
        )
    }

    pub fn with_engine(
        wardrobes: Arc<W>,
        profiles: Arc<P>,
        history: Arc<H>,
        engine: Arc<RecommendationEngine>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            wardrobes,
            profiles,
            history,
            engine,
            settings,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Rank outfits from the user's stored wardrobe.
    pub fn recommend(
        &self,
        user: UserId,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendationServiceError> {
        let wardrobe = self.wardrobe_of(user)?;
        if wardrobe.is_empty() {
            return Err(RecommendationServiceError::EmptyWardrobe);
        }
        let profile = self.profiles.profile_for(user)?;

        let context = request.context();
        let limit = request
            .limit
            .unwrap_or(self.settings.default_limit)
            .clamp(1, MAX_LIMIT);

        let outfits = match self.settings.seed {
            Some(seed) => self.engine.try_recommend(
                &wardrobe,
                profile.as_ref(),
                &context,
                limit,
                &mut StdRng::seed_from_u64(seed),
            )?,
            None => self.engine.try_recommend(
                &wardrobe,
                profile.as_ref(),
                &context,
                limit,
                &mut rand::thread_rng(),
            )?,
        };

        let (rationale, confidence, style_analysis) = match outfits.first() {
            Some(top) => (
                top.reasoning.clone(),
                top.confidence,
                Some(top.style_analysis.clone()),
            ),
            None => (NO_OUTFIT_RATIONALE.to_string(), 0.0, None),
        };

        Ok(RecommendationResponse {
            total: outfits.len(),
            outfits,
            rationale,
            confidence,
            style_analysis,
            context: ResponseContext {
                occasion: context.occasion,
                weather: context.weather,
                season: context.season,
                location: request.location,
                user_id: user,
                generated_at: Utc::now(),
            },
        })
    }

    /// Persist the top outfit of a response as a history entry.
    pub fn save_history(
        &self,
        user: UserId,
        response: &RecommendationResponse,
    ) -> Result<RecommendationRecord, RecommendationServiceError> {
        self.ensure_user(user)?;

        let item_ids = response
            .outfits
            .first()
            .map(|outfit| outfit.items.iter().map(|item| item.id).collect())
            .unwrap_or_default();

        let record = RecommendationRecord {
            id: next_record_id(),
            user_id: user,
            item_ids,
            context: response.context.recommendation_context(),
            confidence: response.confidence,
            rationale: response.rationale.clone(),
            created_at: Utc::now(),
            feedback: None,
        };

        Ok(self.history.append(record)?)
    }

    /// Newest entries first; `limit` is capped at [`MAX_HISTORY_LIMIT`].
    pub fn load_history(
        &self,
        user: UserId,
        limit: usize,
    ) -> Result<Vec<RecommendationRecord>, RecommendationServiceError> {
        self.ensure_user(user)?;
        Ok(self.history.recent(user, limit.min(MAX_HISTORY_LIMIT))?)
    }

    pub fn record_feedback(
        &self,
        user: UserId,
        record_id: RecordId,
        kind: FeedbackKind,
        reason: Option<String>,
    ) -> Result<RecommendationRecord, RecommendationServiceError> {
        let mut record = self
            .history
            .fetch(record_id)?
            .filter(|record| record.user_id == user)
            .ok_or(RepositoryError::NotFound)?;

        record.feedback = Some(Feedback {
            kind,
            reason,
            recorded_at: Utc::now(),
        });
        self.history.update(record.clone())?;

        Ok(record)
    }

    pub fn update_profile(
        &self,
        user: UserId,
        profile: UserProfile,
    ) -> Result<UserProfile, RecommendationServiceError> {
        profile.validate()?;
        self.ensure_user(user)?;
        Ok(self.profiles.upsert(user, profile)?)
    }

    pub fn wardrobe_gaps(
        &self,
        user: UserId,
    ) -> Result<Vec<GapSuggestion>, RecommendationServiceError> {
        let wardrobe = self.wardrobe_of(user)?;
        let profile = self.profiles.profile_for(user)?;
        Ok(self.engine.analyze_gaps(&wardrobe, profile.as_ref()))
    }

    /// Profile analysis built from the stored profile and wardrobe.
    pub fn profile_analysis(
        &self,
        user: UserId,
    ) -> Result<ProfileAnalysis, RecommendationServiceError> {
        let wardrobe = self.wardrobe_of(user)?;
        let profile = self.profiles.profile_for(user)?;
        Ok(analyze_profile(profile.as_ref(), &wardrobe))
    }

    fn ensure_user(&self, user: UserId) -> Result<(), RecommendationServiceError> {
        if self.wardrobes.user_exists(user)? {
            Ok(())
        } else {
            Err(RecommendationServiceError::UserNotFound(user))
        }
    }

    fn wardrobe_of(&self, user: UserId) -> Result<Vec<ClothingItem>, RecommendationServiceError> {
        self.ensure_user(user)?;
        Ok(self.wardrobes.items_for(user)?)
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationServiceError {
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("wardrobe is empty, add clothing first")]
    EmptyWardrobe,
    #[error(transparent)]
    InvalidProfile(#[from] ProfileValidationError),
    #[error(transparent)]
    Pipeline(#[from] RecommendationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
