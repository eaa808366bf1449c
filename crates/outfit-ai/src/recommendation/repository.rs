use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::RecommendationContext;
use crate::wardrobe::{ClothingItem, ItemId, UserId, UserProfile};

/// Identifier of a saved recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

/// User reaction to a saved recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Liked,
    Disliked,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Persisted recommendation history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub item_ids: Vec<ItemId>,
    pub context: RecommendationContext,
    pub confidence: f32,
    pub rationale: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

/// Read access to users and their clothing.
pub trait WardrobeRepository: Send + Sync {
    fn user_exists(&self, user: UserId) -> Result<bool, RepositoryError>;
    fn items_for(&self, user: UserId) -> Result<Vec<ClothingItem>, RepositoryError>;
}

pub trait ProfileRepository: Send + Sync {
    fn profile_for(&self, user: UserId) -> Result<Option<UserProfile>, RepositoryError>;
    fn upsert(&self, user: UserId, profile: UserProfile) -> Result<UserProfile, RepositoryError>;
}

/// Storage for saved recommendations and their feedback.
pub trait HistoryRepository: Send + Sync {
    fn append(&self, record: RecommendationRecord) -> Result<RecommendationRecord, RepositoryError>;
    fn update(&self, record: RecommendationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: RecordId) -> Result<Option<RecommendationRecord>, RepositoryError>;
    /// Newest first.
    fn recent(&self, user: UserId, limit: usize)
        -> Result<Vec<RecommendationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
