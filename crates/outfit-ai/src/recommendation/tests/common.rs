use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::config::RecommendationSettings;
use crate::recommendation::repository::{
    HistoryRepository, ProfileRepository, RecommendationRecord, RecordId, RepositoryError,
    WardrobeRepository,
};
use crate::recommendation::{recommendation_router, RecommendationService};
use crate::wardrobe::{Category, ClothingItem, Occasion, UserId, UserProfile};

pub(super) const OWNER: UserId = UserId(1);
pub(super) const EMPTY_CLOSET: UserId = UserId(2);
pub(super) const STRANGER: UserId = UserId(404);

pub(super) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

/// Two tops, two bottoms and one pair of shoes split across work and leisure.
pub(super) fn work_wardrobe() -> Vec<ClothingItem> {
    vec![
        ClothingItem::new(1, Category::Top, "白色", "休闲").named("白色T恤"),
        ClothingItem::new(2, Category::Top, "黑色", "商务正式")
            .named("黑色衬衫")
            .with_occasion(Occasion::Work),
        ClothingItem::new(3, Category::Bottom, "黑色", "商务正式")
            .named("黑色西裤")
            .with_occasion(Occasion::Work),
        ClothingItem::new(4, Category::Bottom, "蓝色", "休闲").named("牛仔裤"),
        ClothingItem::new(5, Category::Shoes, "黑色", "商务正式")
            .named("黑色皮鞋")
            .with_occasion(Occasion::Work),
    ]
}

pub(super) fn settings() -> RecommendationSettings {
    RecommendationSettings {
        default_limit: 5,
        seed: Some(7),
    }
}

pub(super) fn build_service() -> (
    RecommendationService<MemoryWardrobes, MemoryProfiles, MemoryHistory>,
    Arc<MemoryWardrobes>,
    Arc<MemoryProfiles>,
    Arc<MemoryHistory>,
) {
    let wardrobes = Arc::new(MemoryWardrobes::default());
    wardrobes.insert(OWNER, work_wardrobe());
    wardrobes.insert(EMPTY_CLOSET, Vec::new());
    let profiles = Arc::new(MemoryProfiles::default());
    let history = Arc::new(MemoryHistory::default());
    let service = RecommendationService::new(
        wardrobes.clone(),
        profiles.clone(),
        history.clone(),
        settings(),
    );
    (service, wardrobes, profiles, history)
}

pub(super) fn router_with_service(
    service: RecommendationService<MemoryWardrobes, MemoryProfiles, MemoryHistory>,
) -> axum::Router {
    recommendation_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryWardrobes {
    wardrobes: Arc<Mutex<HashMap<UserId, Vec<ClothingItem>>>>,
}

impl MemoryWardrobes {
    pub(super) fn insert(&self, user: UserId, items: Vec<ClothingItem>) {
        self.wardrobes
            .lock()
            .expect("wardrobe mutex poisoned")
            .insert(user, items);
    }
}

impl WardrobeRepository for MemoryWardrobes {
    fn user_exists(&self, user: UserId) -> Result<bool, RepositoryError> {
        let guard = self.wardrobes.lock().expect("wardrobe mutex poisoned");
        Ok(guard.contains_key(&user))
    }

    fn items_for(&self, user: UserId) -> Result<Vec<ClothingItem>, RepositoryError> {
        let guard = self.wardrobes.lock().expect("wardrobe mutex poisoned");
        Ok(guard.get(&user).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl MemoryProfiles {
    pub(super) fn get(&self, user: UserId) -> Option<UserProfile> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(&user)
            .cloned()
    }
}

impl ProfileRepository for MemoryProfiles {
    fn profile_for(&self, user: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.get(user))
    }

    fn upsert(&self, user: UserId, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(user, profile.clone());
        Ok(profile)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    records: Arc<Mutex<Vec<RecommendationRecord>>>,
}

impl MemoryHistory {
    pub(super) fn records(&self) -> Vec<RecommendationRecord> {
        self.records.lock().expect("history mutex poisoned").clone()
    }
}

impl HistoryRepository for MemoryHistory {
    fn append(
        &self,
        record: RecommendationRecord,
    ) -> Result<RecommendationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: RecommendationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, id: RecordId) -> Result<Option<RecommendationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().find(|record| record.id == id).cloned())
    }

    fn recent(
        &self,
        user: UserId,
        limit: usize,
    ) -> Result<Vec<RecommendationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| record.user_id == user)
            .take(limit)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableWardrobes;

impl WardrobeRepository for UnavailableWardrobes {
    fn user_exists(&self, _user: UserId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn items_for(&self, _user: UserId) -> Result<Vec<ClothingItem>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
