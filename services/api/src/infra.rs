use metrics_exporter_prometheus::PrometheusHandle;
use outfit_ai::error::AppError;
use outfit_ai::recommendation::{
    HistoryRepository, ProfileRepository, RecommendationRecord, RecordId, RepositoryError,
    WardrobeRepository,
};
use outfit_ai::wardrobe::{Category, ClothingItem, Occasion, Season, UserId, UserProfile};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub(crate) const DEMO_USER: UserId = UserId(1);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryWardrobeRepository {
    wardrobes: Arc<Mutex<HashMap<UserId, Vec<ClothingItem>>>>,
}

impl InMemoryWardrobeRepository {
    /// Repository pre-populated with the sample wardrobe for [`DEMO_USER`].
    pub(crate) fn with_demo_user() -> Self {
        let repository = Self::default();
        repository.insert(DEMO_USER, demo_wardrobe());
        repository
    }

    pub(crate) fn insert(&self, user: UserId, items: Vec<ClothingItem>) {
        let mut guard = self.wardrobes.lock().expect("wardrobe mutex poisoned");
        guard.insert(user, items);
    }
}

impl WardrobeRepository for InMemoryWardrobeRepository {
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
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn profile_for(&self, user: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(&user).cloned())
    }

    fn upsert(&self, user: UserId, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(user, profile.clone());
        Ok(profile)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHistoryRepository {
    records: Arc<Mutex<Vec<RecommendationRecord>>>,
}

impl HistoryRepository for InMemoryHistoryRepository {
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
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
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

/// Small mixed wardrobe covering work, date and everyday outfits.
pub(crate) fn demo_wardrobe() -> Vec<ClothingItem> {
    vec![
        ClothingItem::new(1, Category::Top, "白色", "休闲").named("白色棉T恤"),
        ClothingItem::new(2, Category::Top, "黑色", "商务正式")
            .named("黑色衬衫")
            .with_occasion(Occasion::Work),
        ClothingItem::new(3, Category::Top, "粉色", "甜美可爱")
            .named("粉色针织衫")
            .with_season(Season::Spring),
        ClothingItem::new(4, Category::Bottom, "黑色", "商务正式")
            .named("黑色西裤")
            .with_occasion(Occasion::Work),
        ClothingItem::new(5, Category::Bottom, "蓝色", "休闲")
            .named("直筒牛仔裤")
            .with_material("牛仔布"),
        ClothingItem::new(6, Category::Dress, "白色", "优雅知性")
            .named("白色连衣裙")
            .with_occasion(Occasion::Date),
        ClothingItem::new(7, Category::Shoes, "黑色", "商务正式")
            .named("黑色皮鞋")
            .with_occasion(Occasion::Universal),
        ClothingItem::new(8, Category::Shoes, "白色", "运动休闲")
            .named("白色运动鞋")
            .with_material("橡胶"),
        ClothingItem::new(9, Category::Accessory, "银色", "优雅知性")
            .named("银色项链")
            .with_occasion(Occasion::Universal),
    ]
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
