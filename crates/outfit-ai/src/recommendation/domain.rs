use serde::{Deserialize, Serialize};

use crate::wardrobe::{Category, ClothingItem, Occasion, Season, Weather};

use super::scoring::ScoreComponent;

/// Situation the outfit is requested for. Each field defaults to its neutral value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationContext {
    #[serde(default)]
    pub occasion: Occasion,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub season: Season,
}

impl RecommendationContext {
    pub fn new(occasion: Occasion, weather: Weather, season: Season) -> Self {
        Self {
            occasion,
            weather,
            season,
        }
    }
}

/// Candidate outfit borrowed from the caller's wardrobe for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitCombination<'a> {
    items: Vec<&'a ClothingItem>,
}

impl<'a> OutfitCombination<'a> {
    pub fn new(items: Vec<&'a ClothingItem>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: &'a ClothingItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[&'a ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn colors(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items.iter().copied().map(|item| item.color.as_str())
    }

    pub fn styles(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items.iter().copied().map(|item| item.style.as_str())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.items.iter().map(|item| item.category).collect()
    }

    pub fn to_owned_items(&self) -> Vec<ClothingItem> {
        self.items.iter().map(|item| (*item).clone()).collect()
    }
}

/// Three-way formality estimate of an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormalityLevel {
    #[serde(rename = "正式")]
    Formal,
    #[serde(rename = "休闲")]
    Casual,
    #[serde(rename = "半正式")]
    SemiFormal,
}

impl FormalityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            FormalityLevel::Formal => "正式",
            FormalityLevel::Casual => "休闲",
            FormalityLevel::SemiFormal => "半正式",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAnalysis {
    pub dominant_style: String,
    pub color_palette: Vec<String>,
    pub categories: Vec<Category>,
    pub formality_level: FormalityLevel,
}

/// Ranked recommendation returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutfit {
    pub items: Vec<ClothingItem>,
    pub confidence: f32,
    pub reasoning: String,
    pub style_analysis: StyleAnalysis,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}
