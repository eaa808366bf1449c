use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for wardrobe items owned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// Identifier wrapper for wardrobe owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Garment slot an item fills in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Accessory,
    Dress,
    Outerwear,
    #[default]
    Other,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Top => "上装",
            Category::Bottom => "下装",
            Category::Shoes => "鞋子",
            Category::Accessory => "配饰",
            Category::Dress => "连衣裙",
            Category::Outerwear => "外套",
            Category::Other => "其他",
        }
    }

    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            "上装" => Category::Top,
            "下装" => Category::Bottom,
            "鞋子" => Category::Shoes,
            "配饰" => Category::Accessory,
            "连衣裙" => Category::Dress,
            "外套" => Category::Outerwear,
            _ => Category::Other,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Season tag on an item or requested by a caller. Unrecognised labels are
/// carried verbatim so they can still be compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
    Universal,
    Other(String),
}

impl Season {
    pub fn label(&self) -> &str {
        match self {
            Season::Spring => "春季",
            Season::Summer => "夏季",
            Season::Autumn => "秋季",
            Season::Winter => "冬季",
            Season::Universal => "通用",
            Season::Other(label) => label,
        }
    }

    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            "春季" => Season::Spring,
            "夏季" => Season::Summer,
            "秋季" => Season::Autumn,
            "冬季" => Season::Winter,
            "通用" => Season::Universal,
            other => Season::Other(other.to_string()),
        }
    }

    /// True when an item tagged `self` may be worn in `requested`.
    pub fn covers(&self, requested: &Season) -> bool {
        *self == Season::Universal || self == requested
    }
}

impl From<String> for Season {
    fn from(value: String) -> Self {
        Season::from_label(&value)
    }
}

impl From<Season> for String {
    fn from(value: Season) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Situational tag driving style and formality filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Occasion {
    Work,
    Date,
    Party,
    Sport,
    #[default]
    Everyday,
    Universal,
    Other(String),
}

impl Occasion {
    pub fn label(&self) -> &str {
        match self {
            Occasion::Work => "工作",
            Occasion::Date => "约会",
            Occasion::Party => "聚会",
            Occasion::Sport => "运动",
            Occasion::Everyday => "日常",
            Occasion::Universal => "通用",
            Occasion::Other(label) => label,
        }
    }

    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            "工作" => Occasion::Work,
            "约会" => Occasion::Date,
            "聚会" => Occasion::Party,
            "运动" => Occasion::Sport,
            "日常" => Occasion::Everyday,
            "通用" => Occasion::Universal,
            other => Occasion::Other(other.to_string()),
        }
    }
}

impl From<String> for Occasion {
    fn from(value: String) -> Self {
        Occasion::from_label(&value)
    }
}

impl From<Occasion> for String {
    fn from(value: Occasion) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
    Snowy,
    Other(String),
}

impl Weather {
    pub fn label(&self) -> &str {
        match self {
            Weather::Sunny => "晴天",
            Weather::Rainy => "雨天",
            Weather::Snowy => "雪天",
            Weather::Other(label) => label,
        }
    }

    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            "晴天" => Weather::Sunny,
            "雨天" => Weather::Rainy,
            "雪天" => Weather::Snowy,
            other => Weather::Other(other.to_string()),
        }
    }

    /// Wet weather requires waterproof footwear.
    pub fn is_wet(&self) -> bool {
        matches!(self, Weather::Rainy | Weather::Snowy)
    }
}

impl From<String> for Weather {
    fn from(value: String) -> Self {
        Weather::from_label(&value)
    }
}

impl From<Weather> for String {
    fn from(value: Weather) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const DEFAULT_STYLE: &str = "休闲";
pub const UNKNOWN_COLOR: &str = "未知";

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

fn default_color() -> String {
    UNKNOWN_COLOR.to_string()
}

fn universal_season() -> Season {
    Season::Universal
}

/// Canonical wardrobe record consumed read-only by the recommendation core.
///
/// Storage adapters are responsible for producing this shape; missing labels
/// fall back to the neutral defaults during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "universal_season")]
    pub season: Season,
    #[serde(default)]
    pub occasion: Occasion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ClothingItem {
    pub fn new(
        id: u64,
        category: Category,
        color: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId(id),
            name: String::new(),
            category,
            subcategory: None,
            color: color.into(),
            pattern: None,
            material: None,
            style: style.into(),
            season: Season::Universal,
            occasion: Occasion::Everyday,
            brand: None,
            price: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    pub fn with_occasion(mut self, occasion: Occasion) -> Self {
        self.occasion = occasion;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }
}

/// Preference record used for personal-fit scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub preferred_styles: BTreeSet<String>,
    #[serde(default)]
    pub preferred_colors: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,
}

pub const MAX_PROFILE_AGE: u16 = 120;

impl UserProfile {
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if let Some(age) = self.age {
            if age > MAX_PROFILE_AGE {
                return Err(ProfileValidationError::AgeOutOfRange(age));
            }
        }
        if self
            .preferred_styles
            .iter()
            .chain(self.preferred_colors.iter())
            .any(|label| label.trim().is_empty())
        {
            return Err(ProfileValidationError::BlankPreference);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("age {0} is outside the accepted range 0..=120")]
    AgeOutOfRange(u16),
    #[error("preferred styles and colors must not contain blank labels")]
    BlankPreference,
}
