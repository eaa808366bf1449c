use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::gaps::Priority;
use super::knowledge::StylePreset;
use crate::wardrobe::{ClothingItem, Season, UserProfile};

pub const DEFAULT_AGE: u16 = 25;
pub const DEFAULT_GENDER: &str = "女";
pub const DEFAULT_BODY_TYPE: &str = "矩形";
pub const DEFAULT_SKIN_TONE: &str = "中性色调";

const MAX_DOMINANT_STYLES: usize = 3;
const MAX_PREFERRED_COLORS: usize = 5;
const MAX_PREFERRED_CATEGORIES: usize = 5;
const MAX_PREFERRED_BRANDS: usize = 3;
const MAX_PERSONALITY_TRAITS: usize = 5;
const MAX_LIFESTYLE_INDICATORS: usize = 3;
const MAX_SHOPPING_SUGGESTIONS: usize = 5;
const CONFIDENT_WARDROBE_SIZE: usize = 5;

const GENERIC_STYLING_TIP: &str = "选择适合自己的风格最重要";
const GENERIC_COLOR_TIP: &str = "选择让自己舒适自信的颜色";

pub struct BodyTypeGuide {
    pub body_type: &'static str,
    pub characteristics: &'static [&'static str],
    pub suitable_styles: &'static [&'static str],
    pub avoid_styles: &'static [&'static str],
    pub top_colors: &'static [&'static str],
    pub bottom_colors: &'static [&'static str],
    pub styling_tips: &'static [&'static str],
}

pub struct SkinToneGuide {
    pub skin_tone: &'static str,
    pub characteristics: &'static [&'static str],
    pub suitable_colors: &'static [&'static str],
    pub avoid_colors: &'static [&'static str],
    pub makeup_suggestions: &'static [&'static str],
    pub color_tips: &'static [&'static str],
}

struct StylePersona {
    preset: StylePreset,
    personality: &'static [&'static str],
    lifestyle: &'static [&'static str],
}

pub static BODY_TYPES: [BodyTypeGuide; 5] = [
    BodyTypeGuide {
        body_type: "梨形",
        characteristics: &["下半身较宽", "肩膀较窄", "腰部明显"],
        suitable_styles: &["A字裙", "高腰裤", "宽肩上衣"],
        avoid_styles: &["紧身下装", "低腰裤", "横纹下装"],
        top_colors: &["亮色", "图案", "装饰"],
        bottom_colors: &["深色", "纯色", "简洁"],
        styling_tips: &[
            "选择深色下装，浅色上装来平衡比例",
            "利用配饰和细节转移注意力到上半身",
            "选择A字裙来修饰臀部线条",
        ],
    },
    BodyTypeGuide {
        body_type: "苹果形",
        characteristics: &["上半身较宽", "腰部不明显", "腿部相对较细"],
        suitable_styles: &["V领", "直筒裙", "高腰设计"],
        avoid_styles: &["紧身上衣", "横纹上装", "腰部装饰"],
        top_colors: &["深色", "纯色", "垂直线条"],
        bottom_colors: &["亮色", "图案", "细节"],
        styling_tips: &[
            "选择V领和深V领来拉长颈部线条",
            "避免腰部过于紧身的设计",
            "利用垂直线条来拉长身形",
        ],
    },
    BodyTypeGuide {
        body_type: "沙漏形",
        characteristics: &["肩膀和臀部同宽", "腰部明显收紧"],
        suitable_styles: &["修身剪裁", "腰部强调", "包身裙"],
        avoid_styles: &["宽松直筒", "遮盖腰线"],
        top_colors: &["任意颜色"],
        bottom_colors: &["任意颜色"],
        styling_tips: &[
            "充分利用您的腰线优势",
            "选择修身剪裁突出身材曲线",
            "可以大胆尝试各种风格",
        ],
    },
    BodyTypeGuide {
        body_type: "矩形",
        characteristics: &["肩膀臀部腰部相近", "身材较直"],
        suitable_styles: &["腰部装饰", "层次搭配", "曲线强调"],
        avoid_styles: &["直筒剪裁", "无腰线设计"],
        top_colors: &["图案", "装饰", "层次"],
        bottom_colors: &["A字剪裁", "褶皱设计"],
        styling_tips: &[
            "通过层次搭配增加身材曲线",
            "利用腰带和腰部装饰强调腰线",
            "选择有褶皱和细节的单品",
        ],
    },
    BodyTypeGuide {
        body_type: "倒三角",
        characteristics: &["肩膀较宽", "腰臀较窄", "上半身强壮"],
        suitable_styles: &["A字下装", "宽松下装", "细肩带"],
        avoid_styles: &["宽肩设计", "垫肩", "船领"],
        top_colors: &["深色", "简洁", "垂直线条"],
        bottom_colors: &["亮色", "图案", "体积感"],
        styling_tips: &[
            "选择宽松下装平衡上半身",
            "避免过多的肩部装饰",
            "利用下半身的亮色来转移视觉重心",
        ],
    },
];

pub static SKIN_TONES: [SkinToneGuide; 3] = [
    SkinToneGuide {
        skin_tone: "暖色调",
        characteristics: &["偏黄底调", "金色血管", "适合金饰"],
        suitable_colors: &["暖色系", "橙色", "黄色", "暖红", "桃色", "奶油色"],
        avoid_colors: &["冷粉", "冷蓝", "纯白", "银灰"],
        makeup_suggestions: &["暖调粉底", "橙调口红", "金棕眼影"],
        color_tips: &[
            "选择暖色系服装能让您看起来更有气色",
            "金色配饰比银色配饰更适合您",
            "避免过于冷调的蓝色和粉色",
        ],
    },
    SkinToneGuide {
        skin_tone: "冷色调",
        characteristics: &["偏粉底调", "蓝色血管", "适合银饰"],
        suitable_colors: &["冷色系", "蓝色", "紫色", "冷红", "纯白", "灰色"],
        avoid_colors: &["橙色", "黄色", "暖棕", "奶油色"],
        makeup_suggestions: &["冷调粉底", "浆果色口红", "冷调眼影"],
        color_tips: &[
            "冷色系服装能突出您的优雅气质",
            "银色配饰能很好地衬托您的肤色",
            "纯白色比奶油白更适合您",
        ],
    },
    SkinToneGuide {
        skin_tone: "中性色调",
        characteristics: &["冷暖平衡", "适合多种颜色"],
        suitable_colors: &["大部分颜色", "黑白灰", "各种饱和度"],
        avoid_colors: &["极端冷暖色"],
        makeup_suggestions: &["中性粉底", "万能色彩"],
        color_tips: &[
            "您可以尝试各种颜色，适应性很强",
            "黑白灰是您的安全色选择",
            "可以根据心情和场合自由选择颜色",
        ],
    },
];

static PERSONAS: [StylePersona; 4] = [
    StylePersona {
        preset: StylePreset::BusinessFormal,
        personality: &["专业", "严谨", "权威"],
        lifestyle: &["职场精英", "管理层", "专业人士"],
    },
    StylePersona {
        preset: StylePreset::CasualComfort,
        personality: &["随性", "舒适", "自然"],
        lifestyle: &["学生", "自由职业", "家庭主妇"],
    },
    StylePersona {
        preset: StylePreset::Trendy,
        personality: &["前卫", "个性", "追求新鲜"],
        lifestyle: &["时尚从业者", "艺术工作者", "年轻人"],
    },
    StylePersona {
        preset: StylePreset::SweetCute,
        personality: &["温柔", "可爱", "少女心"],
        lifestyle: &["学生", "年轻女性", "文职工作"],
    },
];

pub fn body_type_guide(body_type: &str) -> Option<&'static BodyTypeGuide> {
    BODY_TYPES.iter().find(|guide| guide.body_type == body_type)
}

pub fn skin_tone_guide(skin_tone: &str) -> Option<&'static SkinToneGuide> {
    SKIN_TONES.iter().find(|guide| guide.skin_tone == skin_tone)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "青少年")]
    Teen,
    #[serde(rename = "青年")]
    Young,
    #[serde(rename = "中年")]
    MiddleAged,
    #[serde(rename = "成熟")]
    Mature,
}

impl AgeGroup {
    pub const fn from_age(age: u16) -> Self {
        match age {
            0..=19 => AgeGroup::Teen,
            20..=29 => AgeGroup::Young,
            30..=44 => AgeGroup::MiddleAged,
            _ => AgeGroup::Mature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "经济型")]
    Budget,
    #[serde(rename = "中等")]
    Moderate,
    #[serde(rename = "中高端")]
    Premium,
    #[serde(rename = "奢侈品")]
    Luxury,
}

impl PriceRange {
    pub fn from_average(average: f64) -> Self {
        if average < 100.0 {
            PriceRange::Budget
        } else if average < 300.0 {
            PriceRange::Moderate
        } else if average < 1000.0 {
            PriceRange::Premium
        } else {
            PriceRange::Luxury
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleConfidence {
    #[serde(rename = "探索期")]
    Exploring,
    #[serde(rename = "专一型")]
    Focused,
    #[serde(rename = "偏好明确")]
    Defined,
    #[serde(rename = "多样化")]
    Varied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoppingKind {
    #[serde(rename = "基础单品")]
    Essential,
    #[serde(rename = "颜色补充")]
    ColorSupplement,
    #[serde(rename = "季节更新")]
    SeasonalRefresh,
}

/// Label and the number of wardrobe items carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub age: u16,
    pub age_group: AgeGroup,
    pub gender: String,
    pub body_type: String,
    pub skin_tone: String,
    /// Fields filled from defaults because the profile left them out.
    pub defaulted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePreferences {
    pub dominant_styles: Vec<LabelCount>,
    pub preferred_colors: Vec<LabelCount>,
    pub preferred_categories: Vec<LabelCount>,
    pub preferred_brands: Vec<LabelCount>,
    pub average_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRecommendations {
    pub characteristics: Vec<String>,
    pub suitable_styles: Vec<String>,
    pub avoid_styles: Vec<String>,
    pub top_colors: Vec<String>,
    pub bottom_colors: Vec<String>,
    pub styling_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecommendations {
    pub suitable_colors: Vec<String>,
    pub avoid_colors: Vec<String>,
    pub makeup_suggestions: Vec<String>,
    pub color_matching_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityInsights {
    pub personality_traits: Vec<String>,
    pub lifestyle_indicators: Vec<String>,
    pub style_confidence: StyleConfidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingSuggestion {
    pub category: ShoppingKind,
    pub item: String,
    pub reason: String,
    pub priority: Priority,
}

/// Consolidated user profile derived from the stated profile and the wardrobe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub basic_info: BasicInfo,
    pub style_preferences: StylePreferences,
    pub body_recommendations: BodyRecommendations,
    pub color_recommendations: ColorRecommendations,
    pub personality_insights: PersonalityInsights,
    pub shopping_suggestions: Vec<ShoppingSuggestion>,
    pub updated_at: DateTime<Utc>,
}

/// Analyse a user as of now. See [`analyze_profile_at`].
pub fn analyze_profile(
    profile: Option<&UserProfile>,
    wardrobe: &[ClothingItem],
) -> ProfileAnalysis {
    analyze_profile_at(profile, wardrobe, Utc::now())
}

/// Build a [`ProfileAnalysis`]; the seasonal shopping hint follows `now`.
///
/// Missing profile fields fall back to a 25 year old woman with a rectangle
/// body type and neutral skin tone. Body types and skin tones outside the
/// tables yield empty guidance and a generic tip.
pub fn analyze_profile_at(
    profile: Option<&UserProfile>,
    wardrobe: &[ClothingItem],
    now: DateTime<Utc>,
) -> ProfileAnalysis {
    let basic_info = basic_info(profile);
    let style_preferences = style_preferences(wardrobe);
    let personality_insights = personality_insights(&style_preferences);
    let shopping_suggestions = shopping_suggestions(&style_preferences, current_season(now));

    ProfileAnalysis {
        body_recommendations: body_recommendations(&basic_info.body_type),
        color_recommendations: color_recommendations(&basic_info.skin_tone),
        basic_info,
        style_preferences,
        personality_insights,
        shopping_suggestions,
        updated_at: now,
    }
}

fn basic_info(profile: Option<&UserProfile>) -> BasicInfo {
    let mut defaulted = Vec::new();
    let mut field = |name: &str, value: Option<&String>, fallback: &str| -> String {
        match value.map(|value| value.trim()).filter(|value| !value.is_empty()) {
            Some(value) => value.to_string(),
            None => {
                defaulted.push(name.to_string());
                fallback.to_string()
            }
        }
    };

    let gender = field("gender", profile.and_then(|p| p.gender.as_ref()), DEFAULT_GENDER);
    let body_type = field(
        "body_type",
        profile.and_then(|p| p.body_type.as_ref()),
        DEFAULT_BODY_TYPE,
    );
    let skin_tone = field(
        "skin_tone",
        profile.and_then(|p| p.skin_tone.as_ref()),
        DEFAULT_SKIN_TONE,
    );
    let age = match profile.and_then(|p| p.age) {
        Some(age) => age,
        None => {
            defaulted.insert(0, "age".to_string());
            DEFAULT_AGE
        }
    };

    BasicInfo {
        age,
        age_group: AgeGroup::from_age(age),
        gender,
        body_type,
        skin_tone,
        defaulted,
    }
}

fn style_preferences(wardrobe: &[ClothingItem]) -> StylePreferences {
    let prices: Vec<f64> = wardrobe
        .iter()
        .filter_map(|item| item.price)
        .filter(|price| *price > 0.0)
        .collect();
    let average_price = if prices.is_empty() {
        0.0
    } else {
        prices.iter().sum::<f64>() / prices.len() as f64
    };

    StylePreferences {
        dominant_styles: top_labels(
            wardrobe.iter().map(|item| item.style.as_str()),
            MAX_DOMINANT_STYLES,
        ),
        preferred_colors: top_labels(
            wardrobe.iter().map(|item| item.color.as_str()),
            MAX_PREFERRED_COLORS,
        ),
        preferred_categories: top_labels(
            wardrobe.iter().map(|item| item.category.label()),
            MAX_PREFERRED_CATEGORIES,
        ),
        preferred_brands: top_labels(
            wardrobe.iter().filter_map(|item| item.brand.as_deref()),
            MAX_PREFERRED_BRANDS,
        ),
        average_price: (average_price * 100.0).round() / 100.0,
        price_range: (!wardrobe.is_empty()).then(|| PriceRange::from_average(average_price)),
        total_items: wardrobe.len(),
    }
}

/// Most frequent labels first; ties keep first-seen order.
fn top_labels<'a>(labels: impl Iterator<Item = &'a str>, limit: usize) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabelCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

fn body_recommendations(body_type: &str) -> BodyRecommendations {
    match body_type_guide(body_type) {
        Some(guide) => BodyRecommendations {
            characteristics: owned(guide.characteristics),
            suitable_styles: owned(guide.suitable_styles),
            avoid_styles: owned(guide.avoid_styles),
            top_colors: owned(guide.top_colors),
            bottom_colors: owned(guide.bottom_colors),
            styling_tips: owned(guide.styling_tips),
        },
        None => BodyRecommendations {
            characteristics: Vec::new(),
            suitable_styles: Vec::new(),
            avoid_styles: Vec::new(),
            top_colors: Vec::new(),
            bottom_colors: Vec::new(),
            styling_tips: vec![GENERIC_STYLING_TIP.to_string()],
        },
    }
}

fn color_recommendations(skin_tone: &str) -> ColorRecommendations {
    match skin_tone_guide(skin_tone) {
        Some(guide) => ColorRecommendations {
            suitable_colors: owned(guide.suitable_colors),
            avoid_colors: owned(guide.avoid_colors),
            makeup_suggestions: owned(guide.makeup_suggestions),
            color_matching_tips: owned(guide.color_tips),
        },
        None => ColorRecommendations {
            suitable_colors: Vec::new(),
            avoid_colors: Vec::new(),
            makeup_suggestions: Vec::new(),
            color_matching_tips: vec![GENERIC_COLOR_TIP.to_string()],
        },
    }
}

fn personality_insights(preferences: &StylePreferences) -> PersonalityInsights {
    let mut traits: Vec<String> = Vec::new();
    let mut lifestyle: Vec<String> = Vec::new();

    for style in &preferences.dominant_styles {
        let Some(persona) = PERSONAS
            .iter()
            .find(|persona| persona.preset.label() == style.label)
        else {
            continue;
        };
        push_unique(&mut traits, persona.personality);
        push_unique(&mut lifestyle, persona.lifestyle);
    }

    traits.truncate(MAX_PERSONALITY_TRAITS);
    lifestyle.truncate(MAX_LIFESTYLE_INDICATORS);

    PersonalityInsights {
        personality_traits: traits,
        lifestyle_indicators: lifestyle,
        style_confidence: style_confidence(preferences),
    }
}

fn style_confidence(preferences: &StylePreferences) -> StyleConfidence {
    let Some(top) = preferences.dominant_styles.first() else {
        return StyleConfidence::Exploring;
    };
    if preferences.total_items < CONFIDENT_WARDROBE_SIZE {
        return StyleConfidence::Exploring;
    }

    let concentration = top.count as f64 / preferences.total_items as f64;
    if concentration > 0.7 {
        StyleConfidence::Focused
    } else if concentration > 0.4 {
        StyleConfidence::Defined
    } else {
        StyleConfidence::Varied
    }
}

fn shopping_suggestions(
    preferences: &StylePreferences,
    season: Season,
) -> Vec<ShoppingSuggestion> {
    let has_style = |preset: StylePreset| {
        preferences
            .dominant_styles
            .iter()
            .any(|style| style.label == preset.label())
    };

    let mut suggestions = Vec::new();
    if has_style(StylePreset::BusinessFormal) {
        suggestions.push(ShoppingSuggestion {
            category: ShoppingKind::Essential,
            item: "经典白衬衫".to_string(),
            reason: "商务风格的必备单品".to_string(),
            priority: Priority::High,
        });
    }
    if has_style(StylePreset::CasualComfort) {
        suggestions.push(ShoppingSuggestion {
            category: ShoppingKind::Essential,
            item: "质量好的基础T恤".to_string(),
            reason: "休闲风格的百搭单品".to_string(),
            priority: Priority::High,
        });
    }
    if !preferences
        .preferred_colors
        .iter()
        .any(|color| color.label == "黑色")
    {
        suggestions.push(ShoppingSuggestion {
            category: ShoppingKind::ColorSupplement,
            item: "黑色基础单品".to_string(),
            reason: "增加搭配的灵活性".to_string(),
            priority: Priority::Medium,
        });
    }
    suggestions.push(ShoppingSuggestion {
        category: ShoppingKind::SeasonalRefresh,
        item: format!("{season}新品"),
        reason: format!("为{season}更新衣橱"),
        priority: Priority::Medium,
    });

    suggestions.truncate(MAX_SHOPPING_SUGGESTIONS);
    suggestions
}

fn current_season(now: DateTime<Utc>) -> Season {
    match now.month() {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    }
}

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

fn push_unique(target: &mut Vec<String>, labels: &[&str]) {
    for label in labels {
        if !target.iter().any(|existing| existing == label) {
            target.push(label.to_string());
        }
    }
}
