use std::collections::HashMap;

use serde::Serialize;

use crate::wardrobe::{Category, Occasion, Season};

/// Colour label that harmonises with everything.
pub const ANY_COLOR: &str = "任意";

/// Named style presets with a hand-authored rule set each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StylePreset {
    BusinessFormal,
    CasualComfort,
    Trendy,
    SweetCute,
}

impl StylePreset {
    pub const ALL: [StylePreset; 4] = [
        StylePreset::BusinessFormal,
        StylePreset::CasualComfort,
        StylePreset::Trendy,
        StylePreset::SweetCute,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StylePreset::BusinessFormal => "商务正式",
            StylePreset::CasualComfort => "休闲舒适",
            StylePreset::Trendy => "时尚潮流",
            StylePreset::SweetCute => "甜美可爱",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub required_categories: &'static [Category],
    pub preferred_styles: &'static [&'static str],
    pub colors: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub materials: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccasionProfile {
    pub styles: &'static [&'static str],
    pub colors: &'static str,
    pub formality: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Thickness {
    Thin,
    Medium,
    Thick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonProfile {
    pub colors: &'static [&'static str],
    pub materials: &'static [&'static str],
    pub thickness: Thickness,
}

static BUSINESS_FORMAL: StyleRule = StyleRule {
    required_categories: &[Category::Top, Category::Bottom, Category::Shoes],
    preferred_styles: &["正式", "商务", "优雅"],
    colors: &["黑色", "深蓝", "灰色", "白色", "米色"],
    patterns: &["纯色", "细条纹"],
    materials: &["羊毛", "丝绸", "棉质", "聚酯纤维"],
};

static CASUAL_COMFORT: StyleRule = StyleRule {
    required_categories: &[Category::Top, Category::Bottom],
    preferred_styles: &["休闲", "舒适", "运动"],
    colors: &[ANY_COLOR],
    patterns: &[ANY_COLOR],
    materials: &["棉质", "针织", "牛仔布"],
};

static TRENDY: StyleRule = StyleRule {
    required_categories: &[Category::Top, Category::Bottom],
    preferred_styles: &["时尚", "潮流", "个性"],
    colors: &[ANY_COLOR],
    patterns: &[ANY_COLOR],
    materials: &[ANY_COLOR],
};

static SWEET_CUTE: StyleRule = StyleRule {
    required_categories: &[Category::Top, Category::Bottom],
    preferred_styles: &["甜美", "可爱", "少女"],
    colors: &["粉色", "白色", "浅蓝", "米色", "薄荷绿"],
    patterns: &["碎花", "波点", "蕾丝"],
    materials: &["雪纺", "蕾丝", "棉质"],
};

static WORK: OccasionProfile = OccasionProfile {
    styles: &["商务正式", "优雅知性"],
    colors: "深色系为主",
    formality: 0.8,
};

static DATE: OccasionProfile = OccasionProfile {
    styles: &["甜美可爱", "时尚潮流", "优雅知性"],
    colors: ANY_COLOR,
    formality: 0.6,
};

static PARTY: OccasionProfile = OccasionProfile {
    styles: &["时尚潮流", "个性张扬"],
    colors: "亮色系",
    formality: 0.4,
};

static SPORT: OccasionProfile = OccasionProfile {
    styles: &["运动休闲"],
    colors: ANY_COLOR,
    formality: 0.2,
};

static EVERYDAY: OccasionProfile = OccasionProfile {
    styles: &["休闲舒适"],
    colors: ANY_COLOR,
    formality: 0.3,
};

static SPRING: SeasonProfile = SeasonProfile {
    colors: &["浅色系", "粉色", "绿色", "蓝色"],
    materials: &["棉质", "针织", "雪纺"],
    thickness: Thickness::Medium,
};

static SUMMER: SeasonProfile = SeasonProfile {
    colors: &["浅色系", "白色", "蓝色", "黄色"],
    materials: &["棉质", "雪纺", "丝绸", "亚麻"],
    thickness: Thickness::Thin,
};

static AUTUMN: SeasonProfile = SeasonProfile {
    colors: &["暖色系", "棕色", "橙色", "深红"],
    materials: &["针织", "羊毛", "牛仔布"],
    thickness: Thickness::Medium,
};

static WINTER: SeasonProfile = SeasonProfile {
    colors: &["深色系", "黑色", "灰色", "深蓝"],
    materials: &["羊毛", "羽绒", "毛呢"],
    thickness: Thickness::Thick,
};

const COLOR_HARMONY: &[(&str, &[&str])] = &[
    ("黑色", &["白色", "灰色", "红色", "金色", "银色"]),
    ("白色", &["黑色", "蓝色", "红色", "粉色", ANY_COLOR]),
    ("灰色", &["白色", "黑色", "粉色", "蓝色", "黄色"]),
    ("红色", &["白色", "黑色", "米色", "深蓝"]),
    ("蓝色", &["白色", "米色", "黄色", "红色", "灰色"]),
    ("粉色", &["白色", "灰色", "米色", "深蓝"]),
    ("黄色", &["白色", "蓝色", "灰色", "黑色"]),
    ("绿色", &["白色", "米色", "棕色", "黑色"]),
    ("紫色", &["白色", "灰色", "黑色", "银色"]),
    ("棕色", &["米色", "白色", "绿色", "橙色"]),
];

/// Immutable lookup tables shared by every stage of the pipeline.
///
/// Built once per engine and only ever read afterwards, so a single instance
/// can sit behind an `Arc` and serve concurrent requests.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    color_harmony: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::standard()
    }
}

impl KnowledgeBase {
    pub fn standard() -> Self {
        Self {
            color_harmony: COLOR_HARMONY.iter().copied().collect(),
        }
    }

    pub fn style_rule(&self, preset: StylePreset) -> &'static StyleRule {
        match preset {
            StylePreset::BusinessFormal => &BUSINESS_FORMAL,
            StylePreset::CasualComfort => &CASUAL_COMFORT,
            StylePreset::Trendy => &TRENDY,
            StylePreset::SweetCute => &SWEET_CUTE,
        }
    }

    /// Mapping for a requested occasion; `None` means the neutral branch applies.
    pub fn occasion(&self, occasion: &Occasion) -> Option<&'static OccasionProfile> {
        match occasion {
            Occasion::Work => Some(&WORK),
            Occasion::Date => Some(&DATE),
            Occasion::Party => Some(&PARTY),
            Occasion::Sport => Some(&SPORT),
            Occasion::Everyday => Some(&EVERYDAY),
            Occasion::Universal | Occasion::Other(_) => None,
        }
    }

    pub fn season(&self, season: &Season) -> Option<&'static SeasonProfile> {
        match season {
            Season::Spring => Some(&SPRING),
            Season::Summer => Some(&SUMMER),
            Season::Autumn => Some(&AUTUMN),
            Season::Winter => Some(&WINTER),
            Season::Universal | Season::Other(_) => None,
        }
    }

    pub fn harmonious_colors(&self, color: &str) -> Option<&'static [&'static str]> {
        self.color_harmony.get(color).copied()
    }

    /// Pairwise colour compatibility.
    ///
    /// The table is stored one-directionally but consulted both ways. Identical
    /// colours always pass so monochrome outfits are not penalised.
    pub fn colors_harmonize(&self, a: &str, b: &str) -> bool {
        if a == b || a == ANY_COLOR || b == ANY_COLOR {
            return true;
        }
        self.lists_partner(a, b) || self.lists_partner(b, a)
    }

    fn lists_partner(&self, color: &str, partner: &str) -> bool {
        self.harmonious_colors(color)
            .map(|partners| {
                partners
                    .iter()
                    .any(|candidate| *candidate == partner || *candidate == ANY_COLOR)
            })
            .unwrap_or(false)
    }
}
