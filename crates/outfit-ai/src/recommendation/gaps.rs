use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::wardrobe::{Category, ClothingItem, UserProfile};

pub const MAX_SUGGESTIONS: usize = 10;
const BASICS_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionKind {
    #[serde(rename = "基础单品")]
    Essential,
    #[serde(rename = "色彩补充")]
    ColorSupplement,
    #[serde(rename = "风格补充")]
    StyleSupplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Advisory purchase suggestion produced by [`analyze_gaps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub item: String,
    pub category: String,
    pub reason: String,
    pub priority: Priority,
}

const ESSENTIALS: [(Category, [&str; 3]); 4] = [
    (Category::Top, ["白衬衫", "基础T恤", "针织衫"]),
    (Category::Bottom, ["黑色裤子", "牛仔裤", "A字裙"]),
    (Category::Shoes, ["黑色平底鞋", "运动鞋", "高跟鞋"]),
    (Category::Outerwear, ["风衣", "西装外套", "针织开衫"]),
];

/// Inspects category, colour and style counts against the essentials checklist.
///
/// The profile is accepted for future personalisation; no rule reads it yet.
pub fn analyze_gaps(
    wardrobe: &[ClothingItem],
    _profile: Option<&UserProfile>,
) -> Vec<GapSuggestion> {
    let mut categories: HashMap<Category, usize> = HashMap::new();
    let mut colors: HashMap<&str, usize> = HashMap::new();
    let mut styles: HashMap<&str, usize> = HashMap::new();

    for item in wardrobe {
        *categories.entry(item.category).or_default() += 1;
        *colors.entry(item.color.as_str()).or_default() += 1;
        *styles.entry(item.style.as_str()).or_default() += 1;
    }

    let mut suggestions = Vec::new();

    for (category, essentials) in ESSENTIALS {
        if categories.get(&category).copied().unwrap_or(0) >= BASICS_THRESHOLD {
            continue;
        }
        for item in essentials {
            suggestions.push(GapSuggestion {
                kind: SuggestionKind::Essential,
                item: item.to_string(),
                category: category.label().to_string(),
                reason: format!("增加{}的基础选择", category.label()),
                priority: Priority::High,
            });
        }
    }

    if !colors.contains_key("黑色") {
        suggestions.push(GapSuggestion {
            kind: SuggestionKind::ColorSupplement,
            item: "黑色基础单品".to_string(),
            category: "任意".to_string(),
            reason: "增加经典黑色单品，提升搭配灵活性".to_string(),
            priority: Priority::Medium,
        });
    }

    if !colors.contains_key("白色") {
        suggestions.push(GapSuggestion {
            kind: SuggestionKind::ColorSupplement,
            item: "白色基础单品".to_string(),
            category: "任意".to_string(),
            reason: "白色是万能搭配色，建议添加".to_string(),
            priority: Priority::Medium,
        });
    }

    if !styles.contains_key("正式") && !styles.contains_key("商务") {
        suggestions.push(GapSuggestion {
            kind: SuggestionKind::StyleSupplement,
            item: "正式商务装".to_string(),
            category: "套装".to_string(),
            reason: "增加正式场合的穿搭选择".to_string(),
            priority: Priority::Low,
        });
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked_wardrobe() -> Vec<ClothingItem> {
        let mut items = Vec::new();
        let mut id = 0;
        for category in [
            Category::Top,
            Category::Bottom,
            Category::Shoes,
            Category::Outerwear,
        ] {
            for color in ["黑色", "白色", "灰色"] {
                id += 1;
                items.push(ClothingItem::new(id, category, color, "商务"));
            }
        }
        items
    }

    #[test]
    fn well_stocked_wardrobe_needs_nothing() {
        assert!(analyze_gaps(&stocked_wardrobe(), None).is_empty());
    }

    #[test]
    fn empty_wardrobe_is_capped_at_ten_high_priority_basics() {
        let suggestions = analyze_gaps(&[], None);

        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert!(suggestions
            .iter()
            .all(|suggestion| suggestion.kind == SuggestionKind::Essential));
        assert_eq!(suggestions[0].item, "白衬衫");
        assert_eq!(suggestions[0].category, "上装");
    }

    #[test]
    fn missing_white_triggers_color_supplement() {
        let wardrobe: Vec<ClothingItem> = stocked_wardrobe()
            .into_iter()
            .map(|mut item| {
                if item.color == "白色" {
                    item.color = "米色".to_string();
                }
                item
            })
            .collect();

        let suggestions = analyze_gaps(&wardrobe, None);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::ColorSupplement);
        assert_eq!(suggestions[0].item, "白色基础单品");
        assert_eq!(suggestions[0].priority, Priority::Medium);
    }

    #[test]
    fn style_supplement_requires_exact_formal_labels() {
        let wardrobe: Vec<ClothingItem> = stocked_wardrobe()
            .into_iter()
            .map(|mut item| {
                item.style = "商务正式".to_string();
                item
            })
            .collect();

        let suggestions = analyze_gaps(&wardrobe, None);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::StyleSupplement);
        assert_eq!(suggestions[0].priority, Priority::Low);
    }

    #[test]
    fn suggestions_serialize_with_source_labels() {
        let json = serde_json::to_value(&analyze_gaps(&[], None)[0]).expect("serializes");
        assert_eq!(json["type"], "基础单品");
        assert_eq!(json["priority"], "high");
    }
}
