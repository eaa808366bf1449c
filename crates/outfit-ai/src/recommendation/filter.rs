use crate::wardrobe::{Category, ClothingItem, Occasion};

use super::domain::RecommendationContext;

const WATERPROOF_MATERIALS: [&str; 2] = ["防水", "橡胶"];

/// Selects the wardrobe items eligible for the requested context.
///
/// An empty result is not an error; the generator simply yields nothing.
pub fn eligible_items<'a>(
    items: &'a [ClothingItem],
    context: &RecommendationContext,
) -> Vec<&'a ClothingItem> {
    items
        .iter()
        .filter(|item| fits_season(item, context))
        .filter(|item| fits_occasion(item, context))
        .filter(|item| fits_weather(item, context))
        .collect()
}

fn fits_season(item: &ClothingItem, context: &RecommendationContext) -> bool {
    item.season.covers(&context.season)
}

fn fits_occasion(item: &ClothingItem, context: &RecommendationContext) -> bool {
    if context.occasion == Occasion::Everyday {
        return true;
    }
    item.occasion == Occasion::Universal || item.occasion == context.occasion
}

fn fits_weather(item: &ClothingItem, context: &RecommendationContext) -> bool {
    if !context.weather.is_wet() || item.category != Category::Shoes {
        return true;
    }
    item.material
        .as_deref()
        .map(|material| WATERPROOF_MATERIALS.contains(&material))
        .unwrap_or(false)
}
