use super::common::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::recommendation::combination::{CombinationGenerator, MAX_COMBINATIONS};
use crate::recommendation::{
    KnowledgeBase, RecommendationContext, RecommendationEngine, RecommendationError,
    ScoringError, ScoringStrategy, ScoringWeights, SuggestionKind,
};
use crate::wardrobe::{Category, ClothingItem, ItemId, Occasion, Season, UserProfile, Weather};

fn item_ids(outfit: &crate::recommendation::ScoredOutfit) -> Vec<u64> {
    outfit.items.iter().map(|item| item.id.0).collect()
}

#[test]
fn business_set_ranks_first_for_work() {
    let engine = RecommendationEngine::default();
    let wardrobe = work_wardrobe();
    let context = RecommendationContext::new(Occasion::Work, Weather::Sunny, Season::Universal);

    let outfits = engine.recommend_with_rng(&wardrobe, None, &context, 5, &mut seeded_rng());

    let top = outfits.first().expect("at least one outfit");
    assert_eq!(item_ids(top), vec![2, 3, 5]);
    assert!((top.confidence - (0.30 + 0.25 + 0.20 + 0.075) / 0.90).abs() < 1e-5);
    assert_eq!(top.style_analysis.dominant_style, "商务正式");
}

#[test]
fn equal_confidence_keeps_generation_order() {
    let wardrobe = vec![
        ClothingItem::new(1, Category::Top, "黑色", "休闲"),
        ClothingItem::new(2, Category::Top, "黑色", "休闲"),
        ClothingItem::new(3, Category::Bottom, "黑色", "休闲"),
        ClothingItem::new(4, Category::Bottom, "黑色", "休闲"),
    ];

    let outfits = RecommendationEngine::default().recommend_with_rng(
        &wardrobe,
        None,
        &RecommendationContext::default(),
        5,
        &mut seeded_rng(),
    );

    let order: Vec<Vec<u64>> = outfits.iter().map(item_ids).collect();
    assert_eq!(order, vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);
    assert!(outfits
        .windows(2)
        .all(|pair| pair[0].confidence == pair[1].confidence));
}

#[test]
fn empty_wardrobe_yields_no_outfits() {
    let outfits = RecommendationEngine::default().recommend(
        &[],
        Some(&UserProfile::default()),
        &RecommendationContext::default(),
        5,
    );
    assert!(outfits.is_empty());
}

#[test]
fn unknown_occasion_scores_neutral_occasion_fitness() {
    let wardrobe: Vec<ClothingItem> = work_wardrobe()
        .into_iter()
        .map(|item| item.with_occasion(Occasion::Universal))
        .collect();
    let context = RecommendationContext::new(
        Occasion::Other("毕业典礼".to_string()),
        Weather::Sunny,
        Season::Spring,
    );

    let outfits = RecommendationEngine::default().recommend_with_rng(
        &wardrobe,
        None,
        &context,
        20,
        &mut seeded_rng(),
    );

    assert_eq!(outfits.len(), 4);
    for outfit in &outfits {
        let occasion = outfit
            .components
            .iter()
            .find(|component| component.strategy == ScoringStrategy::OccasionFitness)
            .expect("occasion component recorded");
        assert_eq!(occasion.score, 0.5);
        assert!(!occasion.neutral_fallback);
    }
}

#[test]
fn rain_keeps_only_waterproof_shoes() {
    let mut wardrobe = work_wardrobe();
    wardrobe.push(ClothingItem::new(6, Category::Shoes, "黑色", "休闲").with_material("防水"));
    let context = RecommendationContext::new(Occasion::Everyday, Weather::Rainy, Season::Spring);

    let outfits = RecommendationEngine::default().recommend_with_rng(
        &wardrobe,
        None,
        &context,
        20,
        &mut seeded_rng(),
    );

    assert_eq!(outfits.len(), 4);
    for outfit in &outfits {
        let shoes: Vec<ItemId> = outfit
            .items
            .iter()
            .filter(|item| item.category == Category::Shoes)
            .map(|item| item.id)
            .collect();
        assert_eq!(shoes, vec![ItemId(6)]);
    }
}

#[test]
fn limit_truncates_ranked_outfits() {
    let outfits = RecommendationEngine::default().recommend_with_rng(
        &work_wardrobe(),
        None,
        &RecommendationContext::default(),
        2,
        &mut seeded_rng(),
    );
    assert_eq!(outfits.len(), 2);
    assert!(outfits[0].confidence >= outfits[1].confidence);
}

#[test]
fn invalid_weights_surface_from_try_recommend_only() {
    let engine = RecommendationEngine::with_weights(
        Arc::new(KnowledgeBase::standard()),
        ScoringWeights {
            color_harmony: f32::NAN,
            ..ScoringWeights::default()
        },
    );
    let wardrobe = work_wardrobe();
    let context = RecommendationContext::default();

    let result = engine.try_recommend(&wardrobe, None, &context, 5, &mut seeded_rng());
    assert!(matches!(
        result,
        Err(RecommendationError::Scoring(ScoringError::InvalidWeights(_)))
    ));

    assert!(engine
        .recommend_with_rng(&wardrobe, None, &context, 5, &mut seeded_rng())
        .is_empty());
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut wardrobe = work_wardrobe();
    wardrobe.push(ClothingItem::new(6, Category::Shoes, "白色", "休闲"));
    wardrobe.push(ClothingItem::new(7, Category::Accessory, "金色", "时尚潮流"));
    wardrobe.push(ClothingItem::new(8, Category::Accessory, "银色", "优雅知性"));
    let engine = RecommendationEngine::default();
    let context = RecommendationContext::default();

    let first = engine.recommend_with_rng(&wardrobe, None, &context, 5, &mut seeded_rng());
    let second = engine.recommend_with_rng(&wardrobe, None, &context, 5, &mut seeded_rng());

    assert_eq!(first, second);
}

#[test]
fn engine_gap_analysis_is_capped() {
    let suggestions = RecommendationEngine::default().analyze_gaps(&work_wardrobe(), None);

    assert_eq!(suggestions.len(), 10);
    assert!(suggestions
        .iter()
        .all(|suggestion| suggestion.kind == SuggestionKind::Essential));
    assert_eq!(suggestions[9].item, "风衣");
}

fn sized_wardrobe(tops: u64, bottoms: u64, shoes: u64, accessories: u64) -> Vec<ClothingItem> {
    let mut items = Vec::new();
    let mut next_id = 0;
    for (category, count) in [
        (Category::Top, tops),
        (Category::Bottom, bottoms),
        (Category::Shoes, shoes),
        (Category::Accessory, accessories),
    ] {
        for _ in 0..count {
            next_id += 1;
            items.push(ClothingItem::new(next_id, category, "灰色", "休闲"));
        }
    }
    items
}

proptest! {
    #[test]
    fn generation_never_exceeds_cap(
        tops in 5u64..12,
        bottoms in 5u64..12,
        shoes in 0u64..4,
        accessories in 0u64..4,
        dresses in 0u64..6,
        seed in any::<u64>(),
    ) {
        let mut items = sized_wardrobe(tops, bottoms, shoes, accessories);
        for offset in 0..dresses {
            items.push(ClothingItem::new(1_000 + offset, Category::Dress, "红色", "甜美可爱"));
        }
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);

        let combinations = CombinationGenerator::default().generate(&refs, &mut rng);

        prop_assert!(combinations.len() <= MAX_COMBINATIONS);
        for combination in &combinations {
            prop_assert!((1..=4).contains(&combination.len()));
        }
    }
}
