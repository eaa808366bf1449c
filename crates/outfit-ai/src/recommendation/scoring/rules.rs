use std::collections::HashSet;

use crate::recommendation::domain::OutfitCombination;
use crate::recommendation::knowledge::KnowledgeBase;
use crate::wardrobe::{Occasion, Season, UserProfile};

use super::{ScoringError, NEUTRAL_SCORE};

const MATCHED: f32 = 1.0;
const MISMATCHED_CONTEXT: f32 = 0.3;
const MISMATCHED_PREFERENCE: f32 = 0.5;

fn ensure_items(combination: &OutfitCombination<'_>) -> Result<(), ScoringError> {
    if combination.is_empty() {
        Err(ScoringError::EmptyCombination)
    } else {
        Ok(())
    }
}

/// Fraction of item pairs whose colours harmonise.
pub(crate) fn color_harmony(
    combination: &OutfitCombination<'_>,
    knowledge: &KnowledgeBase,
) -> Result<f32, ScoringError> {
    ensure_items(combination)?;
    let colors: Vec<&str> = combination.colors().collect();
    if colors.len() == 1 {
        return Ok(MATCHED);
    }

    let mut pairs = 0u32;
    let mut harmonious = 0u32;
    for (index, first) in colors.iter().enumerate() {
        for second in &colors[index + 1..] {
            pairs += 1;
            if knowledge.colors_harmonize(first, second) {
                harmonious += 1;
            }
        }
    }

    Ok(harmonious as f32 / pairs as f32)
}

pub(crate) fn style_consistency(combination: &OutfitCombination<'_>) -> Result<f32, ScoringError> {
    ensure_items(combination)?;
    let distinct: HashSet<&str> = combination.styles().collect();
    Ok(match distinct.len() {
        1 => 1.0,
        2 => 0.7,
        _ => 0.4,
    })
}

pub(crate) fn occasion_fitness(
    combination: &OutfitCombination<'_>,
    knowledge: &KnowledgeBase,
    occasion: &Occasion,
) -> Result<f32, ScoringError> {
    let Some(profile) = knowledge.occasion(occasion) else {
        return Ok(NEUTRAL_SCORE);
    };
    ensure_items(combination)?;

    let total: f32 = combination
        .styles()
        .map(|style| {
            if profile.styles.iter().any(|wanted| style.contains(wanted)) {
                MATCHED
            } else {
                MISMATCHED_CONTEXT
            }
        })
        .sum();

    Ok(total / combination.len() as f32)
}

pub(crate) fn season_fitness(
    combination: &OutfitCombination<'_>,
    knowledge: &KnowledgeBase,
    season: &Season,
) -> Result<f32, ScoringError> {
    if knowledge.season(season).is_none() {
        return Ok(NEUTRAL_SCORE);
    }
    ensure_items(combination)?;

    let total: f32 = combination
        .items()
        .iter()
        .map(|item| {
            if item.season.covers(season) {
                MATCHED
            } else {
                MISMATCHED_CONTEXT
            }
        })
        .sum();

    Ok(total / combination.len() as f32)
}

pub(crate) fn preference_fitness(
    combination: &OutfitCombination<'_>,
    profile: &UserProfile,
) -> Result<f32, ScoringError> {
    ensure_items(combination)?;

    let (color_total, style_total) =
        combination
            .items()
            .iter()
            .fold((0.0f32, 0.0f32), |(colors, styles), item| {
                let color = if profile.preferred_colors.contains(&item.color) {
                    MATCHED
                } else {
                    MISMATCHED_PREFERENCE
                };
                let style = if profile.preferred_styles.contains(&item.style) {
                    MATCHED
                } else {
                    MISMATCHED_PREFERENCE
                };
                (colors + color, styles + style)
            });

    Ok((color_total + style_total) / (2.0 * combination.len() as f32))
}
