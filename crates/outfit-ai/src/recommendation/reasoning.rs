use std::collections::HashSet;

use super::domain::{FormalityLevel, OutfitCombination, RecommendationContext, StyleAnalysis};
use super::knowledge::KnowledgeBase;

const CLAUSE_SEPARATOR: &str = "；";
const FALLBACK_REASON: &str = "基于您的衣橱进行智能搭配";
const FORMAL_MARKERS: [&str; 3] = ["正式", "商务", "优雅"];
const CASUAL_MARKERS: [&str; 3] = ["休闲", "运动", "街头"];

/// Human-readable rationale for a combination.
pub fn reasoning(
    combination: &OutfitCombination<'_>,
    context: &RecommendationContext,
    knowledge: &KnowledgeBase,
) -> String {
    let mut reasons = Vec::new();

    let colors: HashSet<&str> = combination.colors().collect();
    if colors.len() <= 2 {
        reasons.push("色彩搭配简洁和谐".to_string());
    }

    let styles: Vec<&str> = combination.styles().collect();
    let distinct_styles: HashSet<&str> = styles.iter().copied().collect();
    if distinct_styles.len() == 1 {
        reasons.push(format!("整体风格统一({})", styles[0]));
    }

    if knowledge.occasion(&context.occasion).is_some() {
        reasons.push(format!("适合{}场合", context.occasion));
    }

    if knowledge.season(&context.season).is_some() {
        reasons.push(format!("符合{}季节特点", context.season));
    }

    if reasons.is_empty() {
        FALLBACK_REASON.to_string()
    } else {
        reasons.join(CLAUSE_SEPARATOR)
    }
}

pub fn style_analysis(combination: &OutfitCombination<'_>) -> StyleAnalysis {
    let styles: Vec<&str> = combination.styles().collect();

    StyleAnalysis {
        dominant_style: stable_mode(&styles).unwrap_or_default().to_string(),
        color_palette: dedup_in_order(combination.colors()),
        categories: combination.categories(),
        formality_level: estimate_formality(&styles),
    }
}

/// Most frequent label; ties go to the label seen first.
fn stable_mode<'s>(labels: &[&'s str]) -> Option<&'s str> {
    let mut counts: Vec<(&'s str, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(seen, _)| seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((*label, 1)),
        }
    }

    let mut best: Option<(&'s str, usize)> = None;
    for (label, count) in counts {
        if best.map(|(_, max)| count > max).unwrap_or(true) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

fn dedup_in_order<'s>(values: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

fn estimate_formality(styles: &[&str]) -> FormalityLevel {
    let count_matching = |markers: &[&str]| {
        styles
            .iter()
            .filter(|style| markers.iter().any(|marker| style.contains(marker)))
            .count()
    };
    let formal = count_matching(&FORMAL_MARKERS);
    let casual = count_matching(&CASUAL_MARKERS);

    if formal > casual {
        FormalityLevel::Formal
    } else if casual > formal {
        FormalityLevel::Casual
    } else {
        FormalityLevel::SemiFormal
    }
}
