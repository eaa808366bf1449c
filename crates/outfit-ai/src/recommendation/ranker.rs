use super::domain::ScoredOutfit;

pub const DEFAULT_LIMIT: usize = 5;
pub const MAX_LIMIT: usize = 20;

/// Orders outfits by confidence, highest first, keeping emission order on ties.
pub fn rank(mut outfits: Vec<ScoredOutfit>, limit: usize) -> Vec<ScoredOutfit> {
    // `sort_by` is stable, which is what preserves generator order for equal scores.
    outfits.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    outfits.truncate(limit);
    outfits
}
