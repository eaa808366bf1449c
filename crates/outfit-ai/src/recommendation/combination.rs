use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::wardrobe::{Category, ClothingItem};

use super::domain::OutfitCombination;

pub const MAX_ITEMS_PER_SLOT: usize = 5;
pub const MAX_COMBINATIONS: usize = 20;
pub const ACCESSORY_PROBABILITY: f64 = 0.3;

/// Builds bounded candidate outfits from eligible items.
///
/// Tops and bottoms are truncated to the first few in wardrobe order rather
/// than by quality, which caps recall for large wardrobes but keeps the work
/// per request constant.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationGenerator {
    max_items_per_slot: usize,
    max_combinations: usize,
    accessory_probability: f64,
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self {
            max_items_per_slot: MAX_ITEMS_PER_SLOT,
            max_combinations: MAX_COMBINATIONS,
            accessory_probability: ACCESSORY_PROBABILITY,
        }
    }
}

impl CombinationGenerator {
    pub fn max_combinations(&self) -> usize {
        self.max_combinations
    }

    pub fn generate<'a, R: Rng>(
        &self,
        items: &[&'a ClothingItem],
        rng: &mut R,
    ) -> Vec<OutfitCombination<'a>> {
        let buckets = partition(items);
        let tops = bucket(&buckets, Category::Top);
        let bottoms = bucket(&buckets, Category::Bottom);
        let shoes = bucket(&buckets, Category::Shoes);
        let accessories = bucket(&buckets, Category::Accessory);
        let dresses = bucket(&buckets, Category::Dress);

        let mut combinations = Vec::new();

        if !tops.is_empty() && !bottoms.is_empty() {
            for top in tops.iter().take(self.max_items_per_slot) {
                for bottom in bottoms.iter().take(self.max_items_per_slot) {
                    let mut outfit = OutfitCombination::new(vec![*top, *bottom]);
                    if let Some(shoe) = shoes.choose(rng) {
                        outfit.push(*shoe);
                    }
                    if !accessories.is_empty() && rng.gen_bool(self.accessory_probability) {
                        if let Some(accessory) = accessories.choose(rng) {
                            outfit.push(*accessory);
                        }
                    }
                    combinations.push(outfit);
                }
            }
        }

        for dress in dresses {
            let mut outfit = OutfitCombination::new(vec![*dress]);
            if let Some(shoe) = shoes.choose(rng) {
                outfit.push(*shoe);
            }
            combinations.push(outfit);
        }

        combinations.truncate(self.max_combinations);
        combinations
    }
}

fn partition<'a>(items: &[&'a ClothingItem]) -> BTreeMap<Category, Vec<&'a ClothingItem>> {
    let mut buckets: BTreeMap<Category, Vec<&'a ClothingItem>> = BTreeMap::new();
    for item in items {
        buckets.entry(item.category).or_default().push(*item);
    }
    buckets
}

fn bucket<'m, 'a>(
    buckets: &'m BTreeMap<Category, Vec<&'a ClothingItem>>,
    category: Category,
) -> &'m [&'a ClothingItem] {
    buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wardrobe(tops: u64, bottoms: u64, shoes: u64, accessories: u64) -> Vec<ClothingItem> {
        let mut items = Vec::new();
        let mut id = 0;
        let mut push = |category: Category, count: u64| {
            for _ in 0..count {
                id += 1;
                items.push(ClothingItem::new(id, category, "黑色", "休闲"));
            }
        };
        push(Category::Top, tops);
        push(Category::Bottom, bottoms);
        push(Category::Shoes, shoes);
        push(Category::Accessory, accessories);
        items
    }

    #[test]
    fn caps_large_wardrobes_at_twenty_combinations() {
        let items = wardrobe(12, 9, 4, 3);
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        let combinations = CombinationGenerator::default().generate(&refs, &mut rng);

        assert_eq!(combinations.len(), MAX_COMBINATIONS);
    }

    #[test]
    fn only_the_first_five_tops_are_considered() {
        let items = wardrobe(8, 1, 0, 0);
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);

        let combinations = CombinationGenerator::default().generate(&refs, &mut rng);

        assert_eq!(combinations.len(), MAX_ITEMS_PER_SLOT);
        let top_ids: Vec<u64> = combinations
            .iter()
            .map(|outfit| outfit.items()[0].id.0)
            .collect();
        assert_eq!(top_ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn pairs_get_one_shoe_and_at_most_one_accessory() {
        let items = wardrobe(2, 2, 3, 2);
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(42);

        let combinations = CombinationGenerator::default().generate(&refs, &mut rng);

        assert_eq!(combinations.len(), 4);
        for outfit in &combinations {
            let categories = outfit.categories();
            assert_eq!(categories[0], Category::Top);
            assert_eq!(categories[1], Category::Bottom);
            assert_eq!(categories[2], Category::Shoes);
            assert!(outfit.len() <= 4);
            let accessories = categories
                .iter()
                .filter(|category| **category == Category::Accessory)
                .count();
            assert!(accessories <= 1);
        }
    }

    #[test]
    fn accessories_join_roughly_three_in_ten_pairs() {
        let items = wardrobe(1, 1, 0, 1);
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let generator = CombinationGenerator::default();
        let mut rng = StdRng::seed_from_u64(2024);

        let runs = 10_000;
        let accessorised = (0..runs)
            .map(|_| generator.generate(&refs, &mut rng))
            .filter(|combinations| combinations[0].len() == 3)
            .count();
        let rate = accessorised as f64 / runs as f64;

        assert!((0.27..=0.33).contains(&rate), "accessory rate {rate}");
    }

    #[test]
    fn dresses_form_their_own_family_after_pairs() {
        let mut items = wardrobe(1, 1, 1, 0);
        items.push(ClothingItem::new(100, Category::Dress, "粉色", "甜美可爱"));
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        let combinations = CombinationGenerator::default().generate(&refs, &mut rng);

        assert_eq!(combinations.len(), 2);
        let dress_outfit = &combinations[1];
        assert_eq!(dress_outfit.items()[0].id.0, 100);
        assert_eq!(dress_outfit.categories(), vec![Category::Dress, Category::Shoes]);
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let items = wardrobe(3, 3, 4, 4);
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let generator = CombinationGenerator::default();

        let first = generator.generate(&refs, &mut StdRng::seed_from_u64(99));
        let second = generator.generate(&refs, &mut StdRng::seed_from_u64(99));

        assert_eq!(first, second);
    }

    #[test]
    fn tops_without_bottoms_produce_nothing() {
        let items = wardrobe(3, 0, 2, 0);
        let refs: Vec<&ClothingItem> = items.iter().collect();
        let mut rng = StdRng::seed_from_u64(5);

        assert!(CombinationGenerator::default()
            .generate(&refs, &mut rng)
            .is_empty());
    }
}
