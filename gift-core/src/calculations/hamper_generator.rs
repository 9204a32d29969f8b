//! Candidate generation for the hamper designer.
//!
//! Builds five hamper combinations from a fixed item catalogue: one hero
//! item drawn in order from the preferred category and three or four random
//! side items. Candidates are then handed to the scorer.

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::hamper_scorer::score_hampers;
use crate::models::{GeneratedHamper, HamperCandidate, HamperItem, HeroPreference, Questionnaire};

/// Number of candidates produced per run.
pub const CANDIDATE_COUNT: usize = 5;

/// A catalogue entry: item name and pre-tax unit price in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolItem {
    pub name: &'static str,
    pub price: u32,
}

impl PoolItem {
    const fn new(
        name: &'static str,
        price: u32,
    ) -> Self {
        Self { name, price }
    }

    fn to_hamper_item(self) -> HamperItem {
        HamperItem {
            name: self.name.to_string(),
            qty: 1,
            unit_price: Decimal::from(self.price),
        }
    }
}

const CHOCOLATES: [PoolItem; 5] = [
    PoolItem::new("Artisan Chocolate Box", 550),
    PoolItem::new("Belgian Truffles", 680),
    PoolItem::new("Almond Brittle", 180),
    PoolItem::new("Dark Chocolate Bar Set", 320),
    PoolItem::new("Chocolate Coated Almonds", 240),
];

const DRY_FRUITS: [PoolItem; 5] = [
    PoolItem::new("Premium Cashew Tin", 480),
    PoolItem::new("Mixed Dry Fruits Box", 520),
    PoolItem::new("Dried Cranberries Pack", 140),
    PoolItem::new("Pistachio Gift Pack", 560),
    PoolItem::new("Trail Mix Jar", 190),
];

const WELLNESS: [PoolItem; 5] = [
    PoolItem::new("Organic Superfood Mix", 680),
    PoolItem::new("Lavender Candle", 350),
    PoolItem::new("Herbal Soap Set", 370),
    PoolItem::new("Bamboo Tumbler", 420),
    PoolItem::new("Essential Oil Set", 450),
];

const BEVERAGES: [PoolItem; 5] = [
    PoolItem::new("Green Tea Tin", 180),
    PoolItem::new("Masala Chai Box", 220),
    PoolItem::new("Cold Brew Kit", 480),
    PoolItem::new("Specialty Coffee Beans", 390),
    PoolItem::new("Herbal Infusion Set", 310),
];

const STATIONERY: [PoolItem; 5] = [
    PoolItem::new("Leather Notebook", 450),
    PoolItem::new("Premium Pen Set", 380),
    PoolItem::new("Desk Organizer", 520),
    PoolItem::new("Sticky Notes Collection", 120),
    PoolItem::new("Eco Pencil Kit", 160),
];

const GENERAL: [PoolItem; 5] = [
    PoolItem::new("Honey Jar", 220),
    PoolItem::new("Scented Candles Set", 280),
    PoolItem::new("Cookie Tin", 300),
    PoolItem::new("Mug", 200),
    PoolItem::new("Fig Jam", 180),
];

/// Hero items for a preference. `no-preference` and `custom` use the
/// general pool.
pub fn hero_pool(preference: HeroPreference) -> &'static [PoolItem] {
    match preference {
        HeroPreference::Chocolates => &CHOCOLATES,
        HeroPreference::DryFruits => &DRY_FRUITS,
        HeroPreference::Wellness => &WELLNESS,
        HeroPreference::Beverages => &BEVERAGES,
        HeroPreference::Stationery => &STATIONERY,
        HeroPreference::NoPreference | HeroPreference::Custom => &GENERAL,
    }
}

fn uses_general_pool(preference: HeroPreference) -> bool {
    matches!(preference, HeroPreference::NoPreference | HeroPreference::Custom)
}

/// Side items for a preference: the general pool, plus chocolates when the
/// hero also comes from the general pool.
pub fn side_pool(preference: HeroPreference) -> Vec<PoolItem> {
    let mut pool = GENERAL.to_vec();
    if uses_general_pool(preference) {
        pool.extend_from_slice(&CHOCOLATES);
    }
    pool
}

/// Builds [`CANDIDATE_COUNT`] unscored candidates in generation order.
pub fn generate_candidates<R: Rng + ?Sized>(
    preference: HeroPreference,
    rng: &mut R,
) -> Vec<HamperCandidate> {
    let heroes = hero_pool(preference);
    let sides = side_pool(preference);

    (0..CANDIDATE_COUNT)
        .map(|i| {
            let hero = heroes[i % heroes.len()];
            let available: Vec<PoolItem> = sides
                .iter()
                .copied()
                .filter(|side| side.name != hero.name)
                .collect();
            let side_count = 3 + (i % 2);

            HamperCandidate {
                hero: hero.to_hamper_item(),
                sides: available
                    .choose_multiple(rng, side_count)
                    .map(|side| side.to_hamper_item())
                    .collect(),
            }
        })
        .collect()
}

/// Generates, scores and ranks hampers for a questionnaire.
///
/// The questionnaire is not validated here; callers run
/// [`Questionnaire::validate`] first.
pub fn generate_hampers<R: Rng + ?Sized>(
    questionnaire: &Questionnaire,
    rng: &mut R,
) -> Vec<GeneratedHamper> {
    let budget = questionnaire.per_hamper_budget();
    debug!(
        preference = questionnaire.hero_preference.as_str(),
        priority = questionnaire.priority_mode.as_str(),
        %budget,
        "Generating hamper candidates"
    );

    let candidates = generate_candidates(questionnaire.hero_preference, rng);
    score_hampers(candidates, budget, questionnaire.priority_mode, rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BudgetMode, Feasibility, PriorityMode};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // =========================================================================
    // pools
    // =========================================================================

    #[test]
    fn no_preference_and_custom_use_general_heroes() {
        assert_eq!(hero_pool(HeroPreference::NoPreference), &GENERAL);
        assert_eq!(hero_pool(HeroPreference::Custom), &GENERAL);
    }

    #[test]
    fn general_side_pool_includes_chocolates() {
        assert_eq!(side_pool(HeroPreference::NoPreference).len(), 10);
        assert_eq!(side_pool(HeroPreference::Wellness).len(), 5);
        assert_eq!(side_pool(HeroPreference::Chocolates).len(), 5);
    }

    // =========================================================================
    // generate_candidates
    // =========================================================================

    #[test]
    fn heroes_are_taken_in_pool_order() {
        let candidates = generate_candidates(HeroPreference::Beverages, &mut rng());

        let heroes: Vec<&str> = candidates.iter().map(|c| c.hero.name.as_str()).collect();
        assert_eq!(
            heroes,
            vec![
                "Green Tea Tin",
                "Masala Chai Box",
                "Cold Brew Kit",
                "Specialty Coffee Beans",
                "Herbal Infusion Set",
            ]
        );
    }

    #[test]
    fn side_counts_alternate_between_three_and_four() {
        let candidates = generate_candidates(HeroPreference::Stationery, &mut rng());

        let counts: Vec<usize> = candidates.iter().map(|c| c.sides.len()).collect();
        assert_eq!(counts, vec![3, 4, 3, 4, 3]);
    }

    #[test]
    fn sides_are_distinct_and_never_repeat_the_hero() {
        for preference in [HeroPreference::NoPreference, HeroPreference::DryFruits] {
            for candidate in generate_candidates(preference, &mut rng()) {
                let names: HashSet<&str> = candidate.sides.iter().map(|s| s.name.as_str()).collect();

                assert_eq!(names.len(), candidate.sides.len());
                assert!(!names.contains(candidate.hero.name.as_str()));
            }
        }
    }

    #[test]
    fn every_item_has_quantity_one() {
        let candidates = generate_candidates(HeroPreference::Chocolates, &mut rng());

        assert!(candidates.iter().flat_map(|c| c.items()).all(|item| item.qty == 1));
    }

    // =========================================================================
    // generate_hampers
    // =========================================================================

    #[test]
    fn generous_budget_yields_five_ranked_hampers() {
        let questionnaire = Questionnaire {
            budget: dec!(5000),
            hero_preference: HeroPreference::Wellness,
            ..Default::default()
        };

        let hampers = generate_hampers(&questionnaire, &mut rng());

        assert_eq!(hampers.len(), CANDIDATE_COUNT);
        assert!(hampers.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        assert!(hampers.iter().all(|h| h.feasibility != Feasibility::Red));
        assert!(hampers.iter().all(|h| (70..=95).contains(&h.confidence)));
        assert!(hampers.iter().all(|h| h.gst_percent == dec!(12)));
    }

    #[test]
    fn tiny_budget_marks_everything_red() {
        let questionnaire = Questionnaire {
            budget_mode: BudgetMode::Total,
            budget: dec!(1000),
            quantity: 10,
            priority_mode: PriorityMode::Premium,
            ..Default::default()
        };

        let hampers = generate_hampers(&questionnaire, &mut rng());

        assert!(hampers.iter().all(|h| h.feasibility == Feasibility::Red));
        let confidences: Vec<u8> = hampers.iter().map(|h| h.confidence).collect();
        assert_eq!(confidences, vec![55, 50, 45, 40, 40]);
        let ids: Vec<&str> = hampers.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["gen-0", "gen-1", "gen-2", "gen-3", "gen-4"]);
        assert!(hampers.iter().all(|h| h.gst_percent == dec!(18)));
    }

    #[test]
    fn total_price_matches_items() {
        let hampers = generate_hampers(&Questionnaire::default(), &mut rng());

        for hamper in &hampers {
            let sum: Decimal = hamper
                .items
                .iter()
                .map(|item| item.unit_price * Decimal::from(item.qty))
                .sum();
            assert_eq!(hamper.total_price, sum);
            assert_eq!(hamper.side_items.len() + 1, hamper.items.len());
            assert_eq!(hamper.items[0].name, hamper.hero_product);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let questionnaire = Questionnaire::default();

        let first = generate_hampers(&questionnaire, &mut rng());
        let second = generate_hampers(&questionnaire, &mut rng());

        assert_eq!(first, second);
    }
}
