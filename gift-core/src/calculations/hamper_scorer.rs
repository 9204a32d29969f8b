//! Confidence and feasibility labelling for generated hamper candidates.
//!
//! This is a heuristic, not an optimiser. Each candidate is tested against
//! the per-hamper budget with a 15% tolerance band, then labelled by its
//! position in generation order:
//!
//! | Condition                       | Confidence                  | Feasibility |
//! |---------------------------------|-----------------------------|-------------|
//! | within budget, index < 3        | random in `[70, 95]`        | green       |
//! | within budget, index >= 3       | random in `[70, 95]`        | yellow      |
//! | over budget                     | `max(40, 55 - 5 * index)`   | red         |
//!
//! The result is sorted by confidence, highest first. The sort is stable, so
//! equal confidences keep their generation order.
//!
//! The random source is passed in; seed a [`rand::rngs::StdRng`] for
//! reproducible output.

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;

use crate::models::{Badge, Feasibility, GeneratedHamper, HamperCandidate, PriorityMode};

/// Multiplier applied to the budget before comparing: totals up to 115% of
/// the budget still count as within budget.
pub const BUDGET_TOLERANCE: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Candidates ranked below this index are labelled backups.
pub const PRIMARY_SLOTS: usize = 3;

pub const MIN_CONFIDENCE_WITHIN_BUDGET: u8 = 70;
pub const MAX_CONFIDENCE_WITHIN_BUDGET: u8 = 95;

const OVER_BUDGET_BASE_CONFIDENCE: i64 = 55;
const OVER_BUDGET_STEP: i64 = 5;
const OVER_BUDGET_FLOOR: i64 = 40;

const HAMPER_NAMES: [&str; 5] = [
    "Classic Delight Hamper",
    "Premium Wellness Box",
    "Festive Joy Hamper",
    "Executive Gift Set",
    "Artisan Curated Basket",
];

const WHY_CHOSEN_POOL: [&str; 10] = [
    "Matches budget range perfectly",
    "Hero product aligns with preference",
    "Fastest delivery option available",
    "Best value per item ratio",
    "Premium packaging included",
    "Popular choice for corporate clients",
    "Meets dietary requirements",
    "Eco-friendly packaging option",
    "High client satisfaction rating",
    "Seasonal bestseller",
];

/// Budget fit and labels for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HamperScore {
    pub within_budget: bool,
    pub confidence: u8,
    pub feasibility: Feasibility,
}

/// `true` when `total_price` is at most 115% of `budget`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use gift_core::calculations::is_within_budget;
///
/// assert!(is_within_budget(dec!(1000), dec!(1000)));
/// assert!(is_within_budget(dec!(1150), dec!(1000)));
/// assert!(!is_within_budget(dec!(1151), dec!(1000)));
/// ```
pub fn is_within_budget(
    total_price: Decimal,
    budget: Decimal,
) -> bool {
    total_price <= budget * BUDGET_TOLERANCE
}

/// Scores the candidate at generation index `index`.
pub fn score_candidate<R: Rng + ?Sized>(
    total_price: Decimal,
    budget: Decimal,
    index: usize,
    rng: &mut R,
) -> HamperScore {
    let within_budget = is_within_budget(total_price, budget);

    let confidence = if within_budget {
        rng.gen_range(MIN_CONFIDENCE_WITHIN_BUDGET..=MAX_CONFIDENCE_WITHIN_BUDGET)
    } else {
        over_budget_confidence(index)
    };

    let feasibility = match (within_budget, index < PRIMARY_SLOTS) {
        (true, true) => Feasibility::Green,
        (true, false) => Feasibility::Yellow,
        (false, _) => Feasibility::Red,
    };

    HamperScore {
        within_budget,
        confidence,
        feasibility,
    }
}

fn over_budget_confidence(index: usize) -> u8 {
    let index = i64::try_from(index).unwrap_or(i64::MAX / OVER_BUDGET_STEP);
    let confidence = (OVER_BUDGET_BASE_CONFIDENCE - OVER_BUDGET_STEP * index).max(OVER_BUDGET_FLOOR);

    // Bounded to [40, 55] above.
    confidence as u8
}

/// Sorts hampers by confidence, highest first, keeping generation order
/// among equals.
pub fn rank_by_confidence(hampers: &mut [GeneratedHamper]) {
    hampers.sort_by(|a, b| b.confidence.cmp(&a.confidence));
}

/// Badges shown on the result card of the candidate at `index`.
pub fn badges_for(
    index: usize,
    priority: PriorityMode,
) -> Vec<Badge> {
    let mut badges = Vec::new();
    if index == 0 {
        badges.push(Badge::FastDelivery);
    }
    if priority == PriorityMode::Premium || index == 1 {
        badges.push(Badge::Premium);
    }
    if index >= PRIMARY_SLOTS {
        badges.push(Badge::LowStock);
    }
    badges
}

/// Labels candidates (given in generation order) and returns them ranked.
pub fn score_hampers<R: Rng + ?Sized>(
    candidates: Vec<HamperCandidate>,
    budget: Decimal,
    priority: PriorityMode,
    rng: &mut R,
) -> Vec<GeneratedHamper> {
    let mut hampers: Vec<GeneratedHamper> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let total_price = candidate.total_price();
            let score = score_candidate(total_price, budget, index, rng);
            let reason_count = if index < PRIMARY_SLOTS { 3 } else { 2 };
            let why_chosen = WHY_CHOSEN_POOL
                .choose_multiple(rng, reason_count)
                .map(|reason| reason.to_string())
                .collect();

            GeneratedHamper {
                id: format!("gen-{index}"),
                name: HAMPER_NAMES[index % HAMPER_NAMES.len()].to_string(),
                hero_product: candidate.hero.name.clone(),
                side_items: candidate.sides.iter().map(|s| s.name.clone()).collect(),
                total_price,
                badges: badges_for(index, priority),
                items: candidate.items(),
                gst_percent: priority.gst_percent(),
                confidence: score.confidence,
                feasibility: score.feasibility,
                why_chosen,
                is_backup: index >= PRIMARY_SLOTS,
            }
        })
        .collect();

    rank_by_confidence(&mut hampers);
    hampers
}
