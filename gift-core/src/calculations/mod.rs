//! Money and scoring calculations for proforma invoices and gift hampers.
//!
//! Everything here is pure: no I/O, no shared state. Random choices in the
//! hamper designer go through a caller-supplied [`rand::Rng`].

pub mod common;
mod hamper_generator;
mod hamper_scorer;
mod mrp;
mod totals;

pub use hamper_generator::{
    CANDIDATE_COUNT, PoolItem, generate_candidates, generate_hampers, hero_pool, side_pool,
};
pub use hamper_scorer::{
    BUDGET_TOLERANCE, HamperScore, MAX_CONFIDENCE_WITHIN_BUDGET, MIN_CONFIDENCE_WITHIN_BUDGET,
    PRIMARY_SLOTS, badges_for, is_within_budget, rank_by_confidence, score_candidate,
    score_hampers,
};
pub use mrp::{MRP_MISMATCH_TOLERANCE, derive_mrp, mrp_mismatch};
pub use totals::calculate_totals;
