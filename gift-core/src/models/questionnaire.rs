use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PriorityMode;

/// Smallest budget the hamper designer accepts.
pub const MIN_BUDGET: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetMode {
    /// `budget` is the spend for the whole order.
    Total,
    /// `budget` is the spend for one hamper.
    #[default]
    PerHamper,
}

impl BudgetMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "total" => Some(Self::Total),
            "per-hamper" => Some(Self::PerHamper),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroPreference {
    #[default]
    NoPreference,
    Chocolates,
    DryFruits,
    Wellness,
    Beverages,
    Stationery,
    Custom,
}

impl HeroPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPreference => "no-preference",
            Self::Chocolates => "chocolates",
            Self::DryFruits => "dry-fruits",
            Self::Wellness => "wellness",
            Self::Beverages => "beverages",
            Self::Stationery => "stationery",
            Self::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no-preference" => Some(Self::NoPreference),
            "chocolates" => Some(Self::Chocolates),
            "dry-fruits" => Some(Self::DryFruits),
            "wellness" => Some(Self::Wellness),
            "beverages" => Some(Self::Beverages),
            "stationery" => Some(Self::Stationery),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingType {
    #[default]
    Standard,
    Premium,
    Eco,
    Luxury,
}

/// A single validation failure, keyed by the questionnaire field it concerns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuestionnaireError {
    #[error("client name is required")]
    MissingClientName,

    #[error("delivery date is required")]
    MissingDeliveryDate,

    #[error("budget must be at least 200, got {0}")]
    BudgetTooLow(Decimal),

    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
}

/// Input collected by the hamper designer's wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    // Client & context
    pub client_name: String,
    pub company: String,
    pub contact: String,
    pub delivery_date: Option<NaiveDate>,

    // Budget & quantity
    pub budget_mode: BudgetMode,
    pub budget: Decimal,
    pub quantity: i64,

    pub hero_preference: HeroPreference,

    // Constraints
    pub must_have_items: Vec<String>,
    pub forbidden_categories: Vec<String>,
    pub dietary_notes: String,
    pub packaging_type: PackagingType,
    pub max_lead_time_days: u32,

    pub priority_mode: PriorityMode,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            company: String::new(),
            contact: String::new(),
            delivery_date: None,
            budget_mode: BudgetMode::PerHamper,
            budget: Decimal::from(2000),
            quantity: 10,
            hero_preference: HeroPreference::NoPreference,
            must_have_items: Vec::new(),
            forbidden_categories: Vec::new(),
            dietary_notes: String::new(),
            packaging_type: PackagingType::Standard,
            max_lead_time_days: 7,
            priority_mode: PriorityMode::Balanced,
        }
    }
}

impl Questionnaire {
    /// Checks every wizard rule and returns all failures at once.
    pub fn validate(&self) -> Result<(), Vec<QuestionnaireError>> {
        let mut errors = Vec::new();

        if self.client_name.trim().is_empty() {
            errors.push(QuestionnaireError::MissingClientName);
        }
        if self.delivery_date.is_none() {
            errors.push(QuestionnaireError::MissingDeliveryDate);
        }
        if self.budget < MIN_BUDGET {
            errors.push(QuestionnaireError::BudgetTooLow(self.budget));
        }
        if self.quantity < 1 {
            errors.push(QuestionnaireError::InvalidQuantity(self.quantity));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Budget available for a single hamper.
    ///
    /// In total mode the order budget is split evenly over the quantity and
    /// rounded to whole rupees.
    pub fn per_hamper_budget(&self) -> Decimal {
        match self.budget_mode {
            BudgetMode::PerHamper => self.budget,
            BudgetMode::Total => {
                let units = Decimal::from(self.quantity.max(1));
                (self.budget / units)
                    .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }

    /// Whole-order budget, whichever way the budget was entered.
    pub fn total_budget(&self) -> Decimal {
        match self.budget_mode {
            BudgetMode::Total => self.budget,
            BudgetMode::PerHamper => self.budget * Decimal::from(self.quantity.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn valid() -> Questionnaire {
        Questionnaire {
            client_name: "Acme Corp".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_wizard_defaults() {
        let q = Questionnaire::default();

        assert_eq!(q.budget_mode, BudgetMode::PerHamper);
        assert_eq!(q.budget, dec!(2000));
        assert_eq!(q.quantity, 10);
        assert_eq!(q.max_lead_time_days, 7);
        assert_eq!(q.priority_mode, PriorityMode::Balanced);
    }

    #[test]
    fn valid_questionnaire_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn all_failures_are_reported_together() {
        let q = Questionnaire {
            client_name: "   ".to_string(),
            budget: dec!(199),
            quantity: 0,
            ..Default::default()
        };

        assert_eq!(
            q.validate(),
            Err(vec![
                QuestionnaireError::MissingClientName,
                QuestionnaireError::MissingDeliveryDate,
                QuestionnaireError::BudgetTooLow(dec!(199)),
                QuestionnaireError::InvalidQuantity(0),
            ])
        );
    }

    #[test]
    fn budget_at_minimum_is_accepted() {
        let q = Questionnaire {
            budget: dec!(200),
            ..valid()
        };

        assert_eq!(q.validate(), Ok(()));
    }

    #[test]
    fn total_budget_is_split_per_hamper() {
        let q = Questionnaire {
            budget_mode: BudgetMode::Total,
            budget: dec!(20000),
            quantity: 3,
            ..valid()
        };

        assert_eq!(q.per_hamper_budget(), dec!(6667));
        assert_eq!(q.total_budget(), dec!(20000));
    }

    #[test]
    fn per_hamper_budget_is_used_as_is() {
        let q = Questionnaire {
            budget: dec!(1500),
            quantity: 4,
            ..valid()
        };

        assert_eq!(q.per_hamper_budget(), dec!(1500));
        assert_eq!(q.total_budget(), dec!(6000));
    }

    #[test]
    fn zero_quantity_does_not_divide_by_zero() {
        let q = Questionnaire {
            budget_mode: BudgetMode::Total,
            budget: dec!(5000),
            quantity: 0,
            ..valid()
        };

        assert_eq!(q.per_hamper_budget(), dec!(5000));
    }

    #[test]
    fn parses_hero_preferences() {
        assert_eq!(HeroPreference::parse("dry-fruits"), Some(HeroPreference::DryFruits));
        assert_eq!(HeroPreference::parse("snacks"), None);
        assert_eq!(BudgetMode::parse("total"), Some(BudgetMode::Total));
    }
}
