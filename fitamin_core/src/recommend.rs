//! Food recommendation filtering.
//!
//! Filters a catalog by free-text search, category and fitness goal. The
//! three criteria are AND-combined and the catalog order is preserved.

use crate::{Error, FitnessGoal, FoodCategory, FoodItem, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weight-loss foods must stay strictly below this many kcal
pub const WEIGHT_LOSS_MAX_CALORIES: f64 = 350.0;
/// Muscle-gain foods must carry strictly more protein (g) than this
pub const MUSCLE_GAIN_MIN_PROTEIN_G: f64 = 20.0;
/// Benefit tag that marks a food as supporting general health
pub const MAINTAIN_HEALTH_BENEFIT: &str = "Kaya Nutrisi";
/// Benefit tag that marks a food as an energy booster
pub const ENERGY_BENEFIT: &str = "Energi";

/// Per-goal predicate parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalThresholds {
    #[serde(default = "default_weight_loss_max_calories")]
    pub weight_loss_max_calories: f64,

    #[serde(default = "default_muscle_gain_min_protein_g")]
    pub muscle_gain_min_protein_g: f64,

    #[serde(default = "default_maintain_health_benefit")]
    pub maintain_health_benefit: String,

    #[serde(default = "default_energy_benefit")]
    pub energy_benefit: String,
}

impl Default for GoalThresholds {
    fn default() -> Self {
        Self {
            weight_loss_max_calories: default_weight_loss_max_calories(),
            muscle_gain_min_protein_g: default_muscle_gain_min_protein_g(),
            maintain_health_benefit: default_maintain_health_benefit(),
            energy_benefit: default_energy_benefit(),
        }
    }
}

fn default_weight_loss_max_calories() -> f64 {
    WEIGHT_LOSS_MAX_CALORIES
}

fn default_muscle_gain_min_protein_g() -> f64 {
    MUSCLE_GAIN_MIN_PROTEIN_G
}

fn default_maintain_health_benefit() -> String {
    MAINTAIN_HEALTH_BENEFIT.into()
}

fn default_energy_benefit() -> String {
    ENERGY_BENEFIT.into()
}

impl GoalThresholds {
    /// Whether `food` suits `goal`
    pub fn matches(&self, goal: FitnessGoal, food: &FoodItem) -> bool {
        match goal {
            FitnessGoal::LoseWeight => food.calories < self.weight_loss_max_calories,
            FitnessGoal::GainMuscle => food.protein > self.muscle_gain_min_protein_g,
            FitnessGoal::MaintainHealth => food.has_benefit(&self.maintain_health_benefit),
            FitnessGoal::BoostEnergy => food.has_benefit(&self.energy_benefit),
        }
    }
}

fn is_all(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "all" | "semua")
}

/// Category criterion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(FoodCategory),
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if is_all(s) {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Goal criterion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GoalFilter {
    #[default]
    All,
    Goal(FitnessGoal),
}

impl FromStr for GoalFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if is_all(s) {
            Ok(GoalFilter::All)
        } else {
            s.parse().map(GoalFilter::Goal)
        }
    }
}

/// A recommendation search
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecommendationQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub goal: GoalFilter,
}

impl RecommendationQuery {
    fn matches(&self, needle: &str, food: &FoodItem, thresholds: &GoalThresholds) -> bool {
        let text_ok = needle.is_empty()
            || food.name.to_lowercase().contains(needle)
            || food.description.to_lowercase().contains(needle);

        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => food.category == category,
        };

        let goal_ok = match self.goal {
            GoalFilter::All => true,
            GoalFilter::Goal(goal) => thresholds.matches(goal, food),
        };

        text_ok && category_ok && goal_ok
    }
}

/// Return the foods matching `query`, in their original order
pub fn filter<'a, I>(
    catalog: I,
    query: &RecommendationQuery,
    thresholds: &GoalThresholds,
) -> Vec<&'a FoodItem>
where
    I: IntoIterator<Item = &'a FoodItem>,
{
    let needle = query.text.to_lowercase();
    let results: Vec<&FoodItem> = catalog
        .into_iter()
        .filter(|food| query.matches(&needle, food, thresholds))
        .collect();

    tracing::debug!(
        "Recommendation filter {:?} matched {} foods",
        query,
        results.len()
    );
    results
}
