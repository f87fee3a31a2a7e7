//! Daily nutrition aggregation and progress against targets.

use crate::{Error, MealItem, Result};
use serde::{Deserialize, Serialize};

/// Summed nutrients for a day
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Daily nutrition targets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyTargets {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Progress towards each target, in percent (0..=100)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyProgress {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Sum `per_portion × portion_multiplier` over all meals.
///
/// An empty slice yields all-zero totals.
pub fn aggregate(meals: &[MealItem]) -> NutritionTotals {
    meals
        .iter()
        .fold(NutritionTotals::default(), |totals, meal| NutritionTotals {
            calories: totals.calories + meal.calories_per_portion * meal.portion_multiplier,
            protein: totals.protein + meal.protein_per_portion * meal.portion_multiplier,
            carbs: totals.carbs + meal.carbs_per_portion * meal.portion_multiplier,
            fat: totals.fat + meal.fat_per_portion * meal.portion_multiplier,
        })
}

/// Percentage of `target` reached by `current`, clamped to `0..=100`.
///
/// Returns 0 when the target is not positive or either input is not finite.
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    if !(current.is_finite() && target.is_finite()) || target <= 0.0 {
        return 0.0;
    }
    (100.0 * current / target).clamp(0.0, 100.0)
}

/// Progress of each nutrient total towards its target
pub fn daily_progress(totals: &NutritionTotals, targets: &DailyTargets) -> DailyProgress {
    DailyProgress {
        calories: progress_percentage(totals.calories, targets.calories),
        protein: progress_percentage(totals.protein, targets.protein_g),
        carbs: progress_percentage(totals.carbs, targets.carbs_g),
        fat: progress_percentage(totals.fat, targets.fat_g),
    }
}

/// Check a meal item before it enters a plan
pub fn validate_meal_item(item: &MealItem) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(Error::Validation("meal name must not be empty".into()));
    }
    if !item.portion_multiplier.is_finite() || item.portion_multiplier <= 0.0 {
        return Err(Error::Validation(format!(
            "portion multiplier must be greater than 0, got {}",
            item.portion_multiplier
        )));
    }

    let nutrients = [
        ("calories", item.calories_per_portion),
        ("protein", item.protein_per_portion),
        ("carbs", item.carbs_per_portion),
        ("fat", item.fat_per_portion),
    ];
    for (field, value) in nutrients {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Validation(format!(
                "{} per portion must be a non-negative number, got {}",
                field, value
            )));
        }
    }

    Ok(())
}
