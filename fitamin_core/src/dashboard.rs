//! Dashboard summary: today's nutrition progress plus the user's BMI.

use crate::bmi::BmiResult;
use crate::nutrition::{aggregate, daily_progress, DailyProgress, DailyTargets, NutritionTotals};
use crate::{MealItem, UserProfile};
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DashboardSummary {
    /// Present only when the profile has height and current weight
    pub bmi: Option<BmiResult>,
    pub totals: NutritionTotals,
    pub targets: DailyTargets,
    pub progress: DailyProgress,
    pub meal_count: usize,
}

impl DashboardSummary {
    /// Build the summary for one day's meals.
    ///
    /// Profile targets override `default_targets` field by field.
    pub fn build(
        profile: Option<&UserProfile>,
        default_targets: &DailyTargets,
        meals: &[MealItem],
    ) -> Self {
        let targets = profile
            .map(|p| p.daily_targets(default_targets))
            .unwrap_or(*default_targets);
        let totals = aggregate(meals);

        Self {
            bmi: profile.and_then(|p| p.bmi().ok()),
            totals,
            targets,
            progress: daily_progress(&totals, &targets),
            meal_count: meals.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;

    fn targets() -> DailyTargets {
        DailyTargets {
            calories: 2000.0,
            protein_g: 150.0,
            carbs_g: 250.0,
            fat_g: 67.0,
        }
    }

    #[test]
    fn test_empty_day_without_profile() {
        let summary = DashboardSummary::build(None, &targets(), &[]);
        assert!(summary.bmi.is_none());
        assert_eq!(summary.totals, NutritionTotals::default());
        assert_eq!(summary.progress.calories, 0.0);
        assert_eq!(summary.meal_count, 0);
    }

    #[test]
    fn test_progress_uses_profile_targets() {
        let profile = UserProfile {
            height_cm: Some(170.0),
            current_weight_kg: Some(70.0),
            daily_calorie_target: Some(1000.0),
            ..Default::default()
        };
        let meals = vec![MealItem::new("Nasi Goreng", 1.0, 350.0, 8.0, 45.0, 12.0)];

        let summary = DashboardSummary::build(Some(&profile), &targets(), &meals);
        assert_eq!(summary.targets.calories, 1000.0);
        assert_eq!(summary.targets.protein_g, 150.0);
        assert!((summary.progress.calories - 35.0).abs() < 1e-9);
        assert_eq!(summary.bmi.unwrap().status, BmiCategory::Normal);
    }

    #[test]
    fn test_progress_is_capped() {
        let meals = vec![MealItem::new("Pesta", 3.0, 1000.0, 0.0, 0.0, 0.0)];
        let summary = DashboardSummary::build(None, &targets(), &meals);
        assert_eq!(summary.progress.calories, 100.0);
        assert!((summary.totals.calories - 3000.0).abs() < 1e-9);
    }
}
