//! Derived health metrics for a user profile, and partial profile updates.
//!
//! Metrics are only computed from fields the user has actually filled in;
//! a missing field is reported as [`Error::NotComputable`], never defaulted.

use crate::bmi::{validate_height, validate_weight, Anthropometrics, BmiResult};
use crate::bmr::compute_bmr;
use crate::{
    ActivityLevel, DailyTargets, DietPreference, Error, FitnessGoal, Result, Sex, UserProfile,
};
use serde::{Deserialize, Serialize};

impl UserProfile {
    /// Validated height/weight, if both are present and in range
    pub fn anthropometrics(&self) -> Result<Anthropometrics> {
        let height = self.height_cm.ok_or(Error::NotComputable("height"))?;
        let weight = self
            .current_weight_kg
            .ok_or(Error::NotComputable("current weight"))?;
        Anthropometrics::new(height, weight)
    }

    /// BMI derived from the current height and weight
    pub fn bmi(&self) -> Result<BmiResult> {
        Ok(self.anthropometrics()?.bmi())
    }

    /// Basal metabolic rate; needs height, weight, age and sex
    pub fn bmr(&self) -> Result<f64> {
        let body = self.anthropometrics()?;
        let age = self.age_years.ok_or(Error::NotComputable("age"))?;
        let sex = self.sex.ok_or(Error::NotComputable("sex"))?;
        compute_bmr(body.weight_kg(), body.height_cm(), age, sex)
    }

    /// Profile targets overlaid on `defaults`
    pub fn daily_targets(&self, defaults: &DailyTargets) -> DailyTargets {
        DailyTargets {
            calories: self.daily_calorie_target.unwrap_or(defaults.calories),
            protein_g: self.protein_target_g.unwrap_or(defaults.protein_g),
            carbs_g: self.carbs_target_g.unwrap_or(defaults.carbs_g),
            fat_g: self.fat_target_g.unwrap_or(defaults.fat_g),
        }
    }

    /// Kilograms still to lose (positive) or gain (negative) to reach the target weight
    pub fn weight_to_target(&self) -> Result<f64> {
        let current = self
            .current_weight_kg
            .ok_or(Error::NotComputable("current weight"))?;
        let target = self
            .target_weight_kg
            .ok_or(Error::NotComputable("target weight"))?;
        Ok(current - target)
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &ProfileUpdate) {
        macro_rules! overwrite {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &update.$field {
                        self.$field = Some(value.clone());
                    }
                )*
            };
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        overwrite!(
            age_years,
            sex,
            height_cm,
            current_weight_kg,
            target_weight_kg,
            fitness_goal,
            activity_level,
            diet_preference,
            daily_calorie_target,
            protein_target_g,
            carbs_target_g,
            fat_target_g,
        );
    }
}

/// Partial profile body for `PUT /user/profile`; only set fields are sent
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<FitnessGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_preference: Option<DietPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_target_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_target_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_target_g: Option<f64>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject values the settings screen would not accept
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation("name must not be empty".into()));
            }
        }
        if let Some(height) = self.height_cm {
            validate_height(height)?;
        }
        for weight in [self.current_weight_kg, self.target_weight_kg]
            .into_iter()
            .flatten()
        {
            validate_weight(weight)?;
        }

        let targets = [
            ("daily calorie target", self.daily_calorie_target),
            ("protein target", self.protein_target_g),
            ("carbs target", self.carbs_target_g),
            ("fat target", self.fat_target_g),
        ];
        for (name, value) in targets {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Validation(format!(
                        "{} must be a non-negative number",
                        name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Health figures shown on the profile screen
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HealthSummary {
    pub bmi: Option<BmiResult>,
    pub bmr: Option<f64>,
    pub targets: DailyTargets,
}

impl HealthSummary {
    pub fn for_profile(profile: &UserProfile, defaults: &DailyTargets) -> Self {
        Self {
            bmi: profile.bmi().ok(),
            bmr: profile.bmr().ok(),
            targets: profile.daily_targets(defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;

    fn complete_profile() -> UserProfile {
        UserProfile {
            id: "1".into(),
            name: "Nama Pengguna".into(),
            email: "user@example.com".into(),
            age_years: Some(25),
            sex: Some(Sex::Male),
            height_cm: Some(170.0),
            current_weight_kg: Some(70.0),
            target_weight_kg: Some(65.0),
            ..Default::default()
        }
    }

    fn defaults() -> DailyTargets {
        DailyTargets {
            calories: 2000.0,
            protein_g: 150.0,
            carbs_g: 250.0,
            fat_g: 67.0,
        }
    }

    #[test]
    fn test_bmi_and_bmr_from_complete_profile() {
        let profile = complete_profile();
        let bmi = profile.bmi().unwrap();
        assert_eq!(bmi.status, BmiCategory::Normal);
        assert!((profile.bmr().unwrap() - 1642.5).abs() < 1e-9);
        assert!((profile.weight_to_target().unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_height_is_not_computable() {
        let mut profile = complete_profile();
        profile.height_cm = None;
        assert!(matches!(profile.bmi(), Err(Error::NotComputable("height"))));
        assert!(matches!(profile.bmr(), Err(Error::NotComputable("height"))));
    }

    #[test]
    fn test_missing_sex_blocks_bmr_only() {
        let mut profile = complete_profile();
        profile.sex = None;
        assert!(profile.bmi().is_ok());
        assert!(matches!(profile.bmr(), Err(Error::NotComputable("sex"))));
    }

    #[test]
    fn test_out_of_range_weight_is_rejected() {
        let mut profile = complete_profile();
        profile.current_weight_kg = Some(500.0);
        assert!(matches!(profile.bmi(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_targets_overlay_defaults() {
        let mut profile = complete_profile();
        profile.protein_target_g = Some(120.0);
        let targets = profile.daily_targets(&defaults());
        assert_eq!(targets.calories, 2000.0);
        assert_eq!(targets.protein_g, 120.0);
    }

    #[test]
    fn test_apply_update() {
        let mut profile = complete_profile();
        let update = ProfileUpdate {
            name: Some("Budi".into()),
            current_weight_kg: Some(68.0),
            fitness_goal: Some(FitnessGoal::LoseWeight),
            ..Default::default()
        };
        profile.apply(&update);
        assert_eq!(profile.name, "Budi");
        assert_eq!(profile.current_weight_kg, Some(68.0));
        assert_eq!(profile.fitness_goal, Some(FitnessGoal::LoseWeight));
        assert_eq!(profile.height_cm, Some(170.0));
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = ProfileUpdate {
            height_cm: Some(172.0),
            sex: Some(Sex::Female),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["heightCm"], 172.0);
        assert_eq!(obj["sex"], "female");
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_update_validation() {
        let bad_height = ProfileUpdate {
            height_cm: Some(20.0),
            ..Default::default()
        };
        assert!(bad_height.validate().is_err());

        let bad_weight = ProfileUpdate {
            target_weight_kg: Some(5.0),
            ..Default::default()
        };
        assert!(bad_weight.validate().is_err());

        let negative_target = ProfileUpdate {
            fat_target_g: Some(-1.0),
            ..Default::default()
        };
        assert!(negative_target.validate().is_err());

        let ok = ProfileUpdate {
            height_cm: Some(180.0),
            current_weight_kg: Some(80.0),
            daily_calorie_target: Some(2200.0),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_health_summary_with_partial_profile() {
        let profile = UserProfile {
            id: "2".into(),
            name: "Sari".into(),
            email: "sari@example.com".into(),
            ..Default::default()
        };
        let summary = HealthSummary::for_profile(&profile, &defaults());
        assert!(summary.bmi.is_none());
        assert!(summary.bmr.is_none());
        assert_eq!(summary.targets, defaults());
    }
}
