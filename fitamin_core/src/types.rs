//! Core domain types for Fitamin.
//!
//! This module defines the fundamental types shared across the crate:
//! - Closed enumerations (sex, goals, food categories, difficulty, ...)
//! - Meal items and per-date meal plans
//! - Food catalog entries
//! - The user profile with its optional fields

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercases and folds spaces/hyphens to underscores so that
/// "Menurunkan Berat", "menurunkan-berat" and "menurunkan_berat" compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Deserialize through `FromStr` so every accepted label (English
/// identifier or Indonesian display text) round-trips through serde too.
macro_rules! deserialize_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = Error;

                fn try_from(s: String) -> Result<Self> {
                    s.parse()
                }
            }
        )*
    };
}

deserialize_via_from_str!(
    Sex,
    FitnessGoal,
    ActivityLevel,
    DietPreference,
    FoodCategory,
    Difficulty,
);

// ============================================================================
// Person Attributes
// ============================================================================

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "male" | "m" | "pria" | "laki_laki" => Ok(Sex::Male),
            "female" | "f" | "wanita" | "perempuan" => Ok(Sex::Female),
            _ => Err(Error::unknown("sex", s)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        })
    }
}

/// Long-term goal the user is working towards
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum FitnessGoal {
    LoseWeight,
    GainMuscle,
    MaintainHealth,
    BoostEnergy,
}


impl FromStr for FitnessGoal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "lose_weight" | "weight_loss" | "menurunkan_berat" => Ok(FitnessGoal::LoseWeight),
            "gain_muscle" | "muscle_gain" | "menambah_massa_otot" => Ok(FitnessGoal::GainMuscle),
            "maintain_health" | "menjaga_kesehatan" => Ok(FitnessGoal::MaintainHealth),
            "boost_energy" | "energy" | "stamina" | "meningkatkan_energi"
            | "meningkatkan_stamina" => Ok(FitnessGoal::BoostEnergy),
            _ => Err(Error::unknown("fitness goal", s)),
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FitnessGoal::LoseWeight => "Lose weight",
            FitnessGoal::GainMuscle => "Gain muscle",
            FitnessGoal::MaintainHealth => "Maintain health",
            FitnessGoal::BoostEnergy => "Boost energy",
        })
    }
}

/// Self-reported daily activity level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl FromStr for ActivityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "low" | "rendah" => Ok(ActivityLevel::Low),
            "moderate" | "sedang" => Ok(ActivityLevel::Moderate),
            "high" | "tinggi" => Ok(ActivityLevel::High),
            "very_high" | "sangat_tinggi" => Ok(ActivityLevel::VeryHigh),
            _ => Err(Error::unknown("activity level", s)),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
            ActivityLevel::VeryHigh => "Very high",
        })
    }
}

/// Dietary preference
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DietPreference {
    Omnivore,
    Vegetarian,
    Vegan,
    Keto,
    Mediterranean,
}

impl FromStr for DietPreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "omnivore" | "omnivora" => Ok(DietPreference::Omnivore),
            "vegetarian" => Ok(DietPreference::Vegetarian),
            "vegan" => Ok(DietPreference::Vegan),
            "keto" => Ok(DietPreference::Keto),
            "mediterranean" => Ok(DietPreference::Mediterranean),
            _ => Err(Error::unknown("diet preference", s)),
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DietPreference::Omnivore => "Omnivore",
            DietPreference::Vegetarian => "Vegetarian",
            DietPreference::Vegan => "Vegan",
            DietPreference::Keto => "Keto",
            DietPreference::Mediterranean => "Mediterranean",
        })
    }
}

// ============================================================================
// Food Catalog Types
// ============================================================================

/// Menu category a catalog food belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum FoodCategory {
    Breakfast,
    Salad,
    Protein,
    Vegetarian,
    Drink,
}


impl FromStr for FoodCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "breakfast" | "sarapan" => Ok(FoodCategory::Breakfast),
            "salad" => Ok(FoodCategory::Salad),
            "protein" => Ok(FoodCategory::Protein),
            "vegetarian" => Ok(FoodCategory::Vegetarian),
            "drink" | "drinks" | "minuman" => Ok(FoodCategory::Drink),
            _ => Err(Error::unknown("food category", s)),
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FoodCategory::Breakfast => "Breakfast",
            FoodCategory::Salad => "Salad",
            FoodCategory::Protein => "Protein",
            FoodCategory::Vegetarian => "Vegetarian",
            FoodCategory::Drink => "Drink",
        })
    }
}

/// Preparation difficulty of a recipe
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "easy" | "mudah" => Ok(Difficulty::Easy),
            "medium" | "sedang" => Ok(Difficulty::Medium),
            "hard" | "sulit" => Ok(Difficulty::Hard),
            _ => Err(Error::unknown("difficulty", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// A read-only entry of the built-in food catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub description: String,
    pub benefits: Vec<String>,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
}

impl FoodItem {
    /// Whether `benefit` is listed among this food's benefits (exact match)
    pub fn has_benefit(&self, benefit: &str) -> bool {
        self.benefits.iter().any(|b| b == benefit)
    }
}

// ============================================================================
// Meal Plan Types
// ============================================================================

/// One portioned food in a day's meal plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    pub id: String,
    pub name: String,
    pub portion_multiplier: f64,
    pub calories_per_portion: f64,
    pub protein_per_portion: f64,
    pub carbs_per_portion: f64,
    pub fat_per_portion: f64,
}

/// The meals planned for a single date, in insertion order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    pub date: NaiveDate,
    pub meals: Vec<MealItem>,
}

// ============================================================================
// User Profile
// ============================================================================

/// User profile as exchanged with the backend.
///
/// Every health-related field is optional: it stays `None` until the user
/// supplies it, and derived metrics refuse to compute without it. The short
/// field names used by older clients (`age`, `gender`, `height`, ...) are
/// accepted on input; output always uses the unit-suffixed names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "age", skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[serde(default, alias = "gender", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, alias = "height", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, alias = "currentWeight", skip_serializing_if = "Option::is_none")]
    pub current_weight_kg: Option<f64>,
    #[serde(default, alias = "targetWeight", skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<FitnessGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_preference: Option<DietPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<f64>,
    #[serde(default, alias = "proteinTarget", skip_serializing_if = "Option::is_none")]
    pub protein_target_g: Option<f64>,
    #[serde(default, alias = "carbsTarget", skip_serializing_if = "Option::is_none")]
    pub carbs_target_g: Option<f64>,
    #[serde(default, alias = "fatTarget", skip_serializing_if = "Option::is_none")]
    pub fat_target_g: Option<f64>,
    /// Join date exactly as the backend reports it
    #[serde(
        default,
        alias = "created_at",
        alias = "joinDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sex_variants() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Pria".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("WANITA".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("laki-laki".parse::<Sex>().unwrap(), Sex::Male);
    }

    #[test]
    fn test_unknown_sex_is_rejected() {
        let err = "other".parse::<Sex>().unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { kind: "sex", .. }));
        assert!("".parse::<Sex>().is_err());
    }

    #[test]
    fn test_parse_goal_accepts_original_labels() {
        assert_eq!(
            "Menurunkan Berat".parse::<FitnessGoal>().unwrap(),
            FitnessGoal::LoseWeight
        );
        assert_eq!(
            "Menambah Massa Otot".parse::<FitnessGoal>().unwrap(),
            FitnessGoal::GainMuscle
        );
        assert_eq!(
            "maintain_health".parse::<FitnessGoal>().unwrap(),
            FitnessGoal::MaintainHealth
        );
        assert_eq!(
            "Meningkatkan Stamina".parse::<FitnessGoal>().unwrap(),
            FitnessGoal::BoostEnergy
        );
        assert!("bulk".parse::<FitnessGoal>().is_err());
    }

    #[test]
    fn test_parse_category_and_difficulty() {
        assert_eq!(
            "Minuman".parse::<FoodCategory>().unwrap(),
            FoodCategory::Drink
        );
        assert_eq!(
            "sarapan".parse::<FoodCategory>().unwrap(),
            FoodCategory::Breakfast
        );
        assert_eq!("Sulit".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("dessert".parse::<FoodCategory>().is_err());
    }

    #[test]
    fn test_enums_deserialize_from_display_labels() {
        let sex: Sex = serde_json::from_str(r#""Pria""#).unwrap();
        assert_eq!(sex, Sex::Male);
        let goal: FitnessGoal = serde_json::from_str(r#""Menjaga Kesehatan""#).unwrap();
        assert_eq!(goal, FitnessGoal::MaintainHealth);
        let activity: ActivityLevel = serde_json::from_str(r#""Sangat Tinggi""#).unwrap();
        assert_eq!(activity, ActivityLevel::VeryHigh);
        let diet: DietPreference = serde_json::from_str(r#""Omnivora""#).unwrap();
        assert_eq!(diet, DietPreference::Omnivore);
        let category: FoodCategory = serde_json::from_str(r#""Minuman""#).unwrap();
        assert_eq!(category, FoodCategory::Drink);

        // Serialization keeps the snake_case identifiers
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), r#""male""#);
        assert_eq!(
            serde_json::to_string(&ActivityLevel::VeryHigh).unwrap(),
            r#""very_high""#
        );
    }

    #[test]
    fn test_unknown_enum_label_fails_deserialization() {
        let err = serde_json::from_str::<Sex>(r#""Alien""#).unwrap_err();
        assert!(err.to_string().contains("Unknown sex: 'Alien'"));
    }

    #[test]
    fn test_profile_accepts_short_field_names() {
        let json = r#"{
            "name": "Nama Pengguna", "email": "user@example.com",
            "age": 25, "gender": "Pria", "height": 170, "currentWeight": 70,
            "targetWeight": 65, "fitnessGoal": "Menjaga Kesehatan",
            "activityLevel": "Sedang", "dietPreference": "Omnivora",
            "dailyCalorieTarget": 2000, "proteinTarget": 150,
            "carbsTarget": 250, "fatTarget": 67, "joinDate": "2024-01-15"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age_years, Some(25));
        assert_eq!(profile.sex, Some(Sex::Male));
        assert_eq!(profile.height_cm, Some(170.0));
        assert_eq!(profile.current_weight_kg, Some(70.0));
        assert_eq!(profile.target_weight_kg, Some(65.0));
        assert_eq!(profile.fitness_goal, Some(FitnessGoal::MaintainHealth));
        assert_eq!(profile.activity_level, Some(ActivityLevel::Moderate));
        assert_eq!(profile.diet_preference, Some(DietPreference::Omnivore));
        assert_eq!(profile.protein_target_g, Some(150.0));
        assert_eq!(profile.carbs_target_g, Some(250.0));
        assert_eq!(profile.fat_target_g, Some(67.0));
        assert_eq!(profile.created_at.as_deref(), Some("2024-01-15"));

        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["heightCm"], 170.0);
        assert_eq!(out["sex"], "male");
        assert!(out.get("height").is_none());

        let again: UserProfile = serde_json::from_value(out).unwrap();
        assert_eq!(again, profile);
    }

    #[test]
    fn test_profile_deserializes_partial_backend_user() {
        let json = r#"{"id": "64f0", "name": "Budi", "email": "budi@example.com"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Budi");
        assert!(profile.height_cm.is_none());
        assert!(profile.sex.is_none());
    }

    #[test]
    fn test_profile_uses_camel_case_and_ignores_server_bmi() {
        let json = r#"{
            "id": "1", "name": "Sari", "email": "sari@example.com",
            "heightCm": 160.0, "currentWeightKg": 55.5, "sex": "female",
            "fitnessGoal": "maintain_health", "bmi": 99.9
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.height_cm, Some(160.0));
        assert_eq!(profile.current_weight_kg, Some(55.5));
        assert_eq!(profile.sex, Some(Sex::Female));

        let out = serde_json::to_value(&profile).unwrap();
        assert!(out.get("bmi").is_none());
        assert!(out.get("ageYears").is_none());
    }
}
