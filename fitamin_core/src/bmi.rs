//! Body-mass-index computation and classification.
//!
//! BMI is always derived from the latest height and weight; it is never
//! persisted as a value of its own.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted height (cm)
pub const MIN_HEIGHT_CM: f64 = 50.0;
/// Largest accepted height (cm)
pub const MAX_HEIGHT_CM: f64 = 250.0;
/// Smallest accepted weight (kg)
pub const MIN_WEIGHT_KG: f64 = 10.0;
/// Largest accepted weight (kg)
pub const MAX_WEIGHT_KG: f64 = 300.0;

/// Lower bound (inclusive) of the Normal band
pub const NORMAL_LOWER_BOUND: f64 = 18.5;
/// Lower bound (inclusive) of the Overweight band
pub const OVERWEIGHT_LOWER_BOUND: f64 = 25.0;
/// Lower bound (inclusive) of the Obese band
pub const OBESE_LOWER_BOUND: f64 = 30.0;

/// BMI status category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Each band includes its lower bound.
    pub fn classify(bmi: f64) -> Self {
        if bmi < NORMAL_LOWER_BOUND {
            BmiCategory::Underweight
        } else if bmi < OVERWEIGHT_LOWER_BOUND {
            BmiCategory::Normal
        } else if bmi < OBESE_LOWER_BOUND {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Status text shown to the user next to the BMI value
    pub fn status_label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Kurus",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Kelebihan Berat Badan",
            BmiCategory::Obese => "Obesitas",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a BMI computation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiResult {
    /// Unrounded BMI in kg/m²
    pub bmi: f64,
    pub status: BmiCategory,
    /// User-facing status text ("Kurus", "Normal", ...)
    pub category_label: String,
}

impl BmiResult {
    /// BMI rounded to one decimal place for display
    pub fn display_value(&self) -> String {
        format!("{:.1}", self.bmi)
    }
}

/// Height and weight that have passed range validation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Anthropometrics {
    height_cm: f64,
    weight_kg: f64,
}

impl Anthropometrics {
    /// Validate a height/weight pair against the accepted input domain
    pub fn new(height_cm: f64, weight_kg: f64) -> Result<Self> {
        if !height_cm.is_finite() || !weight_kg.is_finite() {
            return Err(Error::Validation(
                "height and weight must be numbers".into(),
            ));
        }
        if height_cm <= 0.0 || weight_kg <= 0.0 {
            return Err(Error::Validation(
                "height and weight must be greater than 0".into(),
            ));
        }
        validate_height(height_cm)?;
        validate_weight(weight_kg)?;
        Ok(Self {
            height_cm,
            weight_kg,
        })
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// BMI of a validated pair; cannot fail
    pub fn bmi(&self) -> BmiResult {
        bmi_unchecked(self.height_cm, self.weight_kg)
    }
}

/// Check a height against the accepted 50-250 cm domain
pub fn validate_height(height_cm: f64) -> Result<()> {
    if height_cm.is_finite() && (MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height_cm) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "height must be between {}-{} cm",
            MIN_HEIGHT_CM, MAX_HEIGHT_CM
        )))
    }
}

/// Check a weight against the accepted 10-300 kg domain
pub fn validate_weight(weight_kg: f64) -> Result<()> {
    if weight_kg.is_finite() && (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "weight must be between {}-{} kg",
            MIN_WEIGHT_KG, MAX_WEIGHT_KG
        )))
    }
}

/// Compute BMI from height (cm) and weight (kg).
///
/// Only the precondition (finite, strictly positive inputs) is checked here;
/// callers that accept user input should go through [`Anthropometrics::new`]
/// to enforce the accepted range first.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<BmiResult> {
    if !(height_cm.is_finite() && weight_kg.is_finite() && height_cm > 0.0 && weight_kg > 0.0) {
        return Err(Error::Validation(format!(
            "BMI needs positive height and weight, got {} cm / {} kg",
            height_cm, weight_kg
        )));
    }
    Ok(bmi_unchecked(height_cm, weight_kg))
}

fn bmi_unchecked(height_cm: f64, weight_kg: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    let status = BmiCategory::classify(bmi);
    BmiResult {
        bmi,
        status,
        category_label: status.status_label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_bmi() {
        let result = compute_bmi(170.0, 70.0).unwrap();
        assert!((result.bmi - 24.221).abs() < 0.01);
        assert_eq!(result.status, BmiCategory::Normal);
        assert_eq!(result.category_label, "Normal");
        assert_eq!(result.display_value(), "24.2");
    }

    #[test]
    fn test_category_label_is_user_facing_status() {
        assert_eq!(compute_bmi(170.0, 50.0).unwrap().category_label, "Kurus");
        assert_eq!(
            compute_bmi(200.0, 100.0).unwrap().category_label,
            "Kelebihan Berat Badan"
        );
        let obese = compute_bmi(170.0, 95.0).unwrap();
        assert_eq!(obese.category_label, "Obesitas");
        assert_eq!(obese.status.label(), "Obese");
    }

    #[test]
    fn test_lower_normal_boundary_is_normal() {
        // 53.465 / 1.7^2 = 18.5
        let result = compute_bmi(170.0, 53.465).unwrap();
        assert!((result.bmi - 18.5).abs() < 1e-9);
        assert_eq!(result.status, BmiCategory::Normal);
    }

    #[test]
    fn test_classification_boundaries_are_exact() {
        assert_eq!(BmiCategory::classify(18.499), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(24.999), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(29.999), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_exact_boundaries_from_measurements() {
        // 2m tall: bmi == weight / 4, exactly representable
        assert_eq!(compute_bmi(200.0, 100.0).unwrap().bmi, 25.0);
        assert_eq!(
            compute_bmi(200.0, 100.0).unwrap().status,
            BmiCategory::Overweight
        );
        assert_eq!(compute_bmi(200.0, 120.0).unwrap().bmi, 30.0);
        assert_eq!(
            compute_bmi(200.0, 120.0).unwrap().status,
            BmiCategory::Obese
        );
    }

    #[test]
    fn test_monotonic_in_weight_and_height() {
        let mut previous = 0.0;
        for weight in (10..=300).step_by(5) {
            let bmi = compute_bmi(170.0, weight as f64).unwrap().bmi;
            assert!(bmi > previous, "BMI should grow with weight");
            previous = bmi;
        }

        let mut previous = f64::INFINITY;
        for height in (50..=250).step_by(5) {
            let bmi = compute_bmi(height as f64, 70.0).unwrap().bmi;
            assert!(bmi < previous, "BMI should shrink with height");
            previous = bmi;
        }
    }

    #[test]
    fn test_compute_rejects_non_positive() {
        assert!(compute_bmi(0.0, 70.0).is_err());
        assert!(compute_bmi(170.0, -1.0).is_err());
        assert!(compute_bmi(f64::NAN, 70.0).is_err());
    }

    #[test]
    fn test_anthropometrics_range_validation() {
        assert!(Anthropometrics::new(50.0, 10.0).is_ok());
        assert!(Anthropometrics::new(250.0, 300.0).is_ok());
        assert!(Anthropometrics::new(49.9, 70.0).is_err());
        assert!(Anthropometrics::new(250.1, 70.0).is_err());
        assert!(Anthropometrics::new(170.0, 9.9).is_err());
        assert!(Anthropometrics::new(170.0, 300.5).is_err());

        let err = Anthropometrics::new(30.0, 70.0).unwrap_err();
        assert!(err.to_string().contains("50-250 cm"));
    }

    #[test]
    fn test_anthropometrics_bmi_matches_compute() {
        let input = Anthropometrics::new(165.0, 60.0).unwrap();
        assert_eq!(input.bmi(), compute_bmi(165.0, 60.0).unwrap());
    }
}
