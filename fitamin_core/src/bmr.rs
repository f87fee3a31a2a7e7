//! Basal Metabolic Rate via the Mifflin-St Jeor equation.
//!
//! BMR = 10 × weight_kg + 6.25 × height_cm − 5 × age + offset,
//! where the offset is +5 for males and −161 for females.

use crate::{Error, Result, Sex};

const WEIGHT_COEFFICIENT: f64 = 10.0;
const HEIGHT_COEFFICIENT: f64 = 6.25;
const AGE_COEFFICIENT: f64 = 5.0;
const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// Compute BMR in kcal/day. The result is not rounded.
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> Result<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return Err(Error::Validation(format!(
            "BMR needs positive weight and height, got {} kg / {} cm",
            weight_kg, height_cm
        )));
    }

    let base = WEIGHT_COEFFICIENT * weight_kg + HEIGHT_COEFFICIENT * height_cm
        - AGE_COEFFICIENT * f64::from(age_years);

    let offset = match sex {
        Sex::Male => MALE_OFFSET,
        Sex::Female => FEMALE_OFFSET,
    };

    Ok(base + offset)
}
