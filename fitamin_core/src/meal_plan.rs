//! Per-date meal plans.
//!
//! The plan book is a single JSON document in the data directory, one plan
//! per date, meals kept in the order they were added.

use crate::nutrition::{aggregate, validate_meal_item, NutritionTotals};
use crate::{store, Error, FoodItem, MealItem, MealPlan, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// All stored meal plans
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MealPlanBook {
    pub plans: Vec<MealPlan>,
}

impl MealPlanBook {
    /// Meals planned for `date`; empty when there is no plan
    pub fn meals_for(&self, date: NaiveDate) -> &[MealItem] {
        self.plans
            .iter()
            .find(|p| p.date == date)
            .map(|p| p.meals.as_slice())
            .unwrap_or(&[])
    }

    /// Nutrient totals for `date`
    pub fn totals_for(&self, date: NaiveDate) -> NutritionTotals {
        aggregate(self.meals_for(date))
    }

    /// Append a meal to the plan for `date`, creating the plan if needed
    pub fn add_meal(&mut self, date: NaiveDate, item: MealItem) -> Result<()> {
        validate_meal_item(&item)?;

        match self.plans.iter_mut().find(|p| p.date == date) {
            Some(plan) => {
                if plan.meals.iter().any(|m| m.id == item.id) {
                    return Err(Error::Validation(format!(
                        "meal '{}' already exists on {}",
                        item.id, date
                    )));
                }
                plan.meals.push(item);
            }
            None => {
                self.plans.push(MealPlan {
                    date,
                    meals: vec![item],
                });
                self.plans.sort_by_key(|p| p.date);
            }
        }
        Ok(())
    }

    /// Remove a meal by id; returns whether anything was removed.
    ///
    /// A plan left without meals is dropped.
    pub fn remove_meal(&mut self, date: NaiveDate, id: &str) -> bool {
        let Some(plan) = self.plans.iter_mut().find(|p| p.date == date) else {
            return false;
        };

        let before = plan.meals.len();
        plan.meals.retain(|m| m.id != id);
        let removed = plan.meals.len() != before;

        self.plans.retain(|p| !p.meals.is_empty());
        removed
    }

    /// Load the plan book; missing or corrupt files yield an empty book
    pub fn load(path: &Path) -> Result<Self> {
        store::load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        store::save_atomic(self, path)
    }

    /// Load the book, modify it, and save it back
    ///
    /// The whole cycle runs under the book's exclusive lock, so concurrent
    /// writers never drop each other's changes.
    pub fn update<F, T>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut MealPlanBook) -> Result<T>,
    {
        store::with_exclusive_lock(path, || {
            let mut book = Self::load(path)?;
            let out = f(&mut book)?;
            book.save(path)?;
            Ok(out)
        })
    }
}

impl MealItem {
    /// A new meal item with a fresh id
    pub fn new(
        name: impl Into<String>,
        portion_multiplier: f64,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            portion_multiplier,
            calories_per_portion: calories,
            protein_per_portion: protein,
            carbs_per_portion: carbs,
            fat_per_portion: fat,
        }
    }
}

impl FoodItem {
    /// Turn a catalog food into a meal item ("add to meal plan")
    pub fn to_meal_item(&self, portion_multiplier: f64) -> MealItem {
        MealItem::new(
            self.name.clone(),
            portion_multiplier,
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
        )
    }
}
