//! Built-in food recommendation catalog.
//!
//! The catalog is static and read-only; it is built once per process.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Vec<FoodItem>> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static [FoodItem] {
    &DEFAULT_CATALOG
}

/// Look up a catalog entry by id
pub fn find_food(id: &str) -> Option<&'static FoodItem> {
    get_default_catalog().iter().find(|f| f.id == id)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the default catalog in display order
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Vec<FoodItem> {
    vec![
        FoodItem {
            id: "1".into(),
            name: "Salad Quinoa Protein".into(),
            category: FoodCategory::Salad,
            calories: 320.0,
            protein: 18.0,
            carbs: 35.0,
            fat: 12.0,
            description: "Salad bergizi tinggi dengan quinoa, ayam grilled, dan sayuran segar"
                .into(),
            benefits: strings(&["Tinggi Protein", "Rendah Kalori", "Kaya Serat"]),
            difficulty: Difficulty::Easy,
            cooking_time_minutes: 20,
            ingredients: strings(&["Quinoa", "Ayam fillet", "Selada", "Tomat cherry", "Mentimun"]),
            tags: strings(&["Sehat", "Protein Tinggi", "Diet"]),
        },
        FoodItem {
            id: "2".into(),
            name: "Smoothie Bowl Pisang".into(),
            category: FoodCategory::Drink,
            calories: 280.0,
            protein: 12.0,
            carbs: 45.0,
            fat: 8.0,
            description: "Smoothie bowl segar dengan pisang, yogurt, dan topping granola".into(),
            benefits: strings(&["Tinggi Vitamin", "Energi Cepat", "Antioksidan"]),
            difficulty: Difficulty::Easy,
            cooking_time_minutes: 10,
            ingredients: strings(&["Pisang beku", "Yogurt Greek", "Granola", "Madu", "Blueberry"]),
            tags: strings(&["Sehat", "Energi", "Sarapan"]),
        },
        FoodItem {
            id: "3".into(),
            name: "Salmon Panggang Sayuran".into(),
            category: FoodCategory::Protein,
            calories: 420.0,
            protein: 35.0,
            carbs: 25.0,
            fat: 22.0,
            description: "Salmon panggang dengan bumbu herbs dan sayuran panggang".into(),
            benefits: strings(&["Omega-3", "Protein Tinggi", "Anti Inflamasi"]),
            difficulty: Difficulty::Medium,
            cooking_time_minutes: 35,
            ingredients: strings(&["Salmon fillet", "Brokoli", "Wortel", "Kentang", "Herbs"]),
            tags: strings(&["Protein", "Omega-3", "Makan Malam"]),
        },
        FoodItem {
            id: "4".into(),
            name: "Oatmeal Protein Berries".into(),
            category: FoodCategory::Breakfast,
            calories: 290.0,
            protein: 15.0,
            carbs: 38.0,
            fat: 9.0,
            description: "Oatmeal creamy dengan protein powder dan mixed berries".into(),
            benefits: strings(&["Serat Tinggi", "Protein", "Antioksidan"]),
            difficulty: Difficulty::Easy,
            cooking_time_minutes: 15,
            ingredients: strings(&[
                "Oats",
                "Protein powder",
                "Mixed berries",
                "Susu almond",
                "Chia seeds",
            ]),
            tags: strings(&["Sarapan", "Protein", "Serat"]),
        },
        FoodItem {
            id: "5".into(),
            name: "Buddha Bowl Veggie".into(),
            category: FoodCategory::Vegetarian,
            calories: 380.0,
            protein: 16.0,
            carbs: 52.0,
            fat: 14.0,
            description: "Buddha bowl penuh warna dengan berbagai sayuran dan tahini dressing"
                .into(),
            benefits: strings(&["Kaya Nutrisi", "Vegetarian", "Anti Inflamasi"]),
            difficulty: Difficulty::Medium,
            cooking_time_minutes: 30,
            ingredients: strings(&["Chickpeas", "Sweet potato", "Avocado", "Kale", "Tahini"]),
            tags: strings(&["Vegetarian", "Sehat", "Colorful"]),
        },
        FoodItem {
            id: "6".into(),
            name: "Protein Pancakes".into(),
            category: FoodCategory::Breakfast,
            calories: 340.0,
            protein: 25.0,
            carbs: 30.0,
            fat: 12.0,
            description: "Pancakes tinggi protein dengan topping buah dan madu".into(),
            benefits: strings(&["Protein Tinggi", "Energi", "Muscle Building"]),
            difficulty: Difficulty::Easy,
            cooking_time_minutes: 20,
            ingredients: strings(&["Protein powder", "Telur", "Oat flour", "Pisang", "Madu"]),
            tags: strings(&["Protein", "Sarapan", "Fitness"]),
        },
    ]
}

/// Validate a catalog for consistency and completeness
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate_catalog(catalog: &[FoodItem]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for food in catalog {
        if food.id.is_empty() {
            errors.push(format!("Food '{}' has empty ID", food.name));
        } else if !seen.insert(food.id.as_str()) {
            errors.push(format!("Duplicate food ID '{}'", food.id));
        }
        if food.name.is_empty() {
            errors.push(format!("Food '{}' has empty name", food.id));
        }

        let nutrients = [
            ("calories", food.calories),
            ("protein", food.protein),
            ("carbs", food.carbs),
            ("fat", food.fat),
        ];
        for (field, value) in nutrients {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("Food '{}': invalid {} {}", food.id, field, value));
            }
        }

        if food.benefits.is_empty() {
            errors.push(format!("Food '{}' has no benefits", food.id));
        }
    }

    errors
}
