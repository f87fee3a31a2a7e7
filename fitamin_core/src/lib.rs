#![forbid(unsafe_code)]

//! Core domain model and business logic for Fitamin, a personal health and
//! nutrition tracker.
//!
//! This crate provides:
//! - Domain types (profile, foods, meal plans)
//! - BMI, BMR and daily nutrition calculations
//! - The built-in food catalog and recommendation filter
//! - Local persistence (session, meal plans, BMI history)
//! - A REST client for the account backend

pub mod types;
pub mod error;
pub mod bmi;
pub mod bmr;
pub mod nutrition;
pub mod catalog;
pub mod recommend;
pub mod config;
pub mod logging;
pub mod profile;
pub mod auth;
pub mod store;
pub mod meal_plan;
pub mod session;
pub mod history;
pub mod dashboard;
pub mod api;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use bmi::{compute_bmi, Anthropometrics, BmiCategory, BmiResult};
pub use bmr::compute_bmr;
pub use nutrition::{aggregate, progress_percentage, DailyProgress, DailyTargets, NutritionTotals};
pub use catalog::{build_default_catalog, find_food, get_default_catalog};
pub use recommend::{filter, GoalThresholds, RecommendationQuery};
pub use config::Config;
pub use profile::{HealthSummary, ProfileUpdate};
pub use meal_plan::MealPlanBook;
pub use session::Session;
pub use history::{BmiLog, BmiRecord};
pub use dashboard::DashboardSummary;
pub use api::{ApiClient, ApiResponse};
