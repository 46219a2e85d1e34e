pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod report;

pub use error::{PlanError, Result};
pub use models::{Food, GeneratedMealPlan, MealSlot, MealTemplate};
pub use planner::{MealPlanGenerator, PlanRequest, generate_meal_plan};
