pub mod food;
pub mod plan;
pub mod template;

pub use food::{Food, NutrientAmounts, NutritionPer100, normalize_name};
pub use plan::{
    FoodCombination, GeneratedMealPlan, MacroTarget, MealResult, NutritionTotals, PlanAccuracy,
    PlanLineItem, PlanMeals, PlannedMeal, PortionChoice, SelectionSource,
};
pub use template::{FoodSlot, MealSlot, MealTemplate};
