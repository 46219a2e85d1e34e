mod manager;
mod persistence;

pub use manager::{CacheFirst, FoodCatalog, TemplateCatalog};
pub use persistence::{load_config, load_foods, load_templates, save_plan};

use crate::models::{Food, MealSlot, MealTemplate};

/// Read-only food lookup. Must be idempotent and side-effect free.
pub trait FoodResolver {
    fn resolve_food(&self, food_id: &str) -> Option<Food>;
}

/// Supplies candidate templates already filtered by slot and dietary tags.
pub trait TemplateSource {
    fn list_eligible_templates(&self, slot: MealSlot, dietary_tags: &[String]) -> Vec<MealTemplate>;
}
