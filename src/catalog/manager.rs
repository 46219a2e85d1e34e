use std::collections::HashMap;

use crate::catalog::{FoodResolver, TemplateSource};
use crate::error::{PlanError, Result};
use crate::models::{Food, MealSlot, MealTemplate, normalize_name};

/// In-memory food catalog keyed by id.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: HashMap<String, Food>,
}

impl FoodCatalog {
    /// Build a catalog; a repeated id replaces the earlier entry.
    pub fn new(foods: Vec<Food>) -> Self {
        let mut map = HashMap::new();
        for food in foods {
            map.insert(food.id.clone(), food);
        }
        Self { foods: map }
    }

    pub fn get(&self, id: &str) -> Option<&Food> {
        self.foods.get(id)
    }

    /// Get a food by id, or an error naming it.
    pub fn require(&self, id: &str) -> Result<&Food> {
        self.get(id)
            .ok_or_else(|| PlanError::FoodNotFound(id.to_string()))
    }

    /// Foods whose base name matches, case-insensitively.
    pub fn find_by_base_name(&self, base_name: &str) -> Vec<&Food> {
        let wanted = normalize_name(base_name);
        self.foods
            .values()
            .filter(|f| f.exclusion_key() == wanted)
            .collect()
    }

    /// Distinct normalized base names, sorted.
    pub fn base_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.foods.values().map(|f| f.exclusion_key()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// All foods sorted by display name.
    pub fn all_foods(&self) -> Vec<&Food> {
        let mut foods: Vec<&Food> = self.foods.values().collect();
        foods.sort_by_key(|f| f.display_name().to_lowercase());
        foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl FoodResolver for FoodCatalog {
    fn resolve_food(&self, food_id: &str) -> Option<Food> {
        self.get(food_id).cloned()
    }
}

/// Looks in `cache` first and falls back to `fallback` on a miss.
#[derive(Debug, Clone)]
pub struct CacheFirst<C, F> {
    pub cache: C,
    pub fallback: F,
}

impl<C, F> CacheFirst<C, F> {
    pub fn new(cache: C, fallback: F) -> Self {
        Self { cache, fallback }
    }
}

impl<C: FoodResolver, F: FoodResolver> FoodResolver for CacheFirst<C, F> {
    fn resolve_food(&self, food_id: &str) -> Option<Food> {
        self.cache.resolve_food(food_id).or_else(|| {
            log::debug!("cache miss for {}", food_id);
            self.fallback.resolve_food(food_id)
        })
    }
}

/// In-memory template catalog; keeps catalog order.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<MealTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<MealTemplate>) -> Self {
        Self { templates }
    }

    pub fn get(&self, id: &str) -> Option<&MealTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&MealTemplate> {
        self.get(id)
            .ok_or_else(|| PlanError::TemplateNotFound(id.to_string()))
    }

    pub fn all_templates(&self) -> &[MealTemplate] {
        &self.templates
    }

    pub fn for_slot(&self, slot: MealSlot) -> Vec<&MealTemplate> {
        self.templates.iter().filter(|t| t.applies_to(slot)).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for TemplateCatalog {
    fn list_eligible_templates(&self, slot: MealSlot, dietary_tags: &[String]) -> Vec<MealTemplate> {
        self.templates
            .iter()
            .filter(|t| t.applies_to(slot) && t.complies_with(dietary_tags))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::CALORIES;
    use crate::models::{FoodSlot, NutritionPer100};

    fn sample_foods() -> Vec<Food> {
        vec![
            Food::new("f-1", "Apple", NutritionPer100::new().with(CALORIES, 52.0)),
            Food::new("f-2", "bread", NutritionPer100::new().with(CALORIES, 265.0)),
            Food::new("f-3", "apple", NutritionPer100::new().with(CALORIES, 50.0)),
        ]
    }

    fn template(id: &str, slot: MealSlot, tags: &[&str]) -> MealTemplate {
        MealTemplate {
            id: id.to_string(),
            name: id.to_string(),
            meal_types: vec![slot],
            foods: vec![FoodSlot::new("f-1", &[100.0])],
            dietary_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let mut foods = sample_foods();
        foods.push(Food::new("f-1", "pear", NutritionPer100::new()));
        let catalog = FoodCatalog::new(foods);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("f-1").unwrap().base_name, "pear");
    }

    #[test]
    fn test_require_missing_food() {
        let catalog = FoodCatalog::new(sample_foods());
        assert!(catalog.require("f-2").is_ok());
        assert!(matches!(catalog.require("nope"), Err(PlanError::FoodNotFound(_))));
    }

    #[test]
    fn test_base_names_deduplicated() {
        let catalog = FoodCatalog::new(sample_foods());
        assert_eq!(catalog.base_names(), vec!["apple".to_string(), "bread".to_string()]);
        assert_eq!(catalog.find_by_base_name("APPLE").len(), 2);
    }

    #[test]
    fn test_cache_first_falls_back() {
        let cache = FoodCatalog::new(vec![sample_foods().remove(0)]);
        let backend = FoodCatalog::new(sample_foods());
        let resolver = CacheFirst::new(cache, backend);

        assert_eq!(resolver.resolve_food("f-1").unwrap().base_name, "Apple");
        assert_eq!(resolver.resolve_food("f-2").unwrap().base_name, "bread");
        assert!(resolver.resolve_food("f-9").is_none());
    }

    #[test]
    fn test_template_source_filters_slot_and_tags() {
        let catalog = TemplateCatalog::new(vec![
            template("a", MealSlot::Breakfast, &["vegan"]),
            template("b", MealSlot::Breakfast, &[]),
            template("c", MealSlot::Dinner, &["vegan"]),
        ]);

        let all = catalog.list_eligible_templates(MealSlot::Breakfast, &[]);
        assert_eq!(all.len(), 2);

        let vegan = catalog.list_eligible_templates(MealSlot::Breakfast, &["vegan".to_string()]);
        assert_eq!(vegan.len(), 1);
        assert_eq!(vegan[0].id, "a");
        assert!(catalog.require("z").is_err());
    }
}
