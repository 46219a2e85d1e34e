use std::collections::HashSet;

use crate::models::{MealSlot, MealTemplate, normalize_name};
use crate::planner::scoring::NutritionTable;

/// Excluded food base names, normalized for matching.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new<S: AsRef<str>>(base_names: &[S]) -> Self {
        Self(
            base_names
                .iter()
                .map(|n| normalize_name(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, base_name: &str) -> bool {
        self.0.contains(&normalize_name(base_name))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Whether any food slot of the template resolves to an excluded food.
///
/// Foods missing from the table are not considered excluded.
pub fn references_excluded(
    template: &MealTemplate,
    exclusions: &ExclusionSet,
    table: &NutritionTable,
) -> bool {
    if exclusions.is_empty() {
        return false;
    }
    template
        .food_ids()
        .filter_map(|id| table.get(id))
        .any(|food| exclusions.contains(&food.base_name))
}

pub fn is_eligible(
    template: &MealTemplate,
    slot: MealSlot,
    dietary_tags: &[String],
    exclusions: &ExclusionSet,
    table: &NutritionTable,
) -> bool {
    !template.foods.is_empty()
        && template.applies_to(slot)
        && template.complies_with(dietary_tags)
        && !references_excluded(template, exclusions, table)
}

/// Templates usable for `slot` under the active dietary tags and exclusions.
pub fn filter_eligible<'a>(
    templates: &'a [MealTemplate],
    slot: MealSlot,
    dietary_tags: &[String],
    exclusions: &ExclusionSet,
    table: &NutritionTable,
) -> Vec<&'a MealTemplate> {
    templates
        .iter()
        .filter(|t| is_eligible(t, slot, dietary_tags, exclusions, table))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Food, FoodSlot, NutritionPer100};

    fn template(id: &str, slots: &[MealSlot], foods: &[&str], tags: &[&str]) -> MealTemplate {
        MealTemplate {
            id: id.to_string(),
            name: id.to_string(),
            meal_types: slots.to_vec(),
            foods: foods.iter().map(|f| FoodSlot::new(f, &[100.0])).collect(),
            dietary_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn table() -> NutritionTable {
        vec![
            Food::new("f-peanut", "Peanut Butter", NutritionPer100::new()),
            Food::new("f-toast", "toast", NutritionPer100::new()),
            Food::new("f-egg", "egg", NutritionPer100::new()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_slot_filter() {
        let templates = vec![
            template("a", &[MealSlot::Breakfast], &["f-egg"], &[]),
            template("b", &[MealSlot::Lunch, MealSlot::Dinner], &["f-egg"], &[]),
        ];
        let none = ExclusionSet::default();
        let eligible = filter_eligible(&templates, MealSlot::Dinner, &[], &none, &table());
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "b");
    }

    #[test]
    fn test_dietary_tags_must_all_be_present() {
        let templates = vec![
            template("a", &[MealSlot::Lunch], &["f-toast"], &["vegan"]),
            template("b", &[MealSlot::Lunch], &["f-toast"], &["vegan", "gluten-free"]),
            template("c", &[MealSlot::Lunch], &["f-egg"], &[]),
        ];
        let tags = vec!["vegan".to_string(), "Gluten-Free".to_string()];
        let none = ExclusionSet::default();
        let eligible = filter_eligible(&templates, MealSlot::Lunch, &tags, &none, &table());
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "b");
    }

    #[test]
    fn test_exclusion_by_base_name() {
        let templates = vec![
            template("pb-toast", &[MealSlot::Breakfast], &["f-toast", "f-peanut"], &[]),
            template("eggs", &[MealSlot::Breakfast], &["f-egg", "f-toast"], &[]),
        ];
        let exclusions = ExclusionSet::new(&["peanut butter"]);
        let eligible = filter_eligible(&templates, MealSlot::Breakfast, &[], &exclusions, &table());
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "eggs");
    }

    #[test]
    fn test_unresolved_food_is_not_excluded() {
        let templates = vec![template("ghost", &[MealSlot::Lunch], &["f-ghost"], &[])];
        let exclusions = ExclusionSet::new(&["ghost"]);
        let eligible = filter_eligible(&templates, MealSlot::Lunch, &[], &exclusions, &table());
        assert_eq!(eligible.len(), 1);
    }

    #[test]
    fn test_template_without_foods_is_skipped() {
        let templates = vec![template("empty", &[MealSlot::Lunch], &[], &[])];
        let none = ExclusionSet::default();
        assert!(filter_eligible(&templates, MealSlot::Lunch, &[], &none, &table()).is_empty());
    }
}
