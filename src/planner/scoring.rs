use std::collections::{HashMap, HashSet};

use crate::catalog::FoodResolver;
use crate::models::{Food, FoodCombination, MacroTarget};
use crate::planner::constants::GeneratorConfig;

/// Foods resolved ahead of scoring, so the scoring loop never calls out.
#[derive(Debug, Clone, Default)]
pub struct NutritionTable {
    foods: HashMap<String, Food>,
    missing: HashSet<String>,
}

impl NutritionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every id not seen before. Misses are remembered and not retried.
    pub fn resolve_all<'i, I>(&mut self, ids: I, resolver: &dyn FoodResolver)
    where
        I: IntoIterator<Item = &'i str>,
    {
        for id in ids {
            if self.foods.contains_key(id) || self.missing.contains(id) {
                continue;
            }
            match resolver.resolve_food(id) {
                Some(food) => {
                    let missing = food.missing_core_nutrients();
                    if !missing.is_empty() {
                        log::warn!("{} has no {} (read as 0)", id, missing.join(", "));
                    }
                    log::trace!("resolved {}", food.debug_string());
                    self.foods.insert(id.to_string(), food);
                }
                None => {
                    log::warn!("Food {} could not be resolved", id);
                    self.missing.insert(id.to_string());
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Food> {
        self.foods.get(id)
    }

    pub fn is_missing(&self, id: &str) -> bool {
        self.missing.contains(id)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl FromIterator<Food> for NutritionTable {
    fn from_iter<T: IntoIterator<Item = Food>>(iter: T) -> Self {
        Self {
            foods: iter.into_iter().map(|f| (f.id.clone(), f)).collect(),
            missing: HashSet::new(),
        }
    }
}

/// Achieved nutrition of one combination and how far it is from the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub calories: f64,
    pub protein: f64,
    pub score: f64,
    pub calorie_accuracy: f64,
    pub protein_accuracy: f64,
}

impl Evaluation {
    pub fn in_band(&self, config: &GeneratorConfig) -> bool {
        config.in_band(self.calorie_accuracy) && config.in_band(self.protein_accuracy)
    }
}

/// Achieved as a percentage of target; 0 when the target is not positive.
pub fn accuracy_percent(achieved: f64, target: f64) -> f64 {
    if target > 0.0 {
        achieved / target * 100.0
    } else {
        0.0
    }
}

/// Calorie error plus weighted protein error. Lower is better.
pub fn deviation_score(target: MacroTarget, calories: f64, protein: f64, protein_weight: f64) -> f64 {
    (target.calories - calories).abs() + protein_weight * (target.protein - protein).abs()
}

/// Evaluate a combination against a slot target.
///
/// Returns `None` if any food in the combination is not in the table.
pub fn evaluate(
    combination: &FoodCombination,
    target: MacroTarget,
    table: &NutritionTable,
    config: &GeneratorConfig,
) -> Option<Evaluation> {
    let (calories, protein) =
        combination
            .iter()
            .try_fold((0.0, 0.0), |(calories, protein), portion| {
                let amounts = table.get(&portion.food_id)?.nutrients_for(portion.grams);
                Some((calories + amounts.calories, protein + amounts.protein))
            })?;

    Some(Evaluation {
        calories,
        protein,
        score: deviation_score(target, calories, protein, config.protein_error_weight),
        calorie_accuracy: accuracy_percent(calories, target.calories),
        protein_accuracy: accuracy_percent(protein, target.protein),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::{CALORIES, PROTEIN};
    use crate::models::{NutritionPer100, PortionChoice};

    fn food(id: &str, calories: f64, protein: f64) -> Food {
        Food::new(
            id,
            id,
            NutritionPer100::new()
                .with(CALORIES, calories)
                .with(PROTEIN, protein),
        )
    }

    fn combo(parts: &[(&str, f64)]) -> FoodCombination {
        FoodCombination::new(
            parts
                .iter()
                .map(|(id, grams)| PortionChoice {
                    food_id: id.to_string(),
                    grams: *grams,
                })
                .collect(),
        )
    }

    const LUNCH: MacroTarget = MacroTarget {
        calories: 800.0,
        protein: 60.0,
    };

    #[test]
    fn test_single_food_far_from_lunch_target() {
        let table: NutritionTable = vec![food("chicken", 165.0, 31.0)].into_iter().collect();
        let config = GeneratorConfig::default();

        let eval = evaluate(&combo(&[("chicken", 200.0)]), LUNCH, &table, &config).unwrap();
        assert!((eval.calories - 330.0).abs() < 1e-9);
        assert!((eval.protein - 62.0).abs() < 1e-9);
        assert!((eval.calorie_accuracy - 41.25).abs() < 1e-9);
        assert!((eval.score - (470.0 + 2.0 * 2.0)).abs() < 1e-9);
        assert!(!eval.in_band(&config));
    }

    #[test]
    fn test_exact_match_scores_zero() {
        let table: NutritionTable = vec![food("lean", 150.0, 15.0), food("rice", 100.0, 0.0)]
            .into_iter()
            .collect();
        let config = GeneratorConfig::default();

        let eval = evaluate(&combo(&[("lean", 400.0), ("rice", 200.0)]), LUNCH, &table, &config)
            .unwrap();
        assert!(eval.score.abs() < 1e-9);
        assert!(eval.in_band(&config));
    }

    #[test]
    fn test_unresolved_food_invalidates_combination() {
        let table: NutritionTable = vec![food("lean", 150.0, 15.0)].into_iter().collect();
        let config = GeneratorConfig::default();

        let eval = evaluate(&combo(&[("lean", 400.0), ("ghost", 50.0)]), LUNCH, &table, &config);
        assert!(eval.is_none());
    }

    #[test]
    fn test_accuracy_with_zero_target() {
        assert_eq!(accuracy_percent(10.0, 0.0), 0.0);
        assert_eq!(accuracy_percent(50.0, 200.0), 25.0);
    }

    #[test]
    fn test_resolve_all_remembers_misses() {
        let catalog = crate::catalog::FoodCatalog::new(vec![food("lean", 150.0, 15.0)]);
        let mut table = NutritionTable::new();
        table.resolve_all(["lean", "ghost", "lean"], &catalog);

        assert_eq!(table.len(), 1);
        assert!(table.get("lean").is_some());
        assert!(table.is_missing("ghost"));
    }
}
