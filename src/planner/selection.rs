use std::collections::BTreeMap;

use rand::Rng;

use crate::models::{FoodCombination, MacroTarget, MealTemplate, SelectionSource};
use crate::planner::combinations::expand;
use crate::planner::constants::GeneratorConfig;
use crate::planner::scoring::{Evaluation, NutritionTable, evaluate};

/// A valid combination with its evaluation and originating template.
#[derive(Debug, Clone)]
pub struct ScoredCombination<'a> {
    pub template: &'a MealTemplate,
    pub combination: FoodCombination,
    pub evaluation: Evaluation,
}

/// The combination chosen for a slot and the path that chose it.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub candidate: ScoredCombination<'a>,
    pub source: SelectionSource,
}

/// Score every combination of every template.
///
/// Combinations referencing unresolved foods are dropped here.
pub fn score_templates<'a, 't>(
    templates: &'t [&'a MealTemplate],
    target: MacroTarget,
    table: &'t NutritionTable,
    config: &'t GeneratorConfig,
) -> impl Iterator<Item = ScoredCombination<'a>> + 't
where
    'a: 't,
{
    templates.iter().flat_map(move |&template| {
        expand(template).filter_map(move |combination| {
            let evaluation = evaluate(&combination, target, table, config)?;
            Some(ScoredCombination {
                template,
                combination,
                evaluation,
            })
        })
    })
}

/// Accumulated search state for one slot.
#[derive(Debug, Clone, Default)]
pub struct SlotSearch<'a> {
    /// Lowest score seen so far; earliest wins ties.
    pub best: Option<ScoredCombination<'a>>,
    /// Every combination inside the quality band.
    pub qualifying: Vec<ScoredCombination<'a>>,
    pub scored: usize,
}

impl<'a> SlotSearch<'a> {
    /// Fold step: record one scored combination.
    pub fn observe(mut self, candidate: ScoredCombination<'a>, config: &GeneratorConfig) -> Self {
        self.scored += 1;

        if candidate.evaluation.in_band(config) {
            self.qualifying.push(candidate.clone());
        }

        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| candidate.evaluation.score < best.evaluation.score);
        if improves {
            self.best = Some(candidate);
        }

        self
    }

    pub fn from_candidates<I>(candidates: I, config: &GeneratorConfig) -> Self
    where
        I: IntoIterator<Item = ScoredCombination<'a>>,
    {
        candidates
            .into_iter()
            .fold(Self::default(), |search, candidate| search.observe(candidate, config))
    }

    /// Number of distinct templates with at least one qualifying combination.
    pub fn qualifying_templates(&self) -> usize {
        let mut ids: Vec<&str> = self.qualifying.iter().map(|c| c.template.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Pick the slot's combination.
    ///
    /// With qualifying combinations, picks a template uniformly, then one of its
    /// qualifying combinations uniformly. Otherwise returns the lowest-score
    /// combination, or `None` when nothing was scored.
    pub fn select<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Selection<'a>> {
        let mut by_template: BTreeMap<&'a str, Vec<ScoredCombination<'a>>> = BTreeMap::new();
        for candidate in self.qualifying {
            by_template
                .entry(candidate.template.id.as_str())
                .or_default()
                .push(candidate);
        }

        if !by_template.is_empty() {
            let template_idx = rng.gen_range(0..by_template.len());
            if let Some(mut group) = by_template.into_values().nth(template_idx) {
                let combo_idx = rng.gen_range(0..group.len());
                return Some(Selection {
                    candidate: group.swap_remove(combo_idx),
                    source: SelectionSource::QualityBand,
                });
            }
        }

        self.best.map(|candidate| Selection {
            candidate,
            source: SelectionSource::Fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::{CALORIES, PROTEIN};
    use crate::models::{Food, FoodSlot, MealSlot, NutritionPer100};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const LUNCH: MacroTarget = MacroTarget {
        calories: 800.0,
        protein: 60.0,
    };

    fn table() -> NutritionTable {
        let food = |id: &str, cal: f64, p: f64| {
            Food::new(
                id,
                id,
                NutritionPer100::new().with(CALORIES, cal).with(PROTEIN, p),
            )
        };
        vec![
            food("lean", 150.0, 15.0),
            food("rice", 100.0, 0.0),
            food("chicken", 165.0, 31.0),
        ]
        .into_iter()
        .collect()
    }

    fn template(id: &str, foods: Vec<FoodSlot>) -> MealTemplate {
        MealTemplate {
            id: id.to_string(),
            name: id.to_string(),
            meal_types: vec![MealSlot::Lunch],
            foods,
            dietary_tags: vec![],
        }
    }

    fn search<'a>(templates: &[&'a MealTemplate], table: &NutritionTable) -> SlotSearch<'a> {
        let config = GeneratorConfig::default();
        SlotSearch::from_candidates(score_templates(templates, LUNCH, table, &config), &config)
    }

    #[test]
    fn test_fallback_is_global_minimum() {
        let table = table();
        let single = template("single", vec![FoodSlot::new("chicken", &[100.0, 150.0, 200.0])]);
        let templates = vec![&single];

        let result = search(&templates, &table);
        assert_eq!(result.scored, 3);
        assert!(result.qualifying.is_empty());

        let mut rng = StdRng::seed_from_u64(1);
        let selection = result.select(&mut rng).unwrap();
        assert_eq!(selection.source, SelectionSource::Fallback);
        assert_eq!(selection.candidate.combination.portions[0].grams, 200.0);
    }

    #[test]
    fn test_band_preferred_over_fallback() {
        let table = table();
        let single = template("single", vec![FoodSlot::new("chicken", &[100.0, 150.0, 200.0])]);
        let bowl = template(
            "bowl",
            vec![
                FoodSlot::new("lean", &[300.0, 400.0]),
                FoodSlot::new("rice", &[100.0, 200.0]),
            ],
        );
        let templates = vec![&single, &bowl];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = search(&templates, &table).select(&mut rng).unwrap();
            assert_eq!(selection.source, SelectionSource::QualityBand);
            assert_eq!(selection.candidate.template.id, "bowl");
            assert!(selection.candidate.evaluation.in_band(&GeneratorConfig::default()));
        }
    }

    #[test]
    fn test_templates_sampled_evenly_regardless_of_volume() {
        let table = table();
        // 4 near-identical band combinations.
        let wide = template(
            "wide",
            vec![
                FoodSlot::new("lean", &[400.0, 401.0]),
                FoodSlot::new("rice", &[200.0, 201.0]),
            ],
        );
        // One band combination.
        let narrow = template(
            "narrow",
            vec![FoodSlot::new("lean", &[400.0]), FoodSlot::new("rice", &[200.0])],
        );
        let templates = vec![&wide, &narrow];

        let mut rng = StdRng::seed_from_u64(7);
        let mut narrow_hits = 0;
        let draws = 2000;
        for _ in 0..draws {
            let selection = search(&templates, &table).select(&mut rng).unwrap();
            if selection.candidate.template.id == "narrow" {
                narrow_hits += 1;
            }
        }
        // Flat sampling would give ~20%; per-template sampling gives ~50%.
        let share = narrow_hits as f64 / draws as f64;
        assert!(share > 0.4 && share < 0.6, "narrow share was {}", share);
    }

    #[test]
    fn test_nothing_scored_selects_none() {
        let table = table();
        let ghost = template("ghost", vec![FoodSlot::new("missing", &[100.0])]);
        let templates = vec![&ghost];

        let result = search(&templates, &table);
        assert_eq!(result.scored, 0);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(result.select(&mut rng).is_none());
    }

    #[test]
    fn test_qualifying_templates_counts_distinct_ids() {
        let table = table();
        let bowl = template(
            "bowl",
            vec![FoodSlot::new("lean", &[400.0, 401.0]), FoodSlot::new("rice", &[200.0])],
        );
        let templates = vec![&bowl];
        let result = search(&templates, &table);
        assert_eq!(result.qualifying.len(), 2);
        assert_eq!(result.qualifying_templates(), 1);
    }
}
