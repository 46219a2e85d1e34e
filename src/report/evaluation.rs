use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::catalog::{FoodResolver, TemplateSource};
use crate::models::{GeneratedMealPlan, MealSlot, PlannedMeal, SelectionSource};
use crate::planner::{GeneratorConfig, MealPlanGenerator, PlanRequest};

/// How a slot ended up in one generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotOutcome {
    Band,
    Fallback,
    Scaled,
    Empty,
}

impl SlotOutcome {
    pub fn of(meal: Option<&PlannedMeal>) -> Self {
        match meal {
            None => SlotOutcome::Empty,
            Some(m) if m.source == SelectionSource::QualityBand => SlotOutcome::Band,
            Some(m) if m.scale_factor != 1.0 => SlotOutcome::Scaled,
            Some(_) => SlotOutcome::Fallback,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotOutcome::Band => "band",
            SlotOutcome::Fallback => "fallback",
            SlotOutcome::Scaled => "scaled",
            SlotOutcome::Empty => "empty",
        }
    }
}

/// One generated plan, reduced to the numbers the report tracks.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub target_calories: f64,
    pub target_protein: f64,
    pub seed: u64,
    pub outcomes: [SlotOutcome; 3],
    pub total_calories: f64,
    pub total_protein: f64,
    pub calorie_accuracy: f64,
    pub protein_accuracy: f64,
}

impl RunRecord {
    pub fn from_plan(plan: &GeneratedMealPlan, seed: u64) -> Self {
        Self {
            target_calories: plan.targets.calories,
            target_protein: plan.targets.protein,
            seed,
            outcomes: MealSlot::ALL.map(|slot| SlotOutcome::of(plan.meals.get(slot))),
            total_calories: plan.totals.calories,
            total_protein: plan.totals.protein,
            calorie_accuracy: plan.accuracy.calories,
            protein_accuracy: plan.accuracy.protein,
        }
    }

    pub fn count(&self, outcome: SlotOutcome) -> usize {
        self.outcomes.iter().filter(|o| **o == outcome).count()
    }
}

/// Averages over every run for one calorie target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetSummary {
    pub target_calories: f64,
    pub runs: usize,
    pub avg_calorie_accuracy: f64,
    pub avg_protein_accuracy: f64,
    /// Fraction of slots filled from the quality band.
    pub band_rate: f64,
    pub fallback_rate: f64,
    pub scaled_rate: f64,
    pub empty_rate: f64,
    /// Distinct template combinations seen across runs.
    pub distinct_plans: usize,
}

/// Settings for a report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub targets: Vec<f64>,
    pub runs: usize,
    pub seed: u64,
    pub protein: Option<f64>,
    pub dietary_tags: Vec<String>,
    pub exclusions: Vec<String>,
    pub generator: GeneratorConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            targets: vec![1500.0, 2000.0, 2500.0, 3000.0],
            runs: 50,
            seed: 123,
            protein: None,
            dietary_tags: Vec::new(),
            exclusions: Vec::new(),
            generator: GeneratorConfig::default(),
        }
    }
}

pub struct ReportResults {
    pub records: Vec<RunRecord>,
    pub summaries: Vec<TargetSummary>,
}

/// Summarize the runs recorded for one target.
pub fn summarize(target_calories: f64, records: &[RunRecord], plan_keys: &[String]) -> TargetSummary {
    let runs = records.len();
    let n = runs.max(1) as f64;
    let slots = (runs * MealSlot::ALL.len()).max(1) as f64;
    let rate = |outcome: SlotOutcome| {
        records.iter().map(|r| r.count(outcome)).sum::<usize>() as f64 / slots
    };

    let mut keys = plan_keys.to_vec();
    keys.sort();
    keys.dedup();

    TargetSummary {
        target_calories,
        runs,
        avg_calorie_accuracy: records.iter().map(|r| r.calorie_accuracy).sum::<f64>() / n,
        avg_protein_accuracy: records.iter().map(|r| r.protein_accuracy).sum::<f64>() / n,
        band_rate: rate(SlotOutcome::Band),
        fallback_rate: rate(SlotOutcome::Fallback),
        scaled_rate: rate(SlotOutcome::Scaled),
        empty_rate: rate(SlotOutcome::Empty),
        distinct_plans: keys.len(),
    }
}

/// Template ids per slot, used to count distinct plans.
fn plan_key(plan: &GeneratedMealPlan) -> String {
    MealSlot::ALL
        .map(|slot| {
            plan.meals
                .get(slot)
                .map(|m| m.template_id.as_str())
                .unwrap_or("-")
        })
        .join("|")
}

/// Generate `runs` seeded plans for every target.
pub fn run_report(
    foods: &dyn FoodResolver,
    templates: &dyn TemplateSource,
    config: &ReportConfig,
) -> ReportResults {
    let generator =
        MealPlanGenerator::new(foods, templates).with_config(config.generator.clone());
    let mut records = Vec::with_capacity(config.targets.len() * config.runs);
    let mut summaries = Vec::with_capacity(config.targets.len());

    for &target in &config.targets {
        let mut request = PlanRequest::new(target)
            .with_dietary_tags(config.dietary_tags.clone())
            .with_exclusions(config.exclusions.clone());
        request.target_protein = config.protein;

        let mut target_records = Vec::with_capacity(config.runs);
        let mut keys = Vec::with_capacity(config.runs);
        for run in 0..config.runs {
            let seed = config.seed.wrapping_add(run as u64);
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = generator.generate(&request, &mut rng);
            keys.push(plan_key(&plan));
            target_records.push(RunRecord::from_plan(&plan, seed));
        }

        let summary = summarize(target, &target_records, &keys);
        log::info!(
            "{:.0} kcal: {:.1}% kcal, {:.1}% protein, {:.0}% band",
            target,
            summary.avg_calorie_accuracy,
            summary.avg_protein_accuracy,
            summary.band_rate * 100.0
        );
        summaries.push(summary);
        records.extend(target_records);
    }

    ReportResults { records, summaries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FoodCatalog, TemplateCatalog};
    use crate::models::food::{CALORIES, PROTEIN};
    use crate::models::{Food, FoodSlot, MealTemplate, NutritionPer100};

    fn catalogs() -> (FoodCatalog, TemplateCatalog) {
        let foods = FoodCatalog::new(vec![
            Food::new(
                "lean",
                "lean mix",
                NutritionPer100::new().with(CALORIES, 150.0).with(PROTEIN, 15.0),
            ),
            Food::new("rice", "rice", NutritionPer100::new().with(CALORIES, 100.0)),
        ]);
        let templates = TemplateCatalog::new(vec![MealTemplate {
            id: "bowl".to_string(),
            name: "Bowl".to_string(),
            meal_types: vec![MealSlot::Lunch],
            foods: vec![
                FoodSlot::new("lean", &[300.0, 400.0]),
                FoodSlot::new("rice", &[100.0, 200.0]),
            ],
            dietary_tags: vec![],
        }]);
        (foods, templates)
    }

    #[test]
    fn test_run_report_counts_runs() {
        let (foods, templates) = catalogs();
        let config = ReportConfig {
            targets: vec![2000.0],
            runs: 5,
            protein: Some(150.0),
            ..Default::default()
        };

        let results = run_report(&foods, &templates, &config);
        assert_eq!(results.records.len(), 5);
        assert_eq!(results.summaries.len(), 1);

        let summary = &results.summaries[0];
        // Only lunch has a template, and it hits 800 kcal / 60 g exactly.
        assert!((summary.band_rate - 1.0 / 3.0).abs() < 1e-9);
        assert!((summary.empty_rate - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.distinct_plans, 1);
        assert!(results.records.iter().all(|r| r.outcomes[1] == SlotOutcome::Band));
    }

    #[test]
    fn test_summarize_empty_records() {
        let summary = summarize(2000.0, &[], &[]);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.avg_calorie_accuracy, 0.0);
        assert_eq!(summary.band_rate, 0.0);
    }
}
