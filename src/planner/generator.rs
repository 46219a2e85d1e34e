use chrono::{Local, NaiveDateTime};
use rand::{Rng, RngCore};
use uuid::Uuid;

use crate::catalog::{FoodResolver, TemplateSource};
use crate::error::{PlanError, Result};
use crate::models::{GeneratedMealPlan, MacroTarget, MealResult, MealSlot, MealTemplate};
use crate::planner::assembly::assemble;
use crate::planner::constants::GeneratorConfig;
use crate::planner::eligibility::{ExclusionSet, filter_eligible};
use crate::planner::scaling::{ScalingOutcome, adjust};
use crate::planner::scoring::NutritionTable;
use crate::planner::selection::{SlotSearch, score_templates};
use crate::planner::targets::{daily_target, decompose};

/// Inputs of one generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanRequest {
    pub target_calories: f64,
    pub target_protein: Option<f64>,
    pub dietary_tags: Vec<String>,
    pub excluded_base_names: Vec<String>,
}

impl PlanRequest {
    pub fn new(target_calories: f64) -> Self {
        Self {
            target_calories,
            ..Default::default()
        }
    }

    pub fn with_protein(mut self, protein: f64) -> Self {
        self.target_protein = Some(protein);
        self
    }

    pub fn with_dietary_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.dietary_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclusions<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.excluded_base_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// The generator assumes a positive calorie target; callers check here first.
    pub fn validate(&self) -> Result<()> {
        if !self.target_calories.is_finite() || self.target_calories <= 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "calorie target must be positive, got {}",
                self.target_calories
            )));
        }
        if let Some(protein) = self.target_protein {
            if !protein.is_finite() || protein < 0.0 {
                return Err(PlanError::InvalidInput(format!(
                    "protein target must not be negative, got {}",
                    protein
                )));
            }
        }
        Ok(())
    }

    pub fn daily_target(&self) -> MacroTarget {
        daily_target(self.target_calories, self.target_protein)
    }
}

/// Generates breakfast, lunch and dinner from template and food catalogs.
pub struct MealPlanGenerator<'a> {
    foods: &'a dyn FoodResolver,
    templates: &'a dyn TemplateSource,
    config: GeneratorConfig,
}

impl<'a> MealPlanGenerator<'a> {
    pub fn new(foods: &'a dyn FoodResolver, templates: &'a dyn TemplateSource) -> Self {
        Self {
            foods,
            templates,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a plan stamped with the current local time.
    pub fn generate<R: Rng + ?Sized>(&self, request: &PlanRequest, rng: &mut R) -> GeneratedMealPlan {
        self.generate_at(request, rng, Local::now().naive_local())
    }

    /// Generate a plan stamped with `generated_at`.
    ///
    /// Slots are solved in order breakfast, lunch, dinner. A slot with nothing
    /// eligible or nothing scorable is left empty; the call itself never fails.
    pub fn generate_at<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
        generated_at: NaiveDateTime,
    ) -> GeneratedMealPlan {
        let daily = request.daily_target();
        let slot_targets = decompose(daily);
        let exclusions = ExclusionSet::new(&request.excluded_base_names);
        let mut table = NutritionTable::new();

        let results: Vec<(MealSlot, Option<MealResult>)> = MealSlot::ALL
            .into_iter()
            .map(|slot| {
                let target = slot_targets.get(slot);
                let result = self.solve_slot(slot, target, request, &exclusions, &mut table, rng);
                (slot, result)
            })
            .collect();

        let id = random_plan_id(rng);

        let plan = assemble(&results, &table, daily, id, generated_at);
        log::info!(
            "Generated '{}': {} kcal ({:.1}%), {} g protein ({:.1}%)",
            plan.name,
            plan.totals.calories,
            plan.accuracy.calories,
            plan.totals.protein,
            plan.accuracy.protein
        );
        plan
    }

    /// Candidate templates for a slot, with structurally invalid ones dropped.
    fn candidate_templates(&self, slot: MealSlot, dietary_tags: &[String]) -> Vec<MealTemplate> {
        self.templates
            .list_eligible_templates(slot, dietary_tags)
            .into_iter()
            .filter(|template| match template.validate() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Skipping template: {}", e);
                    false
                }
            })
            .collect()
    }

    fn solve_slot<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        target: MacroTarget,
        request: &PlanRequest,
        exclusions: &ExclusionSet,
        table: &mut NutritionTable,
        rng: &mut R,
    ) -> Option<MealResult> {
        let candidates = self.candidate_templates(slot, &request.dietary_tags);

        // Resolve every referenced food up front; scoring below is pure.
        table.resolve_all(
            candidates.iter().flat_map(|t| t.food_ids()),
            self.foods,
        );

        let eligible = filter_eligible(&candidates, slot, &request.dietary_tags, exclusions, table);
        if eligible.is_empty() {
            log::debug!("{}: no eligible templates", slot);
            return None;
        }

        let search = SlotSearch::from_candidates(
            score_templates(&eligible, target, table, &self.config),
            &self.config,
        );
        log::debug!(
            "{}: {} templates, {} scored combinations, {} in band across {} templates",
            slot,
            eligible.len(),
            search.scored,
            search.qualifying.len(),
            search.qualifying_templates()
        );

        let selection = search.select(rng)?;
        let candidate = selection.candidate;
        let result = MealResult {
            slot,
            template_id: candidate.template.id.clone(),
            template_name: candidate.template.name.clone(),
            combination: candidate.combination,
            calories: candidate.evaluation.calories,
            protein: candidate.evaluation.protein,
            score: candidate.evaluation.score,
            source: selection.source,
            scale_factor: 1.0,
        };

        let (result, outcome) = adjust(result, target, &self.config);
        if let ScalingOutcome::Applied(factor) = outcome {
            log::debug!("{}: scaled {} by {:.3}", slot, result.template_id, factor);
        }
        Some(result)
    }
}

/// One-shot convenience wrapper around [`MealPlanGenerator`].
pub fn generate_meal_plan<R: Rng + ?Sized>(
    foods: &dyn FoodResolver,
    templates: &dyn TemplateSource,
    request: &PlanRequest,
    rng: &mut R,
) -> GeneratedMealPlan {
    MealPlanGenerator::new(foods, templates).generate(request, rng)
}

/// Version 4 id drawn from `rng`, so seeded runs reproduce it.
pub fn random_plan_id<R: RngCore + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}
