pub mod assembly;
pub mod combinations;
pub mod constants;
pub mod eligibility;
pub mod generator;
pub mod scaling;
pub mod scoring;
pub mod selection;
pub mod targets;

pub use assembly::{assemble, line_item, sum_totals};
pub use combinations::{PortionCombinations, expand};
pub use constants::*;
pub use eligibility::{ExclusionSet, filter_eligible, is_eligible};
pub use generator::{MealPlanGenerator, PlanRequest, generate_meal_plan};
pub use scaling::{ScalingOutcome, adjust, implied_scale_factor};
pub use scoring::{Evaluation, NutritionTable, accuracy_percent, deviation_score, evaluate};
pub use selection::{ScoredCombination, Selection, SlotSearch, score_templates};
pub use targets::{SlotTargets, daily_target, decompose, default_protein_target};
