pub mod prompts;
pub mod render;

pub use prompts::{
    fuzzy_candidates, prompt_target_calories, prompt_target_protein, prompt_yes_no,
    resolve_exclusions,
};
pub use render::{display_food_list, display_meal_plan, display_template_list};
