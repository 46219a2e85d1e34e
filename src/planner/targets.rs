use crate::models::{MacroTarget, MealSlot};
use crate::planner::constants::{
    DEFAULT_PROTEIN_CALORIE_SHARE, KCAL_PER_GRAM_PROTEIN, calorie_share, protein_share,
};

/// Per-slot sub-targets derived from a daily goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTargets {
    pub breakfast: MacroTarget,
    pub lunch: MacroTarget,
    pub dinner: MacroTarget,
}

impl SlotTargets {
    pub fn get(&self, slot: MealSlot) -> MacroTarget {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }
}

/// Protein goal implied by a calorie goal: 25% of calories at 4 kcal/g.
pub fn default_protein_target(calories: f64) -> f64 {
    (calories * DEFAULT_PROTEIN_CALORIE_SHARE / KCAL_PER_GRAM_PROTEIN).round()
}

/// Resolve the daily goal, filling in protein when absent.
pub fn daily_target(calories: f64, protein: Option<f64>) -> MacroTarget {
    MacroTarget {
        calories,
        protein: protein.unwrap_or_else(|| default_protein_target(calories)),
    }
}

/// Split a daily goal into breakfast, lunch and dinner targets.
///
/// Each slot gets a fixed share of calories and protein, rounded to whole units.
/// Callers guarantee `daily.calories > 0`.
pub fn decompose(daily: MacroTarget) -> SlotTargets {
    let slot_target = |slot: MealSlot| MacroTarget {
        calories: (daily.calories * calorie_share(slot)).round(),
        protein: (daily.protein * protein_share(slot)).round(),
    };

    SlotTargets {
        breakfast: slot_target(MealSlot::Breakfast),
        lunch: slot_target(MealSlot::Lunch),
        dinner: slot_target(MealSlot::Dinner),
    }
}
