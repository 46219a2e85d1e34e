use serde::{Deserialize, Serialize};

use crate::models::MealSlot;

/// Share of daily calories assigned to each slot.
pub const BREAKFAST_CALORIE_SHARE: f64 = 0.25;
pub const LUNCH_CALORIE_SHARE: f64 = 0.40;
pub const DINNER_CALORIE_SHARE: f64 = 0.35;

/// Share of daily protein assigned to each slot.
pub const BREAKFAST_PROTEIN_SHARE: f64 = 0.20;
pub const LUNCH_PROTEIN_SHARE: f64 = 0.40;
pub const DINNER_PROTEIN_SHARE: f64 = 0.40;

/// Default protein target: this fraction of calories, at 4 kcal per gram.
pub const DEFAULT_PROTEIN_CALORIE_SHARE: f64 = 0.25;
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

/// Accuracy window (percent) admitting a combination into variety sampling.
pub const QUALITY_BAND_MIN: f64 = 97.0;
pub const QUALITY_BAND_MAX: f64 = 103.0;

/// Weight of protein error relative to calorie error in the score.
pub const PROTEIN_ERROR_WEIGHT: f64 = 2.0;

/// Fallback results scoring above this get a scaling attempt.
pub const POOR_SCORE_THRESHOLD: f64 = 50.0;

/// Bounds on the post-hoc portion scale factor.
pub const MIN_SCALE_FACTOR: f64 = 0.8;
pub const MAX_SCALE_FACTOR: f64 = 1.3;

/// Calorie share for a slot.
pub fn calorie_share(slot: MealSlot) -> f64 {
    match slot {
        MealSlot::Breakfast => BREAKFAST_CALORIE_SHARE,
        MealSlot::Lunch => LUNCH_CALORIE_SHARE,
        MealSlot::Dinner => DINNER_CALORIE_SHARE,
    }
}

/// Protein share for a slot.
pub fn protein_share(slot: MealSlot) -> f64 {
    match slot {
        MealSlot::Breakfast => BREAKFAST_PROTEIN_SHARE,
        MealSlot::Lunch => LUNCH_PROTEIN_SHARE,
        MealSlot::Dinner => DINNER_PROTEIN_SHARE,
    }
}

/// Runtime-configurable selection knobs. Defaults are the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub quality_band_min: f64,
    pub quality_band_max: f64,
    pub protein_error_weight: f64,
    pub poor_score_threshold: f64,
    pub min_scale_factor: f64,
    pub max_scale_factor: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            quality_band_min: QUALITY_BAND_MIN,
            quality_band_max: QUALITY_BAND_MAX,
            protein_error_weight: PROTEIN_ERROR_WEIGHT,
            poor_score_threshold: POOR_SCORE_THRESHOLD,
            min_scale_factor: MIN_SCALE_FACTOR,
            max_scale_factor: MAX_SCALE_FACTOR,
        }
    }
}

impl GeneratorConfig {
    /// Whether an accuracy percentage falls in the quality band.
    pub fn in_band(&self, accuracy: f64) -> bool {
        (self.quality_band_min..=self.quality_band_max).contains(&accuracy)
    }

    /// Whether a scale factor may be applied.
    pub fn scale_allowed(&self, factor: f64) -> bool {
        (self.min_scale_factor..=self.max_scale_factor).contains(&factor)
    }
}
