use crate::models::{MacroTarget, MealResult, SelectionSource};
use crate::planner::constants::GeneratorConfig;

/// What the adjuster did with a slot result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalingOutcome {
    /// Band selection, or a fallback that was already close enough.
    NotNeeded,
    /// Portions were rescaled by this factor.
    Applied(f64),
    /// A factor was computed but fell outside the allowed range.
    OutOfBounds(f64),
}

/// `target / achieved` calories, or `None` if nothing was achieved.
pub fn implied_scale_factor(target_calories: f64, achieved_calories: f64) -> Option<f64> {
    if achieved_calories > 0.0 && achieved_calories.is_finite() {
        Some(target_calories / achieved_calories)
    } else {
        None
    }
}

/// Rescale a poor fallback result toward the calorie target.
///
/// Only fallback results scoring above the poor-score threshold are touched,
/// and only if the implied factor is inside the configured bounds. Achieved
/// calories and protein are multiplied by the factor rather than recomputed.
pub fn adjust(
    result: MealResult,
    target: MacroTarget,
    config: &GeneratorConfig,
) -> (MealResult, ScalingOutcome) {
    if result.source != SelectionSource::Fallback || result.score <= config.poor_score_threshold {
        return (result, ScalingOutcome::NotNeeded);
    }

    let Some(factor) = implied_scale_factor(target.calories, result.calories) else {
        return (result, ScalingOutcome::NotNeeded);
    };

    if !config.scale_allowed(factor) {
        log::debug!(
            "{}: scale factor {:.3} outside [{}, {}], keeping {}",
            result.slot,
            factor,
            config.min_scale_factor,
            config.max_scale_factor,
            result.template_id
        );
        return (result, ScalingOutcome::OutOfBounds(factor));
    }

    let scaled = MealResult {
        combination: result.combination.scaled(factor),
        calories: result.calories * factor,
        protein: result.protein * factor,
        scale_factor: factor,
        ..result
    };

    (scaled, ScalingOutcome::Applied(factor))
}
