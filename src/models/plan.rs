use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::template::MealSlot;

/// One `(food, grams)` pair of a combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortionChoice {
    pub food_id: String,
    pub grams: f64,
}

/// A concrete portion assignment for every food slot of a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodCombination {
    pub portions: Vec<PortionChoice>,
}

impl FoodCombination {
    pub fn new(portions: Vec<PortionChoice>) -> Self {
        Self { portions }
    }

    pub fn len(&self) -> usize {
        self.portions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortionChoice> {
        self.portions.iter()
    }

    /// Copy with every portion multiplied by `factor` and rounded to whole grams.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            portions: self
                .portions
                .iter()
                .map(|p| PortionChoice {
                    food_id: p.food_id.clone(),
                    grams: (p.grams * factor).round(),
                })
                .collect(),
        }
    }
}

/// How a slot's combination was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionSource {
    /// Sampled among combinations inside the accuracy band.
    QualityBand,
    /// The lowest-score combination, used when nothing met the band.
    Fallback,
}

/// The resolved combination for a single meal slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MealResult {
    pub slot: MealSlot,
    pub template_id: String,
    pub template_name: String,
    pub combination: FoodCombination,
    pub calories: f64,
    pub protein: f64,
    pub score: f64,
    pub source: SelectionSource,
    /// 1.0 unless the scaling adjuster rewrote the portions.
    pub scale_factor: f64,
}

/// A display-ready food line of the generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLineItem {
    pub food_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localized_names: BTreeMap<String, String>,
    pub grams: f64,
    /// Whole kcal.
    pub calories: f64,
    /// Macros in grams, one decimal.
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Line items for one slot plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    pub template_id: String,
    pub template_name: String,
    pub source: SelectionSource,
    pub scale_factor: f64,
    pub items: Vec<PlanLineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMeals {
    pub breakfast: Option<PlannedMeal>,
    pub lunch: Option<PlannedMeal>,
    pub dinner: Option<PlannedMeal>,
    /// Never generated; always empty.
    pub snack: Vec<PlanLineItem>,
}

impl PlanMeals {
    pub fn get(&self, slot: MealSlot) -> Option<&PlannedMeal> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set(&mut self, slot: MealSlot, meal: Option<PlannedMeal>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = meal,
            MealSlot::Lunch => self.lunch = meal,
            MealSlot::Dinner => self.dinner = meal,
        }
    }

    /// All line items in slot order.
    pub fn line_items(&self) -> impl Iterator<Item = &PlanLineItem> {
        MealSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot))
            .flat_map(|meal| meal.items.iter())
            .chain(self.snack.iter())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Achieved ÷ target × 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanAccuracy {
    pub calories: f64,
    pub protein: f64,
}

/// Calorie and protein goal for a whole day or a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub calories: f64,
    pub protein: f64,
}

/// The generator's output. Never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMealPlan {
    pub id: Uuid,
    pub name: String,
    pub generated_at: NaiveDateTime,
    pub targets: MacroTarget,
    pub meals: PlanMeals,
    pub totals: NutritionTotals,
    pub accuracy: PlanAccuracy,
}

impl GeneratedMealPlan {
    pub fn line_items(&self) -> impl Iterator<Item = &PlanLineItem> {
        self.meals.line_items()
    }

    /// True when no slot produced any food.
    pub fn is_empty(&self) -> bool {
        self.line_items().next().is_none()
    }
}
