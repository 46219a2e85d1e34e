use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::food::normalize_name;

/// A meal slot the generator fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// Slots in generation order.
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_name(s).as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(PlanError::InvalidInput(format!("unknown meal slot '{}'", other))),
        }
    }
}

/// One ingredient of a template with its discrete portion choices in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSlot {
    pub food_id: String,
    pub allowed_portions: Vec<f64>,
}

impl FoodSlot {
    pub fn new(food_id: &str, allowed_portions: &[f64]) -> Self {
        Self {
            food_id: food_id.to_string(),
            allowed_portions: allowed_portions.to_vec(),
        }
    }
}

/// A reusable recipe skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTemplate {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(alias = "slots")]
    pub meal_types: Vec<MealSlot>,

    pub foods: Vec<FoodSlot>,

    /// Dietary compliance markers such as `vegan` or `gluten-free`.
    #[serde(default)]
    pub dietary_tags: Vec<String>,
}

impl MealTemplate {
    pub fn applies_to(&self, slot: MealSlot) -> bool {
        self.meal_types.contains(&slot)
    }

    /// Case-insensitive tag check.
    pub fn has_dietary_tag(&self, tag: &str) -> bool {
        let wanted = normalize_name(tag);
        self.dietary_tags.iter().any(|t| normalize_name(t) == wanted)
    }

    /// True when every requested tag is present on the template.
    pub fn complies_with(&self, tags: &[String]) -> bool {
        tags.iter()
            .filter(|t| !t.trim().is_empty())
            .all(|t| self.has_dietary_tag(t))
    }

    pub fn food_ids(&self) -> impl Iterator<Item = &str> {
        self.foods.iter().map(|slot| slot.food_id.as_str())
    }

    /// Number of portion assignments the expander will produce.
    pub fn combination_count(&self) -> usize {
        if self.foods.is_empty() {
            return 0;
        }
        self.foods
            .iter()
            .map(|slot| slot.allowed_portions.len())
            .product()
    }

    /// Structural checks: at least one food slot, each with positive finite portions.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| PlanError::InvalidTemplate {
            id: self.id.clone(),
            reason,
        };

        if self.foods.is_empty() {
            return Err(invalid("no food slots".to_string()));
        }

        for slot in &self.foods {
            if slot.allowed_portions.is_empty() {
                return Err(invalid(format!("no portions for food {}", slot.food_id)));
            }
            if slot
                .allowed_portions
                .iter()
                .any(|p| !p.is_finite() || *p <= 0.0)
            {
                return Err(invalid(format!(
                    "non-positive portion for food {}",
                    slot.food_id
                )));
            }
        }

        Ok(())
    }
}
