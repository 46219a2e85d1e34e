use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Nutrient keys every food is expected to carry.
pub const CALORIES: &str = "calories";
pub const PROTEIN: &str = "protein";
pub const CARBS: &str = "carbs";
pub const FAT: &str = "fat";

pub const CORE_NUTRIENTS: [&str; 4] = [CALORIES, PROTEIN, CARBS, FAT];

/// Nutrient amounts per 100 grams, keyed by lowercase nutrient name.
///
/// Values are sanitized when deserialized: numbers and numeric strings are kept,
/// anything else (null, text, NaN, infinities) becomes 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct NutritionPer100(BTreeMap<String, f64>);

impl NutritionPer100 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, nutrient: &str, amount: f64) -> Self {
        self.insert(nutrient, amount);
        self
    }

    pub fn insert(&mut self, nutrient: &str, amount: f64) {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        self.0.insert(nutrient.trim().to_lowercase(), amount);
    }

    /// Amount per 100 g, 0 when the nutrient is absent.
    pub fn get(&self, nutrient: &str) -> f64 {
        self.0.get(nutrient).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, nutrient: &str) -> bool {
        self.0.contains_key(nutrient)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<BTreeMap<String, serde_json::Value>> for NutritionPer100 {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut nutrition = NutritionPer100::new();
        for (key, value) in raw {
            let amount = match value {
                serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
                serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
                _ => 0.0,
            };
            nutrition.insert(&key, amount);
        }
        nutrition
    }
}

/// Calories and macros for a concrete portion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutrientAmounts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A nutrition reference entry from the food catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,

    /// Stable name used for exclusion matching; never localized.
    pub base_name: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub localized_names: BTreeMap<String, String>,

    #[serde(default)]
    pub nutrition_per_100: NutritionPer100,
}

impl Food {
    pub fn new(id: &str, base_name: &str, nutrition_per_100: NutritionPer100) -> Self {
        Self {
            id: id.to_string(),
            base_name: base_name.to_string(),
            name: String::new(),
            localized_names: BTreeMap::new(),
            nutrition_per_100,
        }
    }

    /// Display name, falling back to the base name.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.base_name
        } else {
            &self.name
        }
    }

    /// Normalized base name used to compare against exclusions.
    pub fn exclusion_key(&self) -> String {
        normalize_name(&self.base_name)
    }

    /// Nutrition for `grams` of this food.
    pub fn nutrients_for(&self, grams: f64) -> NutrientAmounts {
        let factor = grams / 100.0;
        NutrientAmounts {
            calories: self.nutrition_per_100.get(CALORIES) * factor,
            protein: self.nutrition_per_100.get(PROTEIN) * factor,
            carbs: self.nutrition_per_100.get(CARBS) * factor,
            fat: self.nutrition_per_100.get(FAT) * factor,
        }
    }

    /// Core nutrients missing from the record (they read as 0).
    pub fn missing_core_nutrients(&self) -> Vec<&'static str> {
        CORE_NUTRIENTS
            .into_iter()
            .filter(|n| !self.nutrition_per_100.contains(n))
            .collect()
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal, P:{} C:{} F:{} per 100g",
            self.display_name(),
            self.id,
            self.nutrition_per_100.get(CALORIES),
            self.nutrition_per_100.get(PROTEIN),
            self.nutrition_per_100.get(CARBS),
            self.nutrition_per_100.get(FAT)
        )
    }
}

/// Trimmed, lowercase form used for name and tag matching.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
