use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{PlanError, Result};
use crate::models::{Food, GeneratedMealPlan, MealTemplate, NutritionPer100};
use crate::planner::GeneratorConfig;

/// Load a food catalog from `.json` or `.csv`.
///
/// Deduplicates by id (last occurrence wins).
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<Food>> {
    let path = path.as_ref();
    let foods = if has_extension(path, "csv") {
        read_foods_csv(path)?
    } else {
        let content = fs::read_to_string(path)?;
        serde_json::from_str::<Vec<Food>>(&content)?
    };

    let mut order = Vec::new();
    let mut seen: HashMap<String, Food> = HashMap::new();
    for food in foods {
        if !seen.contains_key(&food.id) {
            order.push(food.id.clone());
        }
        let missing = food.missing_core_nutrients();
        if !missing.is_empty() {
            log::warn!("{} is missing {}", food.id, missing.join(", "));
        }
        seen.insert(food.id.clone(), food);
    }

    Ok(order.into_iter().filter_map(|id| seen.remove(&id)).collect())
}

/// CSV layout: `id`, `base_name`, optional `name`, optional `name:<locale>`
/// columns, and one column per nutrient (amount per 100 g).
fn read_foods_csv(path: &Path) -> Result<Vec<Food>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let column = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let id_col = column(&["id"])
        .ok_or_else(|| PlanError::InvalidInput("food CSV has no 'id' column".to_string()))?;
    let base_col = column(&["base_name", "basename"]).ok_or_else(|| {
        PlanError::InvalidInput("food CSV has no 'base_name' column".to_string())
    })?;
    let name_col = column(&["name"]);

    let mut foods = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        let mut food = Food::new(field(id_col), field(base_col), NutritionPer100::new());
        if let Some(i) = name_col {
            food.name = field(i).to_string();
        }

        for (i, header) in headers.iter().enumerate() {
            if i == id_col || i == base_col || Some(i) == name_col {
                continue;
            }
            if let Some(locale) = header.strip_prefix("name:") {
                if !field(i).is_empty() {
                    food.localized_names
                        .insert(locale.to_string(), field(i).to_string());
                }
                continue;
            }
            food.nutrition_per_100
                .insert(header, field(i).parse::<f64>().unwrap_or(0.0));
        }

        foods.push(food);
    }

    Ok(foods)
}

/// Load templates from JSON. Structurally invalid templates are dropped.
pub fn load_templates<P: AsRef<Path>>(path: P) -> Result<Vec<MealTemplate>> {
    let content = fs::read_to_string(path)?;
    let templates: Vec<MealTemplate> = serde_json::from_str(&content)?;

    Ok(templates
        .into_iter()
        .filter(|t| match t.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Dropping template: {}", e);
                false
            }
        })
        .collect())
}

/// Save a generated plan as pretty JSON.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &GeneratedMealPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load generator settings from JSON; missing fields keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
