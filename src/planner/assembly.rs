use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::{
    Food, GeneratedMealPlan, MacroTarget, MealResult, MealSlot, NutritionTotals, PlanAccuracy,
    PlanLineItem, PlanMeals, PlannedMeal,
};
use crate::planner::scoring::{NutritionTable, accuracy_percent};

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Line item for `grams` of `food`: whole kcal, macros to one decimal.
pub fn line_item(food: &Food, grams: f64) -> PlanLineItem {
    let amounts = food.nutrients_for(grams);
    PlanLineItem {
        food_id: food.id.clone(),
        name: food.display_name().to_string(),
        localized_names: food.localized_names.clone(),
        grams,
        calories: amounts.calories.round(),
        protein: round1(amounts.protein),
        carbs: round1(amounts.carbs),
        fat: round1(amounts.fat),
    }
}

/// Convert a slot result into display line items.
pub fn planned_meal(result: &MealResult, table: &NutritionTable) -> PlannedMeal {
    let items = result
        .combination
        .iter()
        .filter_map(|portion| match table.get(&portion.food_id) {
            Some(food) => Some(line_item(food, portion.grams)),
            None => {
                log::warn!("Dropping unresolved food {} from plan", portion.food_id);
                None
            }
        })
        .collect();

    PlannedMeal {
        template_id: result.template_id.clone(),
        template_name: result.template_name.clone(),
        source: result.source,
        scale_factor: result.scale_factor,
        items,
    }
}

/// Sum of every line item, rounded the same way as the items.
pub fn sum_totals(meals: &PlanMeals) -> NutritionTotals {
    let raw = meals
        .line_items()
        .fold(NutritionTotals::default(), |acc, item| NutritionTotals {
            calories: acc.calories + item.calories,
            protein: acc.protein + item.protein,
            carbs: acc.carbs + item.carbs,
            fat: acc.fat + item.fat,
        });

    NutritionTotals {
        calories: raw.calories.round(),
        protein: round1(raw.protein),
        carbs: round1(raw.carbs),
        fat: round1(raw.fat),
    }
}

pub fn plan_accuracy(totals: &NutritionTotals, daily: MacroTarget) -> PlanAccuracy {
    PlanAccuracy {
        calories: accuracy_percent(totals.calories, daily.calories),
        protein: accuracy_percent(totals.protein, daily.protein),
    }
}

/// Plan name with the generation time and an id suffix, unique per call.
pub fn plan_name(generated_at: NaiveDateTime, id: &Uuid) -> String {
    let simple = id.simple().to_string();
    format!(
        "Meal plan {} #{}",
        generated_at.format("%Y-%m-%d %H:%M:%S%.3f"),
        &simple[..8]
    )
}

/// Build the final plan from per-slot results.
pub fn assemble(
    results: &[(MealSlot, Option<MealResult>)],
    table: &NutritionTable,
    daily: MacroTarget,
    id: Uuid,
    generated_at: NaiveDateTime,
) -> GeneratedMealPlan {
    let mut meals = PlanMeals::default();
    for (slot, result) in results {
        meals.set(*slot, result.as_ref().map(|r| planned_meal(r, table)));
    }

    let totals = sum_totals(&meals);
    let accuracy = plan_accuracy(&totals, daily);

    GeneratedMealPlan {
        id,
        name: plan_name(generated_at, &id),
        generated_at,
        targets: daily,
        meals,
        totals,
        accuracy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::{CALORIES, CARBS, FAT, PROTEIN};
    use crate::models::{FoodCombination, NutritionPer100, PortionChoice, SelectionSource};
    use chrono::NaiveDate;

    fn oats() -> Food {
        let mut food = Food::new(
            "f-oats",
            "oats",
            NutritionPer100::new()
                .with(CALORIES, 389.0)
                .with(PROTEIN, 16.9)
                .with(CARBS, 66.3)
                .with(FAT, 6.9),
        );
        food.name = "Rolled Oats".to_string();
        food.localized_names
            .insert("de".to_string(), "Haferflocken".to_string());
        food
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|d| d.and_hms_milli_opt(7, 30, 0, 250))
            .unwrap()
    }

    #[test]
    fn test_line_item_rounding() {
        let item = line_item(&oats(), 60.0);
        assert_eq!(item.name, "Rolled Oats");
        assert_eq!(item.calories, 233.0); // 233.4
        assert_eq!(item.protein, 10.1); // 10.14
        assert_eq!(item.carbs, 39.8); // 39.78
        assert_eq!(item.fat, 4.1); // 4.14
        assert_eq!(item.localized_names["de"], "Haferflocken");
    }

    #[test]
    fn test_assemble_totals_and_accuracy() {
        let table: NutritionTable = vec![oats()].into_iter().collect();
        let result = MealResult {
            slot: MealSlot::Breakfast,
            template_id: "t-porridge".to_string(),
            template_name: "Porridge".to_string(),
            combination: FoodCombination::new(vec![PortionChoice {
                food_id: "f-oats".to_string(),
                grams: 100.0,
            }]),
            calories: 389.0,
            protein: 16.9,
            score: 0.0,
            source: SelectionSource::Fallback,
            scale_factor: 1.0,
        };
        let daily = MacroTarget {
            calories: 778.0,
            protein: 33.8,
        };
        let results = vec![
            (MealSlot::Breakfast, Some(result)),
            (MealSlot::Lunch, None),
            (MealSlot::Dinner, None),
        ];

        let plan = assemble(&results, &table, daily, Uuid::nil(), at());
        assert!(plan.meals.lunch.is_none());
        assert!(plan.meals.snack.is_empty());
        assert_eq!(plan.totals.calories, 389.0);
        assert_eq!(plan.totals.protein, 16.9);
        assert!((plan.accuracy.calories - 50.0).abs() < 1e-9);
        assert!((plan.accuracy.protein - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_name_carries_time_and_id() {
        let id = Uuid::from_u128(0xabcdef01_0000_0000_0000_000000000000);
        assert_eq!(plan_name(at(), &id), "Meal plan 2026-03-14 07:30:00.250 #abcdef01");
    }
}
