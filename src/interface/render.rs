use crate::models::{
    Food, GeneratedMealPlan, MealSlot, MealTemplate, PlannedMeal, SelectionSource,
};
use crate::models::food::{CALORIES, CARBS, FAT, PROTEIN};

fn source_tag(meal: &PlannedMeal) -> String {
    match meal.source {
        SelectionSource::QualityBand => "[within 3%]".to_string(),
        SelectionSource::Fallback if meal.scale_factor != 1.0 => {
            format!("[closest fit, scaled x{:.2}]", meal.scale_factor)
        }
        SelectionSource::Fallback => "[closest fit]".to_string(),
    }
}

/// Display a generated plan as a per-slot table with totals.
pub fn display_meal_plan(plan: &GeneratedMealPlan) {
    println!();
    println!("=== {} ===", plan.name);
    println!(
        "Target: {:.0} kcal, {:.0} g protein",
        plan.targets.calories, plan.targets.protein
    );

    if plan.is_empty() {
        println!();
        println!("No meals could be generated (no eligible templates).");
        println!();
        return;
    }

    let name_width = plan
        .line_items()
        .map(|item| item.name.len())
        .max()
        .unwrap_or(10);

    for slot in MealSlot::ALL {
        println!();
        match plan.meals.get(slot) {
            Some(meal) => {
                println!(
                    "{} - {} {}",
                    slot.as_str().to_uppercase(),
                    meal.template_name,
                    source_tag(meal)
                );
                for item in &meal.items {
                    println!(
                        "  {:<width$} {:>6.0} g | {:>5.0} kcal | P {:>5.1} C {:>5.1} F {:>5.1}",
                        item.name,
                        item.grams,
                        item.calories,
                        item.protein,
                        item.carbs,
                        item.fat,
                        width = name_width
                    );
                }
            }
            None => println!("{} - (nothing eligible)", slot.as_str().to_uppercase()),
        }
    }

    println!();
    println!("--- Totals ---");
    println!(
        "Calories: {:.0} kcal ({:.1}% of target)",
        plan.totals.calories, plan.accuracy.calories
    );
    println!(
        "Protein:  {:.1} g ({:.1}% of target)",
        plan.totals.protein, plan.accuracy.protein
    );
    println!("Carbs:    {:.1} g", plan.totals.carbs);
    println!("Fat:      {:.1} g", plan.totals.fat);
    println!();
}

/// Display foods with their per-100 g nutrition.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        let n = &food.nutrition_per_100;
        println!(
            "  {} [{}] - {} kcal, P:{} C:{} F:{} per 100g",
            food.display_name(),
            food.id,
            n.get(CALORIES),
            n.get(PROTEIN),
            n.get(CARBS),
            n.get(FAT)
        );
    }

    println!();
}

/// Display templates with their slots, tags and portion choices.
pub fn display_template_list(templates: &[&MealTemplate], title: &str) {
    if templates.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} templates) ===", title, templates.len());

    for template in templates {
        let slots: Vec<&str> = template.meal_types.iter().map(|s| s.as_str()).collect();
        println!();
        println!(
            "  {} [{}] ({}) - {} combinations",
            template.name,
            template.id,
            slots.join(", "),
            template.combination_count()
        );
        if !template.dietary_tags.is_empty() {
            println!("    tags: {}", template.dietary_tags.join(", "));
        }
        for slot in &template.foods {
            let portions: Vec<String> =
                slot.allowed_portions.iter().map(|p| format!("{}", p)).collect();
            println!("    {} : {} g", slot.food_id, portions.join(" / "));
        }
    }

    println!();
}
