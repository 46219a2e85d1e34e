use std::path::Path;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use meal_plan_generator::catalog::{
    FoodCatalog, TemplateCatalog, load_config, load_foods, load_templates, save_plan,
};
use meal_plan_generator::cli::{Cli, Command, GenerateArgs};
use meal_plan_generator::error::{PlanError, Result};
use meal_plan_generator::interface::{
    display_food_list, display_meal_plan, display_template_list, prompt_target_calories,
    prompt_target_protein, prompt_yes_no, resolve_exclusions,
};
use meal_plan_generator::models::MealSlot;
use meal_plan_generator::planner::{GeneratorConfig, MealPlanGenerator, PlanRequest};

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Generate(args) => cmd_generate(&cli.foods, &cli.templates, args),
        Command::Foods => cmd_foods(&cli.foods),
        Command::Templates { slot } => cmd_templates(&cli.templates, slot.as_deref()),
    }
}

fn require_file(path: &str, what: &str) -> Result<()> {
    if Path::new(path).exists() {
        Ok(())
    } else {
        Err(PlanError::InvalidInput(format!(
            "{} file not found: {}",
            what, path
        )))
    }
}

/// Generate a plan from the catalogs and the user's targets.
fn cmd_generate(foods_path: &str, templates_path: &str, args: GenerateArgs) -> Result<()> {
    require_file(foods_path, "Food catalog")?;
    require_file(templates_path, "Template catalog")?;

    let foods = FoodCatalog::new(load_foods(foods_path)?);
    let templates = TemplateCatalog::new(load_templates(templates_path)?);
    log::info!("Loaded {} foods, {} templates", foods.len(), templates.len());

    if templates.is_empty() {
        println!("No valid templates in {}.", templates_path);
        return Ok(());
    }

    let interactive = !args.no_input;
    let calories = match args.calories {
        Some(c) => c,
        None if interactive => prompt_target_calories()?,
        None => {
            return Err(PlanError::InvalidInput(
                "--calories is required with --no-input".to_string(),
            ));
        }
    };

    let protein = match args.protein {
        Some(p) => Some(p),
        None if interactive && args.calories.is_none() => prompt_target_protein()?,
        None => None,
    };

    let exclusions = resolve_exclusions(&args.exclude, &foods.base_names(), interactive)?;

    let mut request = PlanRequest::new(calories)
        .with_dietary_tags(args.diet.clone())
        .with_exclusions(exclusions);
    request.target_protein = protein;
    request.validate()?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };

    if !request.excluded_base_names.is_empty() {
        println!("Excluding: {}", request.excluded_base_names.join(", "));
    }
    if !request.dietary_tags.is_empty() {
        println!("Dietary tags: {}", request.dietary_tags.join(", "));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator = MealPlanGenerator::new(&foods, &templates).with_config(config);
    let plan = generator.generate(&request, &mut rng);

    display_meal_plan(&plan);

    if let Some(path) = &args.output {
        let save = !interactive || prompt_yes_no(&format!("Save plan to {}?", path), true)?;
        if save {
            save_plan(path, &plan)?;
            println!("Plan saved to {}.", path);
        }
    }

    Ok(())
}

/// List the food catalog.
fn cmd_foods(foods_path: &str) -> Result<()> {
    require_file(foods_path, "Food catalog")?;
    let foods = FoodCatalog::new(load_foods(foods_path)?);
    display_food_list(&foods.all_foods(), "Foods");
    Ok(())
}

/// List templates, optionally for one slot.
fn cmd_templates(templates_path: &str, slot: Option<&str>) -> Result<()> {
    require_file(templates_path, "Template catalog")?;
    let templates = TemplateCatalog::new(load_templates(templates_path)?);

    match slot {
        Some(raw) => {
            let slot: MealSlot = raw.parse()?;
            let title = format!("Templates for {}", slot);
            display_template_list(&templates.for_slot(slot), &title);
        }
        None => {
            let all: Vec<_> = templates.all_templates().iter().collect();
            display_template_list(&all, "Templates");
        }
    }

    Ok(())
}
