use std::path::PathBuf;

use clap::Parser;

use meal_plan_generator::catalog::{
    FoodCatalog, TemplateCatalog, load_config, load_foods, load_templates,
};
use meal_plan_generator::planner::GeneratorConfig;
use meal_plan_generator::report::{
    ReportConfig, print_summary, run_report, write_csv, write_summary_json,
};

#[derive(Parser, Debug)]
#[command(name = "plan_report")]
#[command(about = "Measure generator accuracy and variety over seeded runs")]
struct Args {
    /// Number of seeded runs per calorie target
    #[arg(long, default_value = "50")]
    runs: usize,

    /// First seed; run i uses seed + i
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Calorie targets to evaluate (comma-separated)
    #[arg(long, default_value = "1500,2000,2500,3000")]
    targets: String,

    /// Fixed protein target in grams (derived per target when omitted)
    #[arg(long)]
    protein: Option<f64>,

    /// Dietary tag every template must carry (repeatable)
    #[arg(long = "diet")]
    diet: Vec<String>,

    /// Food base name to exclude (repeatable)
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Path to the food catalog (.json or .csv)
    #[arg(long, default_value = "foods.json")]
    foods: PathBuf,

    /// Path to the template catalog
    #[arg(long, default_value = "templates.json")]
    templates: PathBuf,

    /// Generator settings JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV file for all runs
    #[arg(long, default_value = "plan_report.csv")]
    csv: PathBuf,

    /// Output JSON file for per-target summaries
    #[arg(long, default_value = "plan_report.json")]
    json: PathBuf,
}

fn parse_targets(s: &str) -> Vec<f64> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|t: &f64| t.is_finite() && *t > 0.0)
        .collect()
}

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let foods = match load_foods(&args.foods) {
        Ok(f) => FoodCatalog::new(f),
        Err(e) => {
            eprintln!("Error loading foods {:?}: {}", args.foods, e);
            std::process::exit(1);
        }
    };

    let templates = match load_templates(&args.templates) {
        Ok(t) => TemplateCatalog::new(t),
        Err(e) => {
            eprintln!("Error loading templates {:?}: {}", args.templates, e);
            std::process::exit(1);
        }
    };

    let generator = match &args.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };

    println!(
        "Loaded {} foods and {} templates",
        foods.len(),
        templates.len()
    );

    let targets = parse_targets(&args.targets);
    if targets.is_empty() {
        eprintln!("Error: no valid calorie targets provided");
        std::process::exit(1);
    }
    println!("Testing targets: {:?} x {} runs", targets, args.runs);

    let config = ReportConfig {
        targets,
        runs: args.runs,
        seed: args.seed,
        protein: args.protein,
        dietary_tags: args.diet.clone(),
        exclusions: args.exclude.clone(),
        generator,
    };

    let results = run_report(&foods, &templates, &config);
    print_summary(&results.summaries);

    if let Err(e) = write_csv(&results.records, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all runs to {:?}", args.csv);
    }

    if let Err(e) = write_summary_json(&results.summaries, &args.json) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote summaries to {:?}", args.json);
    }
}
