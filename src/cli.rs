use clap::{Parser, Subcommand};

/// Meal plan generator: fits template portions to daily calorie and protein targets.
#[derive(Parser, Debug)]
#[command(name = "meal_plan_generator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog (.json or .csv).
    #[arg(short, long, default_value = "foods.json")]
    pub foods: String,

    /// Path to the meal template catalog (.json).
    #[arg(short, long, default_value = "templates.json")]
    pub templates: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a breakfast/lunch/dinner plan.
    Generate(GenerateArgs),

    /// List the food catalog.
    Foods,

    /// List meal templates.
    Templates {
        /// Only templates for this slot (breakfast, lunch, dinner).
        #[arg(long)]
        slot: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate(GenerateArgs::default())
    }
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Daily calorie target. Prompted for when omitted.
    #[arg(short, long)]
    pub calories: Option<f64>,

    /// Daily protein target in grams. Derived from calories when omitted.
    #[arg(short, long)]
    pub protein: Option<f64>,

    /// Dietary tag every template must carry (repeatable).
    #[arg(short, long = "diet")]
    pub diet: Vec<String>,

    /// Food base name to exclude (repeatable, fuzzy matched).
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Seed for reproducible plans.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the plan as JSON to this path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Generator settings JSON (quality band, scaling bounds).
    #[arg(long)]
    pub config: Option<String>,

    /// Never prompt; take best fuzzy matches and skip confirmations.
    #[arg(long)]
    pub no_input: bool,
}
