use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::models::normalize_name;

/// Similarity above which a typed exclusion is offered as a match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

/// Prompt for the daily calorie target.
pub fn prompt_target_calories() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Daily calorie target")
        .default("2000".to_string())
        .interact_text()?;

    let calories: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput("Invalid number".to_string()))?;

    if calories <= 0.0 {
        return Err(PlanError::InvalidInput(
            "Calorie target must be positive".to_string(),
        ));
    }

    Ok(calories)
}

/// Prompt for an optional protein target; empty input means derive it.
pub fn prompt_target_protein() -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt("Daily protein target in grams (Enter to derive)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    input
        .parse()
        .map(Some)
        .map_err(|_| PlanError::InvalidInput("Invalid number".to_string()))
}

/// Known base names ranked by similarity to `input`, best first.
pub fn fuzzy_candidates<'a>(input: &str, known: &'a [String]) -> Vec<(&'a str, f64)> {
    let needle = normalize_name(input);
    let mut candidates: Vec<(&str, f64)> = known
        .iter()
        .map(|name| (name.as_str(), jaro_winkler(name, &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Map typed exclusions onto catalog base names.
///
/// Exact matches pass through. Near misses are confirmed with the user when
/// `interactive`, otherwise the best match is taken. Names with no match at
/// all are kept as typed.
pub fn resolve_exclusions(
    typed: &[String],
    known_base_names: &[String],
    interactive: bool,
) -> Result<Vec<String>> {
    let mut resolved = Vec::new();

    for raw in typed {
        let name = normalize_name(raw);
        if name.is_empty() {
            continue;
        }

        if known_base_names.contains(&name) {
            resolved.push(name);
            continue;
        }

        let candidates = fuzzy_candidates(&name, known_base_names);
        let chosen = match candidates.as_slice() {
            [] => None,
            [(only, _)] if interactive => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Exclude '{}' (you typed '{}')?", only, raw))
                    .default(true)
                    .interact()?;
                confirm.then(|| only.to_string())
            }
            [..] if interactive => {
                let mut options: Vec<String> =
                    candidates.iter().take(5).map(|(n, _)| n.to_string()).collect();
                options.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt(format!("Which food did you mean by '{}'?", raw))
                    .items(&options)
                    .default(0)
                    .interact()?;
                (selection + 1 < options.len()).then(|| options[selection].clone())
            }
            [(best, _), ..] => Some(best.to_string()),
        };

        match chosen {
            Some(base_name) => {
                log::debug!("Exclusion '{}' matched '{}'", raw, base_name);
                resolved.push(base_name);
            }
            None => {
                log::warn!("No food matches exclusion '{}', keeping it as typed", raw);
                resolved.push(name);
            }
        }
    }

    resolved.sort();
    resolved.dedup();
    Ok(resolved)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
