use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::report::evaluation::{RunRecord, TargetSummary};

/// Write every run to a CSV file.
pub fn write_csv(records: &[RunRecord], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "target_calories",
        "target_protein",
        "seed",
        "breakfast",
        "lunch",
        "dinner",
        "total_calories",
        "total_protein",
        "calorie_accuracy",
        "protein_accuracy",
    ])?;

    for record in records {
        wtr.write_record([
            format!("{:.0}", record.target_calories),
            format!("{:.0}", record.target_protein),
            record.seed.to_string(),
            record.outcomes[0].as_str().to_string(),
            record.outcomes[1].as_str().to_string(),
            record.outcomes[2].as_str().to_string(),
            format!("{:.0}", record.total_calories),
            format!("{:.1}", record.total_protein),
            format!("{:.2}", record.calorie_accuracy),
            format!("{:.2}", record.protein_accuracy),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write per-target summaries as pretty JSON.
pub fn write_summary_json(summaries: &[TargetSummary], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    fs::write(path, json)?;
    Ok(())
}

/// Print one line per target.
pub fn print_summary(summaries: &[TargetSummary]) {
    println!();
    println!("=== Accuracy by target ===");
    println!(
        "{:>8} {:>5} {:>9} {:>9} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "kcal", "runs", "kcal %", "prot %", "band", "fall", "scaled", "empty", "plans"
    );

    for s in summaries {
        println!(
            "{:>8.0} {:>5} {:>9.2} {:>9.2} {:>5.0}% {:>5.0}% {:>5.0}% {:>5.0}% {:>6}",
            s.target_calories,
            s.runs,
            s.avg_calorie_accuracy,
            s.avg_protein_accuracy,
            s.band_rate * 100.0,
            s.fallback_rate * 100.0,
            s.scaled_rate * 100.0,
            s.empty_rate * 100.0,
            s.distinct_plans
        );
    }
    println!();
}
