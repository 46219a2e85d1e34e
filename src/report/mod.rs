pub mod evaluation;
pub mod output;

pub use evaluation::{
    ReportConfig, ReportResults, RunRecord, SlotOutcome, TargetSummary, run_report, summarize,
};
pub use output::{print_summary, write_csv, write_summary_json};
