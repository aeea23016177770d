//! Human-readable run summary

use colored::*;
use std::path::Path;
use twbmeta::BatchReport;

/// Print the outcome of a run: counts, output files and per-file failures
pub fn print_summary(
    input_path: &Path,
    report: &BatchReport,
    columns_path: &Path,
    dashboards_path: &Path,
) {
    println!("{}", format!("Scanned: {}", input_path.display()).bold());
    println!();

    println!("{}", "Summary:".bold().underline());
    println!("  {} {}", "Workbooks:".bold(), report.processed.len());
    println!("  {} {}", "Column rows:".bold(), report.column_rows);
    println!("  {} {}", "Dashboard rows:".bold(), report.dashboard_rows);
    println!("  {} {}", "Output:".bold(), columns_path.display().to_string().cyan());
    println!("  {} {}", "Output:".bold(), dashboards_path.display().to_string().cyan());

    if !report.issues.is_empty() {
        println!();
        println!("{}", "Skipped worksheet parts:".bold().underline());
        for file_issue in &report.issues {
            println!(
                "  {} {}: {}",
                "WARN".yellow().bold(),
                file_issue.path.display(),
                file_issue.issue
            );
        }
    }

    if report.failures.is_empty() {
        println!();
        println!("{}", "✓ All workbooks extracted".green().bold());
        return;
    }

    println!();
    println!("{}", "Failed workbooks:".bold().underline());
    for failure in &report.failures {
        println!(
            "  {} {}: {}",
            "ERROR".red().bold(),
            failure.path.display(),
            failure.message
        );
    }
    if report.aborted {
        println!(
            "{}",
            "Run aborted at the first failure (on_error = \"abort\")".red()
        );
    }
}
