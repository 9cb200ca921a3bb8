//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Formats a health check report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{}\n{}", table, format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = format!("\n{}\n", "Summary".bold().underline());
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!(
        "  {} Passed: {}\n",
        CheckStatus::Pass.symbol().green(),
        report.passed
    ));
    if report.warned > 0 {
        summary.push_str(&format!(
            "  {} Warned: {}\n",
            CheckStatus::Warn.symbol().yellow(),
            report.warned
        ));
    }
    if report.failed > 0 {
        summary.push_str(&format!(
            "  {} Failed: {}\n",
            CheckStatus::Fail.symbol().red(),
            report.failed
        ));
    }

    let overall = match report.worst() {
        CheckStatus::Pass => "Overall: HEALTHY".green().bold(),
        CheckStatus::Warn => "Overall: HEALTHY (with warnings)".yellow().bold(),
        CheckStatus::Fail => "Overall: UNHEALTHY".red().bold(),
    };
    summary.push_str(&format!("\n  {}\n", overall));
    summary
}

/// Prints the report to stdout, plus details for every check that has them
///
/// With `verbose` unset only checks that warned or failed show details.
pub fn print_report(report: &HealthCheckReport, verbose: bool) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if !verbose && result.status == CheckStatus::Pass {
            continue;
        }
        if let Some(details) = &result.details {
            println!("\n{} Details:", name.bold());
            println!("{}", details);
        }
    }
}
