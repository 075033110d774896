//! Report formatting and printing.
//!
//! Every command result is printed to stdout, either as text for people or
//! as JSON for tools. Diagnostics that are not part of the result go through
//! the `Console` on stderr instead.

use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use colored::Colorize;
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use super::{
    actions::{Action, DeleteKey},
    args::OutputFormat,
    commands::{
        CommandResult, CommandSummary, DiffSummary, FindSummary, GenerateSummary, InitSummary,
        PruneSummary, ScanSummary,
    },
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{
        differ::{IssueReport, LegacyTokenReport, LocaleIssues},
        features::TagKind,
        scanner::UsageLocation,
    },
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Column width of the problems table.
const PADDING: usize = 10;

const LEGEND: [&str; 5] = [
    "+ Keys: Keys present in the master locale but missing in the locale",
    "- Keys: Keys present in the locale but missing in the master locale",
    "- Vars: Dynamic variables present in the master locale but missing in the locale",
    "+ Vars: Dynamic variables present in the locale but missing in the master locale",
    "Tags:   Keys with formatting tag differences or malformed markup",
];

const COLUMNS: [&str; 6] = ["Locale", "+ Keys", "- Keys", "- Vars", "+ Vars", "Tags"];

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, writer),
        CommandSummary::Find(summary) => print_find(summary, writer),
        CommandSummary::Diff(summary) => print_diff(summary, writer),
        CommandSummary::Generate(summary) => print_generated(summary, writer),
        CommandSummary::Prune(summary) => print_prune(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// scan / find
// ============================================================

fn print_scan<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let outcome = &summary.outcome;

    if summary.format == OutputFormat::Json {
        let value = json!({
            "found": outcome
                .found
                .iter()
                .map(|(key, locations)| (key.clone(), location_strings(locations)))
                .collect::<BTreeMap<_, _>>(),
            "not_found": outcome.not_found,
            "potential_matches": summary
                .potential_matches
                .iter()
                .map(|(key, locations)| (key.clone(), location_strings(locations)))
                .collect::<BTreeMap<_, _>>(),
            "skipped": outcome.skipped,
            "files_scanned": summary.files_scanned,
            "not_in_master_list": summary.not_in_master_list,
        });
        write_json(&value, writer);
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} of {} key(s) used across {} source file(s)",
            outcome.found.len(),
            outcome.scanned_count(),
            summary.files_scanned
        )
        .green()
    );

    if !outcome.not_found.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} key(s) not found:",
            FAILURE_MARK.red(),
            outcome.not_found.len()
        );
        for key in &outcome.not_found {
            match summary.potential_matches.get(key) {
                Some(locations) => {
                    let _ = writeln!(
                        writer,
                        "  {} {}",
                        key,
                        format!("(potential: {})", location_strings(locations).join(", ")).dimmed()
                    );
                }
                None => {
                    let _ = writeln!(writer, "  {}", key);
                }
            }
        }
    }

    if summary.detail {
        for (key, locations) in &outcome.found {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "used:".bold(),
                key,
                location_strings(locations).join(", ")
            );
        }
    }

    if !outcome.skipped.is_empty() {
        let _ = writeln!(
            writer,
            "Skipped {} intentionally unused key(s).",
            outcome.skipped.len()
        );
    }
    if let Some(count) = summary.not_in_master_list
        && count > 0
    {
        let _ = writeln!(
            writer,
            "{} {} used key(s) are not in the master string list.",
            "warning:".bold().yellow(),
            count
        );
    }
    let _ = writeln!(
        writer,
        "Results written to {}",
        summary.output_dir.display()
    );
}

fn print_find<W: Write>(summary: &FindSummary, writer: &mut W) {
    let total = summary.locations.len();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} No matches found for token '{}'",
            FAILURE_MARK.red(),
            summary.key
        );
        return;
    }

    let _ = writeln!(
        writer,
        "Found {} {} for token '{}':",
        total,
        if total == 1 { "match" } else { "matches" },
        summary.key
    );
    let shown = if summary.limit == 0 {
        total
    } else {
        total.min(summary.limit)
    };
    for location in summary.locations.iter().take(shown) {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
    }
    if shown < total {
        let _ = writeln!(
            writer,
            "  ... and {} more (use {} to show all)",
            total - shown,
            "--limit 0".cyan()
        );
    }
}

fn location_strings(locations: &[UsageLocation]) -> Vec<String> {
    locations.iter().map(ToString::to_string).collect()
}

// ============================================================
// diff / generate
// ============================================================

fn print_diff<W: Write>(summary: &DiffSummary, writer: &mut W) {
    if summary.format == OutputFormat::Json {
        let skipped: Vec<_> = summary
            .skipped
            .iter()
            .map(|s| json!({ "locale": s.locale, "error": s.error }))
            .collect();
        let value = json!({
            "master_locale": summary.master_locale,
            "locales_compared": summary.locales_compared,
            "problems": summary.report,
            "old_dynamic_variables": summary.legacy_tokens,
            "skipped_locales": skipped,
        });
        write_json(&value, writer);
        return;
    }

    if let Some(generated) = &summary.generated {
        print_generated(generated, writer);
    }

    print_legacy_tokens(
        &summary.legacy_tokens,
        summary.print_old_dynamic_variables,
        writer,
    );

    if summary.print_problems && !summary.report.is_empty() {
        print_problems_table(&summary.report, writer);
    }

    for skipped in &summary.skipped {
        let _ = writeln!(
            writer,
            "{} locale {} was not compared: {}",
            "warning:".bold().yellow(),
            skipped.locale,
            skipped.error
        );
    }

    if summary.report.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Compared {} locale(s) against {} - no problems found",
                summary.locales_compared, summary.master_locale
            )
            .green()
        );
        return;
    }

    let total: usize = summary.report.values().map(LocaleIssues::problem_count).sum();
    let _ = writeln!(
        writer,
        "{} {} problems in {} of {} locale(s)",
        FAILURE_MARK.red(),
        total,
        summary.report.len(),
        summary.locales_compared
    );
    if let Some(path) = &summary.problems_file {
        let _ = writeln!(writer, "Problems written to {}", path.display());
    }
    if !summary.print_problems && summary.problems_file.is_none() {
        let _ = writeln!(
            writer,
            "Run with {} or {} to see the problems.",
            "--print-problems".cyan(),
            "--write-problems".cyan()
        );
    }
}

fn print_legacy_tokens<W: Write>(report: &LegacyTokenReport, print_strings: bool, writer: &mut W) {
    for (locale, keys) in report {
        if print_strings {
            write_json(&json!(keys), writer);
        }
        let _ = writeln!(
            writer,
            "{} Locale {} contains {} strings with old dynamic variables.",
            "warning:".bold().yellow(),
            locale,
            keys.len()
        );
    }
    if !report.is_empty() && !print_strings {
        let _ = writeln!(
            writer,
            "Run with {} to see them.",
            "--print-old-dynamic-variables".cyan()
        );
    }
}

/// Print the per-locale problem counts with a legend.
pub fn print_problems_table<W: Write>(report: &IssueReport, writer: &mut W) {
    let rule = "-".repeat(COLUMNS.len() * PADDING);
    let _ = writeln!(writer, "\n{}\n", rule);
    for line in LEGEND {
        let _ = writeln!(writer, "{}", line);
    }
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{}", table_row(&COLUMNS.map(String::from)));
    let _ = writeln!(writer, "{}", rule);

    for (locale, issues) in report {
        let cells = [
            locale.clone(),
            issues.missing_keys.len().to_string(),
            issues.additional_keys.len().to_string(),
            issues.missing_variables.values().map(Vec::len).sum::<usize>().to_string(),
            issues.additional_variables.values().map(Vec::len).sum::<usize>().to_string(),
            tag_problem_count(issues).to_string(),
        ];
        let _ = writeln!(writer, "{}", table_row(&cells));
    }
    let _ = writeln!(writer);
}

fn tag_problem_count(issues: &LocaleIssues) -> usize {
    TagKind::ALL
        .iter()
        .map(|kind| issues.tag_deltas(*kind).len())
        .sum::<usize>()
        + issues.disallowed_tags.len()
        + issues.improper_tags.len()
}

fn table_row(cells: &[String]) -> String {
    let mut row = String::new();
    for cell in cells {
        row.push_str(cell);
        let width = UnicodeWidthStr::width(cell.as_str());
        row.push_str(&" ".repeat(PADDING.saturating_sub(width).max(1)));
    }
    row.trim_end().to_string()
}

fn print_generated<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} ({} keys, {} locale(s))",
            summary.output.display(),
            summary.key_count,
            summary.locale_count
        )
        .green()
    );
}

// ============================================================
// prune / init
// ============================================================

fn print_prune<W: Write>(summary: &PruneSummary, writer: &mut W) {
    if summary.unused_issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No unused keys found".green()
        );
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} key(s) in {} file(s) (processed {} unused key(s)).",
            "Deleted".green().bold(),
            summary.applied_count,
            summary.file_count,
            summary.unused_key_count
        );
    } else {
        DeleteKey::preview_to(&summary.unused_issues, writer);
        let _ = writeln!(
            writer,
            "{} {} key(s) in {} file(s).",
            "Would delete".yellow().bold(),
            summary.unused_issues.len(),
            summary.file_count
        );
        let _ = writeln!(writer, "Run with {} to delete these keys.", "--apply".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn write_json<W: Write>(value: &serde_json::Value, writer: &mut W) {
    if let Ok(text) = serde_json::to_string_pretty(value) {
        let _ = writeln!(writer, "{}", text);
    }
}
