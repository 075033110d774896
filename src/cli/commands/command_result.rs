use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    cli::args::OutputFormat,
    core::{
        differ::{IssueReport, LegacyTokenReport},
        locales::LocaleLoadWarning,
        scanner::{ScanOutcome, UnusedKeyIssue, UsageLocation},
    },
};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Find(FindSummary),
    Diff(DiffSummary),
    Generate(GenerateSummary),
    Prune(PruneSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub outcome: ScanOutcome,
    pub potential_matches: BTreeMap<String, Vec<UsageLocation>>,
    /// `None` when the master string list was not available.
    pub not_in_master_list: Option<usize>,
    pub files_scanned: usize,
    pub detail: bool,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct FindSummary {
    pub key: String,
    pub locations: Vec<UsageLocation>,
    pub limit: usize,
}

#[derive(Debug)]
pub struct DiffSummary {
    pub master_locale: String,
    pub report: IssueReport,
    pub legacy_tokens: LegacyTokenReport,
    pub skipped: Vec<LocaleLoadWarning>,
    pub locales_compared: usize,
    pub print_problems: bool,
    pub print_old_dynamic_variables: bool,
    pub format: OutputFormat,
    pub problems_file: Option<PathBuf>,
    pub generated: Option<GenerateSummary>,
}

impl DiffSummary {
    pub fn has_problems(&self) -> bool {
        !self.report.is_empty() || !self.skipped.is_empty()
    }
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub output: PathBuf,
    pub key_count: usize,
    pub locale_count: usize,
}

#[derive(Debug)]
pub struct PruneSummary {
    /// Entries removed (or that would be removed), across every locale.
    pub unused_issues: Vec<UnusedKeyIssue>,
    /// Distinct master keys the scan did not find.
    pub unused_key_count: usize,
    pub applied_count: usize,
    pub file_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a locscan command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Findings that make the run fail when `exit_on_errors` is set.
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for dry-run commands that report work to do).
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            error_count: 0,
            exit_on_errors: false,
        }
    }
}
