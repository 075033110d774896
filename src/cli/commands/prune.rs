use std::collections::BTreeSet;

use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary, PruneSummary};
use crate::{
    cli::{
        actions::{Action, DeleteKey},
        args::PruneCommand,
    },
    core::{
        RunContext,
        scanner::{KeyUsageScanner, ScanMode, unused_key_issues},
    },
};

pub fn prune(cmd: PruneCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let console = &ctx.console;
    let patterns = ctx.patterns()?;
    let (corpus, locales) = ctx.load_all()?;

    for skipped in &locales.skipped {
        console.warn(format!(
            "locale {} was not loaded and will not be pruned",
            skipped.locale
        ));
    }

    let keys: Vec<&str> = locales.master.keys().collect();
    let scanner = KeyUsageScanner::new(&corpus, &patterns, console);
    let outcome = scanner.scan(
        &keys,
        &ctx.config.intentionally_unused,
        ScanMode::Parallel { jobs: cmd.jobs },
    )?;

    let unused_issues = unused_key_issues(&outcome, &locales);
    let (applied_count, file_count) = if cmd.apply && !unused_issues.is_empty() {
        let stats = DeleteKey::run(&unused_issues)?;
        (stats.changes_applied, stats.files_modified)
    } else {
        let files: BTreeSet<&str> = unused_issues
            .iter()
            .map(|issue| issue.location.file_path.as_str())
            .collect();
        (0, files.len())
    };

    Ok(CommandResult::new(CommandSummary::Prune(PruneSummary {
        unused_key_count: outcome.not_found.len(),
        unused_issues,
        applied_count,
        file_count,
        is_apply: cmd.apply,
    })))
}
