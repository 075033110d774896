use std::time::Instant;

use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary, DiffSummary, generate::write_module};
use crate::{
    cli::args::DiffCommand,
    core::{
        RunContext,
        differ::{DictionaryDiffer, find_legacy_tokens},
    },
    output::write_problems,
};

pub fn diff(cmd: DiffCommand) -> Result<CommandResult> {
    let started = Instant::now();
    let ctx = RunContext::new(&cmd.common)?;
    let console = &ctx.console;
    let locales = ctx.load_locales()?;

    let generated = if cmd.generate_types {
        Some(write_module(&ctx, &locales, &cmd.output, !cmd.en_only)?)
    } else {
        None
    };

    let differ = DictionaryDiffer::new(&locales.master, &ctx.config.tag_check_exemptions);
    let report = differ.diff_all(locales.all());
    let legacy_tokens = find_legacy_tokens(locales.all());

    let problems_file = if cmd.write_problems && !report.is_empty() {
        write_problems(&cmd.problems_file, &report)?;
        console.info(format!(
            "Problems written to {}",
            cmd.problems_file.display()
        ));
        Some(cmd.problems_file.clone())
    } else {
        None
    };

    let summary = DiffSummary {
        master_locale: locales.master.locale.clone(),
        report,
        legacy_tokens,
        skipped: locales.skipped.clone(),
        locales_compared: locales.others.len(),
        print_problems: cmd.print_problems,
        print_old_dynamic_variables: cmd.print_old_dynamic_variables,
        format: cmd.format,
        problems_file,
        generated,
    };

    let mut error_count = 0;
    if cmd.error_on_problems && summary.has_problems() {
        error_count += summary.report.len() + summary.skipped.len();
    }
    if cmd.error_old_dynamic_variables {
        error_count += summary.legacy_tokens.len();
    }

    console.elapsed("Diff finished", started.elapsed());

    Ok(CommandResult {
        summary: CommandSummary::Diff(summary),
        error_count,
        exit_on_errors: true,
    })
}
