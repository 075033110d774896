use std::time::Instant;

use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::{
    cli::args::ScanCommand,
    core::{
        RunContext,
        scanner::{KeyUsageScanner, ScanMode},
    },
    output::{AnalysisOutput, not_in_master_list, read_key_list},
};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let started = Instant::now();
    let ctx = RunContext::new(&cmd.common)?;
    let console = &ctx.console;
    let patterns = ctx.patterns()?;

    console.info("Scanning for localized strings...");
    let (corpus, locales) = ctx.load_all()?;
    let master_list = read_key_list(&cmd.master_strings, "Master string list", console)?;
    let to_be_removed = match &master_list {
        Some(_) => read_key_list(&cmd.to_be_removed, "Strings to be removed list", console)?,
        None => None,
    };
    let output = AnalysisOutput::prepare(&cmd.output_dir)?;
    let master = &locales.master;
    let keys: Vec<&str> = master.keys().collect();

    let mode = if cmd.detail {
        ScanMode::Detailed
    } else {
        ScanMode::Parallel { jobs: cmd.jobs }
    };
    let scanner = KeyUsageScanner::new(&corpus, &patterns, console);
    let outcome = scanner.scan(&keys, &ctx.config.intentionally_unused, mode)?;

    let found_path = output.write_found(&outcome.found, master)?;
    let not_found_path = output.write_not_found(&outcome.not_found)?;
    console.info(format!(
        "Found {} strings in {} files",
        outcome.found.len(),
        corpus.len()
    ));
    console.info(format!(
        "Found strings and their locations written to: {}",
        found_path.display()
    ));
    console.info(format!(
        "Identified {} not found strings and written to: {}",
        outcome.not_found.len(),
        not_found_path.display()
    ));

    console.info("Searching for potential matches for not found strings...");
    let potential_matches = scanner.potential_matches(&outcome.not_found)?;
    let potential_path = output.write_potential_matches(&potential_matches)?;
    console.info(format!(
        "Potential matches found for {}/{} not found strings",
        potential_matches.len(),
        outcome.not_found.len()
    ));
    console.info(format!(
        "Potential matches written to: {}",
        potential_path.display()
    ));

    let not_in_master = match master_list {
        Some(master_list) => {
            let missing = not_in_master_list(&outcome.found, &master_list, to_be_removed.as_ref());
            let path = output.write_not_in_master_list(&missing, &outcome.found, master)?;
            console.info(format!(
                "Found {} strings not in the master list",
                missing.len()
            ));
            console.info(format!(
                "Found strings not in the master list written to: {}",
                path.display()
            ));
            Some(missing.len())
        }
        None => None,
    };

    console.elapsed("Scan finished", started.elapsed());

    Ok(CommandResult::new(CommandSummary::Scan(ScanSummary {
        outcome,
        potential_matches,
        not_in_master_list: not_in_master,
        files_scanned: corpus.len(),
        detail: cmd.detail,
        format: cmd.format,
        output_dir: cmd.output_dir,
    })))
}
