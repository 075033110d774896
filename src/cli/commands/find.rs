use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary, FindSummary};
use crate::{
    cli::args::FindCommand,
    core::{RunContext, scanner::KeyUsageScanner},
};

pub fn find(cmd: FindCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let patterns = ctx.patterns()?;
    let corpus = ctx.load_corpus()?;

    let scanner = KeyUsageScanner::new(&corpus, &patterns, &ctx.console);
    let locations = scanner.locate(&cmd.key)?;

    Ok(CommandResult::new(CommandSummary::Find(FindSummary {
        key: cmd.key,
        locations,
        limit: cmd.limit,
    })))
}
