use std::path::Path;

use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary, GenerateSummary};
use crate::{
    cli::args::GenerateCommand,
    core::{
        RunContext, codegen::ModuleGenerator, error::write_file, locales::LoadedLocales,
    },
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let locales = ctx.load_locales()?;
    let summary = write_module(&ctx, &locales, &cmd.output, cmd.merged)?;
    Ok(CommandResult::new(CommandSummary::Generate(summary)))
}

/// Render the dictionary module and write it to `output`.
pub fn write_module(
    ctx: &RunContext,
    locales: &LoadedLocales,
    output: &Path,
    merged: bool,
) -> Result<GenerateSummary> {
    let generator = ModuleGenerator::new(&ctx.config.static_replacements);
    let (content, locale_count) = if merged {
        (generator.render_merged(locales)?, locales.locale_count())
    } else {
        (generator.render_master(&locales.master), 1)
    };
    write_file(output, &content)?;
    tracing::debug!(path = %output.display(), merged, "wrote dictionary module");

    Ok(GenerateSummary {
        output: output.to_path_buf(),
        key_count: locales.master.len(),
        locale_count,
    })
}
