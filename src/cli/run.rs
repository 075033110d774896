use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, diff::diff, find::find, generate::generate, init::init, prune::prune,
        scan::scan,
    },
};

/// Dispatch to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Find(cmd)) => find(cmd),
        Some(Command::Diff(cmd)) => diff(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Prune(cmd)) => prune(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
