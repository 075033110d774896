use anyhow::Result;

pub mod actions;
pub mod args;
pub mod commands;
mod exit_code;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use crate::core::Console;
use exit_code::exit_status_from_result;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    if let Some(common) = args.common() {
        Console::new(common.verbose, common.debug).init_tracing();
    }

    let result = run::run(args)?;
    report::print(&result);

    Ok(exit_status_from_result(&result))
}
