//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Find which master keys are used in the source tree
//! - `find`: Show every usage of a single key
//! - `diff`: Compare every locale against the master locale
//! - `generate`: Write the typed dictionary module
//! - `prune`: Remove unused keys from every locale file
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Scan(cmd)) => Some(&cmd.common),
            Some(Command::Find(cmd)) => Some(&cmd.common),
            Some(Command::Diff(cmd)) => Some(&cmd.common),
            Some(Command::Generate(cmd)) => Some(&cmd.common),
            Some(Command::Prune(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory holding one subdirectory per locale (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Reference locale every other locale is compared against (overrides config file)
    #[arg(long)]
    pub master_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print debug tracing to stderr
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory the analysis files are written to
    #[arg(long, default_value = "./tools/localization/analysis")]
    pub output_dir: PathBuf,

    /// Keys expected to be in use, one per line
    #[arg(long, default_value = "./tools/localization/input/master_string_list.txt")]
    pub master_strings: PathBuf,

    /// Keys slated for removal, one per line
    #[arg(long, default_value = "./tools/localization/input/to_be_removed_list.txt")]
    pub to_be_removed: PathBuf,

    /// Record the file and line of every usage (sequential)
    #[arg(long)]
    pub detail: bool,

    /// Worker threads for the parallel scan (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct FindCommand {
    /// Key to look for
    pub key: String,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Maximum number of usages to print (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct DiffCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Exit with code 1 when any locale has problems
    #[arg(long)]
    pub error_on_problems: bool,

    /// Exit with code 1 when any string still uses `$name$` placeholders
    #[arg(long)]
    pub error_old_dynamic_variables: bool,

    /// Print the problems table
    #[arg(long)]
    pub print_problems: bool,

    /// Write the problems report to --problems-file
    #[arg(long)]
    pub write_problems: bool,

    #[arg(long, default_value = "./tools/localization/output/problems.json")]
    pub problems_file: PathBuf,

    /// Print every string that still uses `$name$` placeholders
    #[arg(long)]
    pub print_old_dynamic_variables: bool,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Also write the typed dictionary module
    #[arg(long)]
    pub generate_types: bool,

    /// Generate the master-only module instead of the merged one
    #[arg(long)]
    pub en_only: bool,

    /// Where the generated module is written
    #[arg(long, default_value = "./ts/localization/locales.ts")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Where the generated module is written
    #[arg(long, default_value = "./ts/localization/locales.ts")]
    pub output: PathBuf,

    /// Include every locale instead of only the master locale
    #[arg(long)]
    pub merged: bool,
}

#[derive(Debug, Args)]
pub struct PruneCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually delete keys (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Worker threads for the scan (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find which master keys are referenced in the source tree
    Scan(ScanCommand),
    /// Show every file and line where a key is used
    Find(FindCommand),
    /// Compare every locale against the master locale
    Diff(DiffCommand),
    /// Generate the typed dictionary module
    Generate(GenerateCommand),
    /// Remove unused keys from every locale file
    Prune(PruneCommand),
    /// Initialize a new .locscanrc.json configuration file
    Init,
}
