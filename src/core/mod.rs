//! Analysis engine: loading, scanning, diffing and code generation.
//!
//! ## Module Structure
//!
//! - `corpus`: source file discovery and loading
//! - `locales`: dictionary files in JSON, XML and `.strings` formats
//! - `patterns`: call-site idioms compiled per key
//! - `scanner`: key usage scanning (parallel and detailed)
//! - `features` / `differ`: placeholder and tag extraction, locale comparison
//! - `codegen`: typed dictionary module rendering
//! - `context`: per-run configuration and shared loaders

pub mod codegen;
pub mod console;
pub mod context;
pub mod corpus;
pub mod differ;
pub mod error;
pub mod features;
pub mod locales;
pub mod patterns;
pub mod scanner;

pub use console::Console;
pub use context::RunContext;
pub use corpus::{Corpus, SourceFile};
pub use differ::{DictionaryDiffer, IssueReport, LocaleIssues};
pub use error::LoadError;
pub use locales::{LoadedLocales, LocaleDictionary};
pub use scanner::{KeyUsageScanner, ScanMode, ScanOutcome, UsageLocation};
