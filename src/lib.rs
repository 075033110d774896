//! locscan - localization key scanner and locale dictionary checker
//!
//! locscan finds which localization keys a TypeScript code base still uses,
//! compares every locale dictionary against the master locale (keys,
//! placeholders, formatting tags) and generates a typed dictionary module.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, actions, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, diffing and code generation
//! - `output`: Analysis and problems files
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod output;
pub mod utils;
