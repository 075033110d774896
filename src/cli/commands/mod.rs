mod command_result;
pub mod diff;
pub mod find;
pub mod generate;
pub mod init;
pub mod prune;
pub mod scan;

pub use command_result::*;
