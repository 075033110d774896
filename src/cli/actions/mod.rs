//! Actions that modify locale files.
//!
//! Actions convert issues into operations and execute them.
//!
//! ```text
//! Issue (problem detected)
//!     ↓
//! Action (Issue → Operation conversion)
//!     ↓
//! Operation (one rewrite of one dictionary file)
//!     ↓
//! execute (file modification)
//! ```
//!
//! - [`DeleteKey`]: Delete unused keys from dictionary files (prune)

mod delete_key;
mod operation;
mod traits;

pub use delete_key::DeleteKey;
pub use operation::Operation;
pub use traits::{Action, ActionStats};
