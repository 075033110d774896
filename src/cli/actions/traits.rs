//! Action trait definition.

use std::io::Write;

use anyhow::Result;

use super::operation::Operation;

/// Statistics from running an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStats {
    /// Number of operations processed.
    pub processed: usize,
    /// Number of entries actually removed or changed.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
    }
}

/// Converts issues into operations and executes them.
///
/// ```ignore
/// if apply {
///     DeleteKey::run(&issues)?;
/// } else {
///     DeleteKey::preview_to(&issues, &mut io::stdout());
/// }
/// ```
pub trait Action<I> {
    /// Convert issues to low-level operations.
    fn to_operations(issues: &[I]) -> Vec<Operation>;

    /// Execute the action (modify files).
    fn run(issues: &[I]) -> Result<ActionStats> {
        let ops = Self::to_operations(issues);
        execute_operations(&ops)
    }

    /// Preview the action (dry-run mode).
    fn preview_to<W: Write>(issues: &[I], writer: &mut W) {
        for op in Self::to_operations(issues) {
            op.preview_to(writer);
        }
    }
}

pub(crate) fn execute_operations(ops: &[Operation]) -> Result<ActionStats> {
    let mut stats = ActionStats::default();
    for op in ops {
        let applied = op.execute()?;
        stats.processed += 1;
        if applied > 0 {
            stats.changes_applied += applied;
            stats.files_modified += 1;
        }
    }
    Ok(stats)
}
