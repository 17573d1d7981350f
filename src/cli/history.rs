//! Audit history command

use crate::error::MealPlanResult;
use crate::storage::Storage;

/// Print the most recent audit log entries, oldest first
pub fn handle_history_command(storage: &Storage, limit: usize) -> MealPlanResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
