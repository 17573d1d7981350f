//! Grocery list display formatting
//!
//! Needed items come first, generated then manual, each with a checkbox.
//! Items the pantry already covers are listed after them for reference.

use crate::models::{format_amount, GroceryItem, SavedGroceryList};
use crate::services::CommitOutcome;

/// Format the saved grocery list
pub fn format_grocery_list(list: &SavedGroceryList) -> String {
    let mut output = String::new();

    match (list.start_date, list.end_date) {
        (Some(start), Some(end)) => {
            output.push_str(&format!("Grocery list for {} to {}\n", start, end));
        }
        _ => output.push_str("Grocery list\n"),
    }

    let needed: Vec<&GroceryItem> = list.needed_items().collect();
    if needed.is_empty() && list.generated.available.is_empty() {
        output.push_str("  Nothing to buy.\n");
        return output;
    }

    let width = list
        .needed_items()
        .chain(list.generated.available.iter())
        .map(|i| i.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    output.push_str("\nTo buy:\n");
    if needed.is_empty() {
        output.push_str("  -\n");
    }
    for item in &needed {
        output.push_str(&format!(
            "  [{}] {:<width$}  {:>8} {:<12} {}{}\n",
            if item.checked { "x" } else { " " },
            item.name,
            format_amount(item.quantity.amount),
            item.quantity.unit,
            item.id.map(|id| id.to_string()).unwrap_or_default(),
            if item.manual { " (manual)" } else { "" },
            width = width,
        ));
    }

    if !list.generated.available.is_empty() {
        output.push_str("\nAlready in the pantry:\n");
        for item in &list.generated.available {
            output.push_str(&format!(
                "      {:<width$}  {:>8} {}\n",
                item.name,
                format_amount(item.quantity.amount),
                item.quantity.unit,
                width = width,
            ));
        }
    }

    output
}

/// Summarize a grocery commit
pub fn format_commit_outcome(outcome: &CommitOutcome) -> String {
    if outcome.committed.is_empty() {
        return "No checked items to commit.\n".to_string();
    }

    let mut output = format!(
        "Committed {} item(s) to the pantry:\n",
        outcome.committed.len()
    );
    for item in &outcome.committed {
        output.push_str(&format!("  {}\n", item));
    }
    for item in &outcome.report.skipped {
        output.push_str(&format!("  skipped {}\n", item));
    }
    if !outcome.pruned.is_empty() {
        output.push_str(&format!(
            "Removed {} empty pantry row(s).\n",
            outcome.pruned.len()
        ));
    }

    output
}
