//! Pantry display formatting

use crate::models::{format_amount, PantryItem};
use crate::services::PantryUpdateReport;

/// Format pantry rows as a table
pub fn format_pantry_list(items: &[PantryItem]) -> String {
    if items.is_empty() {
        return "Pantry is empty.".to_string();
    }

    let name_width = items.iter().map(|i| i.name.len()).max().unwrap_or(4).max(4);
    let unit_width = items
        .iter()
        .map(|i| i.quantity.unit.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>10}  {:<unit_width$}  {}\n",
        "Name",
        "Amount",
        "Unit",
        "ID",
        name_width = name_width,
        unit_width = unit_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->10}  {:-<unit_width$}  {:-<12}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
        unit_width = unit_width,
    ));

    for item in items {
        output.push_str(&format!(
            "{:<name_width$}  {:>10}  {:<unit_width$}  {}\n",
            item.name,
            format_amount(item.quantity.amount),
            item.quantity.unit,
            item.id,
            name_width = name_width,
            unit_width = unit_width,
        ));
    }

    output
}

/// Summarize what a pantry reconciliation did
pub fn format_pantry_report(report: &PantryUpdateReport) -> String {
    let mut output = String::new();

    if report.saved.is_empty() {
        output.push_str("Pantry unchanged.\n");
    } else {
        output.push_str("Pantry updated:\n");
        for item in &report.saved {
            output.push_str(&format!("  {:<20} {}\n", item.name, item.quantity));
        }
    }

    if !report.shortfalls.is_empty() {
        output.push_str("Not enough in the pantry for:\n");
        for shortfall in &report.shortfalls {
            output.push_str(&format!("  {}\n", shortfall));
        }
    }

    if !report.skipped.is_empty() {
        output.push_str("Skipped (unknown unit or empty amount):\n");
        for skipped in &report.skipped {
            output.push_str(&format!("  {}\n", skipped));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Quantity};

    #[test]
    fn test_empty_pantry() {
        assert_eq!(format_pantry_list(&[]), "Pantry is empty.");
    }

    #[test]
    fn test_pantry_table_rows() {
        let items = vec![
            PantryItem::new("flour", Quantity::new(2.5, "cup")),
            PantryItem::new("eggs", Quantity::new(12.0, "piece")),
        ];
        let output = format_pantry_list(&items);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[2].contains("2.5"));
        assert!(lines[3].contains("12"));
        assert!(lines[3].contains("pan-"));
    }

    #[test]
    fn test_report_lists_shortfalls() {
        let report = PantryUpdateReport {
            saved: vec![PantryItem::new("flour", Quantity::new(0.0, "cup"))],
            shortfalls: vec![Ingredient::new("flour", 1.0, "cup")],
            skipped: Vec::new(),
        };
        let output = format_pantry_report(&report);
        assert!(output.contains("Pantry updated:"));
        assert!(output.contains("Not enough in the pantry for:\n  1 cup flour"));
        assert!(!output.contains("Skipped"));
    }
}
