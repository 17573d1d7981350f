//! Unit table display

use crate::units::UnitRegistry;

/// Format every known unit, grouped by family in table order
pub fn format_unit_table(registry: &UnitRegistry) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<18}  {:>10}  {}\n",
        "Family", "Unit", "Factor", "Also accepted"
    ));
    output.push_str(&format!("{:-<8}  {:-<18}  {:->10}  {:-<16}\n", "", "", "", ""));

    for unit in registry.all_units() {
        let mut spellings: Vec<&str> = Vec::new();
        if unit.label != unit.name {
            spellings.push(&unit.label);
        }
        spellings.extend(unit.aliases.iter().map(String::as_str));

        output.push_str(&format!(
            "{:<8}  {:<18}  {:>10}  {}\n",
            unit.family.as_str(),
            unit.name,
            unit.factor,
            spellings.join(", ")
        ));
    }

    output
}
