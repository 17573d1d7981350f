//! Dish display formatting

use crate::models::Dish;

/// Format dishes as a table
pub fn format_dish_list(dishes: &[Dish]) -> String {
    if dishes.is_empty() {
        return "No dishes found.".to_string();
    }

    let name_width = dishes.iter().map(|d| d.name.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>11}  {}\n",
        "Name",
        "Ingredients",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->11}  {:-<13}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for dish in dishes {
        output.push_str(&format!(
            "{:<name_width$}  {:>11}  {}\n",
            dish.name,
            dish.ingredients.len(),
            dish.id,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single dish with its ingredients
pub fn format_dish_details(dish: &Dish) -> String {
    let mut output = String::new();

    output.push_str(&format!("Dish: {}\n", dish.name));
    output.push_str(&format!("  ID:       {}\n", dish.id));
    output.push_str(&format!(
        "  Created:  {}\n",
        dish.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        dish.updated_at.format("%Y-%m-%d %H:%M")
    ));

    if dish.ingredients.is_empty() {
        output.push_str("  No ingredients.\n");
    } else {
        output.push_str("  Ingredients:\n");
        for ingredient in &dish.ingredients {
            output.push_str(&format!("    - {}\n", ingredient));
        }
    }

    output
}
