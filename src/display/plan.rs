//! Meal plan display formatting

use std::collections::HashMap;

use crate::models::{DayOfWeek, DishId, MealSlot, WeeklyPlan};

/// Format a week day by day
///
/// `dish_names` resolves planned dish IDs; dishes deleted since they were
/// planned show as their ID.
pub fn format_week(plan: &WeeklyPlan, dish_names: &HashMap<DishId, String>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Week of {}\n", plan.week));

    if plan.is_empty() {
        output.push_str("  Nothing planned.\n");
        return output;
    }

    for day in DayOfWeek::ALL {
        let date = plan.week.date_of(day);
        output.push_str(&format!("\n{} {}\n", day, date.format("%Y-%m-%d")));

        let Some(day_plan) = plan.day(day).filter(|d| !d.is_empty()) else {
            output.push_str("  -\n");
            continue;
        };

        for slot in MealSlot::ALL {
            let meals = day_plan.slot(slot);
            if meals.is_empty() {
                continue;
            }
            let names: Vec<String> = meals
                .iter()
                .map(|meal| {
                    let name = dish_names
                        .get(&meal.dish_id)
                        .cloned()
                        .unwrap_or_else(|| format!("{} (deleted)", meal.dish_id));
                    if meal.completed {
                        format!("[x] {}", name)
                    } else {
                        format!("[ ] {}", name)
                    }
                })
                .collect();
            output.push_str(&format!("  {:<10} {}\n", slot.as_str(), names.join(", ")));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlannedMeal, WeekKey};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_week() {
        let week = WeekKey::containing(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        let output = format_week(&WeeklyPlan::new(week), &HashMap::new());
        assert_eq!(output, "Week of 2025-01-05\n  Nothing planned.\n");
    }

    #[test]
    fn test_week_marks_completed_and_deleted() {
        let week = WeekKey::containing(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        let soup = DishId::new();
        let gone = DishId::new();

        let mut plan = WeeklyPlan::new(week);
        let dinner = plan.day_mut(DayOfWeek::Wednesday).slot_mut(MealSlot::Dinner);
        dinner.push(PlannedMeal {
            dish_id: soup,
            completed: true,
        });
        dinner.push(PlannedMeal::new(gone));

        let names = HashMap::from([(soup, "Soup".to_string())]);
        let output = format_week(&plan, &names);

        assert!(output.contains("Wednesday 2025-01-08\n"));
        assert!(output.contains("[x] Soup, [ ] dish-"));
        assert!(output.contains("(deleted)"));
        assert!(output.contains("Sunday 2025-01-05\n  -\n"));
    }
}
