//! Weekly meal plan models
//!
//! Plans are stored per calendar week. A week is identified by the date of
//! its Sunday, and each day holds four meal slots with an ordered list of
//! planned dishes.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ids::DishId;

/// Identifier of a plan week: the ISO date of its Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// The week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_sunday() as i64;
        Self(date - Duration::days(offset))
    }

    /// The Sunday that starts this week
    pub fn start_date(&self) -> NaiveDate {
        self.0
    }

    /// The date of `day` within this week
    pub fn date_of(&self, day: DayOfWeek) -> NaiveDate {
        self.0 + Duration::days(day.index() as i64)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + Duration::days(7))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for WeekKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?;
        Ok(Self::containing(date))
    }
}

/// Calendar date of an instant, normalized to midnight UTC
pub fn utc_calendar_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.naive_utc().date()
}

/// Day of the week, Sunday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Days since Sunday
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" | "snacks" => Ok(Self::Snacks),
            other => Err(format!(
                "Unknown meal slot '{}' (expected breakfast, lunch, dinner or snacks)",
                other
            )),
        }
    }
}

/// A dish placed in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub dish_id: DishId,

    /// Marked as eaten; completing consumes pantry stock
    #[serde(default)]
    pub completed: bool,
}

impl PlannedMeal {
    pub fn new(dish_id: DishId) -> Self {
        Self {
            dish_id,
            completed: false,
        }
    }
}

/// The four slots of one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Vec<PlannedMeal>,
    #[serde(default)]
    pub lunch: Vec<PlannedMeal>,
    #[serde(default)]
    pub dinner: Vec<PlannedMeal>,
    #[serde(default)]
    pub snacks: Vec<PlannedMeal>,
}

impl DayPlan {
    pub fn slot(&self, slot: MealSlot) -> &[PlannedMeal] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<PlannedMeal> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// All planned meals in slot order
    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &PlannedMeal)> {
        MealSlot::ALL
            .into_iter()
            .flat_map(move |slot| self.slot(slot).iter().map(move |meal| (slot, meal)))
    }

    pub fn is_empty(&self) -> bool {
        MealSlot::ALL.iter().all(|slot| self.slot(*slot).is_empty())
    }
}

/// The plan for one calendar week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub week: WeekKey,

    #[serde(default)]
    pub days: BTreeMap<DayOfWeek, DayPlan>,
}

impl WeeklyPlan {
    /// An empty plan for the given week
    pub fn new(week: WeekKey) -> Self {
        Self {
            week,
            days: BTreeMap::new(),
        }
    }

    pub fn day(&self, day: DayOfWeek) -> Option<&DayPlan> {
        self.days.get(&day)
    }

    /// The day's plan, created empty if missing
    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut DayPlan {
        self.days.entry(day).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(DayPlan::is_empty)
    }
}
