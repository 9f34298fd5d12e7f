// Weekly planner: days of the week and the meals assigned to them.

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::meal::{self, format_dollars, Meal};
use super::settings::UserSettings;

// ---------------------------------------------------------------------------
// DayOfWeek
// ---------------------------------------------------------------------------

/// Planner day. Variant order is the display order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.label()[..3]
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }

    /// The planner day a calendar date falls on.
    pub fn of_date(date: &DateTime<Utc>) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// Zero-based position in the week (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// PlannerDay
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerDay {
    pub id: String,
    /// When the day entry was created. Serialized as RFC 3339.
    pub date: DateTime<Utc>,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl PlannerDay {
    pub fn new(date: DateTime<Utc>, day_of_week: DayOfWeek, meals: Vec<Meal>) -> Self {
        PlannerDay {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            day_of_week,
            meals,
        }
    }

    pub fn label(&self) -> &'static str {
        self.day_of_week.label()
    }

    pub fn total_calories(&self) -> u32 {
        meal::total_calories(&self.meals)
    }

    pub fn total_cost(&self) -> f64 {
        meal::total_cost(&self.meals)
    }

    /// Section header: "Monday • 1200 cal • $18.40".
    pub fn header(&self) -> String {
        format!(
            "{} • {} cal • {}",
            self.label(),
            self.total_calories(),
            format_dollars(self.total_cost())
        )
    }
}

// ---------------------------------------------------------------------------
// Collection operations
// ---------------------------------------------------------------------------

/// Append `meal` to the entry for `day`, creating the entry (dated `now`)
/// if the day has not been planned yet.
pub fn add_meal(days: &mut Vec<PlannerDay>, meal: Meal, day: DayOfWeek, now: DateTime<Utc>) {
    match days.iter_mut().find(|d| d.day_of_week == day) {
        Some(existing) => existing.meals.push(meal),
        None => days.push(PlannerDay::new(now, day, vec![meal])),
    }
}

/// Remove the meal at `index` within `day`. A day left without meals is
/// removed entirely. Returns the removed meal, or `None` if out of range.
pub fn remove_meal(days: &mut Vec<PlannerDay>, day: DayOfWeek, index: usize) -> Option<Meal> {
    let pos = days.iter().position(|d| d.day_of_week == day)?;
    if index >= days[pos].meals.len() {
        return None;
    }
    let removed = days[pos].meals.remove(index);
    if days[pos].meals.is_empty() {
        days.remove(pos);
    }
    Some(removed)
}

/// Planner days in week order. The sort is stable, so duplicate entries
/// for the same day keep their stored order.
pub fn sorted(mut days: Vec<PlannerDay>) -> Vec<PlannerDay> {
    days.sort_by_key(|d| d.day_of_week);
    days
}

/// True when no day has any meal planned.
pub fn is_empty_plan(days: &[PlannerDay]) -> bool {
    days.iter().all(|d| d.meals.is_empty())
}

/// All planned meals, in stored order.
pub fn planned_meals(days: &[PlannerDay]) -> impl Iterator<Item = &Meal> {
    days.iter().flat_map(|d| d.meals.iter())
}

// ---------------------------------------------------------------------------
// WeekSummary
// ---------------------------------------------------------------------------

/// Totals for the whole plan measured against the user's settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub total_calories: u32,
    pub total_cost: f64,
    pub days_planned: usize,
    pub average_daily_calories: u32,
    /// Weekly budget minus total cost (negative when over budget).
    pub budget_remaining: f64,
    pub over_budget: bool,
    /// Days whose calories exceed the daily goal.
    pub days_over_calorie_goal: usize,
}

impl WeekSummary {
    pub fn compute(days: &[PlannerDay], settings: &UserSettings) -> Self {
        let planned: Vec<&PlannerDay> = days.iter().filter(|d| !d.meals.is_empty()).collect();
        let total_calories: u32 = planned.iter().map(|d| d.total_calories()).sum();
        let total_cost: f64 = planned.iter().map(|d| d.total_cost()).sum();
        let days_planned = planned.len();
        let average_daily_calories = if days_planned > 0 {
            total_calories / days_planned as u32
        } else {
            0
        };
        let budget_remaining = settings.weekly_budget - total_cost;
        let days_over_calorie_goal = planned
            .iter()
            .filter(|d| d.total_calories() > settings.calorie_goal)
            .count();

        WeekSummary {
            total_calories,
            total_cost,
            days_planned,
            average_daily_calories,
            budget_remaining,
            over_budget: budget_remaining < 0.0,
            days_over_calorie_goal,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
