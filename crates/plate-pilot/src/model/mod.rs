// Domain records and the whole-collection operations performed on them.

pub mod grocery;
pub mod meal;
pub mod planner;
pub mod settings;

pub use grocery::{GroceryCategory, GroceryItem};
pub use meal::{Ingredient, Meal};
pub use planner::{DayOfWeek, PlannerDay, WeekSummary};
pub use settings::UserSettings;
