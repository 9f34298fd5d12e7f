// Message types passed between the app orchestrator, background fetch
// tasks and the TUI.

use uuid::Uuid;

use crate::model::{DayOfWeek, GroceryItem, Meal, PlannerDay, UserSettings, WeekSummary};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Home,
    Favorites,
    Planner,
    Grocery,
    Profile,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Home,
        TabId::Favorites,
        TabId::Planner,
        TabId::Grocery,
        TabId::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TabId::Home => "Home",
            TabId::Favorites => "Favorites",
            TabId::Planner => "Planner",
            TabId::Grocery => "Grocery",
            TabId::Profile => "Profile",
        }
    }

    /// Tab bound to digit key `c` ('1'..='5').
    pub fn from_key(c: char) -> Option<TabId> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }
}

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Replace the Home feed with random meals.
    LoadRandom,
    /// Search by name. A blank query behaves like `LoadRandom`.
    Search(String),
    ToggleFavorite(Meal),
    AddToPlanner { meal: Meal, day: DayOfWeek },
    AddToGrocery(Meal),
    /// Add the ingredients of every planned meal to the grocery list.
    AddPlanToGrocery,
    /// Remove the `index`-th meal of `day`.
    RemovePlannedMeal { day: DayOfWeek, index: usize },
    ClearPlanner,
    ToggleGroceryItem(Uuid),
    RemoveGroceryItem(Uuid),
    ClearCompletedGroceries,
    ClearAllGroceries,
    /// Raw form text; fields that fail to parse keep their stored value.
    SaveSettings {
        budget: String,
        calorie_goal: String,
        notifications: bool,
    },
    /// Re-fetch a favorite by id and update its recipe details.
    RefreshFavorite(String),
    ResetAllData,
    Quit,
}

// ---------------------------------------------------------------------------
// app -> TUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    /// A feed load started. `query` is `None` for the random feed.
    FeedLoading { query: Option<String> },
    FeedLoaded(Vec<Meal>),
    FeedError(String),
    /// Short confirmation or error text for the status line.
    Notice(String),
}

/// Everything the TUI needs to draw the persisted collections.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub favorites: Vec<Meal>,
    /// Sorted Monday first.
    pub planner_days: Vec<PlannerDay>,
    pub grocery_items: Vec<GroceryItem>,
    pub settings: UserSettings,
    pub week_summary: WeekSummary,
}

// ---------------------------------------------------------------------------
// Background tasks -> app
// ---------------------------------------------------------------------------

/// Results of spawned MealDB requests.
///
/// Feed events carry the generation of the load that produced them; the
/// app drops any whose generation is no longer current.
#[derive(Debug)]
pub enum ApiEvent {
    FeedLoaded {
        meals: Vec<Meal>,
        generation: u64,
    },
    FeedFailed {
        message: String,
        generation: u64,
    },
    FavoriteRefreshed {
        id: String,
        result: Result<Option<Meal>, String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_keys_map_in_order() {
        assert_eq!(TabId::from_key('1'), Some(TabId::Home));
        assert_eq!(TabId::from_key('3'), Some(TabId::Planner));
        assert_eq!(TabId::from_key('5'), Some(TabId::Profile));
        assert_eq!(TabId::from_key('0'), None);
        assert_eq!(TabId::from_key('6'), None);
        assert_eq!(TabId::from_key('x'), None);
    }

    #[test]
    fn default_tab_is_home() {
        assert_eq!(TabId::default(), TabId::Home);
    }
}
