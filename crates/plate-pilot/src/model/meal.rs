// Meal and ingredient records as shown in the feed, favorites and planner.

use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-form measure from the recipe ("2 tbsp", "To taste").
    pub quantity_description: String,
    #[serde(default)]
    pub is_checked_for_grocery: bool,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity_description: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity_description: quantity_description.into(),
            is_checked_for_grocery: false,
        }
    }
}

/// A recipe with its estimated nutrition, cost and cook time.
///
/// `calories`, `estimated_cost` and `cook_time_minutes` are heuristics
/// computed when the meal is fetched (see `mealdb::adapter`), and are kept
/// as-is once the meal is persisted so the planner totals stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
}

impl Meal {
    /// Build a meal with zeroed estimates and no image.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        instructions: impl Into<String>,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        Meal {
            id: id.into(),
            name: name.into(),
            image_url: None,
            instructions: instructions.into(),
            ingredients,
            calories: 0,
            estimated_cost: 0.0,
            cook_time_minutes: 0,
            is_favorite: false,
            category: None,
            area: None,
        }
    }

    pub fn calories_label(&self) -> String {
        format!("{} cal", self.calories)
    }

    pub fn cost_label(&self) -> String {
        format_dollars(self.estimated_cost)
    }

    pub fn cook_time_label(&self) -> String {
        format!("{} min", self.cook_time_minutes)
    }

    /// "Category · Area", or whichever half is known.
    pub fn origin_label(&self) -> Option<String> {
        match (self.category.as_deref(), self.area.as_deref()) {
            (Some(c), Some(a)) => Some(format!("{c} · {a}")),
            (Some(c), None) => Some(c.to_string()),
            (None, Some(a)) => Some(a.to_string()),
            (None, None) => None,
        }
    }
}

/// Sum of calories across a list of meals.
pub fn total_calories(meals: &[Meal]) -> u32 {
    meals.iter().map(|m| m.calories).sum()
}

/// Sum of estimated cost across a list of meals.
pub fn total_cost(meals: &[Meal]) -> f64 {
    meals.iter().map(|m| m.estimated_cost).sum()
}

/// Set `is_favorite` on each meal according to whether its id is among
/// `favorites`.
pub fn mark_favorites(meals: &mut [Meal], favorites: &[Meal]) {
    for meal in meals {
        meal.is_favorite = favorites.iter().any(|f| f.id == meal.id);
    }
}

/// Format a dollar amount with two decimals, e.g. `$12.50`.
pub fn format_dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
