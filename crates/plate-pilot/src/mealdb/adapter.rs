// Wire format of TheMealDB responses and conversion into `Meal`.

use std::collections::HashMap;

use rand::Rng;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{Ingredient, Meal};

/// Highest ingredient slot TheMealDB exposes (`strIngredient1..20`).
pub const MAX_INGREDIENT_SLOTS: usize = 20;

pub const DEFAULT_INSTRUCTIONS: &str = "No instructions available.";
pub const DEFAULT_MEASURE: &str = "To taste";

/// Envelope of every MealDB endpoint. `meals` is `null` when nothing matched.
#[derive(Debug, Deserialize)]
pub struct MealDbResponse {
    pub meals: Option<Vec<MealDbMeal>>,
}

/// A meal as MealDB sends it. The numbered ingredient and measure slots
/// stay in `slots` and are read by `extract_ingredients`.
#[derive(Debug, Clone, Deserialize)]
pub struct MealDbMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

impl MealDbMeal {
    fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).and_then(Value::as_str)
    }
}

/// Trimmed text, or `None` for missing, blank and literal `"null"` values.
fn meaningful(raw: Option<&str>) -> Option<&str> {
    let text = raw?.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(text)
    }
}

/// Collect the populated ingredient slots in order.
pub fn extract_ingredients(meal: &MealDbMeal) -> Vec<Ingredient> {
    (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|i| {
            let name = meaningful(meal.slot(&format!("strIngredient{i}")))?;
            let measure =
                meaningful(meal.slot(&format!("strMeasure{i}"))).unwrap_or(DEFAULT_MEASURE);
            Some(Ingredient::new(name, measure))
        })
        .collect()
}

/// Rough nutrition, price and time guesses. MealDB carries none of these,
/// so they scale with ingredient count plus a random spread.
pub fn estimate_calories(ingredient_count: usize, rng: &mut impl Rng) -> u32 {
    ingredient_count as u32 * 50 + rng.random_range(100..=300)
}

pub fn estimate_cost(ingredient_count: usize, rng: &mut impl Rng) -> f64 {
    ingredient_count as f64 * 1.5 + rng.random_range(2.0..=8.0)
}

pub fn estimate_cook_time(rng: &mut impl Rng) -> u32 {
    rng.random_range(15..=60)
}

/// Convert a wire meal into the app's `Meal`, filling in estimates.
pub fn convert(raw: MealDbMeal, rng: &mut impl Rng) -> Meal {
    let ingredients = extract_ingredients(&raw);
    let n = ingredients.len();

    let instructions = meaningful(raw.instructions.as_deref())
        .unwrap_or(DEFAULT_INSTRUCTIONS)
        .to_string();

    Meal {
        calories: estimate_calories(n, rng),
        estimated_cost: estimate_cost(n, rng),
        cook_time_minutes: estimate_cook_time(rng),
        image_url: meaningful(raw.thumbnail.as_deref()).map(str::to_string),
        category: meaningful(raw.category.as_deref()).map(str::to_string),
        area: meaningful(raw.area.as_deref()).map(str::to_string),
        is_favorite: false,
        ingredients,
        instructions,
        id: raw.id,
        name: raw.name,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(json: &str) -> MealDbMeal {
        serde_json::from_str(json).expect("fixture should parse")
    }

    const TERIYAKI: &str = r#"{
        "idMeal": "52772",
        "strMeal": "Teriyaki Chicken Casserole",
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strInstructions": "Preheat oven to 350.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "strIngredient1": "soy sauce",
        "strIngredient2": " water ",
        "strIngredient3": "brown sugar",
        "strIngredient4": "",
        "strIngredient5": null,
        "strIngredient6": "NULL",
        "strIngredient7": "chicken breasts",
        "strMeasure1": "3/4 cup",
        "strMeasure2": "1/2 cup",
        "strMeasure3": " ",
        "strMeasure4": "",
        "strMeasure5": null,
        "strMeasure6": "1 tsp",
        "strMeasure7": null
    }"#;

    #[test]
    fn extracts_populated_slots_in_order() {
        let ingredients = extract_ingredients(&parse(TERIYAKI));
        let names: Vec<&str> = ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["soy sauce", "water", "brown sugar", "chicken breasts"]
        );
        assert_eq!(ingredients[0].quantity_description, "3/4 cup");
        assert_eq!(ingredients[2].quantity_description, DEFAULT_MEASURE);
        assert_eq!(ingredients[3].quantity_description, DEFAULT_MEASURE);
        assert!(ingredients.iter().all(|i| !i.is_checked_for_grocery));
    }

    #[test]
    fn convert_copies_metadata() {
        let mut rng = StdRng::seed_from_u64(7);
        let meal = convert(parse(TERIYAKI), &mut rng);
        assert_eq!(meal.id, "52772");
        assert_eq!(meal.name, "Teriyaki Chicken Casserole");
        assert_eq!(meal.instructions, "Preheat oven to 350.");
        assert_eq!(meal.category.as_deref(), Some("Chicken"));
        assert_eq!(meal.area.as_deref(), Some("Japanese"));
        assert!(meal.image_url.as_deref().unwrap().ends_with(".jpg"));
        assert!(!meal.is_favorite);
        assert_eq!(meal.ingredients.len(), 4);
    }

    #[test]
    fn estimates_stay_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let meal = convert(parse(TERIYAKI), &mut rng);
            // 4 ingredients
            assert!((300..=500).contains(&meal.calories), "{}", meal.calories);
            assert!(
                (8.0..=14.0).contains(&meal.estimated_cost),
                "{}",
                meal.estimated_cost
            );
            assert!((15..=60).contains(&meal.cook_time_minutes));
        }
    }

    #[test]
    fn same_seed_gives_same_estimates() {
        let a = convert(parse(TERIYAKI), &mut StdRng::seed_from_u64(1));
        let b = convert(parse(TERIYAKI), &mut StdRng::seed_from_u64(1));
        assert_eq!(a.calories, b.calories);
        assert_eq!(a.estimated_cost, b.estimated_cost);
        assert_eq!(a.cook_time_minutes, b.cook_time_minutes);
    }

    #[test]
    fn missing_instructions_use_placeholder() {
        let raw = parse(r#"{"idMeal":"1","strMeal":"Toast","strInstructions":null}"#);
        let meal = convert(raw, &mut StdRng::seed_from_u64(3));
        assert_eq!(meal.instructions, DEFAULT_INSTRUCTIONS);
        assert!(meal.ingredients.is_empty());
        assert!((100..=300).contains(&meal.calories));
        assert!(meal.image_url.is_none());
        assert!(meal.category.is_none());
    }

    #[test]
    fn null_meals_envelope_parses_to_none() {
        let resp: MealDbResponse = serde_json::from_str(r#"{"meals":null}"#).unwrap();
        assert!(resp.meals.is_none());
    }
}
