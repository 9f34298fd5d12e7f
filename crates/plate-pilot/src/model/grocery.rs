// Grocery list items and the operations behind the Grocery tab.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal::Ingredient;

// ---------------------------------------------------------------------------
// GroceryCategory
// ---------------------------------------------------------------------------

/// Store section an item is shelved under. Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroceryCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Pantry,
    Spices,
    Bakery,
    Frozen,
    Other,
}

impl GroceryCategory {
    pub const ALL: [GroceryCategory; 9] = [
        GroceryCategory::Produce,
        GroceryCategory::Dairy,
        GroceryCategory::Meat,
        GroceryCategory::Seafood,
        GroceryCategory::Pantry,
        GroceryCategory::Spices,
        GroceryCategory::Bakery,
        GroceryCategory::Frozen,
        GroceryCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroceryCategory::Produce => "Produce",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::Meat => "Meat",
            GroceryCategory::Seafood => "Seafood",
            GroceryCategory::Pantry => "Pantry",
            GroceryCategory::Spices => "Spices",
            GroceryCategory::Bakery => "Bakery",
            GroceryCategory::Frozen => "Frozen",
            GroceryCategory::Other => "Other",
        }
    }

    /// Parse a stored category label; unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label.trim()))
            .unwrap_or(GroceryCategory::Other)
    }
}

// The longest keyword contained in the ingredient name decides the shelf,
// so "eggplant" beats "egg" and "peanut butter" beats "butter". Equal
// lengths go to the table listed first in `categorize`.
const FROZEN: &[&str] = &["frozen", "ice cream"];
const SPICES: &[&str] = &[
    "powder", "paprika", "cumin", "turmeric", "cinnamon", "nutmeg", "oregano", "pepper flakes",
    "chilli flakes", "chili flakes", "garam masala", "allspice", "cloves", "cardamom", "saffron",
    "bay leaf", "bay leaves", "salt", "black pepper", "seasoning", "star anise", "fennel seeds",
    "coriander seeds", "mustard seeds",
];
const SEAFOOD: &[&str] = &[
    "salmon", "tuna", "cod", "prawn", "shrimp", "mussel", "clam", "crab", "lobster", "squid",
    "anchov", "haddock", "mackerel", "sardine", "fish", "scallop", "oyster",
];
const MEAT: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "bacon", "sausage", "ham", "turkey", "mince", "steak",
    "chorizo", "duck", "veal", "goat", "prosciutto", "pancetta",
];
const DAIRY: &[&str] = &[
    "milk", "cream", "butter", "cheese", "yogurt", "yoghurt", "egg", "parmesan", "mozzarella",
    "cheddar", "feta", "ricotta", "mascarpone", "creme fraiche", "ghee",
];
const BAKERY: &[&str] = &[
    "bread", "bun", "roll", "baguette", "tortilla", "pita", "naan", "croissant", "brioche",
];
const PRODUCE: &[&str] = &[
    "onion", "garlic", "tomato", "potato", "carrot", "celery", "pepper", "lettuce", "spinach",
    "kale", "cabbage", "broccoli", "cauliflower", "mushroom", "courgette", "zucchini",
    "aubergine", "eggplant", "cucumber", "avocado", "lemon", "lime", "orange", "apple", "banana",
    "berry", "berries", "ginger", "chilli", "chili", "parsley", "coriander", "cilantro", "basil",
    "mint", "thyme", "rosemary", "leek", "shallot", "scallion", "spring onion", "peas", "beans",
    "corn", "squash", "pumpkin", "beetroot", "asparagus", "mango", "pineapple",
];
const PANTRY: &[&str] = &[
    "flour", "sugar", "rice", "pasta", "noodle", "oil", "vinegar", "sauce", "stock", "honey",
    "syrup", "oats", "lentil", "chickpea", "tinned", "canned", "paste", "mustard", "yeast",
    "baking soda", "cocoa", "chocolate", "nuts", "almond", "peanut", "cornstarch", "cornflour",
    "spaghetti", "macaroni", "couscous", "quinoa", "breadcrumb", "ketchup", "mayonnaise",
    "water", "peanut butter", "chicken stock", "beef stock", "vegetable stock", "fish stock",
    "lamb stock", "oyster sauce", "tomato paste", "tomato puree",
];

/// Shelve an ingredient by name using keyword tables.
pub fn categorize(ingredient_name: &str) -> GroceryCategory {
    let normalized = ingredient_name.trim().to_lowercase();
    let tables: [(&[&str], GroceryCategory); 8] = [
        (FROZEN, GroceryCategory::Frozen),
        (SPICES, GroceryCategory::Spices),
        (SEAFOOD, GroceryCategory::Seafood),
        (MEAT, GroceryCategory::Meat),
        (PRODUCE, GroceryCategory::Produce),
        (DAIRY, GroceryCategory::Dairy),
        (BAKERY, GroceryCategory::Bakery),
        (PANTRY, GroceryCategory::Pantry),
    ];
    let mut best: Option<(usize, GroceryCategory)> = None;
    for (keywords, category) in tables {
        for keyword in keywords.iter().filter(|k| normalized.contains(**k)) {
            if best.map_or(true, |(len, _)| keyword.len() > len) {
                best = Some((keyword.len(), category));
            }
        }
    }
    best.map_or(GroceryCategory::Other, |(_, category)| category)
}

// ---------------------------------------------------------------------------
// GroceryItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: String,
    pub category: String,
    #[serde(default)]
    pub is_purchased: bool,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        let name = name.into();
        let category = categorize(&name).as_str().to_string();
        GroceryItem {
            id: Uuid::new_v4(),
            name,
            quantity: quantity.into(),
            category,
            is_purchased: false,
        }
    }

    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self::new(
            ingredient.name.clone(),
            ingredient.quantity_description.clone(),
        )
    }

    pub fn category(&self) -> GroceryCategory {
        GroceryCategory::from_label(&self.category)
    }
}

// ---------------------------------------------------------------------------
// Collection operations
// ---------------------------------------------------------------------------

/// Append one item per ingredient whose name is not already on the list.
///
/// Names compare case-insensitively, both against existing items and
/// within the batch. The first quantity seen wins. Returns how many items
/// were added.
pub fn add_ingredients<'a>(
    items: &mut Vec<GroceryItem>,
    ingredients: impl IntoIterator<Item = &'a Ingredient>,
) -> usize {
    let mut added = 0;
    for ingredient in ingredients {
        let key = ingredient.name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if items.iter().any(|i| i.name.trim().to_lowercase() == key) {
            continue;
        }
        items.push(GroceryItem::from_ingredient(ingredient));
        added += 1;
    }
    added
}

/// Flip the purchased flag of the item with `id`. Returns false if absent.
pub fn toggle_purchased(items: &mut [GroceryItem], id: Uuid) -> bool {
    match items.iter_mut().find(|i| i.id == id) {
        Some(item) => {
            item.is_purchased = !item.is_purchased;
            true
        }
        None => false,
    }
}

/// Remove the item with `id`. Returns false if absent.
pub fn remove(items: &mut Vec<GroceryItem>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|i| i.id != id);
    items.len() != before
}

/// Drop every purchased item. Returns how many were removed.
pub fn clear_completed(items: &mut Vec<GroceryItem>) -> usize {
    let before = items.len();
    items.retain(|i| !i.is_purchased);
    before - items.len()
}

/// Items grouped by category in display order, stored order within a group.
/// Empty categories are omitted.
pub fn grouped(items: &[GroceryItem]) -> Vec<(GroceryCategory, Vec<&GroceryItem>)> {
    GroceryCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&GroceryItem> =
                items.iter().filter(|i| i.category() == category).collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}

/// (purchased, total) counts for the list header.
pub fn progress(items: &[GroceryItem]) -> (usize, usize) {
    let done = items.iter().filter(|i| i.is_purchased).count();
    (done, items.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_common_ingredients() {
        assert_eq!(categorize("Chicken Breast"), GroceryCategory::Meat);
        assert_eq!(categorize("salmon"), GroceryCategory::Seafood);
        assert_eq!(categorize("Onion"), GroceryCategory::Produce);
        assert_eq!(categorize("Garlic Powder"), GroceryCategory::Spices);
        assert_eq!(categorize("Frozen Peas"), GroceryCategory::Frozen);
        assert_eq!(categorize("Plain Flour"), GroceryCategory::Pantry);
        assert_eq!(categorize("Cheddar Cheese"), GroceryCategory::Dairy);
        assert_eq!(categorize("Baguette"), GroceryCategory::Bakery);
        assert_eq!(categorize("Eggplant"), GroceryCategory::Produce);
        assert_eq!(categorize("Eggs"), GroceryCategory::Dairy);
        assert_eq!(categorize("  "), GroceryCategory::Other);
        assert_eq!(categorize("Xanthan"), GroceryCategory::Other);
    }

    #[test]
    fn categorize_prefers_longest_keyword() {
        assert_eq!(categorize("Cornstarch"), GroceryCategory::Pantry);
        assert_eq!(categorize("Cornflour"), GroceryCategory::Pantry);
        assert_eq!(categorize("Breadcrumbs"), GroceryCategory::Pantry);
        assert_eq!(categorize("Peanut Butter"), GroceryCategory::Pantry);
        assert_eq!(categorize("Goats Cheese"), GroceryCategory::Dairy);
        assert_eq!(categorize("Chicken Stock"), GroceryCategory::Pantry);
        assert_eq!(categorize("Salted Butter"), GroceryCategory::Dairy);
        assert_eq!(categorize("Black Pepper"), GroceryCategory::Spices);
        assert_eq!(categorize("Sweetcorn"), GroceryCategory::Produce);
    }

    #[test]
    fn category_label_round_trip_and_unknown() {
        for c in GroceryCategory::ALL {
            assert_eq!(GroceryCategory::from_label(c.as_str()), c);
        }
        assert_eq!(GroceryCategory::from_label("produce"), GroceryCategory::Produce);
        assert_eq!(GroceryCategory::from_label("Household"), GroceryCategory::Other);
    }

    #[test]
    fn add_ingredients_skips_existing_names_case_insensitively() {
        let mut items = vec![GroceryItem::new("Onion", "1")];
        let ingredients = vec![
            Ingredient::new("onion", "2"),
            Ingredient::new("Garlic", "3 cloves"),
            Ingredient::new("GARLIC", "1 clove"),
            Ingredient::new("", "nothing"),
        ];
        let added = add_ingredients(&mut items, &ingredients);
        assert_eq!(added, 1);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, "1");
        assert_eq!(items[1].name, "Garlic");
        assert_eq!(items[1].quantity, "3 cloves");
        assert_eq!(items[1].category, "Produce");
        assert!(!items[1].is_purchased);
    }

    #[test]
    fn toggle_and_remove_by_id() {
        let mut items = vec![GroceryItem::new("Milk", "1L"), GroceryItem::new("Rice", "500g")];
        let milk = items[0].id;
        assert!(toggle_purchased(&mut items, milk));
        assert!(items[0].is_purchased);
        assert!(toggle_purchased(&mut items, milk));
        assert!(!items[0].is_purchased);

        assert!(!toggle_purchased(&mut items, Uuid::new_v4()));
        assert!(remove(&mut items, milk));
        assert!(!remove(&mut items, milk));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn clear_completed_keeps_unpurchased() {
        let mut items = vec![
            GroceryItem::new("Milk", "1L"),
            GroceryItem::new("Rice", "500g"),
            GroceryItem::new("Eggs", "6"),
        ];
        items[0].is_purchased = true;
        items[2].is_purchased = true;
        assert_eq!(progress(&items), (2, 3));
        assert_eq!(clear_completed(&mut items), 2);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Rice");
        assert_eq!(clear_completed(&mut items), 0);
    }

    #[test]
    fn grouped_follows_category_order_and_omits_empty() {
        let items = vec![
            GroceryItem::new("Rice", "500g"),
            GroceryItem::new("Onion", "1"),
            GroceryItem::new("Beef", "400g"),
            GroceryItem::new("Carrot", "2"),
            GroceryItem::new("Milk", "1L"),
        ];
        let groups = grouped(&items);
        let cats: Vec<GroceryCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            cats,
            vec![
                GroceryCategory::Produce,
                GroceryCategory::Dairy,
                GroceryCategory::Meat,
                GroceryCategory::Pantry
            ]
        );
        let produce: Vec<&str> = groups[0].1.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(produce, vec!["Onion", "Carrot"]);
    }
}
