// User preferences edited on the Profile tab.

use serde::{Deserialize, Serialize};

use super::meal::format_dollars;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub weekly_budget: f64,
    /// Daily calorie target.
    pub calorie_goal: u32,
    pub notifications_enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            weekly_budget: 50.0,
            calorie_goal: 2000,
            notifications_enabled: false,
        }
    }
}

impl UserSettings {
    pub fn weekly_budget_label(&self) -> String {
        format_dollars(self.weekly_budget)
    }

    pub fn calorie_goal_label(&self) -> String {
        format!("{} cal/day", self.calorie_goal)
    }

    /// Apply the raw text of the settings form.
    ///
    /// A field whose text does not parse keeps its previous value. A
    /// leading `$` on the budget is accepted. Negative or non-finite
    /// budgets count as unparseable.
    pub fn apply_form(&self, budget_text: &str, calorie_text: &str, notifications: bool) -> Self {
        let mut next = self.clone();

        if let Some(budget) = parse_budget(budget_text) {
            next.weekly_budget = budget;
        }
        if let Ok(goal) = calorie_text.trim().parse::<u32>() {
            next.calorie_goal = goal;
        }
        next.notifications_enabled = notifications;
        next
    }

    /// Budget as it appears in the editable form field ("50.00").
    pub fn budget_form_text(&self) -> String {
        format!("{:.2}", self.weekly_budget)
    }
}

fn parse_budget(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let value = trimmed.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
