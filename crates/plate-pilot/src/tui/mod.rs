// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the application state. The app
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::model::{grocery, meal, DayOfWeek, GroceryItem, Meal, PlannerDay, UserSettings};
use crate::model::WeekSummary;
use crate::protocol::{AppSnapshot, TabId, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// State of the Home feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// A destructive action waiting for y/n.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Quit,
    ClearPlanner,
    ClearAllGroceries,
    ResetAllData,
}

impl ConfirmAction {
    pub fn title(self) -> &'static str {
        match self {
            ConfirmAction::Quit => "Quit?",
            ConfirmAction::ClearPlanner => "Clear Planner",
            ConfirmAction::ClearAllGroceries => "Clear All Items",
            ConfirmAction::ResetAllData => "Clear All Data",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            ConfirmAction::Quit => "Really quit?",
            ConfirmAction::ClearPlanner => "Remove every planned meal?",
            ConfirmAction::ClearAllGroceries => "Remove every grocery item?",
            ConfirmAction::ResetAllData => "Delete favorites, plan, list and settings?",
        }
    }

    /// Command sent once the user confirms.
    pub fn command(self) -> UserCommand {
        match self {
            ConfirmAction::Quit => UserCommand::Quit,
            ConfirmAction::ClearPlanner => UserCommand::ClearPlanner,
            ConfirmAction::ClearAllGroceries => UserCommand::ClearAllGroceries,
            ConfirmAction::ResetAllData => UserCommand::ResetAllData,
        }
    }
}

/// Rows of the Profile form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    WeeklyBudget,
    CalorieGoal,
    Notifications,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [
        ProfileField::WeeklyBudget,
        ProfileField::CalorieGoal,
        ProfileField::Notifications,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::WeeklyBudget => "Weekly Budget ($)",
            ProfileField::CalorieGoal => "Daily Calorie Goal",
            ProfileField::Notifications => "Enable Notifications",
        }
    }
}

/// Editable copy of the settings shown on the Profile tab.
///
/// Text fields hold whatever the user typed; parsing happens when the form
/// is saved. While `dirty`, snapshots do not overwrite the form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub focus: usize,
    pub editing: bool,
    pub dirty: bool,
    pub budget_text: String,
    pub calorie_text: String,
    pub notifications: bool,
}

impl ProfileForm {
    pub fn from_settings(settings: &UserSettings) -> Self {
        ProfileForm {
            focus: 0,
            editing: false,
            dirty: false,
            budget_text: settings.budget_form_text(),
            calorie_text: settings.calorie_goal.to_string(),
            notifications: settings.notifications_enabled,
        }
    }

    pub fn focused_field(&self) -> ProfileField {
        ProfileField::ALL[self.focus.min(ProfileField::ALL.len() - 1)]
    }

    pub fn save_command(&self) -> UserCommand {
        UserCommand::SaveSettings {
            budget: self.budget_text.clone(),
            calorie_goal: self.calorie_text.clone(),
            notifications: self.notifications,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator.
/// The `render_frame` function reads this struct to draw the screen.
pub struct ViewState {
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Meals shown on Home, from the latest search or random load.
    pub feed: Vec<Meal>,
    pub feed_status: FeedStatus,
    /// Query of the current feed; `None` for the random feed.
    pub feed_query: Option<String>,

    pub favorites: Vec<Meal>,
    /// Sorted Monday first.
    pub planner_days: Vec<PlannerDay>,
    pub grocery_items: Vec<GroceryItem>,
    pub settings: UserSettings,
    pub week_summary: WeekSummary,

    /// Selected row per tab.
    pub selected: HashMap<TabId, usize>,
    /// Meal open in the detail overlay.
    pub detail: Option<Meal>,
    pub detail_scroll: u16,
    /// Highlighted day while the day picker is open.
    pub day_picker: Option<usize>,
    /// Pending destructive action awaiting confirmation.
    pub confirm: Option<ConfirmAction>,
    /// Whether the search input is capturing keys.
    pub search_mode: bool,
    pub search_text: String,
    pub profile: ProfileForm,
    /// Last notice from the app, shown in the help bar until the next key.
    pub notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        let settings = UserSettings::default();
        ViewState {
            active_tab: TabId::Home,
            feed: Vec::new(),
            feed_status: FeedStatus::Idle,
            feed_query: None,
            favorites: Vec::new(),
            planner_days: Vec::new(),
            grocery_items: Vec::new(),
            week_summary: WeekSummary::compute(&[], &settings),
            profile: ProfileForm::from_settings(&settings),
            settings,
            selected: HashMap::new(),
            detail: None,
            detail_scroll: 0,
            day_picker: None,
            confirm: None,
            search_mode: false,
            search_text: String::new(),
            notice: None,
        }
    }
}

impl ViewState {
    /// Apply a full state snapshot from the app orchestrator.
    ///
    /// Feed and detail favorite flags are re-derived from the new
    /// favorites. The profile form is only reset when it has no unsaved
    /// edits.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.favorites = snapshot.favorites;
        self.planner_days = snapshot.planner_days;
        self.grocery_items = snapshot.grocery_items;
        self.week_summary = snapshot.week_summary;
        self.settings = snapshot.settings;

        meal::mark_favorites(&mut self.feed, &self.favorites);
        if let Some(detail) = self.detail.as_mut() {
            meal::mark_favorites(std::slice::from_mut(detail), &self.favorites);
        }
        if !self.profile.dirty {
            let focus = self.profile.focus;
            self.profile = ProfileForm::from_settings(&self.settings);
            self.profile.focus = focus;
        }
        self.clamp_selections();
    }

    pub fn selected_index(&self, tab: TabId) -> usize {
        self.selected.get(&tab).copied().unwrap_or(0)
    }

    /// Number of selectable rows on `tab`.
    pub fn row_count(&self, tab: TabId) -> usize {
        match tab {
            TabId::Home => self.feed.len(),
            TabId::Favorites => self.favorites.len(),
            TabId::Planner => self.planner_days.iter().map(|d| d.meals.len()).sum(),
            TabId::Grocery => self.grocery_items.len(),
            TabId::Profile => ProfileField::ALL.len(),
        }
    }

    /// Planned meals in display order with their day and index in that day.
    pub fn planner_rows(&self) -> Vec<(DayOfWeek, usize, &Meal)> {
        self.planner_days
            .iter()
            .flat_map(|d| {
                d.meals
                    .iter()
                    .enumerate()
                    .map(move |(i, m)| (d.day_of_week, i, m))
            })
            .collect()
    }

    /// Grocery items in display order (grouped by category).
    pub fn grocery_rows(&self) -> Vec<&GroceryItem> {
        grocery::grouped(&self.grocery_items)
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect()
    }

    /// Meal under the cursor on a meal-listing tab.
    pub fn selected_meal(&self) -> Option<&Meal> {
        let idx = self.selected_index(self.active_tab);
        match self.active_tab {
            TabId::Home => self.feed.get(idx),
            TabId::Favorites => self.favorites.get(idx),
            TabId::Planner => self.planner_rows().get(idx).map(|(_, _, m)| *m),
            TabId::Grocery | TabId::Profile => None,
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let tab = self.active_tab;
        let count = self.row_count(tab);
        if count == 0 {
            self.selected.insert(tab, 0);
            return;
        }
        let current = self.selected_index(tab) as isize;
        let next = (current + delta).clamp(0, count as isize - 1) as usize;
        self.selected.insert(tab, next);
        if tab == TabId::Profile {
            self.profile.focus = next;
        }
    }

    fn clamp_selections(&mut self) {
        for tab in TabId::ALL {
            let count = self.row_count(tab);
            if let Some(sel) = self.selected.get_mut(&tab) {
                *sel = (*sel).min(count.saturating_sub(1));
            }
        }
    }

    pub fn open_detail(&mut self, meal: Meal) {
        self.detail = Some(meal);
        self.detail_scroll = 0;
        self.day_picker = None;
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
        self.day_picker = None;
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::FeedLoading { query } => {
            state.feed_status = FeedStatus::Loading;
            state.feed_query = query;
        }
        UiUpdate::FeedLoaded(meals) => {
            state.feed = meals;
            state.feed_status = FeedStatus::Loaded;
            state.selected.insert(TabId::Home, 0);
        }
        UiUpdate::FeedError(message) => {
            state.feed.clear();
            state.feed_status = FeedStatus::Error(message);
            state.selected.insert(TabId::Home, 0);
        }
        UiUpdate::Notice(text) => {
            state.notice = Some(text);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: status bar, active tab, help bar, and any
/// overlays on top.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);

    match state.active_tab {
        TabId::Home => widgets::home::render(frame, layout.main_panel, state),
        TabId::Favorites => widgets::favorites::render(frame, layout.main_panel, state),
        TabId::Planner => widgets::planner::render(frame, layout.main_panel, state),
        TabId::Grocery => widgets::grocery::render(frame, layout.main_panel, state),
        TabId::Profile => widgets::profile::render(frame, layout.main_panel, state),
    }

    widgets::help_bar::render(frame, layout.help_bar, state);

    if let Some(meal) = &state.detail {
        widgets::meal_detail::render(frame, layout.main_panel, meal, state.detail_scroll);
        if let Some(day_idx) = state.day_picker {
            widgets::day_picker::render(frame, frame.area(), day_idx);
        }
    }

    if let Some(action) = state.confirm {
        widgets::confirm::render(frame, frame.area(), action);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Create ViewState
    let mut view_state = ViewState::default();

    // 4. Create crossterm EventStream for async keyboard input
    let mut event_stream = EventStream::new();

    // 5. Create render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 6. Main loop
    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break,
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    // Mouse and resize events need no handling; resize is
                    // picked up on the next draw.
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    // 7. Restore terminal
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;
    use chrono::Utc;

    fn meal(id: &str) -> Meal {
        let mut m = Meal::new(id, format!("Meal {id}"), "Cook.", vec![Ingredient::new("Rice", "1 cup")]);
        m.calories = 400;
        m.estimated_cost = 6.0;
        m.cook_time_minutes = 20;
        m
    }

    fn snapshot_with(favorites: Vec<Meal>, planner_days: Vec<PlannerDay>) -> AppSnapshot {
        let settings = UserSettings::default();
        AppSnapshot {
            week_summary: WeekSummary::compute(&planner_days, &settings),
            favorites,
            planner_days,
            grocery_items: vec![
                GroceryItem::new("Rice", "1 cup"),
                GroceryItem::new("Salmon", "2"),
            ],
            settings,
        }
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, TabId::Home);
        assert_eq!(state.feed_status, FeedStatus::Idle);
        assert!(state.feed.is_empty());
        assert!(state.detail.is_none());
        assert!(state.confirm.is_none());
        assert!(!state.search_mode);
        assert_eq!(state.profile.budget_text, "50.00");
        assert_eq!(state.profile.calorie_text, "2000");
    }

    #[test]
    fn feed_updates_move_through_states() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::FeedLoading {
                query: Some("pasta".into()),
            },
        );
        assert_eq!(state.feed_status, FeedStatus::Loading);
        assert_eq!(state.feed_query.as_deref(), Some("pasta"));

        state.selected.insert(TabId::Home, 5);
        apply_ui_update(&mut state, UiUpdate::FeedLoaded(vec![meal("1"), meal("2")]));
        assert_eq!(state.feed_status, FeedStatus::Loaded);
        assert_eq!(state.feed.len(), 2);
        assert_eq!(state.selected_index(TabId::Home), 0);

        apply_ui_update(&mut state, UiUpdate::FeedError("No data received".into()));
        assert_eq!(state.feed_status, FeedStatus::Error("No data received".into()));
        assert!(state.feed.is_empty());
    }

    #[test]
    fn snapshot_marks_feed_and_detail_favorites() {
        let mut state = ViewState::default();
        state.feed = vec![meal("1"), meal("2")];
        state.open_detail(meal("2"));

        let mut fav = meal("2");
        fav.is_favorite = true;
        state.apply_snapshot(snapshot_with(vec![fav], vec![]));

        assert!(!state.feed[0].is_favorite);
        assert!(state.feed[1].is_favorite);
        assert!(state.detail.as_ref().unwrap().is_favorite);
    }

    #[test]
    fn snapshot_clamps_selection() {
        let mut state = ViewState::default();
        state.selected.insert(TabId::Favorites, 9);
        state.apply_snapshot(snapshot_with(vec![meal("1"), meal("2")], vec![]));
        assert_eq!(state.selected_index(TabId::Favorites), 1);

        state.apply_snapshot(snapshot_with(vec![], vec![]));
        assert_eq!(state.selected_index(TabId::Favorites), 0);
    }

    #[test]
    fn snapshot_keeps_dirty_profile_form() {
        let mut state = ViewState::default();
        state.profile.budget_text = "99".into();
        state.profile.dirty = true;
        state.apply_snapshot(snapshot_with(vec![], vec![]));
        assert_eq!(state.profile.budget_text, "99");

        state.profile.dirty = false;
        state.apply_snapshot(snapshot_with(vec![], vec![]));
        assert_eq!(state.profile.budget_text, "50.00");
    }

    #[test]
    fn planner_rows_flatten_days_in_order() {
        let mut state = ViewState::default();
        let days = vec![
            PlannerDay::new(Utc::now(), DayOfWeek::Monday, vec![meal("1"), meal("2")]),
            PlannerDay::new(Utc::now(), DayOfWeek::Friday, vec![meal("3")]),
        ];
        state.apply_snapshot(snapshot_with(vec![], days));

        let rows: Vec<(DayOfWeek, usize, String)> = state
            .planner_rows()
            .into_iter()
            .map(|(d, i, m)| (d, i, m.id.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (DayOfWeek::Monday, 0, "1".to_string()),
                (DayOfWeek::Monday, 1, "2".to_string()),
                (DayOfWeek::Friday, 0, "3".to_string()),
            ]
        );
        assert_eq!(state.row_count(TabId::Planner), 3);

        state.active_tab = TabId::Planner;
        state.selected.insert(TabId::Planner, 2);
        assert_eq!(state.selected_meal().unwrap().id, "3");
    }

    #[test]
    fn grocery_rows_follow_category_order() {
        let mut state = ViewState::default();
        state.apply_snapshot(snapshot_with(vec![], vec![]));
        let names: Vec<&str> = state.grocery_rows().iter().map(|i| i.name.as_str()).collect();
        // Seafood is listed before Pantry.
        assert_eq!(names, vec!["Salmon", "Rice"]);
    }

    #[test]
    fn move_selection_clamps_to_bounds() {
        let mut state = ViewState::default();
        state.feed = vec![meal("1"), meal("2"), meal("3")];
        state.move_selection(-1);
        assert_eq!(state.selected_index(TabId::Home), 0);
        state.move_selection(5);
        assert_eq!(state.selected_index(TabId::Home), 2);
    }

    #[test]
    fn confirm_actions_map_to_commands() {
        assert_eq!(ConfirmAction::Quit.command(), UserCommand::Quit);
        assert_eq!(ConfirmAction::ClearPlanner.command(), UserCommand::ClearPlanner);
        assert_eq!(
            ConfirmAction::ClearAllGroceries.command(),
            UserCommand::ClearAllGroceries
        );
        assert_eq!(ConfirmAction::ResetAllData.command(), UserCommand::ResetAllData);
    }

    #[test]
    fn notice_update_sets_notice() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Notice("Meal added to Monday".into()));
        assert_eq!(state.notice.as_deref(), Some("Meal added to Monday"));
    }

    #[test]
    fn render_frame_every_tab_and_overlay() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.feed = vec![meal("1")];
        state.apply_snapshot(snapshot_with(
            vec![meal("1")],
            vec![PlannerDay::new(Utc::now(), DayOfWeek::Monday, vec![meal("1")])],
        ));

        for tab in TabId::ALL {
            state.active_tab = tab;
            terminal.draw(|frame| render_frame(frame, &state)).unwrap();
        }

        state.open_detail(meal("1"));
        state.day_picker = Some(3);
        state.confirm = Some(ConfirmAction::ResetAllData);
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }

    #[test]
    fn render_frame_tiny_terminal_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(10, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.open_detail(meal("1"));
        state.day_picker = Some(0);
        state.confirm = Some(ConfirmAction::Quit);
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
