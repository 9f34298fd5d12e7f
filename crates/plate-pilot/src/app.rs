// Application state and orchestration logic.
//
// The central event loop that applies user commands to the persisted
// collections, runs MealDB requests on background tasks, and pushes UI
// updates to the TUI render loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::mealdb::MealDbClient;
use crate::model::{grocery, meal, planner};
use crate::model::{GroceryItem, Meal, PlannerDay, UserSettings, WeekSummary};
use crate::protocol::{ApiEvent, AppSnapshot, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
///
/// The four collections are cached here and written back to the database
/// whole after every change.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    api: Arc<MealDbClient>,
    /// Cloned into every spawned request task.
    api_tx: mpsc::Sender<ApiEvent>,

    /// Incremented for every feed load. Feed results tagged with an older
    /// generation are discarded in `handle_api_event`.
    pub feed_generation: u64,
    current_fetch: Option<JoinHandle<()>>,

    pub favorites: Vec<Meal>,
    pub planner_days: Vec<PlannerDay>,
    pub grocery_items: Vec<GroceryItem>,
    pub settings: UserSettings,
}

impl AppState {
    /// Build the state, loading every collection from `db`.
    pub fn new(
        config: Config,
        db: Database,
        api: MealDbClient,
        api_tx: mpsc::Sender<ApiEvent>,
    ) -> Result<Self> {
        let favorites = db.load_favorites().context("failed to load favorites")?;
        let planner_days = db
            .load_planner_days()
            .context("failed to load planner")?;
        let grocery_items = db
            .load_grocery_items()
            .context("failed to load grocery list")?;
        let settings = db
            .load_user_settings()
            .context("failed to load settings")?;

        info!(
            "Loaded {} favorites, {} planner days, {} grocery items",
            favorites.len(),
            planner_days.len(),
            grocery_items.len()
        );

        Ok(Self {
            config,
            db,
            api: Arc::new(api),
            api_tx,
            feed_generation: 0,
            current_fetch: None,
            favorites,
            planner_days,
            grocery_items,
            settings,
        })
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            favorites: self.favorites.clone(),
            planner_days: planner::sorted(self.planner_days.clone()),
            grocery_items: self.grocery_items.clone(),
            settings: self.settings.clone(),
            week_summary: WeekSummary::compute(&self.planner_days, &self.settings),
        }
    }

    /// Abort the in-flight feed request, if any.
    pub fn cancel_feed_task(&mut self) {
        if let Some(handle) = self.current_fetch.take() {
            handle.abort();
            debug!("Cancelled previous feed request");
        }
    }

    /// Start loading the Home feed: a search when `query` is set, random
    /// meals otherwise. Supersedes any load already running. Returns the
    /// generation of the new load.
    pub fn start_feed_load(&mut self, query: Option<String>) -> u64 {
        self.cancel_feed_task();
        self.feed_generation += 1;
        let generation = self.feed_generation;

        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        let count = self.config.feed.random_meal_count;

        info!("Loading feed (query: {:?}, gen: {})", query, generation);

        let handle = tokio::spawn(async move {
            let result = match &query {
                Some(q) => api.search_meals(q).await,
                None => api.fetch_random_meals(count).await,
            };
            let event = match result {
                Ok(meals) => ApiEvent::FeedLoaded { meals, generation },
                Err(e) => ApiEvent::FeedFailed {
                    message: e.to_string(),
                    generation,
                },
            };
            let _ = tx.send(event).await;
        });
        self.current_fetch = Some(handle);
        generation
    }

    /// Look up a favorite again in the background.
    pub fn start_favorite_refresh(&self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        info!("Refreshing favorite {}", id);
        tokio::spawn(async move {
            let result = api.lookup_meal(&id).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::FavoriteRefreshed { id, result }).await;
        });
    }

    /// Apply a command that edits the persisted collections.
    ///
    /// Returns the notice to show, if any. An error means the in-memory
    /// change happened but could not be written to the database, except for
    /// `ResetAllData`, which leaves memory untouched when the clear fails.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Result<Option<String>> {
        match cmd {
            UserCommand::ToggleFavorite(mut meal) => {
                let notice = match self.favorites.iter().position(|f| f.id == meal.id) {
                    Some(pos) => {
                        let removed = self.favorites.remove(pos);
                        format!("Removed {} from favorites", removed.name)
                    }
                    None => {
                        meal.is_favorite = true;
                        let notice = format!("Added {} to favorites", meal.name);
                        self.favorites.push(meal);
                        notice
                    }
                };
                self.db.save_favorites(&self.favorites)?;
                Ok(Some(notice))
            }
            UserCommand::AddToPlanner { meal, day } => {
                info!("Planning {} for {}", meal.name, day.label());
                planner::add_meal(&mut self.planner_days, meal, day, Utc::now());
                self.db.save_planner_days(&self.planner_days)?;
                Ok(Some(format!("Meal added to {}", day.label())))
            }
            UserCommand::AddToGrocery(meal) => {
                let added = grocery::add_ingredients(&mut self.grocery_items, &meal.ingredients);
                debug!("Added {} grocery items from {}", added, meal.name);
                self.db.save_grocery_items(&self.grocery_items)?;
                Ok(Some("Ingredients added to grocery list".to_string()))
            }
            UserCommand::AddPlanToGrocery => {
                if planner::is_empty_plan(&self.planner_days) {
                    return Ok(Some("No meals planned yet".to_string()));
                }
                let added = grocery::add_ingredients(
                    &mut self.grocery_items,
                    planner::planned_meals(&self.planner_days).flat_map(|m| m.ingredients.iter()),
                );
                self.db.save_grocery_items(&self.grocery_items)?;
                Ok(Some(format!("Added {added} items to grocery list")))
            }
            UserCommand::RemovePlannedMeal { day, index } => {
                match planner::remove_meal(&mut self.planner_days, day, index) {
                    Some(removed) => {
                        debug!("Removed {} from {}", removed.name, day.label());
                        self.db.save_planner_days(&self.planner_days)?;
                    }
                    None => warn!("No planned meal {} on {}", index, day.label()),
                }
                Ok(None)
            }
            UserCommand::ClearPlanner => {
                self.planner_days.clear();
                self.db.save_planner_days(&self.planner_days)?;
                Ok(Some("Meal plan cleared".to_string()))
            }
            UserCommand::ToggleGroceryItem(id) => {
                if grocery::toggle_purchased(&mut self.grocery_items, id) {
                    self.db.save_grocery_items(&self.grocery_items)?;
                } else {
                    warn!("Grocery item {} not found", id);
                }
                Ok(None)
            }
            UserCommand::RemoveGroceryItem(id) => {
                if grocery::remove(&mut self.grocery_items, id) {
                    self.db.save_grocery_items(&self.grocery_items)?;
                } else {
                    warn!("Grocery item {} not found", id);
                }
                Ok(None)
            }
            UserCommand::ClearCompletedGroceries => {
                let removed = grocery::clear_completed(&mut self.grocery_items);
                self.db.save_grocery_items(&self.grocery_items)?;
                Ok(Some(format!("Removed {removed} purchased items")))
            }
            UserCommand::ClearAllGroceries => {
                self.grocery_items.clear();
                self.db.save_grocery_items(&self.grocery_items)?;
                Ok(Some("Grocery list cleared".to_string()))
            }
            UserCommand::SaveSettings {
                budget,
                calorie_goal,
                notifications,
            } => {
                self.settings = self
                    .settings
                    .apply_form(&budget, &calorie_goal, notifications);
                info!("Settings updated: {:?}", self.settings);
                self.db.save_user_settings(&self.settings)?;
                Ok(Some("Settings saved successfully!".to_string()))
            }
            UserCommand::ResetAllData => {
                self.db.clear_all()?;
                self.favorites.clear();
                self.planner_days.clear();
                self.grocery_items.clear();
                self.settings = UserSettings::default();
                info!("All user data cleared");
                Ok(Some("All data cleared".to_string()))
            }
            UserCommand::LoadRandom
            | UserCommand::Search(_)
            | UserCommand::RefreshFavorite(_)
            | UserCommand::Quit => {
                debug!("apply_command ignoring non-collection command {:?}", cmd);
                Ok(None)
            }
        }
    }

    /// Replace the recipe details of a stored favorite with `fresh`,
    /// keeping the estimates it was saved with. Returns false if `id` is
    /// no longer a favorite.
    fn refresh_favorite(&mut self, id: &str, fresh: Meal) -> Result<bool> {
        let Some(fav) = self.favorites.iter_mut().find(|f| f.id == id) else {
            return Ok(false);
        };
        fav.name = fresh.name;
        fav.instructions = fresh.instructions;
        fav.ingredients = fresh.ingredients;
        fav.image_url = fresh.image_url;
        fav.category = fresh.category;
        fav.area = fresh.area;
        self.db.save_favorites(&self.favorites)?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. Results of background MealDB requests
/// 2. User commands from the TUI
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut api_rx: mpsc::Receiver<ApiEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    // `state` holds a sender, so this only closes if every sender is
    // dropped; stop polling then instead of spinning on `None`.
    let mut api_open = true;

    loop {
        tokio::select! {
            api_event = api_rx.recv(), if api_open => {
                match api_event {
                    Some(event) => handle_api_event(&mut state, event, &ui_tx).await,
                    None => {
                        info!("API event channel closed");
                        api_open = false;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    state.cancel_feed_task();
    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;
}

/// Handle a command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::LoadRandom => {
            state.start_feed_load(None);
            let _ = ui_tx.send(UiUpdate::FeedLoading { query: None }).await;
        }
        UserCommand::Search(query) => {
            let trimmed = query.trim();
            let query = (!trimmed.is_empty()).then(|| trimmed.to_string());
            state.start_feed_load(query.clone());
            let _ = ui_tx.send(UiUpdate::FeedLoading { query }).await;
        }
        UserCommand::RefreshFavorite(id) => {
            state.start_favorite_refresh(id);
        }
        cmd => {
            match state.apply_command(cmd) {
                Ok(Some(notice)) => {
                    let _ = ui_tx.send(UiUpdate::Notice(notice)).await;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Failed to persist change: {:#}", e);
                    let _ = ui_tx
                        .send(UiUpdate::Notice(format!("Could not save changes: {e}")))
                        .await;
                }
            }
            send_snapshot(state, ui_tx).await;
        }
    }
}

/// Handle the result of a background MealDB request.
async fn handle_api_event(
    state: &mut AppState,
    event: ApiEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        ApiEvent::FeedLoaded {
            mut meals,
            generation,
        } => {
            if generation != state.feed_generation {
                debug!(
                    "Dropping stale feed result (gen {} != {})",
                    generation, state.feed_generation
                );
                return;
            }
            state.current_fetch = None;
            meal::mark_favorites(&mut meals, &state.favorites);
            info!("Feed loaded with {} meals (gen: {})", meals.len(), generation);
            let _ = ui_tx.send(UiUpdate::FeedLoaded(meals)).await;
        }
        ApiEvent::FeedFailed {
            message,
            generation,
        } => {
            if generation != state.feed_generation {
                debug!(
                    "Dropping stale feed error (gen {} != {})",
                    generation, state.feed_generation
                );
                return;
            }
            state.current_fetch = None;
            warn!("Feed load failed: {}", message);
            let _ = ui_tx.send(UiUpdate::FeedError(message)).await;
        }
        ApiEvent::FavoriteRefreshed { id, result } => {
            let notice = match result {
                Ok(Some(fresh)) => {
                    let name = fresh.name.clone();
                    match state.refresh_favorite(&id, fresh) {
                        Ok(true) => format!("Refreshed {name}"),
                        Ok(false) => format!("{name} is no longer a favorite"),
                        Err(e) => {
                            warn!("Failed to persist refreshed favorite: {:#}", e);
                            format!("Could not save changes: {e}")
                        }
                    }
                }
                Ok(None) => "This meal is no longer available".to_string(),
                Err(message) => {
                    warn!("Favorite refresh failed for {}: {}", id, message);
                    format!("Error refreshing meal: {message}")
                }
            };
            let _ = ui_tx.send(UiUpdate::Notice(notice)).await;
            send_snapshot(state, ui_tx).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
