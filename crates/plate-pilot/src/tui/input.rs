// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (tab switching,
// selection, overlays, form editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::DayOfWeek;
use crate::protocol::{TabId, UserCommand};
use super::{ConfirmAction, ProfileField, ViewState};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: isize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key press was handled locally
/// by mutating `ViewState`.
///
/// Overlays take precedence in this order: confirmation dialog, day picker,
/// meal detail, search input, profile field editing.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    view_state.notice = None;

    if let Some(action) = view_state.confirm {
        return handle_confirm(key_event, view_state, action);
    }
    if view_state.day_picker.is_some() {
        return handle_day_picker(key_event, view_state);
    }
    if view_state.detail.is_some() {
        return handle_detail(key_event, view_state);
    }
    if view_state.search_mode {
        return handle_search_mode(key_event, view_state);
    }
    if view_state.active_tab == TabId::Profile && view_state.profile.editing {
        return handle_profile_editing(key_event, view_state);
    }

    // Keys shared by every tab
    match key_event.code {
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(tab) = TabId::from_key(c) {
                view_state.active_tab = tab;
            }
            return None;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.move_selection(-1);
            return None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.move_selection(1);
            return None;
        }
        KeyCode::PageUp => {
            view_state.move_selection(-PAGE_SIZE);
            return None;
        }
        KeyCode::PageDown => {
            view_state.move_selection(PAGE_SIZE);
            return None;
        }
        KeyCode::Char('q') => {
            view_state.confirm = Some(ConfirmAction::Quit);
            return None;
        }
        _ => {}
    }

    match view_state.active_tab {
        TabId::Home => handle_home(key_event, view_state),
        TabId::Favorites => handle_favorites(key_event, view_state),
        TabId::Planner => handle_planner(key_event, view_state),
        TabId::Grocery => handle_grocery(key_event, view_state),
        TabId::Profile => handle_profile(key_event, view_state),
    }
}

/// `y` runs the pending action, `n`/Esc cancels, everything else is
/// blocked. `q` also confirms a pending quit.
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    action: ConfirmAction,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.confirm = None;
            Some(action.command())
        }
        KeyCode::Char('q') | KeyCode::Char('Q') if action == ConfirmAction::Quit => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

fn handle_day_picker(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let current = view_state.day_picker.unwrap_or(0);
    let last = DayOfWeek::ALL.len() - 1;
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.day_picker = Some(current.saturating_sub(1));
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.day_picker = Some((current + 1).min(last));
            None
        }
        KeyCode::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            pick_day(view_state, idx)
        }
        KeyCode::Enter => pick_day(view_state, current),
        KeyCode::Esc => {
            view_state.day_picker = None;
            None
        }
        _ => None,
    }
}

fn pick_day(view_state: &mut ViewState, idx: usize) -> Option<UserCommand> {
    view_state.day_picker = None;
    let day = *DayOfWeek::ALL.get(idx)?;
    let meal = view_state.detail.clone()?;
    Some(UserCommand::AddToPlanner { meal, day })
}

fn handle_detail(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Backspace => {
            view_state.close_detail();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.detail_scroll = view_state.detail_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.detail_scroll = view_state.detail_scroll.saturating_add(1);
            None
        }
        KeyCode::Char('f') => {
            let detail = view_state.detail.as_mut()?;
            let cmd = UserCommand::ToggleFavorite(detail.clone());
            detail.is_favorite = !detail.is_favorite;
            Some(cmd)
        }
        KeyCode::Char('p') => {
            view_state.day_picker = Some(0);
            None
        }
        KeyCode::Char('g') => {
            let meal = view_state.detail.clone()?;
            Some(UserCommand::AddToGrocery(meal))
        }
        _ => None,
    }
}

/// While searching: printable characters edit the query, Enter submits it
/// and Esc abandons the edit.
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_mode = false;
            view_state.search_text = view_state.feed_query.clone().unwrap_or_default();
            None
        }
        KeyCode::Enter => {
            view_state.search_mode = false;
            Some(UserCommand::Search(view_state.search_text.clone()))
        }
        KeyCode::Backspace => {
            view_state.search_text.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.search_text.push(c);
            None
        }
        _ => None,
    }
}

fn open_selected(view_state: &mut ViewState) {
    if let Some(meal) = view_state.selected_meal().cloned() {
        view_state.open_detail(meal);
    }
}

fn handle_home(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => {
            open_selected(view_state);
            None
        }
        KeyCode::Char('/') => {
            view_state.search_mode = true;
            None
        }
        // Retry the current feed, search or random.
        KeyCode::Char('r') => Some(match &view_state.feed_query {
            Some(q) => UserCommand::Search(q.clone()),
            None => UserCommand::LoadRandom,
        }),
        // Drop the search and go back to random meals.
        KeyCode::Esc if view_state.feed_query.is_some() => {
            view_state.search_text.clear();
            Some(UserCommand::LoadRandom)
        }
        KeyCode::Char('f') => view_state
            .selected_meal()
            .cloned()
            .map(UserCommand::ToggleFavorite),
        _ => None,
    }
}

fn handle_favorites(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => {
            open_selected(view_state);
            None
        }
        KeyCode::Char('f') | KeyCode::Char('d') => view_state
            .selected_meal()
            .cloned()
            .map(UserCommand::ToggleFavorite),
        KeyCode::Char('u') => view_state
            .selected_meal()
            .map(|m| UserCommand::RefreshFavorite(m.id.clone())),
        _ => None,
    }
}

fn handle_planner(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => {
            open_selected(view_state);
            None
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let idx = view_state.selected_index(TabId::Planner);
            let (day, index, _) = *view_state.planner_rows().get(idx)?;
            Some(UserCommand::RemovePlannedMeal { day, index })
        }
        KeyCode::Char('g') => Some(UserCommand::AddPlanToGrocery),
        KeyCode::Char('c') => {
            if !view_state.planner_days.is_empty() {
                view_state.confirm = Some(ConfirmAction::ClearPlanner);
            }
            None
        }
        _ => None,
    }
}

fn handle_grocery(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let idx = view_state.selected_index(TabId::Grocery);
    let selected_id = view_state.grocery_rows().get(idx).map(|i| i.id);
    match key_event.code {
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
            selected_id.map(UserCommand::ToggleGroceryItem)
        }
        KeyCode::Char('d') | KeyCode::Delete => selected_id.map(UserCommand::RemoveGroceryItem),
        KeyCode::Char('c') => Some(UserCommand::ClearCompletedGroceries),
        KeyCode::Char('C') => {
            if !view_state.grocery_items.is_empty() {
                view_state.confirm = Some(ConfirmAction::ClearAllGroceries);
            }
            None
        }
        _ => None,
    }
}

fn handle_profile(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            match view_state.profile.focused_field() {
                ProfileField::Notifications => {
                    view_state.profile.notifications = !view_state.profile.notifications;
                    view_state.profile.dirty = true;
                }
                ProfileField::WeeklyBudget | ProfileField::CalorieGoal => {
                    view_state.profile.editing = true;
                }
            }
            None
        }
        KeyCode::Char('s') => {
            view_state.profile.dirty = false;
            Some(view_state.profile.save_command())
        }
        KeyCode::Char('R') => {
            view_state.confirm = Some(ConfirmAction::ResetAllData);
            None
        }
        _ => None,
    }
}

/// Editing a text field of the Profile form. Enter or Esc stops editing;
/// the typed text is kept either way until the form is saved.
fn handle_profile_editing(
    key_event: KeyEvent,
    view_state: &mut ViewState,
) -> Option<UserCommand> {
    let form = &mut view_state.profile;
    let field = match form.focused_field() {
        ProfileField::WeeklyBudget => &mut form.budget_text,
        ProfileField::CalorieGoal => &mut form.calorie_text,
        ProfileField::Notifications => {
            form.editing = false;
            return None;
        }
    };
    match key_event.code {
        KeyCode::Enter | KeyCode::Esc => {
            form.editing = false;
        }
        KeyCode::Backspace => {
            field.pop();
            form.dirty = true;
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '$' => {
            field.push(c);
            form.dirty = true;
        }
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
