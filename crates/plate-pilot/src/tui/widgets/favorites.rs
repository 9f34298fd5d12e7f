// Favorites tab.

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::widgets::meal_list;
use crate::tui::ViewState;

pub const EMPTY_FAVORITES_TEXT: &str =
    "No favorite meals yet. Press f on a meal to add it to your favorites.";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    meal_list::render(
        frame,
        area,
        format!("Favorites ({})", state.favorites.len()),
        &state.favorites,
        state.selected_index(TabId::Favorites),
        EMPTY_FAVORITES_TEXT,
    );
}
