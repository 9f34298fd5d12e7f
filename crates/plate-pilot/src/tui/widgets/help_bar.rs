// Help bar widget: key hints for the current mode, or the latest notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let span = match &state.notice {
        Some(notice) => Span::styled(
            format!(" {notice}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            help_text(state),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        ),
    };
    let paragraph = Paragraph::new(Line::from(span)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Key hints for whatever currently receives input.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm.is_some() {
        return " y:Confirm | n/Esc:Cancel";
    }
    if state.day_picker.is_some() {
        return " 1-7:Day | Up/Down:Move | Enter:Add | Esc:Cancel";
    }
    if state.detail.is_some() {
        return " f:Favorite | p:Add to planner | g:Add to grocery | j/k:Scroll | Esc:Close";
    }
    if state.search_mode {
        return " Type a meal name | Enter:Search | Esc:Cancel";
    }
    match state.active_tab {
        TabId::Home => " q:Quit | 1-5:Tabs | Enter:Details | /:Search | r:Reload | f:Favorite",
        TabId::Favorites => " q:Quit | 1-5:Tabs | Enter:Details | d:Remove | u:Refresh",
        TabId::Planner => {
            " q:Quit | 1-5:Tabs | Enter:Details | d:Remove | g:Plan to grocery | c:Clear"
        }
        TabId::Grocery => {
            " q:Quit | 1-5:Tabs | Space:Toggle | d:Delete | c:Clear purchased | C:Clear all"
        }
        TabId::Profile if state.profile.editing => " Type a number | Enter/Esc:Done",
        TabId::Profile => " q:Quit | 1-5:Tabs | Enter:Edit | s:Save | R:Clear all data",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
