// Status bar widget: app title, tab indicator, feed status.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::{FeedStatus, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [title] [tab bar] [feed status]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " PlatePilot ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
    ];

    spans.extend(tab_spans(state.active_tab));

    if let Some((text, color)) = feed_indicator(&state.feed_status) {
        spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Build tab indicator spans with the active tab highlighted.
/// E.g. "[1:Home] [2:Favorites] [3:Planner] [4:Grocery] [5:Profile]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Short feed status text, or `None` when there is nothing to report.
pub fn feed_indicator(status: &FeedStatus) -> Option<(&'static str, Color)> {
    match status {
        FeedStatus::Loading => Some(("Loading meals...", Color::Yellow)),
        FeedStatus::Error(_) => Some(("Feed error", Color::Red)),
        FeedStatus::Idle | FeedStatus::Loaded => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
