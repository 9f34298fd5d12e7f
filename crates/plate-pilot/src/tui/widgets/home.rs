// Home tab: search box over the meal feed.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::layout::split_header;
use crate::tui::widgets::meal_list;
use crate::tui::{FeedStatus, ViewState};

pub const EMPTY_FEED_TEXT: &str = "No meals found. Try searching for something else.";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (search_area, feed_area) = split_header(area, 3);
    render_search_box(frame, search_area, state);

    match &state.feed_status {
        FeedStatus::Loaded => meal_list::render(
            frame,
            feed_area,
            feed_title(state),
            &state.feed,
            state.selected_index(TabId::Home),
            EMPTY_FEED_TEXT,
        ),
        FeedStatus::Loading => {
            render_message(frame, feed_area, vec![Line::from("Loading meals...")], Color::Yellow)
        }
        FeedStatus::Error(message) => render_message(
            frame,
            feed_area,
            vec![
                Line::from(format!("Error loading meals: {message}")),
                Line::from(""),
                Line::from("Press r to retry."),
            ],
            Color::Red,
        ),
        FeedStatus::Idle => {
            render_message(frame, feed_area, vec![Line::from("Press r to load meals.")], Color::Gray)
        }
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (line, border) = if state.search_mode {
        (
            Line::from(vec![
                Span::raw(state.search_text.clone()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Color::Yellow,
        )
    } else {
        let hint = match &state.feed_query {
            Some(query) => format!("Results for \"{query}\"  (Esc: back to random picks)"),
            None => "Random picks  (/ to search)".to_string(),
        };
        (
            Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
            Color::White,
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title("Search meals");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_message(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, color: Color) {
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Meals"));
    frame.render_widget(paragraph, area);
}

fn feed_title(state: &ViewState) -> String {
    match &state.feed_query {
        Some(_) => format!("Search results ({})", state.feed.len()),
        None => format!("Meals ({})", state.feed.len()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
