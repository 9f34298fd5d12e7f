// Day picker overlay: choose the weekday a meal is planned for.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::model::DayOfWeek;
use crate::tui::widgets::confirm::centered_rect;

const PICKER_WIDTH: u16 = 26;
const PICKER_HEIGHT: u16 = DayOfWeek::ALL.len() as u16 + 2;

pub fn render(frame: &mut Frame, area: Rect, highlighted: usize) {
    let picker_area = centered_rect(PICKER_WIDTH, PICKER_HEIGHT, area);
    frame.render_widget(Clear, picker_area);

    let lines: Vec<Line> = DayOfWeek::ALL
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let text = format!(" {} {}", i + 1, day.label());
            if i == highlighted {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Add to day ");
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, picker_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    #[test]
    fn render_lists_all_days() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), 2))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Add to day"));
        assert!(text.contains("1 Monday"));
        assert!(text.contains("7 Sunday"));
    }

    #[test]
    fn highlighted_day_is_styled() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), 2))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let area = centered_rect(PICKER_WIDTH, PICKER_HEIGHT, Rect::new(0, 0, 80, 24));
        // Row 0 is the border; Wednesday is the third day.
        let cell = &buffer[(area.x + 2, area.y + 3)];
        assert_eq!(cell.bg, Color::Yellow);
        let other = &buffer[(area.x + 2, area.y + 1)];
        assert_ne!(other.bg, Color::Yellow);
    }
}
