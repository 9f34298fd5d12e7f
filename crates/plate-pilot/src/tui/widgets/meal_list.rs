// Meal table shared by the Home feed and the Favorites tab.
//
// Columns: favorite marker, Name, Calories, Cost, Time.
// The selected row is highlighted and kept in view.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::model::Meal;
use crate::tui::widgets::truncate;

const NAME_WIDTH: usize = 40;

/// Render `meals` as a selectable table, or `empty_text` when there are none.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: String,
    meals: &[Meal],
    selected: usize,
    empty_text: &str,
) {
    let block = Block::default().borders(Borders::ALL).title(title);

    if meals.is_empty() {
        let paragraph = Paragraph::new(empty_text.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("Calories"),
        Cell::from("Cost"),
        Cell::from("Time"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = meals.iter().map(meal_row).collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(16),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(selected.min(meals.len() - 1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn meal_row(meal: &Meal) -> Row<'static> {
    let marker = if meal.is_favorite {
        Cell::from("★").style(Style::default().fg(Color::Yellow))
    } else {
        Cell::from("")
    };
    Row::new(vec![
        marker,
        Cell::from(truncate(&meal.name, NAME_WIDTH)),
        Cell::from(meal.calories_label()),
        Cell::from(meal.cost_label()),
        Cell::from(meal.cook_time_label()),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    fn sample(id: &str, name: &str, favorite: bool) -> Meal {
        let mut meal = Meal::new(id, name, "Cook.", vec![]);
        meal.calories = 450;
        meal.estimated_cost = 7.25;
        meal.cook_time_minutes = 30;
        meal.is_favorite = favorite;
        meal
    }

    #[test]
    fn render_rows_with_stats() {
        let backend = ratatui::backend::TestBackend::new(80, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let meals = vec![sample("1", "Beef Stew", true), sample("2", "Dal", false)];
        terminal
            .draw(|frame| render(frame, frame.area(), "Meals (2)".into(), &meals, 1, "none"))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Meals (2)"));
        assert!(text.contains("Beef Stew"));
        assert!(text.contains("450 cal"));
        assert!(text.contains("$7.25"));
        assert!(text.contains("30 min"));
        assert!(text.contains("★"));
        assert!(text.contains(">> "));
    }

    #[test]
    fn render_empty_text() {
        let backend = ratatui::backend::TestBackend::new(80, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), "Meals".into(), &[], 0, "Nothing here"))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Nothing here"));
    }

    #[test]
    fn render_selection_past_end_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(40, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let meals = vec![sample("1", "Dal", false)];
        terminal
            .draw(|frame| render(frame, frame.area(), "M".into(), &meals, 7, ""))
            .unwrap();
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "A".repeat(60);
        let backend = ratatui::backend::TestBackend::new(120, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let meals = vec![sample("1", &name, false)];
        terminal
            .draw(|frame| render(frame, frame.area(), "M".into(), &meals, 0, ""))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains(&format!("{}...", "A".repeat(NAME_WIDTH))));
    }
}
