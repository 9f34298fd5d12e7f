// Meal detail overlay.
//
// Drawn over the main panel: stats, ingredient list, instructions and the
// image URL. Scrolls with j/k.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::Meal;

pub fn render(frame: &mut Frame, area: Rect, meal: &Meal, scroll: u16) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", meal.name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(detail_lines(meal))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Content lines of the detail view.
pub fn detail_lines(meal: &Meal) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(origin) = meal.origin_label() {
        lines.push(Line::from(Span::styled(origin, Style::default().fg(Color::Gray))));
    }
    if meal.is_favorite {
        lines.push(Line::from(Span::styled(
            "★ Favorite",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(meal.calories_label(), Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::styled(meal.cost_label(), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(meal.cook_time_label(), Style::default().fg(Color::Blue)),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Ingredients", heading)));
    if meal.ingredients.is_empty() {
        lines.push(Line::from("  (none listed)"));
    }
    for ingredient in &meal.ingredients {
        lines.push(Line::from(format!(
            "  • {} - {}",
            ingredient.name, ingredient.quantity_description
        )));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Instructions", heading)));
    for paragraph in meal.instructions.lines() {
        lines.push(Line::from(paragraph.trim_end().to_string()));
    }

    if let Some(url) = &meal.image_url {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Image: {url}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
