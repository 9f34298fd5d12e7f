// Grocery tab: purchase progress over the list, grouped by store category.
//
// Purchased items are struck through. Category headers are not
// selectable; the selection index follows `ViewState::grocery_rows`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::grocery;
use crate::model::GroceryItem;
use crate::protocol::TabId;
use crate::tui::layout::split_header;
use crate::tui::ViewState;

pub const EMPTY_LIST_TEXT: &str = "Your grocery list is empty. Add ingredients from meal details!";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (progress_area, list_area) = split_header(area, 3);

    let (done, total) = grocery::progress(&state.grocery_items);
    let progress_color = if total > 0 && done == total {
        Color::Green
    } else {
        Color::White
    };
    let progress = Paragraph::new(Line::from(vec![
        Span::styled(" Purchased: ", Style::default().fg(Color::Gray)),
        Span::styled(
            progress_label(done, total),
            Style::default()
                .fg(progress_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Progress"));
    frame.render_widget(progress, progress_area);

    let block = Block::default().borders(Borders::ALL).title("Grocery list");

    if state.grocery_items.is_empty() {
        let paragraph = Paragraph::new(EMPTY_LIST_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, list_area);
        return;
    }

    let selected = state.selected_index(TabId::Grocery);
    let mut items = Vec::new();
    let mut selected_row = None;
    let mut item_idx = 0;

    for (category, members) in grocery::grouped(&state.grocery_items) {
        items.push(ListItem::new(Line::from(Span::styled(
            category.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))));
        for item in members {
            if item_idx == selected {
                selected_row = Some(items.len());
            }
            items.push(ListItem::new(item_line(item)));
            item_idx += 1;
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");
    let mut list_state = ListState::default().with_selected(selected_row);
    frame.render_stateful_widget(list, list_area, &mut list_state);
}

pub fn progress_label(done: usize, total: usize) -> String {
    format!("{done} of {total} purchased")
}

fn item_line(item: &GroceryItem) -> Line<'static> {
    let (check, style) = if item.is_purchased {
        (
            "[x]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ]", Style::default())
    };
    Line::from(vec![
        Span::raw(format!("  {check} ")),
        Span::styled(item.name.clone(), style),
        Span::styled(format!("  {}", item.quantity), Style::default().fg(Color::Gray)),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::buffer_text;

    fn draw(state: &ViewState) -> ratatui::Terminal<ratatui::backend::TestBackend> {
        let backend = ratatui::backend::TestBackend::new(80, 16);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
    }

    #[test]
    fn progress_label_counts() {
        assert_eq!(progress_label(0, 0), "0 of 0 purchased");
        assert_eq!(progress_label(2, 5), "2 of 5 purchased");
    }

    #[test]
    fn render_empty_list() {
        let terminal = draw(&ViewState::default());
        let text = buffer_text(&terminal);
        assert!(text.contains(EMPTY_LIST_TEXT));
        assert!(text.contains("0 of 0 purchased"));
    }

    #[test]
    fn render_grouped_with_headers() {
        let mut state = ViewState::default();
        let mut butter = GroceryItem::new("Butter", "2 tbsp");
        butter.is_purchased = true;
        state.grocery_items = vec![
            GroceryItem::new("Flour", "200g"),
            butter,
            GroceryItem::new("Garlic", "3 cloves"),
        ];
        let terminal = draw(&state);
        let text = buffer_text(&terminal);

        let produce = text.find("Produce").unwrap();
        let dairy = text.find("Dairy").unwrap();
        let pantry = text.find("Pantry").unwrap();
        assert!(produce < dairy && dairy < pantry);
        assert!(text.contains("[x] Butter  2 tbsp"));
        assert!(text.contains("[ ] Garlic  3 cloves"));
        assert!(text.contains("1 of 3 purchased"));
    }

    #[test]
    fn purchased_items_are_crossed_out() {
        let mut item = GroceryItem::new("Milk", "1 l");
        item.is_purchased = true;
        let line = item_line(&item);
        assert!(line.spans[1]
            .style
            .add_modifier
            .contains(Modifier::CROSSED_OUT));

        let line = item_line(&GroceryItem::new("Milk", "1 l"));
        assert!(!line.spans[1]
            .style
            .add_modifier
            .contains(Modifier::CROSSED_OUT));
    }
}
