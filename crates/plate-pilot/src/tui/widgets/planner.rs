// Planner tab: week summary over the plan, one section per day.
//
// Day headers are not selectable; the selection index counts meal rows
// only, matching `ViewState::planner_rows`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::meal::format_dollars;
use crate::model::planner;
use crate::model::{UserSettings, WeekSummary};
use crate::protocol::TabId;
use crate::tui::layout::split_header;
use crate::tui::widgets::truncate;
use crate::tui::ViewState;

pub const EMPTY_PLAN_TEXT: &str = "No meals planned yet. Add meals from the home feed!";

const NAME_WIDTH: usize = 36;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (summary_area, plan_area) = split_header(area, 5);

    let summary = Paragraph::new(summary_lines(&state.week_summary, &state.settings))
        .block(Block::default().borders(Borders::ALL).title("This week"));
    frame.render_widget(summary, summary_area);

    let block = Block::default().borders(Borders::ALL).title("Meal plan");

    if planner::is_empty_plan(&state.planner_days) {
        let paragraph = Paragraph::new(EMPTY_PLAN_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, plan_area);
        return;
    }

    let selected = state.selected_index(TabId::Planner);
    let mut items = Vec::new();
    let mut selected_row = None;
    let mut meal_idx = 0;

    for day in state.planner_days.iter().filter(|d| !d.meals.is_empty()) {
        items.push(ListItem::new(Line::from(Span::styled(
            day.header(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))));
        for meal in &day.meals {
            if meal_idx == selected {
                selected_row = Some(items.len());
            }
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("  {}", truncate(&meal.name, NAME_WIDTH))),
                Span::styled(
                    format!("  {} · {}", meal.calories_label(), meal.cost_label()),
                    Style::default().fg(Color::Gray),
                ),
            ])));
            meal_idx += 1;
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");
    let mut list_state = ListState::default().with_selected(selected_row);
    frame.render_stateful_widget(list, plan_area, &mut list_state);
}

/// Three summary lines: totals, budget, calories.
pub fn summary_lines(summary: &WeekSummary, settings: &UserSettings) -> Vec<Line<'static>> {
    let budget_color = if summary.over_budget {
        Color::Red
    } else {
        Color::Green
    };
    let budget_text = if summary.over_budget {
        format!("{} over budget", format_dollars(-summary.budget_remaining))
    } else {
        format!("{} remaining", format_dollars(summary.budget_remaining))
    };

    let calorie_color = if summary.days_over_calorie_goal > 0 {
        Color::Yellow
    } else {
        Color::Gray
    };

    vec![
        Line::from(format!(
            "{} day(s) planned · {} cal · {}",
            summary.days_planned,
            summary.total_calories,
            format_dollars(summary.total_cost)
        )),
        Line::from(vec![
            Span::raw(format!("Budget {} · ", settings.weekly_budget_label())),
            Span::styled(budget_text, Style::default().fg(budget_color)),
        ]),
        Line::from(Span::styled(
            format!(
                "Avg {} cal/day · goal {} · {} day(s) over goal",
                summary.average_daily_calories, settings.calorie_goal, summary.days_over_calorie_goal
            ),
            Style::default().fg(calorie_color),
        )),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayOfWeek, Meal, PlannerDay};
    use crate::tui::widgets::buffer_text;
    use chrono::Utc;

    fn meal(id: &str, name: &str, calories: u32, cost: f64) -> Meal {
        let mut m = Meal::new(id, name, "Cook.", vec![]);
        m.calories = calories;
        m.estimated_cost = cost;
        m
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn summary_within_budget() {
        let settings = UserSettings::default();
        let days = vec![PlannerDay::new(
            Utc::now(),
            DayOfWeek::Monday,
            vec![meal("1", "Dal", 600, 10.0)],
        )];
        let summary = WeekSummary::compute(&days, &settings);
        let texts: Vec<String> = summary_lines(&summary, &settings).iter().map(line_text).collect();
        assert_eq!(texts[0], "1 day(s) planned · 600 cal · $10.00");
        assert_eq!(texts[1], "Budget $50.00 · $40.00 remaining");
        assert_eq!(texts[2], "Avg 600 cal/day · goal 2000 · 0 day(s) over goal");
    }

    #[test]
    fn summary_over_budget() {
        let settings = UserSettings::default();
        let days = vec![PlannerDay::new(
            Utc::now(),
            DayOfWeek::Friday,
            vec![meal("1", "Lobster", 2500, 62.5)],
        )];
        let summary = WeekSummary::compute(&days, &settings);
        let lines = summary_lines(&summary, &settings);
        assert_eq!(line_text(&lines[1]), "Budget $50.00 · $12.50 over budget");
        assert_eq!(lines[1].spans[1].style.fg, Some(Color::Red));
        assert!(line_text(&lines[2]).ends_with("1 day(s) over goal"));
    }

    #[test]
    fn render_empty_plan() {
        let backend = ratatui::backend::TestBackend::new(80, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(buffer_text(&terminal).contains(EMPTY_PLAN_TEXT));
    }

    #[test]
    fn render_days_with_headers() {
        let backend = ratatui::backend::TestBackend::new(80, 16);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.planner_days = vec![
            PlannerDay::new(Utc::now(), DayOfWeek::Monday, vec![meal("1", "Dal", 600, 4.0)]),
            PlannerDay::new(Utc::now(), DayOfWeek::Tuesday, vec![]),
            PlannerDay::new(Utc::now(), DayOfWeek::Sunday, vec![meal("2", "Roast", 900, 14.0)]),
        ];
        state.selected.insert(TabId::Planner, 1);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Monday • 600 cal • $4.00"));
        assert!(text.contains("Sunday • 900 cal • $14.00"));
        assert!(!text.contains("Tuesday"));
        assert!(text.contains(">>   Roast"));
    }
}
