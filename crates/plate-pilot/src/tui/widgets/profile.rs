// Profile tab: the settings form and the data reset entry.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{ProfileField, ProfileForm, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Preferences",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(form_lines(&state.profile));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Saved: {} weekly · {} · notifications {}",
            state.settings.weekly_budget_label(),
            state.settings.calorie_goal_label(),
            if state.settings.notifications_enabled {
                "on"
            } else {
                "off"
            }
        ),
        Style::default().fg(Color::Gray),
    )));
    if state.profile.dirty {
        lines.push(Line::from(Span::styled(
            "Unsaved changes. Press s to save.",
            Style::default().fg(Color::Yellow),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Data",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "R: Clear all data (favorites, plan, grocery list, settings)",
        Style::default().fg(Color::Red),
    )));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Profile"));
    frame.render_widget(paragraph, area);
}

/// One line per form field; the focused field is highlighted.
pub fn form_lines(form: &ProfileForm) -> Vec<Line<'static>> {
    ProfileField::ALL
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == form.focus;
            let value = match field {
                ProfileField::WeeklyBudget => form.budget_text.clone(),
                ProfileField::CalorieGoal => form.calorie_text.clone(),
                ProfileField::Notifications => {
                    if form.notifications { "[x] On" } else { "[ ] Off" }.to_string()
                }
            };
            let cursor = if focused && form.editing { "_" } else { "" };
            let marker = if focused { ">> " } else { "   " };

            let value_style = if focused && form.editing {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::raw(marker),
                Span::raw(format!("{:<22}", field.label())),
                Span::styled(format!("{value}{cursor}"), value_style),
            ])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserSettings;
    use crate::tui::widgets::buffer_text;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn form_lines_show_values_and_focus() {
        let mut form = ProfileForm::from_settings(&UserSettings::default());
        form.focus = 1;
        let texts: Vec<String> = form_lines(&form).iter().map(line_text).collect();
        assert_eq!(texts[0], format!("   {:<22}50.00", "Weekly Budget ($)"));
        assert_eq!(texts[1], format!(">> {:<22}2000", "Daily Calorie Goal"));
        assert_eq!(texts[2], format!("   {:<22}[ ] Off", "Enable Notifications"));
    }

    #[test]
    fn editing_shows_cursor() {
        let mut form = ProfileForm::from_settings(&UserSettings::default());
        form.editing = true;
        form.budget_text = "75".into();
        let lines = form_lines(&form);
        assert!(line_text(&lines[0]).ends_with("75_"));
        assert_eq!(lines[0].spans[2].style.bg, Some(Color::Yellow));
    }

    #[test]
    fn render_shows_saved_values_and_dirty_hint() {
        let backend = ratatui::backend::TestBackend::new(80, 16);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.profile.dirty = true;
        state.profile.notifications = true;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Saved: $50.00 weekly · 2000 cal/day · notifications off"));
        assert!(text.contains("Unsaved changes. Press s to save."));
        assert!(text.contains("[x] On"));
        assert!(text.contains("R: Clear all data"));
    }
}
