// TUI widget modules, one per screen region or overlay.

pub mod confirm;
pub mod day_picker;
pub mod favorites;
pub mod grocery;
pub mod help_bar;
pub mod home;
pub mod meal_detail;
pub mod meal_list;
pub mod planner;
pub mod profile;
pub mod status_bar;

/// Cut `text` to `max_chars` characters, appending "..." when it was longer.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

/// Rendered text of a test terminal, one line per row.
#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
