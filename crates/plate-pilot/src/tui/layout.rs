// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): title, tabs, feed status      |
// +--------------------------------------------------+
// |                                                   |
// | Main Panel (fill): active tab                     |
// |                                                   |
// +--------------------------------------------------+
// | Help Bar (1 row): key hints or latest notice      |
// +--------------------------------------------------+
//
// Overlays (meal detail, day picker, confirmations) are drawn on top.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Split a tab panel into a fixed-height header and the remaining body.
pub fn split_header(area: Rect, header_height: u16) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);
    (parts[0], parts[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A reasonable terminal size for testing.
    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in [
            ("status_bar", layout.status_bar),
            ("main_panel", layout.main_panel),
            ("help_bar", layout.help_bar),
        ] {
            assert!(rect.width > 0 && rect.height > 0, "{name} has zero size: {rect:?}");
        }
    }

    #[test]
    fn layout_bars_are_single_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.main_panel.height, 38);
        assert_eq!(layout.status_bar.y, 0);
        assert_eq!(layout.help_bar.y, 39);
    }

    #[test]
    fn layout_spans_full_width() {
        let layout = build_layout(test_area());
        assert_eq!(layout.main_panel.width, 120);
        assert_eq!(layout.main_panel.x, 0);
    }

    #[test]
    fn split_header_gives_header_exact_height() {
        let (header, body) = split_header(Rect::new(0, 0, 50, 20), 3);
        assert_eq!(header.height, 3);
        assert_eq!(body.height, 17);
        assert_eq!(body.y, 3);
    }

    #[test]
    fn layout_small_terminal_does_not_panic() {
        let _ = build_layout(Rect::new(0, 0, 10, 3));
        let _ = split_header(Rect::new(0, 0, 10, 1), 3);
    }
}
