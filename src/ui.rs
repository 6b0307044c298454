use ratatui::{prelude::*, widgets::*};

use crate::models::{Backend, StatusKind};

/// Border/text style for a form field
pub fn field_style(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders the two-way backend selector
pub fn render_backend_tabs(selected: Backend) -> Tabs<'static> {
    let titles = vec![
        Line::from(" Node.js Backend (n) "),
        Line::from(" Python Backend (p) "),
    ];
    let index = match selected {
        Backend::Node => 0,
        Backend::Python => 1,
    };

    Tabs::new(titles)
        .select(index)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::White).bg(Color::Blue).bold())
        .divider(" ")
}

/// Status line colour
pub fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Idle => Style::default(),
        StatusKind::Pending => Style::default().fg(Color::Yellow),
        StatusKind::Success => Style::default().fg(Color::Blue).bold(),
        StatusKind::Error => Style::default().fg(Color::Red).bold(),
    }
}

/// Row and column (in chars) of a byte cursor inside possibly multi-line text
pub fn cursor_offset(text: &str, cursor: usize) -> (u16, u16) {
    let before = &text[..cursor.min(text.len())];
    let row = before.matches('\n').count();
    let col = before
        .rsplit('\n')
        .next()
        .map(|line| line.chars().count())
        .unwrap_or(0);
    (row as u16, col as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_offset_single_line() {
        assert_eq!(cursor_offset("hello", 5), (0, 5));
        assert_eq!(cursor_offset("héllo", 3), (0, 2));
        assert_eq!(cursor_offset("", 0), (0, 0));
    }

    #[test]
    fn test_cursor_offset_multi_line() {
        let text = "first\nsecond\n";
        assert_eq!(cursor_offset(text, 6), (1, 0));
        assert_eq!(cursor_offset(text, 9), (1, 3));
        assert_eq!(cursor_offset(text, text.len()), (2, 0));
    }
}
