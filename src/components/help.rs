use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Tabs",
        &[
            ("1-5", "Home / Act / Calendar / Analytics / Settings"),
            ("Tab", "Next tab (Shift-Tab: previous)"),
        ],
    ),
    (
        "Act",
        &[
            ("j/k", "Select reminder"),
            ("Space", "Toggle completion"),
            ("r", "Reload today's reminders"),
        ],
    ),
    (
        "Calendar",
        &[
            ("h/l", "Previous/next day"),
            ("j/k", "Previous/next week"),
            ("[/]", "Previous/next month"),
            ("t", "Jump to today"),
        ],
    ),
    ("Analytics", &[("h/l", "Cycle period")]),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(frame: &mut Frame, area: Rect) {
        let theme = theme::current();
        let popup_w = area.width.clamp(30, 60).min(area.width);
        let popup_h = area.height.clamp(12, 24).min(area.height);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(theme.accent)
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = theme.accent;
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines = Vec::new();
        for (title, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(*title, section_style)));
            for (key, desc) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<8}", key), key_style),
                    Span::raw(*desc),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme.dim),
            Span::styled("Esc ", key_style),
            Span::raw("Quit / close popup"),
        ]));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
