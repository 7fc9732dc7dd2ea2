use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::app::Tab;
use crate::theme;

pub struct TabBar;

impl TabBar {
    pub fn render(frame: &mut Frame, area: Rect, active: Tab) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(active.index())
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(theme::current().border),
            )
            .style(theme::current().dim)
            .highlight_style(theme::current().accent)
            .divider(" | ");

        frame.render_widget(tabs, area);
    }
}
