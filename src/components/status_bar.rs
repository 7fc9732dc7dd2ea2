use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::Tab;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    /// Shows `message` on the right when present, otherwise the hints for
    /// the active tab.
    pub fn render(frame: &mut Frame, area: Rect, tab: Tab, message: Option<&str>) {
        let w = area.width as usize;
        let style = theme::current().status;

        let left = format!(" [{}]{} ", tab.index() + 1, tab.title());
        let right = match message {
            Some(msg) => format!(" {} ", msg),
            None => hints(tab, w).to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}

fn hints(tab: Tab, w: usize) -> &'static str {
    match tab {
        Tab::Act if w >= 70 => " jk:Select Space:Toggle r:Refresh Tab:Next ?:Help q:Quit ",
        Tab::Act if w >= 45 => " jk:Sel Sp:Toggle r:Refresh q:Quit ",
        Tab::Calendar if w >= 70 => " hjkl:Nav [/]:Month t:Today Tab:Next ?:Help q:Quit ",
        Tab::Calendar if w >= 45 => " hjkl:Nav [/]:Mon t:Today q:Quit ",
        Tab::Analytics if w >= 45 => " h/l:Period Tab:Next ?:Help q:Quit ",
        _ if w >= 45 => " 1-5:Tabs Tab:Next ?:Help q:Quit ",
        _ => " ?:Help q:Quit ",
    }
}
