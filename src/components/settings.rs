use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::SettingsInfo;
use crate::calendar::CalendarInfo;
use crate::sync::{AccessOutcome, SyncPhase};
use crate::theme;

pub struct SettingsView;

impl SettingsView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        info: &SettingsInfo,
        access: Option<&AccessOutcome>,
        phase: SyncPhase,
        calendars: &[CalendarInfo],
    ) {
        let theme = theme::current();
        let block = Block::default()
            .title(" Settings ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let grant = |granted: Option<bool>| match granted {
            Some(true) => "granted",
            Some(false) => "denied",
            None => "pending",
        };

        let path_or_none = |p: &Option<std::path::PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        };

        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), theme.dim),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            Line::from(Span::styled("Access", theme.accent)),
            row("Reminders", grant(access.map(|a| a.reminders_granted)).to_string()),
            row("Calendar", grant(access.map(|a| a.events_granted)).to_string()),
            row("Sync state", format!("{:?}", phase)),
        ];
        if let Some(err) = access.and_then(|a| a.error.as_ref()) {
            lines.push(row("Last error", err.to_string()));
        }

        if !calendars.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Calendars", theme.accent)));
            for cal in calendars {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(" ", Style::default().bg(cal.color)),
                    Span::raw(format!(" {}", cal.title)),
                    Span::styled(format!(" ({})", cal.source), theme.dim),
                ]));
            }
        }

        lines.extend([
            Line::from(""),
            Line::from(Span::styled("Application", theme.accent)),
            row("Backend", info.backend.clone()),
            row("Theme", info.theme.clone()),
            row("Access timeout", format!("{}s", info.access_timeout_secs)),
            row("Config file", path_or_none(&info.config_path)),
            row("Log file", path_or_none(&info.log_path)),
        ]);

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
