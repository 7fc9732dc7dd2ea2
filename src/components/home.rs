use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::calendar::CalendarEvent;
use crate::sync::{AccessOutcome, ReminderListState};
use crate::theme;

/// Landing tab: a short digest of today.
pub struct HomeView;

impl HomeView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        today: NaiveDate,
        reminders: &ReminderListState,
        events: &[CalendarEvent],
        access: Option<&AccessOutcome>,
    ) {
        let theme = theme::current();
        let block = Block::default()
            .title(format!(" {} ", today.format("%A, %B %d")))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let reminder_line = match reminders {
            ReminderListState::Loading => "Waiting for Reminders access...".to_string(),
            ReminderListState::Denied => "Reminders access denied".to_string(),
            ReminderListState::Failed(_) => "Reminders could not be loaded".to_string(),
            ReminderListState::Empty => "Nothing left to do today".to_string(),
            ReminderListState::Loaded(list) => match list.len() {
                1 => "1 reminder due today".to_string(),
                n => format!("{} reminders due today", n),
            },
        };

        let mut lines = vec![
            Line::from(Span::styled("Act", theme.accent)),
            Line::from(format!("  {}", reminder_line)),
            Line::from(""),
            Line::from(Span::styled("Calendar", theme.accent)),
        ];

        match access {
            Some(outcome) if !outcome.events_granted => {
                lines.push(Line::from(Span::styled("  Calendar access denied", theme.dim)));
            }
            _ if events.is_empty() => {
                lines.push(Line::from(Span::styled("  No events today", theme.dim)));
            }
            _ => {
                for ev in events {
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(" ", Style::default().bg(ev.calendar_color)),
                        Span::styled(format!(" {:<13} ", ev.duration_display()), theme.dim),
                        Span::raw(ev.title.clone()),
                    ]));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
