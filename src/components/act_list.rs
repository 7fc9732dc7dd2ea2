use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::truncate;
use crate::sync::ReminderListState;
use crate::theme;

/// Today's incomplete reminders, grouped by list, with a selection cursor.
pub struct ActList;

impl ActList {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderListState, selected_index: usize) {
        let w = area.width as usize;
        let reminders = state.reminders();

        let title = if w >= 25 && !reminders.is_empty() {
            format!(" Today ({}) ", reminders.len())
        } else {
            " Today ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let placeholder = match state {
            ReminderListState::Loading => Some(("Requesting access to Reminders...", theme::current().dim)),
            ReminderListState::Denied => Some((
                "Reminders access denied.\n\n\
                 Grant access in System Settings > Privacy & Security > Reminders,\n\
                 then restart.",
                theme::current().header,
            )),
            ReminderListState::Empty => Some(("Nothing due today", theme::current().dim)),
            ReminderListState::Failed(_) | ReminderListState::Loaded(_) => None,
        };

        if let ReminderListState::Failed(ref reason) = state {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new(format!("Could not load reminders:\n{}\n\nPress r to retry.", reason))
                .style(Style::default().fg(ratatui::style::Color::Red))
                .wrap(Wrap { trim: false });
            frame.render_widget(msg, inner);
            return;
        }

        if let Some((text, style)) = placeholder {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new(text).style(style).wrap(Wrap { trim: false }), inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let mut current_calendar = String::new();
        let mut items: Vec<ListItem> = Vec::new();
        let mut selected_row = None;

        for (i, reminder) in reminders.iter().enumerate() {
            if reminder.calendar_name != current_calendar {
                if !current_calendar.is_empty() {
                    items.push(ListItem::new(Line::from("")));
                }
                current_calendar = reminder.calendar_name.clone();
                items.push(ListItem::new(Line::from(Span::styled(
                    format!(" {}", current_calendar),
                    Style::default()
                        .fg(reminder.calendar_color)
                        .add_modifier(Modifier::BOLD),
                ))));
            }

            let checkbox = if reminder.is_completed { "[x]" } else { "[ ]" };
            let is_selected = i == selected_index;
            let row_style = if is_selected {
                theme::current().selected
            } else if reminder.is_completed {
                Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            let due = reminder
                .due_date
                .map(|d| format!(" {}", d.format("%H:%M")))
                .unwrap_or_default();
            let flag = match reminder.priority_label() {
                Some("High") => " !",
                _ => "",
            };

            let title_room = inner_w.saturating_sub(6 + due.len() + flag.len());
            let spans = vec![
                Span::styled(format!(" {} ", checkbox), row_style),
                Span::styled(truncate(&reminder.title, title_room), row_style),
                Span::styled(flag, Style::default().fg(ratatui::style::Color::Red)),
                Span::styled(due, theme::current().dim),
            ];

            if is_selected {
                selected_row = Some(items.len());
            }
            items.push(ListItem::new(Line::from(spans)));
        }

        // Selection styling is applied per row; the state only keeps it scrolled into view.
        let mut list_state = ListState::default().with_selected(selected_row);
        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
