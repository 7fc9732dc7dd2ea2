use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::CalendarEvent;
use crate::theme;

/// Events on the selected day: all-day entries first, then timed ones.
pub struct DayView;

impl DayView {
    pub fn render(frame: &mut Frame, area: Rect, date: NaiveDate, events: &[CalendarEvent]) {
        let theme = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let count_str = match events.len() {
            0 => String::new(),
            1 => " 1 event ".to_string(),
            n => format!(" {} events ", n),
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("No events").style(theme.dim), inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let (all_day, timed): (Vec<&CalendarEvent>, Vec<&CalendarEvent>) =
            events.iter().partition(|e| e.is_all_day);

        let mut items: Vec<ListItem> = Vec::new();
        if !all_day.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "All Day",
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))));
            items.extend(all_day.iter().map(|ev| event_item(ev, inner_w)));
            if !timed.is_empty() {
                items.push(ListItem::new(Line::from("")));
            }
        }
        items.extend(timed.iter().map(|ev| event_item(ev, inner_w)));

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn event_item(ev: &CalendarEvent, max_width: usize) -> ListItem<'static> {
    let time_str = if ev.is_all_day {
        String::new()
    } else {
        format!(" {} ", ev.duration_display())
    };

    let mut spans = vec![
        Span::styled("  ", Style::default().bg(ev.calendar_color)),
        Span::styled(time_str.clone(), Style::default().add_modifier(Modifier::DIM)),
        Span::raw(ev.title.clone()),
    ];

    let used = 2 + time_str.len() + ev.title.chars().count();
    if let Some(loc) = ev.location.as_deref().filter(|l| !l.is_empty()) {
        if used + 4 + loc.chars().count() <= max_width {
            spans.push(Span::styled(format!(" @ {}", loc), theme::current().dim));
        }
    }

    ListItem::new(Line::from(spans))
}
