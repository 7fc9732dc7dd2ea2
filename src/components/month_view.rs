use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        selected_date: NaiveDate,
        today: NaiveDate,
        days_with_events: &HashSet<u32>,
    ) {
        let theme = theme::current();
        let title = format!(" {} ", selected_date.format("%B %Y"));

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .map(|d| Span::styled(format!("{:^5}", d), theme.header))
                .collect::<Vec<_>>(),
        );

        let weeks: Vec<Line> = month_grid(selected_date)
            .into_iter()
            .map(|week| {
                let cells: Vec<Span> = week
                    .into_iter()
                    .map(|cell| match cell {
                        None => Span::raw("     "),
                        Some(date) => {
                            let has_events = days_with_events.contains(&date.day());
                            let marker = if has_events { '*' } else { ' ' };
                            let style = if date == today && date == selected_date {
                                theme.today.add_modifier(Modifier::BOLD | Modifier::REVERSED)
                            } else if date == selected_date {
                                theme.selected
                            } else if date == today {
                                theme.today
                            } else if has_events {
                                theme.highlight
                            } else {
                                Style::default()
                            };
                            Span::styled(format!(" {:>2}{} ", date.day(), marker), style)
                        }
                    })
                    .collect();
                Line::from(cells)
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

/// Sunday-first weeks covering the month of `date`; `None` pads the first and
/// last week.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = date.with_day(1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    let mut day = Some(first);

    while let Some(d) = day.filter(|d| d.month() == first.month()) {
        week[slot] = Some(d);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
        day = d.succ_opt();
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}
