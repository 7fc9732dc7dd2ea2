use chrono::{DateTime, Duration, Local};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs},
    Frame,
};

use crate::analytics::{AnalyticsModel, AnalyticsPeriod, CHART_MAX, CHART_MIN};
use crate::theme;

pub struct AnalyticsChart;

impl AnalyticsChart {
    pub fn render(frame: &mut Frame, area: Rect, model: &AnalyticsModel, now: DateTime<Local>) {
        let theme = theme::current();
        let period = model.period();

        let block = Block::default()
            .title(" Completion ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(inner);

        let selector = Tabs::new(AnalyticsPeriod::ALL.iter().map(|p| p.label()))
            .select(AnalyticsPeriod::ALL.iter().position(|p| *p == period).unwrap_or(0))
            .style(theme.dim)
            .highlight_style(theme.accent)
            .divider(" ");
        frame.render_widget(selector, rows[0]);

        let span = period.days() as f64;
        let origin = now - Duration::days(period.days());
        let points = model.chart_points(origin);

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.accent)
            .data(&points);

        let x_labels = vec![
            Line::from(origin.format("%b %d").to_string()),
            Line::from(now.format("%b %d").to_string()),
        ];
        let chart = Chart::new(vec![dataset])
            .x_axis(
                Axis::default()
                    .style(theme.dim)
                    .bounds([0.0, span])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(theme.dim)
                    .bounds([CHART_MIN, CHART_MAX])
                    .labels(vec![Line::from("0"), Line::from("50"), Line::from("100")]),
            );
        frame.render_widget(chart, rows[1]);

        if points.is_empty() {
            let msg_area = Rect {
                y: rows[1].y + rows[1].height / 2,
                height: 1,
                ..rows[1]
            };
            frame.render_widget(
                Paragraph::new(format!("No data for this {}", period.label().to_lowercase()))
                    .style(theme.dim)
                    .alignment(Alignment::Center),
                msg_area,
            );
        }
    }
}
