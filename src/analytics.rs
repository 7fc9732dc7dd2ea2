use std::fmt;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::model::DataPoint;

pub const CHART_MIN: f64 = 0.0;
pub const CHART_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsPeriod {
    #[default]
    Week,
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl AnalyticsPeriod {
    pub const ALL: [AnalyticsPeriod; 5] = [
        AnalyticsPeriod::Week,
        AnalyticsPeriod::Month,
        AnalyticsPeriod::Quarter,
        AnalyticsPeriod::HalfYear,
        AnalyticsPeriod::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Week => "Week",
            AnalyticsPeriod::Month => "Month",
            AnalyticsPeriod::Quarter => "Quarter",
            AnalyticsPeriod::HalfYear => "Half-Year",
            AnalyticsPeriod::Year => "Year",
        }
    }

    /// Approximate span in days, used for the chart's x-axis.
    pub fn days(&self) -> i64 {
        match self {
            AnalyticsPeriod::Week => 7,
            AnalyticsPeriod::Month => 30,
            AnalyticsPeriod::Quarter => 91,
            AnalyticsPeriod::HalfYear => 182,
            AnalyticsPeriod::Year => 365,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AnalyticsPeriod::Week => AnalyticsPeriod::Month,
            AnalyticsPeriod::Month => AnalyticsPeriod::Quarter,
            AnalyticsPeriod::Quarter => AnalyticsPeriod::HalfYear,
            AnalyticsPeriod::HalfYear => AnalyticsPeriod::Year,
            AnalyticsPeriod::Year => AnalyticsPeriod::Week,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            AnalyticsPeriod::Week => AnalyticsPeriod::Year,
            AnalyticsPeriod::Month => AnalyticsPeriod::Week,
            AnalyticsPeriod::Quarter => AnalyticsPeriod::Month,
            AnalyticsPeriod::HalfYear => AnalyticsPeriod::Quarter,
            AnalyticsPeriod::Year => AnalyticsPeriod::HalfYear,
        }
    }
}

impl fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Analytics tab state. There is no data source yet, so `fetch_data` only
/// records the period.
#[derive(Debug, Default)]
pub struct AnalyticsModel {
    period: AnalyticsPeriod,
    data_points: Vec<DataPoint>,
}

impl AnalyticsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> AnalyticsPeriod {
        self.period
    }

    pub fn data_points(&self) -> &[DataPoint] {
        &self.data_points
    }

    pub fn fetch_data(&mut self, period: AnalyticsPeriod) {
        debug!(%period, "analytics fetch requested");
        self.period = period;
    }

    /// `(x, y)` pairs for the line chart: x is days since `origin`, y is
    /// clamped to the chart's 0-100 scale.
    pub fn chart_points(&self, origin: DateTime<Local>) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self
            .data_points
            .iter()
            .map(|p| {
                let x = (p.timestamp - origin).num_seconds() as f64 / 86_400.0;
                (x, clamp_value(p.value))
            })
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    #[cfg(test)]
    fn push(&mut self, point: DataPoint) {
        self.data_points.push(point);
    }
}

pub fn clamp_value(value: f64) -> f64 {
    if value.is_nan() {
        CHART_MIN
    } else {
        value.clamp(CHART_MIN, CHART_MAX)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn period_cycle_covers_every_variant() {
        let mut period = AnalyticsPeriod::Week;
        let mut seen = Vec::new();
        for _ in 0..AnalyticsPeriod::ALL.len() {
            seen.push(period);
            assert_eq!(period.next().prev(), period);
            period = period.next();
        }
        assert_eq!(seen, AnalyticsPeriod::ALL.to_vec());
        assert_eq!(period, AnalyticsPeriod::Week);
    }

    #[test]
    fn fetch_data_records_period_and_stays_empty() {
        let mut model = AnalyticsModel::new();
        model.fetch_data(AnalyticsPeriod::Quarter);
        assert_eq!(model.period(), AnalyticsPeriod::Quarter);
        assert!(model.data_points().is_empty());
    }

    #[test]
    fn clamp_value_bounds_and_nan() {
        assert_eq!(clamp_value(-5.0), 0.0);
        assert_eq!(clamp_value(150.0), 100.0);
        assert_eq!(clamp_value(42.5), 42.5);
        assert_eq!(clamp_value(f64::NAN), 0.0);
    }

    #[test]
    fn chart_points_are_sorted_and_clamped() {
        let origin = Local.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut model = AnalyticsModel::new();
        model.push(DataPoint::new(origin + Duration::days(2), "r", 120.0, true));
        model.push(DataPoint::new(origin + Duration::days(1), "r", 30.0, false));

        let points = model.chart_points(origin);
        assert_eq!(points, vec![(1.0, 30.0), (2.0, 100.0)]);
    }
}
