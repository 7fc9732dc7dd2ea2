pub mod act_list;
pub mod analytics_chart;
pub mod day_view;
pub mod help;
pub mod home;
pub mod month_view;
pub mod settings;
pub mod status_bar;
pub mod tab_bar;

pub use act_list::ActList;
pub use analytics_chart::AnalyticsChart;
pub use day_view::DayView;
pub use help::HelpPopup;
pub use home::HomeView;
pub use month_view::MonthView;
pub use settings::SettingsView;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;

/// Shortens `s` to at most `max` characters, ending in "..." when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("café au lait", 7), "café...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
