use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use ratatui::layout::{Constraint, Layout, Rect};
use taskdeck::app::{App, SettingsInfo, Tab};
use taskdeck::calendar::ReminderPlatform;
use taskdeck::clock::{Clock, SystemClock};
use taskdeck::components;
use taskdeck::event::{self, Action};
use taskdeck::sync::{CalendarAgenda, ReminderSyncController};
use taskdeck::{config, logging, theme, tui};
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cfg = config::load().wrap_err("failed to load config.toml")?;
    let log_path = match logging::init(&cfg.log_level) {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("Logging disabled: {err}");
            None
        }
    };
    let active_theme = theme::init(&cfg.theme);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (platform, backend) = platform(clock.as_ref());
    info!(backend, "platform selected");

    eprintln!("Connecting to {backend}...");
    let (controller, _access) = {
        let _guard = runtime.enter();
        ReminderSyncController::start(platform.clone(), clock.clone(), cfg.access_timeout())
    };

    let settings = SettingsInfo {
        backend: backend.to_string(),
        theme: active_theme.name.clone(),
        config_path: config::config_path(),
        log_path,
        access_timeout_secs: cfg.access_timeout_secs,
    };
    let mut app = App::new(
        controller,
        CalendarAgenda::new(platform),
        clock,
        runtime.handle().clone(),
        settings,
    );

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    info!("exiting");
    result
}

#[cfg(target_os = "macos")]
fn platform(_clock: &dyn Clock) -> (Arc<dyn ReminderPlatform>, &'static str) {
    (
        Arc::new(taskdeck::calendar::EventKitPlatform::new()),
        "Apple Reminders & Calendar",
    )
}

#[cfg(not(target_os = "macos"))]
fn platform(clock: &dyn Clock) -> (Arc<dyn ReminderPlatform>, &'static str) {
    (
        Arc::new(taskdeck::calendar::InMemoryPlatform::with_sample_data(clock.today())),
        "in-memory demo store",
    )
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.tick();
        terminal.draw(|frame| render(frame, app))?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            app.status_message = None;
            if let Some(action) = event::action_for(key) {
                handle_action(app, action);
            }
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    if app.show_help {
        match action {
            Action::Help | Action::Close => app.show_help = false,
            Action::Quit => app.running = false,
            _ => {}
        }
        return;
    }

    match action {
        Action::Quit => app.running = false,
        Action::Help => app.show_help = true,
        Action::NextTab => app.next_tab(),
        Action::PrevTab => app.prev_tab(),
        Action::SelectTab(index) => app.select_tab(index),
        _ => match app.tab {
            Tab::Act => match action {
                Action::Up => app.select_prev_reminder(),
                Action::Down => app.select_next_reminder(),
                Action::Activate => app.toggle_selected_reminder(),
                Action::Refresh => app.refresh_reminders(),
                _ => {}
            },
            Tab::Calendar => match action {
                Action::Left => app.prev_day(),
                Action::Right => app.next_day(),
                Action::Up => app.prev_week(),
                Action::Down => app.next_week(),
                Action::PrevMonth => app.prev_month(),
                Action::NextMonth => app.next_month(),
                Action::Today => app.go_to_today(),
                Action::Refresh => app.refresh_events(),
                _ => {}
            },
            Tab::Analytics => match action {
                Action::Left => app.prev_period(),
                Action::Right => app.next_period(),
                _ => {}
            },
            Tab::Home | Tab::Settings => {}
        },
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    components::TabBar::render(frame, layout[0], app.tab);

    let content = layout[1];
    let controller = app.controller();
    match app.tab {
        Tab::Home => {
            let access = controller.access();
            components::HomeView::render(
                frame,
                content,
                app.today,
                &app.reminder_state(),
                &app.today_events,
                access.as_ref(),
            );
        }
        Tab::Act => {
            components::ActList::render(frame, content, &app.reminder_state(), app.act_selected);
        }
        Tab::Calendar => render_calendar(frame, content, app),
        Tab::Analytics => {
            components::AnalyticsChart::render(frame, content, &app.analytics, chrono::Local::now());
        }
        Tab::Settings => {
            let access = controller.access();
            components::SettingsView::render(
                frame,
                content,
                &app.settings,
                access.as_ref(),
                controller.phase(),
                &app.calendars,
            );
        }
    }

    if app.show_help {
        components::HelpPopup::render(frame, area);
    }

    components::StatusBar::render(frame, layout[2], app.tab, app.status_message.as_deref());
}

fn render_calendar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    if area.width < 60 {
        components::MonthView::render(
            frame,
            area,
            app.selected_date,
            app.today,
            &app.days_with_events,
        );
        return;
    }

    let month_w = if area.width >= 100 { 44 } else { 37 };
    let columns = Layout::horizontal([Constraint::Length(month_w), Constraint::Min(20)]).split(area);

    components::MonthView::render(
        frame,
        columns[0],
        app.selected_date,
        app.today,
        &app.days_with_events,
    );
    components::DayView::render(frame, columns[1], app.selected_date, &app.day_events);
}
