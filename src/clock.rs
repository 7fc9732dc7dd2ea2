use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Local `[midnight, next midnight)` for `date`. `None` only when a zone
/// transition swallows midnight entirely.
pub fn day_window(date: NaiveDate) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let start = local_midnight(date)?;
    let end = local_midnight(date + Duration::days(1))?;
    Some((start, end))
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()
}
