use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DATA_POINT_NAMESPACE: Uuid = Uuid::from_u128(0x6f1d_52a4_93c8_4e0b_a3f5_1c27_d8e4_b960);

/// One analytics sample. The id is derived from `(timestamp, source)` so the
/// same underlying sample keeps its identity across fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    id: Uuid,
    pub timestamp: DateTime<Local>,
    pub value: f64,
    pub is_completed: bool,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Local>, source: &str, value: f64, is_completed: bool) -> Self {
        Self {
            id: Self::derive_id(timestamp, source),
            timestamp,
            value,
            is_completed,
        }
    }

    pub fn derive_id(timestamp: DateTime<Local>, source: &str) -> Uuid {
        let key = format!("{}|{}", timestamp.timestamp(), source);
        Uuid::new_v5(&DATA_POINT_NAMESPACE, key.as_bytes())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn identity_is_stable_for_same_sample() {
        let ts = Local.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let a = DataPoint::new(ts, "reminders", 40.0, true);
        let b = DataPoint::new(ts, "reminders", 55.0, false);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn identity_differs_by_source() {
        let ts = Local.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let a = DataPoint::new(ts, "reminders", 40.0, true);
        let b = DataPoint::new(ts, "events", 40.0, true);
        assert_ne!(a.id(), b.id());
    }
}
