use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schedule::clock::LocalZone;

/// Punches recorded for one staff member on one day.
///
/// Lateness fields arrive precomputed from the backend; they are never
/// recomputed here, only clamped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "staff_id": "st-17",
    "date": "2025-03-12",
    "actual_start": "2025-03-12T04:05:00Z",
    "actual_end": null,
    "late_minutes": 95,
    "early_leave_minutes": 0
}))]
pub struct AttendanceRecord {
    pub staff_id: String,

    /// Calendar day of the record; derived from the punches when absent.
    #[schema(example = "2025-03-12", format = "date", value_type = Option<String>)]
    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[schema(format = "date-time", value_type = Option<String>)]
    #[serde(default)]
    pub actual_start: Option<DateTime<Utc>>,

    #[schema(format = "date-time", value_type = Option<String>)]
    #[serde(default)]
    pub actual_end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub late_minutes: Option<i64>,

    #[serde(default)]
    pub early_leave_minutes: Option<i64>,

    #[schema(value_type = Option<String>, example = "500")]
    #[serde(default)]
    pub penalties: Option<Decimal>,

    /// Operator override; wins over every derived tag.
    #[serde(default)]
    pub explicit_status: Option<String>,
}

impl AttendanceRecord {
    pub fn late_minutes(&self) -> u32 {
        clamp_minutes(self.late_minutes)
    }

    pub fn early_leave_minutes(&self) -> u32 {
        clamp_minutes(self.early_leave_minutes)
    }

    pub fn penalties(&self) -> Decimal {
        self.penalties
            .filter(|p| p.is_sign_positive())
            .unwrap_or(Decimal::ZERO)
    }

    /// Join-key day: the stated date, else the local day of the first punch present.
    /// `None` also when that punch cannot be placed on a local day.
    pub fn local_day(&self, zone: &LocalZone) -> Option<NaiveDate> {
        self.date.or_else(|| {
            self.actual_start
                .or(self.actual_end)
                .and_then(|ts| zone.local_date(ts))
        })
    }
}

fn clamp_minutes(value: Option<i64>) -> u32 {
    value
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_and_negative_numbers_default_to_zero() {
        let record = AttendanceRecord {
            staff_id: "a".into(),
            late_minutes: Some(-12),
            penalties: Some(dec!(-3)),
            ..Default::default()
        };
        assert_eq!(record.late_minutes(), 0);
        assert_eq!(record.early_leave_minutes(), 0);
        assert_eq!(record.penalties(), Decimal::ZERO);
    }

    #[test]
    fn local_day_falls_back_to_punch_in_local_zone() {
        let zone = LocalZone::from_offset_minutes(300).unwrap();
        let record = AttendanceRecord {
            staff_id: "a".into(),
            // 21:30 UTC is already the next day in UTC+5
            actual_end: Some(Utc.with_ymd_and_hms(2025, 3, 11, 21, 30, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(record.local_day(&zone), NaiveDate::from_ymd_opt(2025, 3, 12));
    }

    #[test]
    fn stated_date_wins_over_punches() {
        let zone = LocalZone::from_offset_minutes(300).unwrap();
        let record = AttendanceRecord {
            staff_id: "a".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10),
            actual_start: Some(Utc.with_ymd_and_hms(2025, 3, 11, 4, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(record.local_day(&zone), NaiveDate::from_ymd_opt(2025, 3, 10));
    }

    #[test]
    fn punch_past_the_last_local_day_has_no_day() {
        let zone = LocalZone::from_offset_minutes(300).unwrap();
        let record = AttendanceRecord {
            staff_id: "a".into(),
            actual_start: Some(DateTime::<Utc>::MAX_UTC),
            ..Default::default()
        };
        assert_eq!(record.local_day(&zone), None);
    }
}
