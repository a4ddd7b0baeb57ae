use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

/// The organization's fixed local time zone.
///
/// Every calendar-day and time-of-day decision goes through this value;
/// nothing in the schedule core consults the host zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalZone {
    offset: FixedOffset,
}

impl LocalZone {
    /// Returns `None` when the offset is outside ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Wall-clock time of `ts`; `None` when shifting by the offset leaves
    /// chrono's representable range.
    pub fn local_datetime(&self, ts: DateTime<Utc>) -> Option<NaiveDateTime> {
        let offset = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        ts.naive_utc().checked_add_signed(offset)
    }

    pub fn local_date(&self, ts: DateTime<Utc>) -> Option<NaiveDate> {
        self.local_datetime(ts).map(|local| local.date())
    }

    pub fn local_time(&self, ts: DateTime<Utc>) -> Option<NaiveTime> {
        self.local_datetime(ts).map(|local| local.time())
    }

    pub fn format_hhmm(&self, ts: DateTime<Utc>) -> Option<String> {
        self.local_time(ts).map(|time| time.format("%H:%M").to_string())
    }
}

/// The evaluation instant seen from the local zone.
///
/// Built once per batch from an injected timestamp.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceClock {
    today: NaiveDate,
    hour: u32,
}

impl ReferenceClock {
    /// `None` when `reference_now` has no local wall-clock time in `zone`.
    pub fn new(reference_now: DateTime<Utc>, zone: &LocalZone) -> Option<Self> {
        let local = zone.local_datetime(reference_now)?;
        Some(Self {
            today: local.date(),
            hour: local.hour(),
        })
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn is_past(&self, date: NaiveDate) -> bool {
        date < self.today
    }

    /// Local hour of day is at or after `hour`.
    pub fn reached_hour(&self, hour: u32) -> bool {
        self.hour >= hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn almaty_day_rolls_over_at_19_utc() {
        let zone = LocalZone::from_offset_minutes(300).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 3, 12, 18, 59, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 3, 12, 19, 0, 0).unwrap();
        assert_eq!(zone.local_date(before), NaiveDate::from_ymd_opt(2025, 3, 12));
        assert_eq!(zone.local_date(after), NaiveDate::from_ymd_opt(2025, 3, 13));
        assert_eq!(zone.format_hhmm(before).as_deref(), Some("23:59"));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(LocalZone::from_offset_minutes(24 * 60).is_none());
        assert_eq!(LocalZone::from_offset_minutes(-180).unwrap().offset_minutes(), -180);
    }

    #[test]
    fn reference_clock_uses_local_hour() {
        let zone = LocalZone::from_offset_minutes(300).unwrap();
        let clock = ReferenceClock::new(Utc.with_ymd_and_hms(2025, 3, 12, 14, 0, 0).unwrap(), &zone)
            .unwrap();
        assert!(clock.reached_hour(19));
        assert!(!clock.reached_hour(20));
        assert!(clock.is_today(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()));
    }

    #[test]
    fn instants_at_the_edge_of_time_have_no_local_day() {
        let east = LocalZone::from_offset_minutes(300).unwrap();
        let west = LocalZone::from_offset_minutes(-300).unwrap();
        let last = DateTime::<Utc>::MAX_UTC;

        assert_eq!(east.local_date(last), None);
        assert_eq!(east.format_hhmm(last), None);
        assert!(ReferenceClock::new(last, &east).is_none());
        assert_eq!(west.local_date(DateTime::<Utc>::MIN_UTC), None);
        assert!(west.local_date(last).is_some());
    }
}
