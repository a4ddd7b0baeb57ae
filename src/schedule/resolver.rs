use chrono::NaiveDate;

use crate::model::attendance::AttendanceRecord;
use crate::model::shift_plan::{ShiftPlan, ShiftStatus};
use crate::model::status::{StatusSet, StatusTag};
use crate::schedule::clock::ReferenceClock;
use crate::schedule::policy::AttendancePolicy;

/// Derives the status tags for one (staff, date) pair.
///
/// Either side may be missing. Explicit operator status wins outright;
/// otherwise tags follow from which punches exist, the precomputed lateness
/// and how far the reference day has progressed. Every combination yields at
/// least one tag.
pub fn resolve_statuses(
    date: NaiveDate,
    shift: Option<&ShiftPlan>,
    attendance: Option<&AttendanceRecord>,
    clock: &ReferenceClock,
    policy: &AttendancePolicy,
) -> StatusSet {
    if let Some(tag) = attendance
        .and_then(|a| a.explicit_status.as_deref())
        .and_then(StatusTag::from_explicit)
    {
        return StatusSet::single(tag);
    }

    match attendance.map(|a| (a, a.actual_start.is_some(), a.actual_end.is_some())) {
        Some((record, true, false)) => open_punch(date, record, clock, policy),
        Some((record, true, true)) => closed_punch(record, policy),
        Some((_, false, true)) => StatusSet::single(StatusTag::NoClockIn),
        Some((_, false, false)) | None => without_punches(date, shift, clock, policy),
    }
}

fn open_punch(
    date: NaiveDate,
    record: &AttendanceRecord,
    clock: &ReferenceClock,
    policy: &AttendancePolicy,
) -> StatusSet {
    let mut tags = StatusSet::new();
    let late = record.late_minutes() >= policy.late_threshold_minutes;

    if late {
        tags.push(StatusTag::LateArrival);
    }

    if !clock.is_today(date) || clock.reached_hour(policy.punch_timeout_cutoff_hour) {
        tags.push(StatusTag::NoClockOut);
    } else if !late {
        tags.push(StatusTag::CheckedIn);
    }

    tags
}

fn closed_punch(record: &AttendanceRecord, policy: &AttendancePolicy) -> StatusSet {
    let mut tags = StatusSet::new();

    if record.late_minutes() >= policy.late_threshold_minutes {
        tags.push(StatusTag::LateArrival);
    }
    if record.early_leave_minutes() >= policy.early_leave_threshold_minutes {
        tags.push(StatusTag::EarlyLeave);
    }
    if tags.is_empty() {
        tags.push(StatusTag::Completed);
    }

    tags
}

fn without_punches(
    date: NaiveDate,
    shift: Option<&ShiftPlan>,
    clock: &ReferenceClock,
    policy: &AttendancePolicy,
) -> StatusSet {
    let Some(shift) = shift else {
        return StatusSet::single(StatusTag::Absent);
    };

    let tag = match shift.status {
        ShiftStatus::Scheduled => {
            let day_over = clock.is_past(date)
                || (clock.is_today(date) && clock.reached_hour(policy.day_end_cutoff_hour));
            if day_over {
                StatusTag::NoClockIn
            } else {
                StatusTag::Scheduled
            }
        }
        other => policy
            .map_shift_status(other)
            .unwrap_or_else(|| StatusTag::Custom(other.to_string())),
    };

    StatusSet::single(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::clock::LocalZone;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn zone() -> LocalZone {
        LocalZone::from_offset_minutes(300).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    /// Local (UTC+5) wall-clock time on 2025-03-`d`.
    fn local(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(5 * 3600)
            .unwrap()
            .from_local_datetime(&day(d).and_hms_opt(h, m, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    fn clock_at(d: u32, h: u32) -> ReferenceClock {
        ReferenceClock::new(local(d, h, 0), &zone()).unwrap()
    }

    fn shift(d: u32, status: ShiftStatus) -> ShiftPlan {
        ShiftPlan { staff_id: "st-1".into(), date: day(d), status }
    }

    fn punch(
        d: u32,
        start: Option<(u32, u32)>,
        end: Option<(u32, u32)>,
        late: i64,
        early: i64,
    ) -> AttendanceRecord {
        AttendanceRecord {
            staff_id: "st-1".into(),
            date: Some(day(d)),
            actual_start: start.map(|(h, m)| local(d, h, m)),
            actual_end: end.map(|(h, m)| local(d, h, m)),
            late_minutes: Some(late),
            early_leave_minutes: Some(early),
            ..Default::default()
        }
    }

    fn resolve(
        d: u32,
        s: Option<&ShiftPlan>,
        a: Option<&AttendanceRecord>,
        clock: &ReferenceClock,
    ) -> Vec<StatusTag> {
        resolve_statuses(day(d), s, a, clock, &AttendancePolicy::default())
            .as_slice()
            .to_vec()
    }

    #[test]
    fn explicit_status_overrides_everything() {
        let mut record = punch(12, Some((9, 5)), None, 120, 0);
        record.explicit_status = Some("sick_leave".into());
        assert_eq!(
            resolve(12, None, Some(&record), &clock_at(12, 14)),
            vec![StatusTag::Custom("sick_leave".into())]
        );
    }

    #[test]
    fn blank_explicit_status_is_ignored() {
        let mut record = punch(12, Some((8, 58)), Some((18, 2)), 0, 0);
        record.explicit_status = Some(String::new());
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 20)), vec![StatusTag::Completed]);
    }

    #[test]
    fn open_punch_late_today_is_only_late_arrival() {
        let record = punch(12, Some((9, 5)), None, 95, 0);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 14)), vec![StatusTag::LateArrival]);
    }

    #[test]
    fn open_punch_on_time_today_is_checked_in() {
        let record = punch(12, Some((8, 55)), None, 0, 0);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 14)), vec![StatusTag::CheckedIn]);
    }

    #[test]
    fn open_punch_today_after_cutoff_is_no_clock_out() {
        let record = punch(12, Some((8, 55)), None, 89, 0);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 23)), vec![StatusTag::NoClockOut]);
    }

    #[test]
    fn open_punch_on_past_day_is_always_flagged() {
        let record = punch(11, Some((10, 45)), None, 105, 0);
        assert_eq!(
            resolve(11, None, Some(&record), &clock_at(12, 9)),
            vec![StatusTag::LateArrival, StatusTag::NoClockOut]
        );
    }

    #[test]
    fn closed_punch_on_time_is_completed() {
        let record = punch(12, Some((8, 58)), Some((18, 2)), 0, 0);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 20)), vec![StatusTag::Completed]);
    }

    #[test]
    fn closed_punch_collects_late_and_early_tags() {
        let record = punch(12, Some((10, 30)), Some((15, 0)), 90, 120);
        assert_eq!(
            resolve(12, None, Some(&record), &clock_at(12, 20)),
            vec![StatusTag::LateArrival, StatusTag::EarlyLeave]
        );
    }

    #[test]
    fn lateness_just_below_threshold_is_completed() {
        let record = punch(12, Some((10, 29)), Some((18, 0)), 89, 89);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 20)), vec![StatusTag::Completed]);
    }

    #[test]
    fn end_without_start_is_no_clock_in() {
        let record = punch(12, None, Some((18, 0)), 0, 0);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 20)), vec![StatusTag::NoClockIn]);
    }

    #[test]
    fn empty_record_without_plan_is_absent() {
        let record = punch(12, None, None, 0, 0);
        assert_eq!(resolve(12, None, Some(&record), &clock_at(12, 10)), vec![StatusTag::Absent]);
    }

    #[test]
    fn scheduled_shift_yesterday_without_punch_is_no_clock_in() {
        let plan = shift(11, ShiftStatus::Scheduled);
        assert_eq!(resolve(11, Some(&plan), None, &clock_at(12, 8)), vec![StatusTag::NoClockIn]);
    }

    #[test]
    fn scheduled_shift_today_depends_on_day_end_cutoff() {
        let plan = shift(12, ShiftStatus::Scheduled);
        assert_eq!(resolve(12, Some(&plan), None, &clock_at(12, 18)), vec![StatusTag::Scheduled]);
        assert_eq!(resolve(12, Some(&plan), None, &clock_at(12, 19)), vec![StatusTag::NoClockIn]);
    }

    #[test]
    fn scheduled_shift_in_future_stays_scheduled() {
        let plan = shift(14, ShiftStatus::Scheduled);
        assert_eq!(resolve(14, Some(&plan), None, &clock_at(12, 22)), vec![StatusTag::Scheduled]);
    }

    #[test]
    fn empty_record_with_plan_follows_the_plan() {
        let plan = shift(11, ShiftStatus::Scheduled);
        let record = punch(11, None, None, 0, 0);
        assert_eq!(resolve(11, Some(&plan), Some(&record), &clock_at(12, 8)), vec![StatusTag::NoClockIn]);
    }

    #[test]
    fn non_scheduled_plans_use_mapping_table() {
        let clock = clock_at(12, 10);
        let cases = [
            (ShiftStatus::Completed, StatusTag::CheckedOut),
            (ShiftStatus::Late, StatusTag::Absent),
            (ShiftStatus::InProgress, StatusTag::CheckedIn),
            (ShiftStatus::PendingApproval, StatusTag::Absent),
            (ShiftStatus::Absent, StatusTag::Absent),
        ];
        for (status, expected) in cases {
            let plan = shift(11, status);
            assert_eq!(resolve(11, Some(&plan), None, &clock), vec![expected], "{status}");
        }
    }

    #[test]
    fn mapping_table_can_be_overridden() {
        let mut policy = AttendancePolicy::default();
        policy
            .shift_status_mapping
            .insert(ShiftStatus::Late, StatusTag::LateArrival);
        let plan = shift(11, ShiftStatus::Late);
        let tags = resolve_statuses(day(11), Some(&plan), None, &clock_at(12, 10), &policy);
        assert_eq!(tags.as_slice(), &[StatusTag::LateArrival]);

        policy.shift_status_mapping.remove(&ShiftStatus::Late);
        let tags = resolve_statuses(day(11), Some(&plan), None, &clock_at(12, 10), &policy);
        assert_eq!(tags.as_slice(), &[StatusTag::Custom("late".into())]);
    }

    #[test]
    fn punches_take_precedence_over_plan_status() {
        let plan = shift(12, ShiftStatus::Absent);
        let record = punch(12, Some((8, 58)), Some((18, 2)), 0, 0);
        assert_eq!(resolve(12, Some(&plan), Some(&record), &clock_at(12, 20)), vec![StatusTag::Completed]);
    }

    #[test]
    fn thresholds_come_from_policy() {
        let policy = AttendancePolicy {
            late_threshold_minutes: 15,
            ..AttendancePolicy::default()
        };
        let record = punch(12, Some((9, 20)), Some((18, 0)), 20, 0);
        let tags = resolve_statuses(day(12), None, Some(&record), &clock_at(12, 20), &policy);
        assert_eq!(tags.as_slice(), &[StatusTag::LateArrival]);
    }
}
