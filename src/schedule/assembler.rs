use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::model::attendance::AttendanceRecord;
use crate::model::compensation::StaffCompensationProfile;
use crate::model::resolved_row::ResolvedAttendanceRow;
use crate::model::shift_plan::ShiftPlan;
use crate::schedule::accrual::{daily_accrual, day_amount};
use crate::schedule::calendar::WorkingDayCalendar;
use crate::schedule::clock::{LocalZone, ReferenceClock};
use crate::schedule::policy::{AccrualPolicy, AttendancePolicy};
use crate::schedule::resolver::resolve_statuses;

/// Date range (inclusive) and optional staff filter for one report.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub staff_id: Option<String>,
}

impl ReportQuery {
    pub fn covers(&self, staff_id: &str, date: NaiveDate) -> bool {
        date >= self.from
            && date <= self.to
            && self.staff_id.as_deref().is_none_or(|wanted| wanted == staff_id)
    }
}

/// The three collections a report is built from.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub shifts: Vec<ShiftPlan>,
    pub attendance: Vec<AttendanceRecord>,
    pub profiles: Vec<StaffCompensationProfile>,
}

/// Everything the core needs besides the records themselves.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub clock: ReferenceClock,
    pub zone: &'a LocalZone,
    pub attendance_policy: &'a AttendancePolicy,
    pub accrual_policy: &'a AccrualPolicy,
}

#[derive(Default)]
struct DaySlot<'r> {
    shift: Option<&'r ShiftPlan>,
    attendance: Option<&'r AttendanceRecord>,
}

/// Joins shifts and attendance by (staff, date) and projects one row per key.
///
/// Keys appearing in neither collection produce nothing. Output is sorted by
/// date, then staff id.
pub fn assemble_daily(
    batch: &RecordBatch,
    query: &ReportQuery,
    ctx: &ReportContext<'_>,
) -> Vec<ResolvedAttendanceRow> {
    let mut calendar = WorkingDayCalendar::new(
        ctx.accrual_policy.count_saturdays,
        ctx.accrual_policy.fallback_working_days,
    );

    let mut slots: BTreeMap<(NaiveDate, &str), DaySlot<'_>> = BTreeMap::new();

    for shift in &batch.shifts {
        if !query.covers(&shift.staff_id, shift.date) {
            continue;
        }
        let slot = slots.entry((shift.date, shift.staff_id.as_str())).or_default();
        if slot.shift.is_some() {
            warn!(staff_id = %shift.staff_id, date = %shift.date, "Duplicate shift plan ignored");
            continue;
        }
        slot.shift = Some(shift);
    }

    for record in &batch.attendance {
        let Some(date) = record.local_day(ctx.zone) else {
            debug!(staff_id = %record.staff_id, "Attendance record without a local day skipped");
            continue;
        };
        if !query.covers(&record.staff_id, date) {
            continue;
        }
        let slot = slots.entry((date, record.staff_id.as_str())).or_default();
        if slot.attendance.is_some() {
            warn!(staff_id = %record.staff_id, %date, "Duplicate attendance record ignored");
            continue;
        }
        slot.attendance = Some(record);
    }

    let mut profiles: HashMap<&str, &StaffCompensationProfile> = HashMap::new();
    for profile in &batch.profiles {
        if profiles.contains_key(profile.staff_id.as_str()) {
            warn!(staff_id = %profile.staff_id, "Duplicate compensation profile ignored");
            continue;
        }
        profiles.insert(profile.staff_id.as_str(), profile);
    }

    slots
        .into_iter()
        .map(|((date, staff_id), slot)| {
            let statuses = resolve_statuses(
                date,
                slot.shift,
                slot.attendance,
                &ctx.clock,
                ctx.attendance_policy,
            );

            let accrual = daily_accrual(
                profiles.get(staff_id).copied(),
                calendar.working_days_for(date),
                ctx.accrual_policy,
            );
            let amount = day_amount(accrual, &statuses, ctx.accrual_policy);

            let attendance = slot.attendance;
            ResolvedAttendanceRow {
                staff_id: staff_id.to_string(),
                date,
                actual_start: attendance
                    .and_then(|a| a.actual_start)
                    .and_then(|ts| ctx.zone.format_hhmm(ts)),
                actual_end: attendance
                    .and_then(|a| a.actual_end)
                    .and_then(|ts| ctx.zone.format_hhmm(ts)),
                late_minutes: attendance.map_or(0, AttendanceRecord::late_minutes),
                early_leave_minutes: attendance.map_or(0, AttendanceRecord::early_leave_minutes),
                shift_status: slot.shift.map(|s| s.status),
                statuses,
                daily_accrual: accrual,
                amount,
                penalties: attendance.map_or(Decimal::ZERO, AttendanceRecord::penalties),
            }
        })
        .collect()
}
