use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::model::resolved_row::ResolvedAttendanceRow;
use crate::model::status::StatusTag;

/// One staff member's week, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeeklyStaffRow {
    pub staff_id: String,

    #[schema(example = "2025-03-10", format = "date", value_type = String)]
    pub week_start: NaiveDate,

    /// Seven slots, Monday..Sunday; `null` where nothing was planned or punched.
    pub days: Vec<Option<ResolvedAttendanceRow>>,

    #[schema(value_type = String)]
    pub total_amount: Decimal,

    #[schema(value_type = String)]
    pub total_penalties: Decimal,

    pub late_days: u32,
    pub worked_days: u32,
}

/// Pay over the whole report range for one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PayrollSummary {
    pub staff_id: String,
    pub days_paid: u32,

    #[schema(value_type = String)]
    pub gross: Decimal,

    #[schema(value_type = String)]
    pub penalties: Decimal,

    /// `gross - penalties`; may go negative when penalties exceed earnings.
    #[schema(value_type = String)]
    pub net: Decimal,

    #[schema(value_type = Object)]
    pub status_counts: BTreeMap<String, u32>,
}

/// Monday of the week containing `date`; clamps to the first representable
/// day when that Monday lies before it.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(back).unwrap_or(NaiveDate::MIN)
}

/// Money totals stop at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

fn saturating_sub(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_sub(amount).unwrap_or(if amount.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Folds daily rows into per-staff weeks sorted by (week_start, staff_id).
pub fn assemble_weekly(rows: &[ResolvedAttendanceRow]) -> Vec<WeeklyStaffRow> {
    let mut weeks: BTreeMap<(NaiveDate, &str), WeeklyStaffRow> = BTreeMap::new();

    for row in rows {
        let start = week_start(row.date);
        let week = weeks
            .entry((start, row.staff_id.as_str()))
            .or_insert_with(|| WeeklyStaffRow {
                staff_id: row.staff_id.clone(),
                week_start: start,
                days: vec![None; 7],
                total_amount: Decimal::ZERO,
                total_penalties: Decimal::ZERO,
                late_days: 0,
                worked_days: 0,
            });

        let slot = row.date.weekday().num_days_from_monday() as usize;
        week.total_amount = saturating_add(week.total_amount, row.amount);
        week.total_penalties = saturating_add(week.total_penalties, row.penalties);
        if row.statuses.contains(&StatusTag::LateArrival) {
            week.late_days += 1;
        }
        if row.actual_start.is_some() {
            week.worked_days += 1;
        }
        week.days[slot] = Some(row.clone());
    }

    weeks.into_values().collect()
}

/// Totals per staff member sorted by staff id.
pub fn summarize_payroll(rows: &[ResolvedAttendanceRow]) -> Vec<PayrollSummary> {
    let mut staff: BTreeMap<&str, PayrollSummary> = BTreeMap::new();

    for row in rows {
        let summary = staff
            .entry(row.staff_id.as_str())
            .or_insert_with(|| PayrollSummary {
                staff_id: row.staff_id.clone(),
                days_paid: 0,
                gross: Decimal::ZERO,
                penalties: Decimal::ZERO,
                net: Decimal::ZERO,
                status_counts: BTreeMap::new(),
            });

        if row.amount > Decimal::ZERO {
            summary.days_paid += 1;
        }
        summary.gross = saturating_add(summary.gross, row.amount);
        summary.penalties = saturating_add(summary.penalties, row.penalties);
        for tag in row.statuses.iter() {
            *summary.status_counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }

    staff
        .into_values()
        .map(|mut s| {
            s.net = saturating_sub(s.gross, s.penalties);
            s
        })
        .collect()
}
