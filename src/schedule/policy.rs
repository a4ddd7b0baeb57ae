use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::shift_plan::ShiftStatus;
use crate::model::status::StatusTag;

/// Tag emitted for a shift that has no punches, keyed by the shift's own status.
///
/// `late -> absent` is what the console has always shown; it is kept as a
/// table entry so it can be changed without touching the resolver.
pub static DEFAULT_SHIFT_STATUS_MAPPING: Lazy<BTreeMap<ShiftStatus, StatusTag>> =
    Lazy::new(|| {
        BTreeMap::from([
            (ShiftStatus::Completed, StatusTag::CheckedOut),
            (ShiftStatus::Late, StatusTag::Absent),
            (ShiftStatus::InProgress, StatusTag::CheckedIn),
            (ShiftStatus::PendingApproval, StatusTag::Absent),
            (ShiftStatus::Absent, StatusTag::Absent),
        ])
    });

/// Thresholds used by the status resolver.
#[derive(Debug, Clone, Serialize)]
pub struct AttendancePolicy {
    pub late_threshold_minutes: u32,
    pub early_leave_threshold_minutes: u32,
    /// From this local hour a scheduled shift with no punch counts as missed.
    pub day_end_cutoff_hour: u32,
    /// From this local hour an open punch today counts as never closed.
    pub punch_timeout_cutoff_hour: u32,
    pub shift_status_mapping: BTreeMap<ShiftStatus, StatusTag>,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_threshold_minutes: 90,
            early_leave_threshold_minutes: 90,
            day_end_cutoff_hour: 19,
            punch_timeout_cutoff_hour: 23,
            shift_status_mapping: DEFAULT_SHIFT_STATUS_MAPPING.clone(),
        }
    }
}

impl AttendancePolicy {
    /// `None` for `scheduled`, which the resolver handles itself, or for an unmapped status.
    pub fn map_shift_status(&self, status: ShiftStatus) -> Option<StatusTag> {
        self.shift_status_mapping.get(&status).cloned()
    }
}

/// Rules used by the accrual calculator.
#[derive(Debug, Clone, Serialize)]
pub struct AccrualPolicy {
    /// Base salary assumed for staff without a compensation profile.
    pub default_base_salary: Decimal,
    /// Used if a month somehow has no working days.
    pub fallback_working_days: u32,
    pub count_saturdays: bool,
    /// Any of these tags zeroes the day's amount.
    pub unpaid_tags: Vec<StatusTag>,
}

impl Default for AccrualPolicy {
    fn default() -> Self {
        Self {
            default_base_salary: Decimal::from(180_000),
            fallback_working_days: 22,
            count_saturdays: false,
            unpaid_tags: vec![StatusTag::Absent, StatusTag::Scheduled, StatusTag::NoClockIn],
        }
    }
}
