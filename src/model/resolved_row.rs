use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::shift_plan::ShiftStatus;
use crate::model::status::StatusSet;

/// One projected (staff, date) row. Recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResolvedAttendanceRow {
    pub staff_id: String,

    #[schema(example = "2025-03-12", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(value_type = Vec<String>, example = json!(["late_arrival"]))]
    pub statuses: StatusSet,

    /// Local `HH:MM`.
    #[schema(example = "09:05")]
    pub actual_start: Option<String>,

    #[schema(example = "18:02")]
    pub actual_end: Option<String>,

    pub late_minutes: u32,
    pub early_leave_minutes: u32,

    pub shift_status: Option<ShiftStatus>,

    #[schema(value_type = String, example = "8571")]
    pub daily_accrual: Decimal,

    #[schema(value_type = String, example = "8571")]
    pub amount: Decimal,

    #[schema(value_type = String, example = "0")]
    pub penalties: Decimal,
}
