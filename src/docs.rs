use crate::api::calendar::{PolicyResponse, WorkingDaysQuery, WorkingDaysResponse};
use crate::api::staff_attendance::{
    DailyReportResponse, PayrollReportResponse, ResolveRequest, WeeklyReportResponse,
};
use crate::model::attendance::AttendanceRecord;
use crate::model::compensation::{SalaryType, StaffCompensationProfile};
use crate::model::resolved_row::ResolvedAttendanceRow;
use crate::model::shift_plan::{ShiftPlan, ShiftStatus};
use crate::schedule::summary::{PayrollSummary, WeeklyStaffRow};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kindergarten Staff Attendance API",
        version = "0.1.0",
        description = r#"
## Staff attendance & payroll accrual

Resolves what happened on each (staff member, day) of a kindergarten's schedule
and how much was earned for it.

### 🔹 Reports
- **Daily** rows: status tags, local punch times, lateness, daily accrual and amount
- **Weekly** grid per staff member (Monday first)
- **Payroll** totals per staff member over the range

Shift plans, attendance punches and compensation profiles are sent with each
request; nothing is stored.

### 🕒 Time
All calendar days and cut-off hours are evaluated in the organization's fixed
time zone (UTC+5 by default). Pass `reference_now` to evaluate as of a given instant.

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::staff_attendance::daily_report,
        crate::api::staff_attendance::weekly_report,
        crate::api::staff_attendance::payroll_report,

        crate::api::calendar::working_days,
        crate::api::calendar::attendance_policy
    ),
    components(
        schemas(
            ResolveRequest,
            DailyReportResponse,
            WeeklyReportResponse,
            PayrollReportResponse,
            ResolvedAttendanceRow,
            WeeklyStaffRow,
            PayrollSummary,
            ShiftPlan,
            ShiftStatus,
            AttendanceRecord,
            StaffCompensationProfile,
            SalaryType,
            WorkingDaysQuery,
            WorkingDaysResponse,
            PolicyResponse
        )
    ),
    tags(
        (name = "Staff attendance", description = "Attendance status resolution"),
        (name = "Payroll", description = "Daily accrual and payroll totals"),
        (name = "Calendar", description = "Working-day calendar"),
    )
)]
pub struct ApiDoc;
