use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::model::attendance::AttendanceRecord;
use crate::model::compensation::StaffCompensationProfile;
use crate::model::resolved_row::ResolvedAttendanceRow;
use crate::model::shift_plan::ShiftPlan;
use crate::schedule::assembler::{RecordBatch, ReportContext, ReportQuery, assemble_daily};
use crate::schedule::clock::ReferenceClock;
use crate::schedule::summary::{
    PayrollSummary, WeeklyStaffRow, assemble_weekly, summarize_payroll,
};
use crate::source::{InlineRecords, fetch_batch};

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({
    "from": "2025-03-10",
    "to": "2025-03-16",
    "staff_id": null,
    "reference_now": "2025-03-12T09:00:00Z",
    "shifts": [{ "staff_id": "st-17", "date": "2025-03-11", "status": "scheduled" }],
    "attendance": [{
        "staff_id": "st-17",
        "date": "2025-03-12",
        "actual_start": "2025-03-12T04:05:00Z",
        "late_minutes": 95
    }],
    "profiles": [{ "staff_id": "st-17", "base_salary": "180000", "salary_type": "month" }]
}))]
pub struct ResolveRequest {
    #[schema(example = "2025-03-10", format = "date", value_type = String)]
    pub from: NaiveDate,

    #[schema(example = "2025-03-16", format = "date", value_type = String)]
    pub to: NaiveDate,

    /// Restrict the report to one staff member
    pub staff_id: Option<String>,

    /// Evaluation instant; the server clock when omitted
    #[schema(format = "date-time", value_type = Option<String>)]
    pub reference_now: Option<DateTime<Utc>>,

    #[serde(default)]
    pub shifts: Vec<ShiftPlan>,

    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,

    #[serde(default)]
    pub profiles: Vec<StaffCompensationProfile>,
}

#[derive(Serialize, ToSchema)]
pub struct DailyReportResponse {
    #[schema(value_type = String, format = "uuid")]
    pub batch_id: Uuid,
    pub rows: Vec<ResolvedAttendanceRow>,
}

#[derive(Serialize, ToSchema)]
pub struct WeeklyReportResponse {
    #[schema(value_type = String, format = "uuid")]
    pub batch_id: Uuid,
    pub weeks: Vec<WeeklyStaffRow>,
}

#[derive(Serialize, ToSchema)]
pub struct PayrollReportResponse {
    #[schema(value_type = String, format = "uuid")]
    pub batch_id: Uuid,
    pub staff: Vec<PayrollSummary>,
}

/// Report dates must fall within these years.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn validate_date(field: &'static str, date: NaiveDate) -> Result<(), ApiError> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(())
    } else {
        Err(ApiError::OutOfRange {
            field,
            value: date.to_string(),
        })
    }
}

fn validate_range(config: &Config, from: NaiveDate, to: NaiveDate) -> Result<(), ApiError> {
    validate_date("from", from)?;
    validate_date("to", to)?;
    if from > to {
        return Err(ApiError::InvalidRange { from, to });
    }
    let days = (to - from).num_days() + 1;
    if days > config.max_range_days {
        return Err(ApiError::RangeTooLong {
            days,
            max: config.max_range_days,
        });
    }
    Ok(())
}

/// Validates the request, fetches its records and projects the daily rows.
async fn resolve_rows(
    config: &Config,
    payload: ResolveRequest,
) -> Result<(Uuid, Vec<ResolvedAttendanceRow>), ApiError> {
    validate_range(config, payload.from, payload.to)?;

    let batch_id = Uuid::new_v4();
    // the only wall-clock read; everything below gets it injected
    let reference_now = payload.reference_now.unwrap_or_else(Utc::now);
    let clock = ReferenceClock::new(reference_now, &config.zone)
        .filter(|_| SUPPORTED_YEARS.contains(&reference_now.year()))
        .ok_or_else(|| ApiError::OutOfRange {
            field: "reference_now",
            value: reference_now.to_string(),
        })?;
    let query = ReportQuery {
        from: payload.from,
        to: payload.to,
        staff_id: payload.staff_id,
    };

    let source = InlineRecords::new(RecordBatch {
        shifts: payload.shifts,
        attendance: payload.attendance,
        profiles: payload.profiles,
    });
    let batch = fetch_batch(&source, &query).await.map_err(|e| {
        error!(error = %e, %batch_id, "Failed to fetch attendance records");
        ApiError::SourceUnavailable
    })?;

    let ctx = ReportContext {
        clock,
        zone: &config.zone,
        attendance_policy: &config.attendance_policy,
        accrual_policy: &config.accrual_policy,
    };
    let rows = assemble_daily(&batch, &query, &ctx);

    info!(
        %batch_id,
        from = %query.from,
        to = %query.to,
        staff_id = query.staff_id.as_deref().unwrap_or("*"),
        rows = rows.len(),
        "Attendance rows resolved"
    );

    Ok((batch_id, rows))
}

/// Daily attendance rows
#[utoipa::path(
    post,
    path = "/api/v1/staff-attendance/daily",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Resolved rows sorted by date", body = DailyReportResponse),
        (status = 400, description = "Invalid range", body = Object, example = json!({
            "message": "from (2025-03-16) cannot be after to (2025-03-10)"
        })),
        (status = 502, description = "Record source failed")
    ),
    tag = "Staff attendance"
)]
pub async fn daily_report(
    config: web::Data<Config>,
    payload: web::Json<ResolveRequest>,
) -> actix_web::Result<impl Responder> {
    let (batch_id, rows) = resolve_rows(&config, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DailyReportResponse { batch_id, rows }))
}

/// Weekly attendance grid
#[utoipa::path(
    post,
    path = "/api/v1/staff-attendance/weekly",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Rows grouped per staff and ISO week", body = WeeklyReportResponse),
        (status = 400, description = "Invalid range"),
        (status = 502, description = "Record source failed")
    ),
    tag = "Staff attendance"
)]
pub async fn weekly_report(
    config: web::Data<Config>,
    payload: web::Json<ResolveRequest>,
) -> actix_web::Result<impl Responder> {
    let (batch_id, rows) = resolve_rows(&config, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(WeeklyReportResponse {
        batch_id,
        weeks: assemble_weekly(&rows),
    }))
}

/// Payroll totals for the range
#[utoipa::path(
    post,
    path = "/api/v1/staff-attendance/payroll",
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Accrued pay per staff member", body = PayrollReportResponse),
        (status = 400, description = "Invalid range"),
        (status = 502, description = "Record source failed")
    ),
    tag = "Payroll"
)]
pub async fn payroll_report(
    config: web::Data<Config>,
    payload: web::Json<ResolveRequest>,
) -> actix_web::Result<impl Responder> {
    let (batch_id, rows) = resolve_rows(&config, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PayrollReportResponse {
        batch_id,
        staff: summarize_payroll(&rows),
    }))
}
