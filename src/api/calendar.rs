use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::error::ApiError;
use crate::schedule::calendar::working_days_in_month;
use crate::schedule::policy::{AccrualPolicy, AttendancePolicy};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct WorkingDaysQuery {
    #[schema(example = 2024)]
    pub year: i32,

    /// 1-based month
    #[schema(example = 2)]
    pub month: u32,
}

#[derive(Serialize, ToSchema)]
pub struct WorkingDaysResponse {
    pub year: i32,
    pub month: u32,
    pub working_days: u32,
}

#[derive(Serialize, ToSchema)]
pub struct PolicyResponse {
    pub tz_offset_minutes: i32,
    #[schema(value_type = Object)]
    pub attendance: AttendancePolicy,
    #[schema(value_type = Object)]
    pub accrual: AccrualPolicy,
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar/working-days",
    params(WorkingDaysQuery),
    responses(
        (status = 200, body = WorkingDaysResponse, example = json!({
            "year": 2024, "month": 2, "working_days": 21
        })),
        (status = 400, description = "No such month")
    ),
    tag = "Calendar"
)]
pub async fn working_days(
    config: web::Data<Config>,
    query: web::Query<WorkingDaysQuery>,
) -> actix_web::Result<impl Responder> {
    let WorkingDaysQuery { year, month } = query.into_inner();

    let working_days = working_days_in_month(year, month, config.accrual_policy.count_saturdays)
        .ok_or(ApiError::InvalidMonth(month))?;

    Ok(HttpResponse::Ok().json(WorkingDaysResponse {
        year,
        month,
        working_days,
    }))
}

/// Active attendance and accrual policy
#[utoipa::path(
    get,
    path = "/api/v1/attendance-policy",
    responses((status = 200, body = PolicyResponse)),
    tag = "Staff attendance"
)]
pub async fn attendance_policy(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(PolicyResponse {
        tz_offset_minutes: config.zone.offset_minutes(),
        attendance: config.attendance_policy.clone(),
        accrual: config.accrual_policy.clone(),
    })
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::routes::report_routes;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::Value;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Config::for_tests()))
                    .service(web::scope("/api/v1").configure(report_routes)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn counts_working_days() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/calendar/working-days?year=2024&month=2")
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["working_days"], 21);
    }

    #[actix_web::test]
    async fn rejects_month_thirteen() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/calendar/working-days?year=2024&month=13")
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn exposes_policy() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/v1/attendance-policy").to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["tz_offset_minutes"], 300);
        assert_eq!(body["attendance"]["late_threshold_minutes"], 90);
        assert_eq!(body["attendance"]["shift_status_mapping"]["late"], "absent");
        assert_eq!(body["accrual"]["default_base_salary"], "180000");
    }
}
