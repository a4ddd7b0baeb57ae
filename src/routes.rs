use crate::api::{calendar, staff_attendance};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP limiter allowing `requests_per_min` with an equal burst.
pub fn build_limiter_config(requests_per_min: u32) -> Option<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiter: &LimiterConfig) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(limiter)) // rate limiting
            .configure(report_routes),
    );
}

/// Report routes relative to the API prefix.
pub fn report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/staff-attendance")
            // /staff-attendance/daily
            .service(web::resource("/daily").route(web::post().to(staff_attendance::daily_report)))
            // /staff-attendance/weekly
            .service(
                web::resource("/weekly").route(web::post().to(staff_attendance::weekly_report)),
            )
            // /staff-attendance/payroll
            .service(
                web::resource("/payroll").route(web::post().to(staff_attendance::payroll_report)),
            ),
    )
    .service(
        web::resource("/calendar/working-days").route(web::get().to(calendar::working_days)),
    )
    .service(web::resource("/attendance-policy").route(web::get().to(calendar::attendance_policy)));
}
