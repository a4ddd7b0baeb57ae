use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "from ({}) cannot be after to ({})", from, to)]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[display(fmt = "range of {} days exceeds the limit of {} days", days, max)]
    RangeTooLong { days: i64, max: i64 },

    #[display(fmt = "{} {} is outside the supported calendar", field, value)]
    OutOfRange { field: &'static str, value: String },

    #[display(fmt = "month must be between 1 and 12, got {}", _0)]
    InvalidMonth(u32),

    #[display(fmt = "Failed to fetch attendance records")]
    SourceUnavailable,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SourceUnavailable => StatusCode::BAD_GATEWAY,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
