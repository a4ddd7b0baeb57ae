use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShiftStatus {
    Scheduled,
    Completed,
    InProgress,
    Late,
    Absent,
    PendingApproval,
}

/// A planned shift for one staff member on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "staff_id": "st-17",
    "date": "2025-03-12",
    "status": "scheduled"
}))]
pub struct ShiftPlan {
    pub staff_id: String,

    #[schema(example = "2025-03-12", format = "date", value_type = String)]
    pub date: NaiveDate,

    pub status: ShiftStatus,
}
