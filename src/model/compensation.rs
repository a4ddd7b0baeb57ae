use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SalaryType {
    #[default]
    Month,
    Shift,
    Day,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "staff_id": "st-17",
    "base_salary": "180000",
    "salary_type": "month",
    "shift_rate": null
}))]
pub struct StaffCompensationProfile {
    pub staff_id: String,

    #[schema(value_type = String, example = "180000")]
    pub base_salary: Decimal,

    #[serde(default)]
    pub salary_type: SalaryType,

    #[schema(value_type = Option<String>, example = "9000")]
    #[serde(default)]
    pub shift_rate: Option<Decimal>,
}
