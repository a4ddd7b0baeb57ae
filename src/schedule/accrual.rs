use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::compensation::{SalaryType, StaffCompensationProfile};
use crate::model::status::StatusSet;
use crate::schedule::policy::AccrualPolicy;

/// Money earned for one day before status is taken into account.
///
/// Shift workers earn their shift rate (or the base salary when no rate is
/// set); everyone else earns the base salary spread over the month's working
/// days, rounded to whole units with halves rounded up.
pub fn daily_accrual(
    profile: Option<&StaffCompensationProfile>,
    working_days_in_month: u32,
    policy: &AccrualPolicy,
) -> Decimal {
    let (base_salary, salary_type, shift_rate) = match profile {
        Some(p) => (p.base_salary, p.salary_type, p.shift_rate),
        None => (policy.default_base_salary, SalaryType::Month, None),
    };

    let accrual = match salary_type {
        SalaryType::Shift => match shift_rate {
            Some(rate) if rate > Decimal::ZERO => rate,
            _ => base_salary,
        },
        SalaryType::Month | SalaryType::Day => {
            let days = working_days_in_month.max(1);
            (base_salary / Decimal::from(days))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
    };

    accrual.max(Decimal::ZERO)
}

/// Amount actually credited for the day.
pub fn day_amount(daily_accrual: Decimal, statuses: &StatusSet, policy: &AccrualPolicy) -> Decimal {
    if policy.unpaid_tags.iter().any(|tag| statuses.contains(tag)) {
        Decimal::ZERO
    } else {
        daily_accrual
    }
}
