use anyhow::{Context, Result, anyhow, ensure};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

use crate::schedule::clock::LocalZone;
use crate::schedule::policy::{AccrualPolicy, AttendancePolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,
    pub log_level: tracing::Level,

    // Rate limiting
    pub rate_reports_per_min: u32,

    /// Longest accepted report range, in days.
    pub max_range_days: i64,

    pub zone: LocalZone,
    pub attendance_policy: AttendancePolicy,
    pub accrual_policy: AccrualPolicy,
}

/// Reads `key` through `lookup`, falling back to `default` when unset.
fn var_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("{key}={raw:?} is invalid: {e}"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds and validates the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = &lookup;

        let tz_offset_minutes: i32 = var_or(var, "TZ_OFFSET_MINUTES", "300")?; // Asia/Almaty
        let zone = LocalZone::from_offset_minutes(tz_offset_minutes).with_context(|| {
            format!("TZ_OFFSET_MINUTES={tz_offset_minutes} is not a valid UTC offset")
        })?;

        let defaults = AttendancePolicy::default();
        let attendance_policy = AttendancePolicy {
            late_threshold_minutes: var_or(var, "LATE_THRESHOLD_MINUTES", "90")?,
            early_leave_threshold_minutes: var_or(var, "EARLY_LEAVE_THRESHOLD_MINUTES", "90")?,
            day_end_cutoff_hour: var_or(var, "DAY_END_CUTOFF_HOUR", "19")?,
            punch_timeout_cutoff_hour: var_or(var, "PUNCH_TIMEOUT_CUTOFF_HOUR", "23")?,
            ..defaults
        };
        ensure!(
            attendance_policy.day_end_cutoff_hour <= 23,
            "DAY_END_CUTOFF_HOUR must be between 0 and 23"
        );
        ensure!(
            attendance_policy.punch_timeout_cutoff_hour <= 23,
            "PUNCH_TIMEOUT_CUTOFF_HOUR must be between 0 and 23"
        );

        let accrual_policy = AccrualPolicy {
            default_base_salary: var_or::<Decimal>(var, "DEFAULT_BASE_SALARY", "180000")?,
            fallback_working_days: var_or(var, "FALLBACK_WORKING_DAYS", "22")?,
            count_saturdays: var_or(var, "COUNT_SATURDAYS", "false")?,
            ..AccrualPolicy::default()
        };
        ensure!(
            accrual_policy.fallback_working_days > 0,
            "FALLBACK_WORKING_DAYS must be positive"
        );

        let max_range_days: i64 = var_or(var, "MAX_RANGE_DAYS", "366")?;
        ensure!(max_range_days > 0, "MAX_RANGE_DAYS must be positive");

        Ok(Self {
            server_addr: var_or(var, "SERVER_ADDR", "127.0.0.1:8080")?,
            api_prefix: var_or(var, "API_PREFIX", "/api/v1")?,
            log_dir: var_or(var, "LOG_DIR", "logs")?,
            log_level: var_or(var, "LOG_LEVEL", "info")?,
            rate_reports_per_min: var_or(var, "RATE_REPORTS_PER_MIN", "600")?,
            max_range_days,
            zone,
            attendance_policy,
            accrual_policy,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults without touching the process environment.
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".into(),
            api_prefix: "/api/v1".into(),
            log_dir: "logs".into(),
            log_level: tracing::Level::INFO,
            rate_reports_per_min: 600,
            max_range_days: 366,
            zone: LocalZone::from_offset_minutes(300).expect("valid offset"),
            attendance_policy: AttendancePolicy::default(),
            accrual_policy: AccrualPolicy::default(),
        }
    }
}
