use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

/// Counts working days in `month` (1-based). Sundays never count; Saturdays
/// only when `count_saturdays` is set. `None` for an invalid month.
pub fn working_days_in_month(year: i32, month: u32, count_saturdays: bool) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let count = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter(|d| match d.weekday() {
            Weekday::Sun => false,
            Weekday::Sat => count_saturdays,
            _ => true,
        })
        .count();

    Some(count as u32)
}

/// Per-batch memo of working-day counts keyed by (year, month).
///
/// Lives only as long as one report computation.
#[derive(Debug)]
pub struct WorkingDayCalendar {
    count_saturdays: bool,
    fallback: u32,
    cache: HashMap<(i32, u32), u32>,
}

impl WorkingDayCalendar {
    pub fn new(count_saturdays: bool, fallback: u32) -> Self {
        Self {
            count_saturdays,
            fallback: fallback.max(1),
            cache: HashMap::new(),
        }
    }

    /// Working days in the month containing `date`; never zero.
    pub fn working_days_for(&mut self, date: NaiveDate) -> u32 {
        let key = (date.year(), date.month());
        let (count_saturdays, fallback) = (self.count_saturdays, self.fallback);

        *self.cache.entry(key).or_insert_with(|| {
            match working_days_in_month(key.0, key.1, count_saturdays) {
                Some(0) | None => fallback,
                Some(n) => n,
            }
        })
    }
}

#[cfg(test)]
impl WorkingDayCalendar {
    fn cached_months(&self) -> usize {
        self.cache.len()
    }
}
