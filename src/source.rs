use anyhow::Result;
use std::future::Future;

use crate::model::attendance::AttendanceRecord;
use crate::model::compensation::StaffCompensationProfile;
use crate::model::shift_plan::ShiftPlan;
use crate::schedule::assembler::{RecordBatch, ReportQuery};

/// Supplies the records a report is computed from.
///
/// The three reads are independent; callers may issue them concurrently.
pub trait RecordSource {
    fn shifts(&self, query: &ReportQuery) -> impl Future<Output = Result<Vec<ShiftPlan>>>;

    fn attendance(&self, query: &ReportQuery)
    -> impl Future<Output = Result<Vec<AttendanceRecord>>>;

    fn profiles(
        &self,
        query: &ReportQuery,
    ) -> impl Future<Output = Result<Vec<StaffCompensationProfile>>>;
}

/// Fetches all three collections concurrently and waits for every one.
pub async fn fetch_batch<S: RecordSource>(source: &S, query: &ReportQuery) -> Result<RecordBatch> {
    let (shifts, attendance, profiles) = futures::try_join!(
        source.shifts(query),
        source.attendance(query),
        source.profiles(query),
    )?;

    Ok(RecordBatch {
        shifts,
        attendance,
        profiles,
    })
}

/// Records handed over directly by the caller, e.g. in a request body.
pub struct InlineRecords {
    batch: RecordBatch,
}

impl InlineRecords {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }
}

impl RecordSource for InlineRecords {
    async fn shifts(&self, _query: &ReportQuery) -> Result<Vec<ShiftPlan>> {
        Ok(self.batch.shifts.clone())
    }

    async fn attendance(&self, _query: &ReportQuery) -> Result<Vec<AttendanceRecord>> {
        Ok(self.batch.attendance.clone())
    }

    async fn profiles(&self, _query: &ReportQuery) -> Result<Vec<StaffCompensationProfile>> {
        Ok(self.batch.profiles.clone())
    }
}
