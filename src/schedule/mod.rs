//! Attendance status resolution and payroll accrual.
//!
//! Everything under this module is synchronous and clock-free: the evaluation
//! instant, time zone and policies are passed in by the caller.

pub mod accrual;
pub mod assembler;
pub mod calendar;
pub mod clock;
pub mod policy;
pub mod resolver;
pub mod summary;
