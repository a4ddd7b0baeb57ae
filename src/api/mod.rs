pub mod calendar;
pub mod staff_attendance;
