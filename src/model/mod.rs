pub mod attendance;
pub mod compensation;
pub mod resolved_row;
pub mod shift_plan;
pub mod status;
