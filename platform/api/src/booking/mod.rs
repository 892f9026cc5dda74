pub mod pricing;
pub mod schedule;

pub use pricing::{quote, Quote};
pub use schedule::{free_slots, overlaps, validate, ScheduleError, TimeWindow};
