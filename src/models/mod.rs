pub mod day_summary;
pub mod keyed;
pub mod time_record;

pub use keyed::Keyed;
pub use time_record::{Duration, TimeRecord};
