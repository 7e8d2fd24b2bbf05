pub mod holiday_calendar;
pub mod status_resolver;
pub mod timing_normalizer;

pub use holiday_calendar::*;
pub use status_resolver::*;
pub use timing_normalizer::*;
