pub mod holiday_banner;
pub mod schedule;
pub mod store;
pub mod timing_input;

pub use holiday_banner::*;
pub use schedule::*;
pub use store::*;
pub use timing_input::*;
