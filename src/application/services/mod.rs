pub mod holiday_banner_service;
pub mod store_hours_service;

pub use holiday_banner_service::HolidayBannerService;
pub use store_hours_service::{StoreHoursService, StoreSettings};
