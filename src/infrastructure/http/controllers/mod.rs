pub mod holiday_banners;
pub mod store_info;
pub mod store_timings;
