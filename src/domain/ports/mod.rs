pub mod clock;
pub mod store_config_repository;
