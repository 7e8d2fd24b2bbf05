use crate::application::services::{HolidayBannerService, StoreHoursService, StoreSettings};
use crate::config::Config;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::store_config_repository::StoreConfigRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::runtime::SystemClock;
use std::sync::Arc;

/// Wire services over the given repository and clock
pub fn build_services(
    store_repo: Arc<dyn StoreConfigRepository>,
    clock: Arc<dyn Clock>,
    settings: StoreSettings,
) -> (StoreHoursService, HolidayBannerService) {
    let holiday_banner_service =
        HolidayBannerService::new(store_repo.clone(), clock.clone(), settings.timezone);
    let store_hours_service = StoreHoursService::new(store_repo, clock, settings);
    (store_hours_service, holiday_banner_service)
}

pub async fn build_app_state(
    db: Database,
    config: &Config,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let store_repo: Arc<dyn StoreConfigRepository> = Arc::new(db);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    let settings = StoreSettings::from_config(config);
    tracing::info!(
        "Store hours evaluated in {} (split hours policy: {:?}, update timeout: {:?})",
        settings.timezone,
        settings.split_hours_policy,
        settings.update_timeout
    );

    let (store_hours_service, holiday_banner_service) = build_services(store_repo, clock, settings);

    if config.admin_api_key.is_none() {
        tracing::warn!("ADMIN_API_KEY is not set; mutating routes are unprotected");
    }

    Ok(AppState {
        store_hours_service,
        holiday_banner_service,
        admin_api_key: config.admin_api_key.as_deref().map(Arc::from),
    })
}

/// Make sure the singleton store record exists before serving traffic
pub async fn initialize_store(db: &Database, config: &Config) -> ApiResult<()> {
    let record = db.get_or_create_store_config(&config.store_name).await?;
    tracing::info!(
        "Store '{}' ready ({} day records, {} holiday banners)",
        record.store_name,
        record.timings.len(),
        record.holiday_banners.len()
    );
    Ok(())
}
