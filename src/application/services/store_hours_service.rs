use crate::{
    config::Config,
    domain::entities::{
        DayOfWeek, DayRecord, StoreConfig, StoreInfoResponse, StoreStatus, TimeOfDay,
        UpdateStoreInfoRequest, UpdateTimingsRequest,
    },
    domain::errors::ScheduleError,
    domain::ports::{clock::Clock, store_config_repository::StoreConfigRepository},
    domain::services::{read_stored_schedule, resolve_status, SplitHoursPolicy, TimingNormalizer},
    infrastructure::http::middleware::error::{ApiError, ApiResult},
    infrastructure::observability::{
        SCHEDULE_ANOMALIES_TOTAL, SCHEDULE_UPDATES_TOTAL, STATUS_QUERIES_TOTAL,
    },
};
use chrono::{Datelike, NaiveDateTime};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Store-wide knobs shared by the hours and banner services
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Zone in which "now" is evaluated
    pub timezone: Tz,
    pub split_hours_policy: SplitHoursPolicy,
    /// Upper bound on the atomic weekly replace
    pub update_timeout: Duration,
    /// Name written into the singleton record when it is first created
    pub default_store_name: String,
}

impl StoreSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timezone: config.store_timezone,
            split_hours_policy: if config.strict_split_hours {
                SplitHoursPolicy::Strict
            } else {
                SplitHoursPolicy::Lenient
            },
            update_timeout: config.schedule_update_timeout,
            default_store_name: config.store_name.clone(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            split_hours_policy: SplitHoursPolicy::Lenient,
            update_timeout: Duration::from_millis(5000),
            default_store_name: "The Donut Nook".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct StoreHoursService {
    store_repo: Arc<dyn StoreConfigRepository>,
    clock: Arc<dyn Clock>,
    normalizer: TimingNormalizer,
    settings: Arc<StoreSettings>,
}

impl StoreHoursService {
    pub fn new(
        store_repo: Arc<dyn StoreConfigRepository>,
        clock: Arc<dyn Clock>,
        settings: StoreSettings,
    ) -> Self {
        Self {
            store_repo,
            clock,
            normalizer: TimingNormalizer::new(settings.split_hours_policy),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Current wall-clock time in the store's zone
    pub fn local_now(&self) -> NaiveDateTime {
        self.clock
            .now()
            .with_timezone(&self.settings.timezone)
            .naive_local()
    }

    /// Load the singleton and rebuild its schedule. Unreadable day rows are
    /// reported and skipped; they never fail the load.
    pub async fn load_store_config(&self) -> ApiResult<StoreConfig> {
        let record = self
            .store_repo
            .get_or_create_store_config(&self.settings.default_store_name)
            .await?;

        let (schedule, anomalies) = read_stored_schedule(&record.timings);
        for anomaly in &anomalies {
            tracing::warn!("Stored schedule anomaly: {}", anomaly);
            metrics::counter!(SCHEDULE_ANOMALIES_TOTAL).increment(1);
        }

        Ok(StoreConfig {
            store_name: record.store_name,
            schedule,
            holiday_banners: record.holiday_banners,
            manual_open: record.manual_open,
            last_updated: record.last_updated,
        })
    }

    pub async fn get_timings(&self) -> ApiResult<BTreeMap<DayOfWeek, DayRecord>> {
        let config = self.load_store_config().await?;
        Ok(config.schedule.to_records())
    }

    /// Validate a full week and replace the stored one in a single transaction.
    /// Validation failures are returned before anything is written.
    pub async fn update_timings(
        &self,
        request: UpdateTimingsRequest,
    ) -> ApiResult<BTreeMap<DayOfWeek, DayRecord>> {
        let schedule = match self.normalizer.normalize_week(request.into_payload()) {
            Ok(schedule) => schedule,
            Err(err) => {
                tracing::info!("Rejected schedule update: {}", err);
                metrics::counter!(SCHEDULE_UPDATES_TOTAL, "result" => "rejected").increment(1);
                return Err(err.into());
            }
        };

        let replace = async {
            self.store_repo
                .get_or_create_store_config(&self.settings.default_store_name)
                .await?;
            self.store_repo.replace_weekly_schedule(&schedule).await
        };

        let failure = match tokio::time::timeout(self.settings.update_timeout, replace).await {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err.to_string()),
            Err(_) => Some(format!(
                "timed out after {}ms",
                self.settings.update_timeout.as_millis()
            )),
        };

        if let Some(reason) = failure {
            tracing::error!("Weekly schedule replace failed: {}", reason);
            metrics::counter!(SCHEDULE_UPDATES_TOTAL, "result" => "failed").increment(1);
            return Err(ScheduleError::ScheduleUpdateFailed(reason).into());
        }

        metrics::counter!(SCHEDULE_UPDATES_TOTAL, "result" => "success").increment(1);
        Ok(schedule.to_records())
    }

    /// Status at the current instant. A read never fails: when the store record
    /// cannot be loaded the answer is "unknown".
    pub async fn get_status(&self) -> StoreStatus {
        let now = self.local_now();

        let status = match self.load_store_config().await {
            Ok(config) => resolve_status(&config, now),
            Err(err) => {
                let err = ScheduleError::ConfigUnavailable(err.to_string());
                tracing::error!("{}", err);
                StoreStatus::unknown().at(
                    DayOfWeek::from_weekday(now.weekday()),
                    TimeOfDay::from_naive_time(&now.time()),
                )
            }
        };

        metrics::counter!(STATUS_QUERIES_TOTAL, "outcome" => status.status.as_str()).increment(1);
        status
    }

    pub async fn get_store_info(&self) -> ApiResult<StoreInfoResponse> {
        let config = self.load_store_config().await?;

        Ok(StoreInfoResponse {
            store_name: config.store_name,
            is_open: config.manual_open,
            last_updated: config.last_updated,
            timings: config.schedule.to_records(),
            holiday_banners: config.holiday_banners,
        })
    }

    pub async fn update_store_info(
        &self,
        request: UpdateStoreInfoRequest,
    ) -> ApiResult<StoreInfoResponse> {
        let store_name = request.store_name.as_deref().map(str::trim);
        if store_name == Some("") {
            return Err(ApiError::BadRequest("storeName cannot be empty".to_string()));
        }

        self.store_repo
            .get_or_create_store_config(&self.settings.default_store_name)
            .await?;
        self.store_repo
            .update_store_info(store_name, request.is_open)
            .await?;

        self.get_store_info().await
    }
}
