use crate::domain::entities::{
    DayOfWeek, DayRecord, HolidayBanner, SpecialHourOverride, StoreConfigRecord, StoredDay,
    TimeRangeRecord, WeeklySchedule,
};
use crate::domain::ports::store_config_repository::StoreConfigRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{any::AnyRow, Row};

const SINGLETON_ID: i64 = 1;
const DATE_FORMAT: &str = "%Y-%m-%d";

fn stored_day_from_row(row: &AnyRow) -> ApiResult<StoredDay> {
    let day: String = row.try_get("day")?;
    let raw_split_hours: String = row.try_get("split_hours")?;

    // The open/close columns only summarize the ranges, so they cannot stand in for them
    let split_hours = match serde_json::from_str::<Vec<TimeRangeRecord>>(&raw_split_hours) {
        Ok(ranges) => ranges,
        Err(e) => {
            return Ok(StoredDay::Unreadable {
                day,
                reason: format!("malformed split hours: {}", e),
            });
        }
    };

    Ok(StoredDay::Record(DayRecord {
        is_closed: row.try_get::<i64, _>("is_closed")? != 0,
        open: row.try_get("open_time")?,
        close: row.try_get("close_time")?,
        split_hours,
        day,
    }))
}

fn holiday_banner_from_row(row: &AnyRow) -> ApiResult<Option<HolidayBanner>> {
    let title: String = row.try_get("title")?;
    let start_date: String = row.try_get("start_date")?;
    let end_date: String = row.try_get("end_date")?;

    let (Ok(start_date), Ok(end_date)) = (
        NaiveDate::parse_from_str(&start_date, DATE_FORMAT),
        NaiveDate::parse_from_str(&end_date, DATE_FORMAT),
    ) else {
        tracing::warn!("Skipping holiday banner '{}' with malformed dates", title);
        return Ok(None);
    };

    let raw_special_hours: String = row.try_get("special_hours")?;
    let special_hours =
        match serde_json::from_str::<Vec<SpecialHourOverride>>(&raw_special_hours) {
            Ok(hours) => hours,
            Err(e) => {
                tracing::warn!("Ignoring malformed special hours on banner '{}': {}", title, e);
                Vec::new()
            }
        };

    Ok(Some(HolidayBanner {
        id: row.try_get("id")?,
        title,
        message: row.try_get("message")?,
        image_url: row.try_get("image_url")?,
        is_active: row.try_get::<i64, _>("is_active")? != 0,
        start_date,
        end_date,
        special_hours,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    }))
}

fn banners_from_rows(rows: &[AnyRow]) -> ApiResult<Vec<HolidayBanner>> {
    let mut banners = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(banner) = holiday_banner_from_row(row)? {
            banners.push(banner);
        }
    }
    Ok(banners)
}

const SELECT_BANNERS: &str = "SELECT id, title, message, image_url, is_active, start_date, end_date,
        special_hours, created_at, updated_at
 FROM holiday_banners";

impl Database {
    /// Insert the singleton and its all-closed week. Safe to race: only the
    /// caller whose insert lands seeds the day rows.
    async fn create_store_config(&self, default_store_name: &str) -> ApiResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        let created = sqlx::query(
            "INSERT INTO store_config (id, store_name, manual_open, last_updated, created_at)
             VALUES (?, ?, 1, ?, ?)
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(SINGLETON_ID)
        .bind(default_store_name)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if created {
            for day in DayOfWeek::ALL {
                sqlx::query(
                    "INSERT INTO store_timings (day, is_closed, open_time, close_time, split_hours, updated_at)
                     VALUES (?, 1, '00:00', '00:00', '[]', ?)
                     ON CONFLICT(day) DO NOTHING",
                )
                .bind(day.as_str())
                .bind(&now)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;

        if created {
            tracing::info!("Created default store configuration for '{}'", default_store_name);
        }
        Ok(())
    }

    async fn read_store_config(&self) -> ApiResult<StoreConfigRecord> {
        // Single read transaction so the week is never observed half-replaced
        let mut tx = self.pool.begin().await?;

        let config_row = sqlx::query(
            "SELECT store_name, manual_open, last_updated, created_at
             FROM store_config
             WHERE id = ?",
        )
        .bind(SINGLETON_ID)
        .fetch_one(&mut *tx)
        .await?;

        let timing_rows = sqlx::query(
            "SELECT day, is_closed, open_time, close_time, split_hours
             FROM store_timings",
        )
        .fetch_all(&mut *tx)
        .await?;

        let banner_rows = sqlx::query(&format!("{} ORDER BY created_at, id", SELECT_BANNERS))
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let timings = timing_rows
            .iter()
            .map(stored_day_from_row)
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(StoreConfigRecord {
            store_name: config_row.try_get("store_name")?,
            manual_open: config_row.try_get::<i64, _>("manual_open")? != 0,
            last_updated: config_row.try_get("last_updated")?,
            created_at: config_row.try_get("created_at")?,
            timings,
            holiday_banners: banners_from_rows(&banner_rows)?,
        })
    }
}

#[async_trait]
impl StoreConfigRepository for Database {
    async fn get_or_create_store_config(&self, default_store_name: &str) -> ApiResult<StoreConfigRecord> {
        let exists = sqlx::query("SELECT id FROM store_config WHERE id = ?")
            .bind(SINGLETON_ID)
            .fetch_optional(&self.pool)
            .await?
            .is_some();

        if !exists {
            self.create_store_config(default_store_name).await?;
        }

        self.read_store_config().await
    }

    async fn replace_weekly_schedule(&self, schedule: &WeeklySchedule) -> ApiResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM store_timings")
            .execute(&mut *tx)
            .await?;

        for day in schedule.iter() {
            let record = day.to_record();
            let split_hours = serde_json::to_string(&record.split_hours)?;

            sqlx::query(
                "INSERT INTO store_timings (day, is_closed, open_time, close_time, split_hours, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&record.day)
            .bind(record.is_closed as i64)
            .bind(&record.open)
            .bind(&record.close)
            .bind(&split_hours)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE store_config SET last_updated = ? WHERE id = ?")
            .bind(&now)
            .bind(SINGLETON_ID)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Weekly schedule replaced ({} days)", schedule.len());
        Ok(())
    }

    async fn update_store_info(&self, store_name: Option<&str>, manual_open: Option<bool>) -> ApiResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE store_config
             SET store_name = COALESCE(?, store_name),
                 manual_open = COALESCE(?, manual_open),
                 last_updated = ?
             WHERE id = ?",
        )
        .bind(store_name)
        .bind(manual_open.map(|open| open as i64))
        .bind(&now)
        .bind(SINGLETON_ID)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "Store info updated: store_name={:?}, manual_open={:?}",
            store_name,
            manual_open
        );
        Ok(())
    }

    async fn list_holiday_banners(&self) -> ApiResult<Vec<HolidayBanner>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at, id", SELECT_BANNERS))
            .fetch_all(&self.pool)
            .await?;

        banners_from_rows(&rows)
    }

    async fn get_holiday_banner_by_title(&self, title: &str) -> ApiResult<Option<HolidayBanner>> {
        let row = sqlx::query(&format!("{} WHERE title_key = ?", SELECT_BANNERS))
            .bind(HolidayBanner::title_key(title))
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => holiday_banner_from_row(&row),
            None => Ok(None),
        }
    }

    async fn upsert_holiday_banner(&self, banner: &HolidayBanner) -> ApiResult<()> {
        let special_hours = serde_json::to_string(&banner.special_hours)?;

        sqlx::query(
            "INSERT INTO holiday_banners
                (id, title, title_key, message, image_url, is_active, start_date, end_date,
                 special_hours, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(title_key) DO UPDATE SET
                title = excluded.title,
                message = excluded.message,
                image_url = excluded.image_url,
                is_active = excluded.is_active,
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                special_hours = excluded.special_hours,
                updated_at = excluded.updated_at",
        )
        .bind(&banner.id)
        .bind(&banner.title)
        .bind(HolidayBanner::title_key(&banner.title))
        .bind(&banner.message)
        .bind(banner.image_url.as_deref())
        .bind(banner.is_active as i64)
        .bind(banner.start_date.format(DATE_FORMAT).to_string())
        .bind(banner.end_date.format(DATE_FORMAT).to_string())
        .bind(&special_hours)
        .bind(&banner.created_at)
        .bind(&banner.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!("Holiday banner saved: title={}", banner.title);
        Ok(())
    }

    async fn insert_holiday_banner_if_absent(&self, banner: &HolidayBanner) -> ApiResult<bool> {
        let special_hours = serde_json::to_string(&banner.special_hours)?;

        let inserted = sqlx::query(
            "INSERT INTO holiday_banners
                (id, title, title_key, message, image_url, is_active, start_date, end_date,
                 special_hours, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(title_key) DO NOTHING",
        )
        .bind(&banner.id)
        .bind(&banner.title)
        .bind(HolidayBanner::title_key(&banner.title))
        .bind(&banner.message)
        .bind(banner.image_url.as_deref())
        .bind(banner.is_active as i64)
        .bind(banner.start_date.format(DATE_FORMAT).to_string())
        .bind(banner.end_date.format(DATE_FORMAT).to_string())
        .bind(&special_hours)
        .bind(&banner.created_at)
        .bind(&banner.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected()
            > 0;

        Ok(inserted)
    }

    async fn delete_holiday_banner(&self, title: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM holiday_banners WHERE title_key = ?")
            .bind(HolidayBanner::title_key(title))
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("Holiday banner deleted: title={}", title);
        }
        Ok(deleted)
    }
}
