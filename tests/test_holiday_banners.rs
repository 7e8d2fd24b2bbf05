mod helpers;

use chrono::NaiveDate;
use helpers::*;
use storefront::domain::entities::{SpecialHourRequest, UpsertHolidayBannerRequest};
use storefront::infrastructure::http::middleware::error::ApiError;

const NOW: &str = "2026-10-19 10:00";

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn banner(title: &str, start: &str, end: &str, active: bool) -> UpsertHolidayBannerRequest {
    UpsertHolidayBannerRequest {
        title: Some(title.to_string()),
        message: Some(format!("{} hours", title)),
        is_active: Some(active),
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_upsert_replaces_banner_with_same_title() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    let first = banners
        .upsert_banner(banner("Halloween", "2026-10-25", "2026-10-31", false))
        .await
        .unwrap();
    banners
        .upsert_banner(banner("Diwali", "2026-11-01", "2026-11-08", false))
        .await
        .unwrap();

    let mut replacement = banner("HALLOWEEN", "2026-10-28", "2026-10-31", true);
    replacement.special_hours = vec![SpecialHourRequest {
        date: Some("2026-10-31".to_string()),
        open: Some("10:00".to_string()),
        close: Some("22:00".to_string()),
        is_closed: None,
    }];
    let updated = banners.upsert_banner(replacement).await.unwrap();
    assert_eq!(updated.id, first.id);

    let all = banners.list_banners().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "HALLOWEEN");
    assert_eq!(all[0].start_date, date("2026-10-28"));
    assert!(all[0].is_active);
    assert_eq!(all[0].special_hours.len(), 1);
    assert_eq!(all[1].title, "Diwali");
}

#[tokio::test]
async fn test_active_banners_cover_today() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    for request in [
        banner("Harvest Week", "2026-10-19", "2026-10-25", true),
        banner("Last Week", "2026-10-10", "2026-10-18", true),
        banner("Draft", "2026-10-01", "2026-10-31", false),
    ] {
        banners.upsert_banner(request).await.unwrap();
    }

    let active = banners.active_banners().await.unwrap();
    let titles: Vec<_> = active.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Harvest Week"]);
}

#[tokio::test]
async fn test_invalid_banner_is_rejected() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    let reversed = banner("Backwards", "2026-10-31", "2026-10-01", true);
    assert!(matches!(
        banners.upsert_banner(reversed).await,
        Err(ApiError::BadRequest(_))
    ));

    let mut missing_message = banner("Quiet", "2026-10-01", "2026-10-02", true);
    missing_message.message = None;
    assert!(matches!(
        banners.upsert_banner(missing_message).await,
        Err(ApiError::BadRequest(_))
    ));

    assert!(banners.list_banners().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_banner_by_title() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    banners
        .upsert_banner(banner("Halloween", "2026-10-25", "2026-10-31", true))
        .await
        .unwrap();

    banners.delete_banner("halloween").await.unwrap();
    assert!(banners.list_banners().await.unwrap().is_empty());

    assert!(matches!(
        banners.delete_banner("halloween").await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_seed_national_holidays_is_idempotent() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    // An operator-edited Christmas banner must survive seeding
    banners
        .upsert_banner(banner("Christmas Day", "2026-12-20", "2026-12-26", true))
        .await
        .unwrap();

    let created = banners.seed_national_holidays(Some(2026)).await.unwrap();
    assert_eq!(created.len(), 10);
    assert!(created.iter().all(|b| !b.is_active));

    let thanksgiving = created
        .iter()
        .find(|b| b.title == "Thanksgiving Day")
        .unwrap();
    assert_eq!(thanksgiving.start_date, date("2026-11-11"));
    assert_eq!(thanksgiving.end_date, date("2026-11-26"));
    assert_eq!(thanksgiving.special_hours.len(), 1);
    assert!(thanksgiving.special_hours[0].is_closed);

    let christmas = banners
        .list_banners()
        .await
        .unwrap()
        .into_iter()
        .find(|b| b.title == "Christmas Day")
        .unwrap();
    assert!(christmas.is_active);
    assert_eq!(christmas.start_date, date("2026-12-20"));

    let again = banners.seed_national_holidays(Some(2026)).await.unwrap();
    assert!(again.is_empty());
    assert_eq!(banners.list_banners().await.unwrap().len(), 11);
}

#[tokio::test]
async fn test_seed_defaults_to_current_year_and_rejects_bad_years() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    let created = banners.seed_national_holidays(None).await.unwrap();
    let independence = created
        .iter()
        .find(|b| b.title == "Independence Day")
        .unwrap();
    assert_eq!(independence.end_date, date("2026-07-04"));

    assert!(matches!(
        banners.seed_national_holidays(Some(20260)).await,
        Err(ApiError::BadRequest(_))
    ));
}

#[tokio::test]
async fn test_image_url_is_stored_and_read_back() {
    let test_db = setup_test_db().await;
    let (_, banners) = services_for(test_db.db(), FixedClock::at(NOW));

    let mut with_image = banner("Harvest Fair", "2026-10-20", "2026-10-22", true);
    with_image.image_url = Some(" https://cdn.example.com/harvest.png ".to_string());
    banners.upsert_banner(with_image).await.unwrap();
    banners
        .upsert_banner(banner("Quiet Week", "2026-11-02", "2026-11-06", true))
        .await
        .unwrap();

    let all = banners.list_banners().await.unwrap();
    assert_eq!(
        all[0].image_url.as_deref(),
        Some("https://cdn.example.com/harvest.png")
    );
    assert!(all[1].image_url.is_none());
}
