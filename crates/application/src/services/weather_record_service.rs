//! Weather record service - Create, update, query and delete weather records
//!
//! Validates incoming payloads, looks up weather, attaches optional video
//! and map enrichments and persists the result.

use std::sync::Arc;

use chrono::Duration;
use domain::{
    AdditionalData, Clock, DateRange, RecordId, ValidationFailure, WeatherRecord, WeatherSnapshot,
    validate_create_at, validate_update_at,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    MapLinkPort, RecordFilter, RecordQuery, SortField, SortOrder, VideoSearchPort, WeatherPort,
    WeatherRecordStore,
};

/// Tunables for the record service
#[derive(Debug, Clone, Copy)]
pub struct RecordServiceConfig {
    /// Stored records refreshed within this window are returned as-is
    pub recent_window: Duration,
    /// Maximum number of videos attached to a record
    pub max_videos: u8,
    /// Page size when the caller gives none
    pub default_page_size: u32,
    /// Upper bound for the page size
    pub max_page_size: u32,
}

impl Default for RecordServiceConfig {
    fn default() -> Self {
        Self {
            recent_window: Duration::seconds(WeatherRecord::DEFAULT_RECENT_WINDOW_SECS),
            max_videos: 5,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Result of a create request
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub record: WeatherRecord,
    /// True when an existing recent record was returned instead
    pub cached: bool,
}

/// Listing parameters as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub location: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

/// Pagination summary for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_entries: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(current_page: u32, limit: u32, total_entries: u64) -> Self {
        let total_pages = total_entries.div_ceil(u64::from(limit.max(1)));
        Self {
            current_page,
            total_pages,
            total_entries,
            has_next: u64::from(current_page) < total_pages,
            has_prev: current_page > 1,
        }
    }
}

/// One page of records
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<WeatherRecord>,
    pub pagination: Pagination,
}

/// Use cases for weather records
pub struct WeatherRecordService {
    clock: Arc<dyn Clock>,
    store: Arc<dyn WeatherRecordStore>,
    weather: Arc<dyn WeatherPort>,
    videos: Option<Arc<dyn VideoSearchPort>>,
    maps: Option<Arc<dyn MapLinkPort>>,
    config: RecordServiceConfig,
}

impl std::fmt::Debug for WeatherRecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherRecordService")
            .field("store", &"<WeatherRecordStore>")
            .field("weather", &"<WeatherPort>")
            .field("videos", &self.videos.is_some())
            .field("maps", &self.maps.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WeatherRecordService {
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        store: Arc<dyn WeatherRecordStore>,
        weather: Arc<dyn WeatherPort>,
    ) -> Self {
        Self {
            clock,
            store,
            weather,
            videos: None,
            maps: None,
            config: RecordServiceConfig::default(),
        }
    }

    /// Enable video lookups
    #[must_use]
    pub fn with_videos(mut self, videos: Arc<dyn VideoSearchPort>) -> Self {
        self.videos = Some(videos);
        self
    }

    /// Enable map link generation
    #[must_use]
    pub fn with_maps(mut self, maps: Arc<dyn MapLinkPort>) -> Self {
        self.maps = Some(maps);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: RecordServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Create a record, or return a recent stored one covering the same range
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<CreateOutcome, ApplicationError> {
        let now = self.clock.now();
        let entry = validate_create_at(payload, now)?;
        let range = DateRange::new(entry.start_date, entry.end_date)?;

        if let Some(existing) = self.store.find_covering(&entry.location, &range).await? {
            if existing.is_data_recent(now, self.config.recent_window) {
                debug!(id = %existing.id, location = %entry.location, "Returning cached weather record");
                return Ok(CreateOutcome {
                    record: existing,
                    cached: true,
                });
            }
        }

        let snapshot = self.weather.fetch_weather(&entry.location).await?;
        let additional = self
            .enrich(
                &entry.location,
                &snapshot,
                entry.include_video_lookup,
                entry.include_map_lookup,
                None,
            )
            .await;

        let record = WeatherRecord::new(entry.location, range, snapshot, additional, now);
        self.store.save(&record).await?;

        info!(id = %record.id, location = %record.location, "Created weather record");
        Ok(CreateOutcome {
            record,
            cached: false,
        })
    }

    /// Apply an update payload to a stored record and refresh its weather
    ///
    /// Omitted location and dates keep their stored values. Omitted flags
    /// count as false, so the matching enrichment is cleared.
    #[instrument(skip(self, payload), fields(id = %id))]
    pub async fn update(
        &self,
        id: &RecordId,
        payload: &Value,
    ) -> Result<WeatherRecord, ApplicationError> {
        let now = self.clock.now();
        let patch = validate_update_at(payload, now)?;
        let mut record = self
            .store
            .get(id)
            .await?
            .ok_or_else(ApplicationError::entry_not_found)?;

        let location = patch.location.unwrap_or_else(|| record.location.clone());
        let start = patch
            .start_date
            .unwrap_or_else(|| record.date_range.start_date());
        let end = patch.end_date.unwrap_or_else(|| record.date_range.end_date());
        let range = DateRange::new(start, end).map_err(|_| {
            ValidationFailure::single("endDate", "End date must be after start date")
        })?;

        let snapshot = self.weather.fetch_weather(&location).await?;
        let additional = self
            .enrich(
                &location,
                &snapshot,
                patch.include_video_lookup.unwrap_or(false),
                patch.include_map_lookup.unwrap_or(false),
                Some(&record.additional_data),
            )
            .await;

        record.refresh(location, range, snapshot, additional, now);
        if !self.store.update(&record).await? {
            return Err(ApplicationError::entry_not_found());
        }

        info!(location = %record.location, "Updated weather record");
        Ok(record)
    }

    /// Fetch a single record
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &RecordId) -> Result<WeatherRecord, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(ApplicationError::entry_not_found)
    }

    /// Delete a record
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &RecordId) -> Result<(), ApplicationError> {
        if self.store.delete(id).await? {
            info!("Deleted weather record");
            Ok(())
        } else {
            Err(ApplicationError::entry_not_found())
        }
    }

    /// List one page of records
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> Result<RecordPage, ApplicationError> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params
            .limit
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size.max(1));

        let filter = RecordFilter::by_location(params.location.as_deref());
        let query = RecordQuery {
            filter: filter.clone(),
            sort_by: params.sort_by,
            order: params.order,
            offset: u64::from(page - 1) * u64::from(limit),
            limit: Some(u64::from(limit)),
        };

        let (records, total) = tokio::try_join!(self.store.list(&query), self.store.count(&filter))?;

        Ok(RecordPage {
            records,
            pagination: Pagination::new(page, limit, total),
        })
    }

    async fn enrich(
        &self,
        location: &str,
        snapshot: &WeatherSnapshot,
        include_videos: bool,
        include_maps: bool,
        previous: Option<&AdditionalData>,
    ) -> AdditionalData {
        let place = if snapshot.city.name.trim().is_empty() {
            location
        } else {
            snapshot.city.name.as_str()
        };

        let videos = match (&self.videos, include_videos) {
            (Some(port), true) => match port.search_videos(place, self.config.max_videos).await {
                Ok(videos) => videos,
                Err(e) => {
                    warn!(error = %e, location = %place, "Video lookup failed");
                    previous.map(|p| p.videos.clone()).unwrap_or_default()
                },
            },
            _ => Vec::new(),
        };

        let maps = match (&self.maps, include_maps) {
            (Some(port), true) => Some(port.map_links(&snapshot.coordinates, place)),
            _ => None,
        };

        AdditionalData { videos, maps }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use domain::{FixedClock, GeoLocation, MapLinks, VideoLink};
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::export::fixtures;
    use crate::ports::{MockMapLinkPort, MockVideoSearchPort, MockWeatherPort, MockWeatherRecordStore};

    fn now() -> DateTime<Utc> {
        fixtures::now()
    }

    fn snapshot() -> WeatherSnapshot {
        let record = fixtures::record("London");
        WeatherSnapshot {
            coordinates: record.coordinates,
            city: record.city,
            current: record.current_weather,
            forecast: record.forecast,
        }
    }

    fn payload() -> Value {
        json!({
            "location": " London ",
            "startDate": (now() - Duration::days(2)).to_rfc3339(),
            "endDate": (now() - Duration::hours(1)).to_rfc3339(),
        })
    }

    fn weather_ok() -> MockWeatherPort {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .returning(|_| Ok(snapshot()));
        weather
    }

    fn service(store: MockWeatherRecordStore, weather: MockWeatherPort) -> WeatherRecordService {
        WeatherRecordService::new(
            Arc::new(FixedClock::new(now())),
            Arc::new(store),
            Arc::new(weather),
        )
    }

    fn video() -> VideoLink {
        VideoLink {
            title: "London in 4K".to_string(),
            video_id: "vid1".to_string(),
            thumbnail: String::new(),
            channel_title: "Walks".to_string(),
            published_at: None,
            description: String::new(),
            url: "https://www.youtube.com/watch?v=vid1".to_string(),
        }
    }

    fn links() -> MapLinks {
        MapLinks {
            coordinates: GeoLocation::new_unchecked(51.5085, -0.1257),
            location_name: "London".to_string(),
            embed_url: "embed".to_string(),
            google_maps_url: "maps".to_string(),
            search_url: "search".to_string(),
            static_map_url: None,
            street_view_url: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_before_io() {
        let store = MockWeatherRecordStore::new();
        let weather = MockWeatherPort::new();
        let result = service(store, weather).create(&json!({})).await;
        match result {
            Err(ApplicationError::Validation(failure)) => assert_eq!(failure.violations().len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_fetches_and_saves() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| Ok(None));
        store
            .expect_save()
            .withf(|r| r.location == "London" && r.additional_data.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .with(eq("London"))
            .times(1)
            .returning(|_| Ok(snapshot()));

        let outcome = service(store, weather).create(&payload()).await.unwrap();
        assert!(!outcome.cached);
        assert_eq!(outcome.record.created_at, now());
        assert_eq!(outcome.record.forecast.len(), 8);
    }

    /// Advances one second on every read
    #[derive(Default)]
    struct TickingClock {
        reads: std::sync::atomic::AtomicI64,
    }

    impl TickingClock {
        fn reads(&self) -> i64 {
            self.reads.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            now() + Duration::seconds(tick)
        }
    }

    #[tokio::test]
    async fn create_reads_the_clock_once() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| Ok(None));
        store.expect_save().times(1).returning(|_| Ok(()));

        let clock = Arc::new(TickingClock::default());
        let service = WeatherRecordService::new(
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(store),
            Arc::new(weather_ok()),
        );

        let outcome = service.create(&payload()).await.unwrap();
        assert_eq!(clock.reads(), 1);
        assert_eq!(outcome.record.created_at, now());
    }

    #[tokio::test]
    async fn update_reads_the_clock_once() {
        let mut store = MockWeatherRecordStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(fixtures::record("London"))));
        store.expect_update().times(1).returning(|_| Ok(true));

        let clock = Arc::new(TickingClock::default());
        let service = WeatherRecordService::new(
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(store),
            Arc::new(weather_ok()),
        );

        let id = RecordId::parse("6650a1b2c3d4e5f6a7b8c9d0").unwrap();
        let record = service
            .update(&id, &json!({"location": "Paris"}))
            .await
            .unwrap();
        assert_eq!(clock.reads(), 1);
        assert_eq!(record.updated_at, now());
    }

    #[tokio::test]
    async fn create_returns_recent_cached_record() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| {
            let mut record = fixtures::record("London");
            record.updated_at = now() - Duration::minutes(10);
            Ok(Some(record))
        });
        store.expect_save().never();
        let mut weather = MockWeatherPort::new();
        weather.expect_fetch_weather().never();

        let outcome = service(store, weather).create(&payload()).await.unwrap();
        assert!(outcome.cached);
    }

    #[tokio::test]
    async fn create_refetches_when_cached_record_is_stale() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| {
            let mut record = fixtures::record("London");
            record.updated_at = now() - Duration::hours(2);
            Ok(Some(record))
        });
        store.expect_save().times(1).returning(|_| Ok(()));

        let outcome = service(store, weather_ok()).create(&payload()).await.unwrap();
        assert!(!outcome.cached);
    }

    #[tokio::test]
    async fn create_attaches_enrichments() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| Ok(None));
        store
            .expect_save()
            .withf(|r| r.additional_data.videos.len() == 1 && r.additional_data.maps.is_some())
            .returning(|_| Ok(()));

        let mut videos = MockVideoSearchPort::new();
        videos
            .expect_search_videos()
            .with(eq("London"), eq(5u8))
            .returning(|_, _| Ok(vec![video()]));
        let mut maps = MockMapLinkPort::new();
        maps.expect_map_links().returning(|_, _| links());

        let mut body = payload();
        body["includeYouTube"] = json!(true);
        body["includeMapLookup"] = json!(true);

        let outcome = service(store, weather_ok())
            .with_videos(Arc::new(videos))
            .with_maps(Arc::new(maps))
            .create(&body)
            .await
            .unwrap();
        assert_eq!(outcome.record.additional_data.videos[0].video_id, "vid1");
    }

    #[tokio::test]
    async fn video_failure_does_not_break_create() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| Ok(None));
        store.expect_save().returning(|_| Ok(()));
        let mut videos = MockVideoSearchPort::new();
        videos
            .expect_search_videos()
            .returning(|_, _| Err(ApplicationError::ExternalService("quota".into())));

        let mut body = payload();
        body["includeVideoLookup"] = json!(true);
        let outcome = service(store, weather_ok())
            .with_videos(Arc::new(videos))
            .create(&body)
            .await
            .unwrap();
        assert!(outcome.record.additional_data.videos.is_empty());
    }

    #[tokio::test]
    async fn weather_failure_propagates() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_find_covering().returning(|_, _| Ok(None));
        store.expect_save().never();
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .returning(|_| Err(ApplicationError::NotFound("Location".into())));

        let result = service(store, weather).create(&payload()).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_merges_and_clears_omitted_enrichments() {
        let mut store = MockWeatherRecordStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(fixtures::record("London"))));
        store
            .expect_update()
            .withf(|r| r.location == "Paris" && r.additional_data.videos.is_empty())
            .times(1)
            .returning(|_| Ok(true));

        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .with(eq("Paris"))
            .returning(|_| Ok(snapshot()));

        let id = RecordId::parse("6650a1b2c3d4e5f6a7b8c9d0").unwrap();
        let record = service(store, weather)
            .update(&id, &json!({"location": "Paris"}))
            .await
            .unwrap();
        assert_eq!(record.updated_at, now());
        assert_eq!(record.date_range.end_date(), now());
    }

    #[tokio::test]
    async fn update_keeps_previous_videos_when_lookup_fails() {
        let mut store = MockWeatherRecordStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(fixtures::record("London"))));
        store.expect_update().returning(|_| Ok(true));
        let mut videos = MockVideoSearchPort::new();
        videos
            .expect_search_videos()
            .returning(|_, _| Err(ApplicationError::RateLimited));

        let id = RecordId::parse("6650a1b2c3d4e5f6a7b8c9d0").unwrap();
        let record = service(store, weather_ok())
            .with_videos(Arc::new(videos))
            .update(&id, &json!({"includeVideoLookup": true}))
            .await
            .unwrap();
        assert_eq!(record.additional_data.videos.len(), 1);
    }

    #[tokio::test]
    async fn update_rejects_merged_reversed_range() {
        let mut store = MockWeatherRecordStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(fixtures::record("London"))));
        store.expect_update().never();
        let mut weather = MockWeatherPort::new();
        weather.expect_fetch_weather().never();

        // Stored range ends at `now`; a later start reverses the merged range.
        let id = RecordId::parse("6650a1b2c3d4e5f6a7b8c9d0").unwrap();
        let svc = WeatherRecordService::new(
            Arc::new(FixedClock::new(now() + Duration::hours(1))),
            Arc::new(store),
            Arc::new(weather),
        );
        let result = svc
            .update(
                &id,
                &json!({"startDate": (now() + Duration::minutes(30)).to_rfc3339()}),
            )
            .await;
        match result {
            Err(ApplicationError::Validation(failure)) => assert!(failure.has_field("endDate")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_get().returning(|_| Ok(None));
        let id = RecordId::parse("6650a1b2c3d4e5f6a7b8c9d0").unwrap();
        let result = service(store, MockWeatherPort::new())
            .update(&id, &json!({"location": "Rome"}))
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let mut store = MockWeatherRecordStore::new();
        store.expect_delete().returning(|_| Ok(false));
        let id = RecordId::parse("6650a1b2c3d4e5f6a7b8c9d0").unwrap();
        let result = service(store, MockWeatherPort::new()).delete(&id).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_clamps_limit_and_computes_pagination() {
        let mut store = MockWeatherRecordStore::new();
        store
            .expect_list()
            .withf(|q| q.limit == Some(100) && q.offset == 100 && q.sort_by == SortField::Location)
            .returning(|_| Ok(vec![fixtures::record("London")]));
        store.expect_count().returning(|_| Ok(250));

        let page = service(store, MockWeatherPort::new())
            .list(ListParams {
                page: Some(2),
                limit: Some(500),
                sort_by: SortField::Location,
                ..ListParams::default()
            })
            .await
            .unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(
            page.pagination,
            Pagination {
                current_page: 2,
                total_pages: 3,
                total_entries: 250,
                has_next: true,
                has_prev: true,
            }
        );
    }

    #[test]
    fn pagination_for_empty_store() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }
}
