//! Weather record store using sqlx
//!
//! Records are stored one row each. Nested payloads (city, current
//! weather, forecast, enrichments) are JSON text columns; timestamps are
//! fixed-width RFC 3339 strings so range checks and ordering work on text.

use application::{
    error::ApplicationError,
    ports::{RecordFilter, RecordQuery, SortField, SortOrder, WeatherRecordStore},
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{DateRange, GeoLocation, RecordId, WeatherRecord};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

use super::error::{map_json_error, map_sqlx_error};

const SELECT_COLUMNS: &str = "SELECT id, location, latitude, longitude, city, start_date, \
     end_date, current_weather, forecast, additional_data, created_at, updated_at \
     FROM weather_records";

/// Weather record store using sqlx
#[derive(Debug, Clone)]
pub struct SqliteWeatherRecordStore {
    pool: SqlitePool,
}

impl SqliteWeatherRecordStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &RecordFilter) {
        if let Some(location) = &filter.location {
            builder
                .push(" WHERE location LIKE ")
                .push_bind(format!("%{}%", escape_like(location)))
                .push(" ESCAPE '\\'");
        }
    }

    const fn sort_column(field: SortField) -> &'static str {
        match field {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Location => "location",
            SortField::StartDate => "start_date",
        }
    }

    const fn sort_direction(order: SortOrder) -> &'static str {
        match order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[async_trait]
impl WeatherRecordStore for SqliteWeatherRecordStore {
    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn save(&self, record: &WeatherRecord) -> Result<(), ApplicationError> {
        let row = WeatherRecordRow::from_record(record)?;

        sqlx::query(
            r"
            INSERT INTO weather_records (
                id, location, latitude, longitude, city, start_date, end_date,
                current_weather, forecast, additional_data, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(&row.id)
        .bind(&row.location)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(&row.city)
        .bind(&row.start_date)
        .bind(&row.end_date)
        .bind(&row.current_weather)
        .bind(&row.forecast)
        .bind(&row.additional_data)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!("Weather record saved");
        Ok(())
    }

    #[instrument(skip(self), fields(record_id = %id))]
    async fn get(&self, id: &RecordId) -> Result<Option<WeatherRecord>, ApplicationError> {
        let row: Option<WeatherRecordRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        row.map(WeatherRecordRow::into_record).transpose()
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn update(&self, record: &WeatherRecord) -> Result<bool, ApplicationError> {
        let row = WeatherRecordRow::from_record(record)?;

        let result = sqlx::query(
            r"
            UPDATE weather_records SET
                location = $2,
                latitude = $3,
                longitude = $4,
                city = $5,
                start_date = $6,
                end_date = $7,
                current_weather = $8,
                forecast = $9,
                additional_data = $10,
                updated_at = $11
            WHERE id = $1
            ",
        )
        .bind(&row.id)
        .bind(&row.location)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(&row.city)
        .bind(&row.start_date)
        .bind(&row.end_date)
        .bind(&row.current_weather)
        .bind(&row.forecast)
        .bind(&row.additional_data)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let updated = result.rows_affected() > 0;
        debug!(updated, "Weather record update");
        Ok(updated)
    }

    #[instrument(skip(self), fields(record_id = %id))]
    async fn delete(&self, id: &RecordId) -> Result<bool, ApplicationError> {
        let result = sqlx::query("DELETE FROM weather_records WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &RecordQuery) -> Result<Vec<WeatherRecord>, ApplicationError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        Self::push_filter(&mut builder, &query.filter);

        let direction = Self::sort_direction(query.order);
        builder.push(format!(
            " ORDER BY {} {direction}, id {direction}",
            Self::sort_column(query.sort_by)
        ));

        // SQLite treats a negative LIMIT as "no limit"
        let limit = query.limit.map_or(-1, to_sql_int);
        builder
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(to_sql_int(query.offset));

        let rows: Vec<WeatherRecordRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Listed weather records");
        rows.into_iter().map(WeatherRecordRow::into_record).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &RecordFilter) -> Result<u64, ApplicationError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM weather_records");
        Self::push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[instrument(skip(self, range))]
    async fn find_covering(
        &self,
        location: &str,
        range: &DateRange,
    ) -> Result<Option<WeatherRecord>, ApplicationError> {
        let row: Option<WeatherRecordRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} \
             WHERE location = $1 COLLATE NOCASE AND start_date <= $2 AND end_date >= $3 \
             ORDER BY updated_at DESC LIMIT 1"
        ))
        .bind(location.trim())
        .bind(format_timestamp(range.start_date()))
        .bind(format_timestamp(range.end_date()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(WeatherRecordRow::into_record).transpose()
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Fixed-width UTC timestamp; lexicographic order matches time order
fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, ApplicationError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApplicationError::Internal(format!("Invalid datetime: {e}")))
}

fn to_json<T: serde::Serialize>(column: &str, value: &T) -> Result<String, ApplicationError> {
    serde_json::to_string(value).map_err(|e| map_json_error(column, &e))
}

fn from_json<T: serde::de::DeserializeOwned>(
    column: &str,
    value: &str,
) -> Result<T, ApplicationError> {
    serde_json::from_str(value).map_err(|e| map_json_error(column, &e))
}

#[derive(Debug, sqlx::FromRow)]
struct WeatherRecordRow {
    id: String,
    location: String,
    latitude: f64,
    longitude: f64,
    city: String,
    start_date: String,
    end_date: String,
    current_weather: String,
    forecast: String,
    additional_data: String,
    created_at: String,
    updated_at: String,
}

impl WeatherRecordRow {
    fn from_record(record: &WeatherRecord) -> Result<Self, ApplicationError> {
        Ok(Self {
            id: record.id.as_str().to_string(),
            location: record.location.clone(),
            latitude: record.coordinates.latitude(),
            longitude: record.coordinates.longitude(),
            city: to_json("city", &record.city)?,
            start_date: format_timestamp(record.date_range.start_date()),
            end_date: format_timestamp(record.date_range.end_date()),
            current_weather: to_json("current_weather", &record.current_weather)?,
            forecast: to_json("forecast", &record.forecast)?,
            additional_data: to_json("additional_data", &record.additional_data)?,
            created_at: format_timestamp(record.created_at),
            updated_at: format_timestamp(record.updated_at),
        })
    }

    fn into_record(self) -> Result<WeatherRecord, ApplicationError> {
        let id = RecordId::parse(&self.id)
            .map_err(|e| ApplicationError::Internal(format!("Invalid record ID: {e}")))?;
        let date_range = DateRange::new(
            parse_datetime(&self.start_date)?,
            parse_datetime(&self.end_date)?,
        )?;

        Ok(WeatherRecord {
            id,
            location: self.location,
            coordinates: GeoLocation::new_unchecked(self.latitude, self.longitude),
            city: from_json("city", &self.city)?,
            date_range,
            current_weather: from_json("current_weather", &self.current_weather)?,
            forecast: from_json("forecast", &self.forecast)?,
            additional_data: from_json("additional_data", &self.additional_data)?,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}
