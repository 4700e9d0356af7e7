//! Point lookup, insert, and update against the `mag` table.

use crate::{PgOpts, StoreError};
use mag_types::{Component, MeasurementRecord, SurveyKey};
use tokio_postgres::{Client, NoTls, Row};
use tracing::debug;
use uuid::Uuid;

const SELECT_BY_KEY: &str =
    "SELECT id, date, elevation, lat, lon, declination, inclination, x, y, z, \
     horizontal_intensity, total_intensity \
     FROM mag WHERE date = $1 AND elevation = $2 AND lat = $3 AND lon = $4";

const INSERT: &str =
    "INSERT INTO mag (id, date, elevation, lat, lon, declination, inclination, x, y, z, \
     horizontal_intensity, total_intensity) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)";

/// Handle on the `mag` table.
pub struct MagStore {
    client: Client,
}

impl MagStore {
    /// Connect to PostgreSQL and verify the connection with a probe query.
    pub async fn connect(opts: &PgOpts) -> Result<Self, StoreError> {
        let (client, connection) = opts
            .pg_config()
            .connect(NoTls)
            .await
            .map_err(StoreError::Connect)?;

        // The connection object drives the socket; it runs until the client drops.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {e}");
            }
        });

        client
            .simple_query("SELECT 1")
            .await
            .map_err(StoreError::Connect)?;

        debug!("Connected to the mag database");
        Ok(MagStore { client })
    }

    /// Look up the row stored for a survey key, if any.
    pub async fn find(&self, key: &SurveyKey) -> Result<Option<MeasurementRecord>, StoreError> {
        let row = self
            .client
            .query_opt(
                SELECT_BY_KEY,
                &[&key.date, &key.elevation, &key.lat, &key.lon],
            )
            .await?;
        row.map(|row| record_from_row(&row)).transpose()
    }

    /// Insert a new row. The record's id becomes the row's permanent identity.
    pub async fn insert(&self, record: &MeasurementRecord) -> Result<(), StoreError> {
        self.client
            .execute(
                INSERT,
                &[
                    &record.id,
                    &record.date,
                    &record.elevation,
                    &record.lat,
                    &record.lon,
                    &record.declination,
                    &record.inclination,
                    &record.x,
                    &record.y,
                    &record.z,
                    &record.horizontal_intensity,
                    &record.total_intensity,
                ],
            )
            .await?;
        Ok(())
    }

    /// Set one component column on an existing row.
    pub async fn set_component(
        &self,
        id: Uuid,
        component: Component,
        value: &str,
    ) -> Result<(), StoreError> {
        // Column names come from Component::column, never from input data.
        let statement = format!("UPDATE mag SET {} = $2 WHERE id = $1", component.column());
        self.client.execute(&statement, &[&id, &value]).await?;
        Ok(())
    }
}

fn record_from_row(row: &Row) -> Result<MeasurementRecord, StoreError> {
    Ok(MeasurementRecord {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        elevation: row.try_get("elevation")?,
        lat: row.try_get("lat")?,
        lon: row.try_get("lon")?,
        declination: row.try_get("declination")?,
        inclination: row.try_get("inclination")?,
        x: row.try_get("x")?,
        y: row.try_get("y")?,
        z: row.try_get("z")?,
        horizontal_intensity: row.try_get("horizontal_intensity")?,
        total_intensity: row.try_get("total_intensity")?,
    })
}
