//! Recommendation log operations

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{
    AspectScores, CropCategory, CropStats, FarmInput, FarmRequest, Recommendation,
    RecommendationRecord, SoilType, WeatherObservation,
};

const RECORD_COLUMNS: &str = "id, request_id, rank, crop, score, rationale, sustainability_score, aspects, created_at";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<RecommendationRecord> {
    let aspects_json: Option<String> = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    Ok(RecommendationRecord {
        id: row.get(0)?,
        request_id: row.get(1)?,
        rank: row.get(2)?,
        crop: row.get(3)?,
        score: row.get(4)?,
        rationale: row.get(5)?,
        sustainability_score: row.get(6)?,
        aspects: aspects_json.and_then(|s| serde_json::from_str::<AspectScores>(&s).ok()),
        created_at: parse_datetime(&created_at_str),
    })
}

fn request_from_row(row: &Row<'_>) -> rusqlite::Result<FarmRequest> {
    let soil_str: String = row.get(2)?;
    let preference_str: String = row.get(3)?;
    let temperature: Option<f64> = row.get(4)?;
    let rainfall: Option<f64> = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    Ok(FarmRequest {
        id: row.get(0)?,
        farm: FarmInput {
            land_size_ha: row.get(1)?,
            soil: soil_str.parse().unwrap_or(SoilType::Loamy),
            preference: preference_str.parse().unwrap_or(CropCategory::Grains),
        },
        weather: match (temperature, rainfall) {
            (Some(temperature_c), Some(rainfall_mm)) => Some(WeatherObservation {
                temperature_c,
                rainfall_mm,
            }),
            _ => None,
        },
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Append a request and its ranked candidates. Returns the request id.
    pub fn record_recommendation(&self, recommendation: &Recommendation) -> Result<i64> {
        let conn = self.conn()?;

        // Use explicit transaction for atomicity
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> Result<i64> {
            let farm = &recommendation.farm;
            let weather = recommendation.weather.as_ref();
            conn.execute(
                "INSERT INTO farm_requests (land_size_ha, soil_type, crop_preference, temperature_c, rainfall_mm)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    farm.land_size_ha,
                    farm.soil.as_str(),
                    farm.preference.as_str(),
                    weather.map(|w| w.temperature_c),
                    weather.map(|w| w.rainfall_mm),
                ],
            )?;
            let request_id = conn.last_insert_rowid();

            for (i, candidate) in recommendation.candidates.iter().enumerate() {
                let aspects = serde_json::to_string(&candidate.aspects)?;
                conn.execute(
                    "INSERT INTO recommendations (request_id, rank, crop, score, rationale, sustainability_score, aspects)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    params![
                        request_id,
                        (i + 1) as i64,
                        candidate.crop,
                        candidate.total_score,
                        candidate.rationale,
                        candidate.aspects.sustainability,
                        aspects,
                    ],
                )?;
            }
            Ok(request_id)
        })();

        match result {
            Ok(id) => {
                conn.execute("COMMIT", [])?;
                debug!(
                    request_id = id,
                    rows = recommendation.candidates.len(),
                    "Appended recommendation"
                );
                Ok(id)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// Get a request by ID
    pub fn get_request(&self, id: i64) -> Result<Option<FarmRequest>> {
        let conn = self.conn()?;
        let request = conn
            .query_row(
                "SELECT id, land_size_ha, soil_type, crop_preference, temperature_c, rainfall_mm, created_at
                 FROM farm_requests WHERE id = ?",
                params![id],
                request_from_row,
            )
            .optional()?;

        Ok(request)
    }

    /// Most recent requests first
    pub fn list_requests(&self, limit: i64) -> Result<Vec<FarmRequest>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, land_size_ha, soil_type, crop_preference, temperature_c, rainfall_mm, created_at
             FROM farm_requests ORDER BY id DESC LIMIT ?",
        )?;

        let requests = stmt
            .query_map(params![limit], request_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(requests)
    }

    /// Most recent recommendations first, best rank first within a request
    pub fn list_recommendations(&self, limit: i64) -> Result<Vec<RecommendationRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recommendations ORDER BY request_id DESC, rank ASC LIMIT ?",
            RECORD_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![limit], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Recommendations of one crop (case-insensitive), most recent first
    pub fn list_recommendations_for_crop(
        &self,
        crop: &str,
        limit: i64,
    ) -> Result<Vec<RecommendationRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recommendations WHERE crop = ? COLLATE NOCASE
             ORDER BY request_id DESC, rank ASC LIMIT ?",
            RECORD_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![crop.trim(), limit], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// All ranked rows of one request, best first
    pub fn list_request_recommendations(
        &self,
        request_id: i64,
    ) -> Result<Vec<RecommendationRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recommendations WHERE request_id = ? ORDER BY rank ASC",
            RECORD_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![request_id], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn count_requests(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM farm_requests", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_recommendations(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM recommendations", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Per-crop totals, most often recommended first
    pub fn recommendation_stats(&self) -> Result<Vec<CropStats>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT crop,
                   COUNT(*) AS times_recommended,
                   SUM(CASE WHEN rank = 1 THEN 1 ELSE 0 END) AS times_top,
                   AVG(score) AS avg_score
            FROM recommendations
            GROUP BY crop
            ORDER BY times_recommended DESC, times_top DESC, crop ASC
            "#,
        )?;

        let stats = stmt
            .query_map([], |row| {
                Ok(CropStats {
                    crop: row.get(0)?,
                    times_recommended: row.get(1)?,
                    times_top: row.get(2)?,
                    avg_score: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(stats)
    }
}
