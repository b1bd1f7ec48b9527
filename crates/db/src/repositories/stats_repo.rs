//! Minimal row fetch for the statistics aggregator.
//!
//! Only `(created_at, model, parameters)` leaves the database; all
//! aggregation happens in `lumen_core::stats`.

use lumen_core::stats::GenerationSample;
use lumen_core::types::{DbId, Timestamp};
use sqlx::PgPool;

/// Provides the generation-sample fetch for one user and time range.
pub struct StatsRepo;

impl StatsRepo {
    /// All of a user's generation records since `cutoff`.
    pub async fn samples_since(
        pool: &PgPool,
        user_id: DbId,
        cutoff: Timestamp,
    ) -> Result<Vec<GenerationSample>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (Timestamp, String, String)>(
            "SELECT created_at, model, parameters FROM artworks
             WHERE user_id = $1 AND created_at >= $2
             ORDER BY created_at",
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(created_at, model, parameters)| GenerationSample {
                created_at,
                model,
                parameters,
            })
            .collect())
    }
}
