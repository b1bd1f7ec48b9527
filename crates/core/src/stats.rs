//! Pure aggregation for the per-user generation statistics endpoint.
//!
//! The repository layer fetches minimal `(created_at, model, parameters)`
//! rows; everything else is computed here so it can be unit-tested without a
//! database.

use std::collections::HashSet;

use chrono::{Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Weekday names, Sunday-first, matching the `weekday_counts` array order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Known generation models, each mapped to a fixed `model_usage` slot.
/// Unknown models are bucketed into the trailing catch-all slot.
pub const MODEL_SLOTS: [&str; 5] = ["flux-pro", "flux-dev", "sdxl", "sd-1.5", "playground-v2"];

/// Slot name for models not listed in [`MODEL_SLOTS`].
pub const OTHER_MODEL_SLOT: &str = "other";

/// Placeholder elapsed time (seconds) when a parameter blob carries no
/// usable `timings.total_secs` field.
pub const DEFAULT_GENERATION_SECS: f64 = 5.0;

/// Time range for the statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsTimeRange {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl StatsTimeRange {
    /// Inclusive lower bound for `created_at`, relative to `now`.
    pub fn cutoff(self, now: Timestamp) -> Timestamp {
        match self {
            StatsTimeRange::Day => now - Duration::days(1),
            StatsTimeRange::Week => now - Duration::days(7),
            StatsTimeRange::Month => now - Duration::days(30),
            StatsTimeRange::Year => now - Duration::days(365),
        }
    }
}

/// One generation record, as fetched by the stats repository.
#[derive(Debug, Clone)]
pub struct GenerationSample {
    pub created_at: Timestamp,
    pub model: String,
    /// JSON-serialized parameter blob, as stored.
    pub parameters: String,
}

/// Per-model usage count in the fixed slot order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelUsage {
    pub model: String,
    pub count: i64,
}

/// Elapsed generation time summary, in seconds.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationTime {
    pub total: f64,
    pub average: f64,
    pub max: f64,
}

/// Aggregated statistics for one user over one time range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub total_generations: i64,
    /// Total divided by the number of distinct UTC calendar dates with at
    /// least one generation. Zero when there are no samples.
    pub avg_per_active_day: f64,
    /// 7-element array, Sunday-first.
    pub weekday_counts: [i64; 7],
    /// Weekday name of the maximum bucket. Ties resolve to the earlier
    /// weekday (Sunday-first). `None` when there are no samples.
    pub most_active_day: Option<&'static str>,
    pub model_usage: Vec<ModelUsage>,
    pub generation_time: GenerationTime,
}

/// Aggregate a set of generation samples.
pub fn aggregate(samples: &[GenerationSample]) -> GenerationStats {
    let total = samples.len() as i64;

    let active_days: HashSet<_> = samples.iter().map(|s| s.created_at.date_naive()).collect();
    let avg_per_active_day = if active_days.is_empty() {
        0.0
    } else {
        total as f64 / active_days.len() as f64
    };

    let mut weekday_counts = [0i64; 7];
    for sample in samples {
        let idx = sample.created_at.weekday().num_days_from_sunday() as usize;
        weekday_counts[idx] += 1;
    }

    // Earlier weekday wins ties because `>` skips equal maxima.
    let most_active_day = if total == 0 {
        None
    } else {
        let mut best = 0usize;
        for (idx, &count) in weekday_counts.iter().enumerate() {
            if count > weekday_counts[best] {
                best = idx;
            }
        }
        Some(WEEKDAY_NAMES[best])
    };

    let mut slot_counts = vec![0i64; MODEL_SLOTS.len() + 1];
    for sample in samples {
        let idx = MODEL_SLOTS
            .iter()
            .position(|&m| m == sample.model)
            .unwrap_or(MODEL_SLOTS.len());
        slot_counts[idx] += 1;
    }
    let model_usage = MODEL_SLOTS
        .iter()
        .copied()
        .chain(std::iter::once(OTHER_MODEL_SLOT))
        .zip(slot_counts)
        .map(|(model, count)| ModelUsage {
            model: model.to_string(),
            count,
        })
        .collect();

    let mut time_total = 0.0f64;
    let mut time_max = 0.0f64;
    for sample in samples {
        let secs = extract_total_secs(&sample.parameters);
        time_total += secs;
        time_max = time_max.max(secs);
    }
    let generation_time = GenerationTime {
        total: time_total,
        average: if total == 0 { 0.0 } else { time_total / total as f64 },
        max: time_max,
    };

    GenerationStats {
        total_generations: total,
        avg_per_active_day,
        weekday_counts,
        most_active_day,
        model_usage,
        generation_time,
    }
}

/// Read the optional `timings.total_secs` field from a stored parameter blob.
///
/// Falls back to [`DEFAULT_GENERATION_SECS`] when the blob is not valid JSON
/// or the field is absent or non-numeric.
fn extract_total_secs(parameters: &str) -> f64 {
    serde_json::from_str::<serde_json::Value>(parameters)
        .ok()
        .and_then(|v| v.get("timings")?.get("total_secs")?.as_f64())
        .unwrap_or(DEFAULT_GENERATION_SECS)
}

/// Convenience accessor used by handlers to expose `now` in one place.
pub fn now() -> Timestamp {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(y: i32, mo: u32, d: u32, model: &str, parameters: &str) -> GenerationSample {
        GenerationSample {
            created_at: Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap(),
            model: model.to_string(),
            parameters: parameters.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_generations, 0);
        assert_eq!(stats.avg_per_active_day, 0.0);
        assert_eq!(stats.weekday_counts, [0; 7]);
        assert_eq!(stats.most_active_day, None);
        assert_eq!(stats.generation_time.total, 0.0);
        assert_eq!(stats.model_usage.len(), MODEL_SLOTS.len() + 1);
    }

    #[test]
    fn weekday_buckets_are_sunday_first() {
        // 2026-03-01 is a Sunday, 2026-03-02 a Monday.
        let samples = vec![
            sample(2026, 3, 1, "sdxl", "{}"),
            sample(2026, 3, 2, "sdxl", "{}"),
            sample(2026, 3, 2, "sdxl", "{}"),
        ];
        let stats = aggregate(&samples);
        assert_eq!(stats.weekday_counts[0], 1, "Sunday bucket");
        assert_eq!(stats.weekday_counts[1], 2, "Monday bucket");
        assert_eq!(stats.most_active_day, Some("monday"));
    }

    #[test]
    fn most_active_day_ties_resolve_to_earlier_weekday() {
        // One generation on a Sunday and one on a Monday: Sunday wins.
        let samples = vec![
            sample(2026, 3, 2, "sdxl", "{}"),
            sample(2026, 3, 1, "sdxl", "{}"),
        ];
        let stats = aggregate(&samples);
        assert_eq!(stats.most_active_day, Some("sunday"));
    }

    #[test]
    fn avg_counts_distinct_active_days() {
        // 4 generations over 2 distinct dates.
        let samples = vec![
            sample(2026, 3, 1, "sdxl", "{}"),
            sample(2026, 3, 1, "sdxl", "{}"),
            sample(2026, 3, 1, "sdxl", "{}"),
            sample(2026, 3, 5, "sdxl", "{}"),
        ];
        let stats = aggregate(&samples);
        assert_eq!(stats.total_generations, 4);
        assert_eq!(stats.avg_per_active_day, 2.0);
    }

    #[test]
    fn unknown_models_bucket_into_other() {
        let samples = vec![
            sample(2026, 3, 1, "flux-pro", "{}"),
            sample(2026, 3, 1, "some-new-model", "{}"),
            sample(2026, 3, 1, "another", "{}"),
        ];
        let stats = aggregate(&samples);
        assert_eq!(stats.model_usage[0].model, "flux-pro");
        assert_eq!(stats.model_usage[0].count, 1);
        let other = stats.model_usage.last().unwrap();
        assert_eq!(other.model, OTHER_MODEL_SLOT);
        assert_eq!(other.count, 2);
    }

    #[test]
    fn generation_time_reads_nested_timings() {
        let samples = vec![
            sample(2026, 3, 1, "sdxl", r#"{"timings":{"total_secs":12.5}}"#),
            sample(2026, 3, 1, "sdxl", r#"{"timings":{"total_secs":2.5}}"#),
        ];
        let stats = aggregate(&samples);
        assert_eq!(stats.generation_time.total, 15.0);
        assert_eq!(stats.generation_time.average, 7.5);
        assert_eq!(stats.generation_time.max, 12.5);
    }

    #[test]
    fn missing_or_invalid_timings_default_to_placeholder() {
        let samples = vec![
            sample(2026, 3, 1, "sdxl", "{}"),
            sample(2026, 3, 1, "sdxl", "not json at all"),
            sample(2026, 3, 1, "sdxl", r#"{"timings":{"total_secs":"fast"}}"#),
        ];
        let stats = aggregate(&samples);
        assert_eq!(stats.generation_time.total, 3.0 * DEFAULT_GENERATION_SECS);
        assert_eq!(stats.generation_time.max, DEFAULT_GENERATION_SECS);
    }

    #[test]
    fn stats_range_cutoffs() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        assert_eq!(StatsTimeRange::Day.cutoff(now), now - Duration::days(1));
        assert_eq!(StatsTimeRange::Week.cutoff(now), now - Duration::days(7));
        assert_eq!(StatsTimeRange::Month.cutoff(now), now - Duration::days(30));
        assert_eq!(StatsTimeRange::Year.cutoff(now), now - Duration::days(365));
    }
}
