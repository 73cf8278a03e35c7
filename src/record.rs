//! Flat per-sample summary rows for the `watch` loop's CSV output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::summary::SummaryStats;

/// One sampling snapshot, flattened for CSV append. Error samples carry
/// `error_type`/`error_message` and zeroed metrics.
#[derive(Debug, Default, Serialize)]
pub struct SummaryRecord {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub entries: usize,
    pub total_revenue: f64,
    pub average_occupancy_rate: f64,
    pub average_delay: f64,
    /// Roster trains that saw at least one journey in this sample.
    pub active_trains: usize,
    pub city_pairs: usize,

    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

impl SummaryRecord {
    pub fn from_stats(stats: &SummaryStats, entries: usize) -> Self {
        SummaryRecord {
            timestamp: Utc::now(),
            entries,
            total_revenue: stats.total_revenue,
            average_occupancy_rate: stats.average_occupancy_rate,
            average_delay: stats.average_delay,
            active_trains: stats.train_stats.values().filter(|t| t.count > 0).count(),
            city_pairs: stats.city_pair_stats.len(),
            ..Default::default()
        }
    }

    /// Create an error record with timestamp and error information.
    pub fn from_error(error_type: &str, error_message: &str) -> Self {
        SummaryRecord {
            timestamp: Utc::now(),
            error_type: Some(error_type.to_string()),
            error_message: Some(error_message.to_string()),
            ..Default::default()
        }
    }

    /// Set the source the sample was taken from.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_entries;

    #[test]
    fn test_from_stats_counts_active_trains() {
        let entries = sample_entries();
        let stats = SummaryStats::from_entries(&entries);
        let record = SummaryRecord::from_stats(&stats, entries.len());

        assert_eq!(record.entries, 5);
        // Sample journeys run trains 101, 102, 103, 104.
        assert_eq!(record.active_trains, 4);
        assert!(record.city_pairs > 0);
        assert!(record.error_type.is_none());
    }

    #[test]
    fn test_from_error_zeroes_metrics() {
        let record = SummaryRecord::from_error("fetch_error", "connection refused").with_source("http://opsdb.local/api/journeys");

        assert_eq!(record.entries, 0);
        assert_eq!(record.total_revenue, 0.0);
        assert_eq!(record.error_type.as_deref(), Some("fetch_error"));
        assert_eq!(record.source.as_deref(), Some("http://opsdb.local/api/journeys"));
    }
}
