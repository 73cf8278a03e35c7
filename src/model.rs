//! Data types for journey rows and normalized dashboard entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row from the operations database join
/// (journeys ⋈ trains ⋈ schedules), as served by the rows endpoint
/// or stored in a CSV export.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyRow {
    pub journey_id: i64,
    pub train_id: String,
    pub train_name: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub journey_date: NaiveDate,
    pub class: String,
    /// Departure time as `HH:MM:SS`.
    pub scheduled_time: String,
    pub is_delayed: bool,
    /// Per-schedule delay applied when `is_delayed` is set.
    #[serde(default)]
    pub default_delay_minutes: i64,
    pub total_seats: u32,
    pub reserved_seats: u32,
    pub revenue: f64,
}

/// The normalized unit of aggregation. Constructed once from a
/// [`JourneyRow`] and never mutated afterwards; all aggregation only reads.
///
/// `id` is the 1-based position in the transformed result set, not the
/// original `journey_id` — downstream consumers index by this derived id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainEntry {
    pub id: usize,
    pub train_id: String,
    pub train_name: String,
    pub departure_date: NaiveDate,
    pub from_city: String,
    pub to_city: String,
    pub class: String,
    pub scheduled_time: String,
    pub actual_time: String,
    pub delay_minutes: i64,
    pub capacity: u32,
    pub occupancy: u32,
    pub revenue: f64,
    // The one camelCase field in an otherwise snake_case row; the front
    // ends read it under this name.
    #[serde(rename = "occupancyRate")]
    pub occupancy_rate: f64,
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_entry_serializes_occupancy_rate_camel_case() {
        let entry = TrainEntry {
            id: 1,
            train_id: "101".to_string(),
            train_name: "Coastal Express".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            from_city: "Northport".to_string(),
            to_city: "Kingsbridge".to_string(),
            class: "Second".to_string(),
            scheduled_time: "08:30:00".to_string(),
            actual_time: "08:30:00".to_string(),
            delay_minutes: 0,
            capacity: 320,
            occupancy: 256,
            revenue: 4864.0,
            occupancy_rate: 80.0,
            year: 2024,
            month: 3,
            quarter: 1,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["occupancyRate"], 80.0);
        assert_eq!(json["train_id"], "101");
        assert!(json.get("occupancy_rate").is_none());
    }

    #[test]
    fn test_journey_row_deserializes_from_json() {
        let raw = r#"{
            "journey_id": 42,
            "train_id": "103",
            "train_name": "Valley Runner",
            "departure_city": "Westmere",
            "arrival_city": "Northport",
            "journey_date": "2024-11-05",
            "class": "Third",
            "scheduled_time": "14:45:00",
            "is_delayed": true,
            "default_delay_minutes": 15,
            "total_seats": 400,
            "reserved_seats": 300,
            "revenue": 2250.0
        }"#;

        let row: JourneyRow = serde_json::from_str(raw).unwrap();
        assert_eq!(row.journey_id, 42);
        assert_eq!(row.journey_date, NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
        assert!(row.is_delayed);
        assert_eq!(row.default_delay_minutes, 15);
    }

    #[test]
    fn test_journey_row_delay_minutes_defaults_to_zero() {
        let raw = r#"{
            "journey_id": 7,
            "train_id": "105",
            "train_name": "Midland Arrow",
            "departure_city": "Easthaven",
            "arrival_city": "Southwick",
            "journey_date": "2025-02-01",
            "class": "Second",
            "scheduled_time": "06:10:00",
            "is_delayed": false,
            "total_seats": 280,
            "reserved_seats": 140,
            "revenue": 1820.0
        }"#;

        let row: JourneyRow = serde_json::from_str(raw).unwrap();
        assert_eq!(row.default_delay_minutes, 0);
    }
}
