//! Built-in sample journeys, substituted when a source cannot be loaded.

use chrono::NaiveDate;

use crate::model::TrainEntry;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("sample date is valid")
}

/// The fixed fallback dataset: five journeys across 2024 and 2025. Returned
/// instead of an error when fetching or decoding a source fails.
pub fn sample_entries() -> Vec<TrainEntry> {
    vec![
        TrainEntry {
            id: 1,
            train_id: "101".to_string(),
            train_name: "Coastal Express".to_string(),
            departure_date: date(2024, 3, 15),
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
        },
        TrainEntry {
            id: 2,
            train_id: "102".to_string(),
            train_name: "Highland Flyer".to_string(),
            departure_date: date(2024, 7, 22),
            from_city: "Kingsbridge".to_string(),
            to_city: "Westmere".to_string(),
            class: "First".to_string(),
            scheduled_time: "09:15:00".to_string(),
            actual_time: "09:27:00".to_string(),
            delay_minutes: 12,
            capacity: 280,
            occupancy: 210,
            revenue: 6300.0,
            occupancy_rate: 75.0,
            year: 2024,
            month: 7,
            quarter: 3,
        },
        TrainEntry {
            id: 3,
            train_id: "103".to_string(),
            train_name: "Valley Runner".to_string(),
            departure_date: date(2024, 11, 5),
            from_city: "Westmere".to_string(),
            to_city: "Northport".to_string(),
            class: "Third".to_string(),
            scheduled_time: "14:45:00".to_string(),
            actual_time: "14:45:00".to_string(),
            delay_minutes: 0,
            capacity: 400,
            occupancy: 300,
            revenue: 2250.0,
            occupancy_rate: 75.0,
            year: 2024,
            month: 11,
            quarter: 4,
        },
        TrainEntry {
            id: 4,
            train_id: "101".to_string(),
            train_name: "Coastal Express".to_string(),
            departure_date: date(2025, 1, 18),
            from_city: "Kingsbridge".to_string(),
            to_city: "Northport".to_string(),
            class: "Second".to_string(),
            scheduled_time: "17:20:00".to_string(),
            actual_time: "17:45:00".to_string(),
            delay_minutes: 25,
            capacity: 320,
            occupancy: 288,
            revenue: 5472.0,
            occupancy_rate: 90.0,
            year: 2025,
            month: 1,
            quarter: 1,
        },
        TrainEntry {
            id: 5,
            train_id: "104".to_string(),
            train_name: "Night Star".to_string(),
            departure_date: date(2025, 4, 9),
            from_city: "Northport".to_string(),
            to_city: "Easthaven".to_string(),
            class: "First".to_string(),
            scheduled_time: "22:50:00".to_string(),
            actual_time: "22:50:00".to_string(),
            delay_minutes: 0,
            capacity: 180,
            occupancy: 126,
            revenue: 5040.0,
            occupancy_rate: 70.0,
            year: 2025,
            month: 4,
            quarter: 2,
        },
    ]
}
