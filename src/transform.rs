//! Normalization of raw journey rows into dashboard entries.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::model::{JourneyRow, TrainEntry};

/// Normalizes query rows into [`TrainEntry`] records.
///
/// Entries are re-numbered 1, 2, 3, … in result order; the original
/// `journey_id` is discarded. The occupancy rate is computed without a
/// zero-capacity guard, so rows with `total_seats == 0` carry a non-finite
/// rate through to the aggregates.
///
/// # Errors
///
/// Returns an error if any `scheduled_time` is not a valid `HH:MM:SS` time.
pub fn transform_rows(rows: &[JourneyRow]) -> Result<Vec<TrainEntry>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let delay_minutes = if row.is_delayed {
                row.default_delay_minutes
            } else {
                0
            };

            let actual_time = add_minutes(&row.scheduled_time, delay_minutes)?;
            let occupancy_rate = row.reserved_seats as f64 / row.total_seats as f64 * 100.0;

            Ok(TrainEntry {
                id: index + 1,
                train_id: row.train_id.clone(),
                train_name: row.train_name.clone(),
                departure_date: row.journey_date,
                from_city: row.departure_city.clone(),
                to_city: row.arrival_city.clone(),
                class: row.class.clone(),
                scheduled_time: row.scheduled_time.clone(),
                actual_time,
                delay_minutes,
                capacity: row.total_seats,
                occupancy: row.reserved_seats,
                revenue: row.revenue,
                occupancy_rate,
                year: row.journey_date.year(),
                month: row.journey_date.month(),
                quarter: quarter_of(row.journey_date.month()),
            })
        })
        .collect()
}

/// Calendar quarter for a 1-based month.
pub fn quarter_of(month: u32) -> u32 {
    (month + 2) / 3
}

/// Adds `minutes` to an `HH:MM:SS` wall-clock time.
///
/// The addition is anchored on a fixed reference date (2000-01-01) and only
/// the clock component of the result is kept: a delay pushing a departure
/// past 23:59:59 wraps to the next morning's clock time with no day carry.
fn add_minutes(time: &str, minutes: i64) -> Result<String> {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .with_context(|| format!("invalid scheduled_time '{time}'"))?;

    let anchor = NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("reference date is valid")
        .and_time(parsed);

    Ok((anchor + Duration::minutes(minutes))
        .format("%H:%M:%S")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_delayed: bool, default_delay_minutes: i64) -> JourneyRow {
        JourneyRow {
            journey_id: 900,
            train_id: "102".to_string(),
            train_name: "Highland Flyer".to_string(),
            departure_city: "Kingsbridge".to_string(),
            arrival_city: "Westmere".to_string(),
            journey_date: NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
            class: "First".to_string(),
            scheduled_time: "09:15:00".to_string(),
            is_delayed,
            default_delay_minutes,
            total_seats: 280,
            reserved_seats: 210,
            revenue: 6300.0,
        }
    }

    #[test]
    fn test_delay_applied_only_when_flagged() {
        let entries = transform_rows(&[row(false, 12), row(true, 12)]).unwrap();

        assert_eq!(entries[0].delay_minutes, 0);
        assert_eq!(entries[0].actual_time, "09:15:00");
        assert_eq!(entries[1].delay_minutes, 12);
        assert_eq!(entries[1].actual_time, "09:27:00");
    }

    #[test]
    fn test_zero_delay_keeps_scheduled_time() {
        let entries = transform_rows(&[row(false, 45)]).unwrap();
        assert_eq!(entries[0].actual_time, entries[0].scheduled_time);
    }

    #[test]
    fn test_ids_are_sequential_not_journey_ids() {
        let mut rows = vec![row(false, 0), row(false, 0), row(false, 0)];
        rows[0].journey_id = 501;
        rows[1].journey_id = 17;
        rows[2].journey_id = 998;

        let entries = transform_rows(&rows).unwrap();
        let ids: Vec<usize> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_occupancy_rate_computed_from_seats() {
        let entries = transform_rows(&[row(false, 0)]).unwrap();
        assert!((entries[0].occupancy_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_capacity_produces_non_finite_rate() {
        let mut r = row(false, 0);
        r.total_seats = 0;
        r.reserved_seats = 5;
        let entries = transform_rows(&[r]).unwrap();
        assert!(entries[0].occupancy_rate.is_infinite());

        let mut r = row(false, 0);
        r.total_seats = 0;
        r.reserved_seats = 0;
        let entries = transform_rows(&[r]).unwrap();
        assert!(entries[0].occupancy_rate.is_nan());
    }

    #[test]
    fn test_delay_past_midnight_wraps_clock() {
        let mut r = row(true, 20);
        r.scheduled_time = "23:50:00".to_string();
        let entries = transform_rows(&[r]).unwrap();
        assert_eq!(entries[0].actual_time, "00:10:00");
    }

    #[test]
    fn test_calendar_fields_derived_from_date() {
        let entries = transform_rows(&[row(false, 0)]).unwrap();
        assert_eq!(entries[0].year, 2024);
        assert_eq!(entries[0].month, 7);
        assert_eq!(entries[0].quarter, 3);
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(quarter_of(1), 1);
        assert_eq!(quarter_of(3), 1);
        assert_eq!(quarter_of(4), 2);
        assert_eq!(quarter_of(6), 2);
        assert_eq!(quarter_of(7), 3);
        assert_eq!(quarter_of(9), 3);
        assert_eq!(quarter_of(10), 4);
        assert_eq!(quarter_of(12), 4);
    }

    #[test]
    fn test_malformed_time_is_an_error() {
        let mut r = row(false, 0);
        r.scheduled_time = "9am".to_string();
        assert!(transform_rows(&[r]).is_err());
    }
}
