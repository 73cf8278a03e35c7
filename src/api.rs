//! JSON payload shapes consumed by the dashboard front ends.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::TrainEntry;
use crate::reports::{self, UpcomingDeparture};
use crate::summary::SummaryStats;

/// The `/api/dashboard` payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub selected_year: i32,
    pub selected_metric: String,
    pub available_years: Vec<i32>,
    pub upcoming_departures: Vec<UpcomingDeparture>,
    pub summary_stats: SummaryStats,
    pub filtered_data: Vec<TrainEntry>,
}

/// The simpler per-page payload shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    pub data: T,
    pub summary_stats: SummaryStats,
}

/// How many departures the dashboard panel shows.
const UPCOMING_LIMIT: usize = 5;

/// Assembles the full dashboard payload.
///
/// Entries are filtered to `requested_year` (defaulting to the latest
/// available year, or the current year for an empty dataset) and the
/// summary is computed over the filtered slice. Upcoming departures are
/// drawn from the full dataset relative to `today`.
pub fn build_dashboard(
    entries: &[TrainEntry],
    requested_year: Option<i32>,
    metric: &str,
    today: NaiveDate,
) -> DashboardResponse {
    let available_years = reports::available_years(entries);
    let selected_year = requested_year
        .or_else(|| available_years.last().copied())
        .unwrap_or_else(|| today.year());

    let filtered_data: Vec<TrainEntry> = entries
        .iter()
        .filter(|e| e.year == selected_year)
        .cloned()
        .collect();

    let summary_stats = SummaryStats::from_entries(&filtered_data);
    let upcoming_departures = reports::upcoming_departures(entries, today, UPCOMING_LIMIT);

    DashboardResponse {
        selected_year,
        selected_metric: metric.to_string(),
        available_years,
        upcoming_departures,
        summary_stats,
        filtered_data,
    }
}

/// Wraps a page report together with the summary of the same slice.
pub fn page_response<T: Serialize>(data: T, entries: &[TrainEntry]) -> PageResponse<T> {
    PageResponse {
        data,
        summary_stats: SummaryStats::from_entries(entries),
    }
}
