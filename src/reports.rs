//! Presentation groupings backing the individual dashboard pages.
//!
//! Every page consumes the same group-by → reduce → rank pipeline with its
//! own key function and truncation, instead of re-deriving the loops
//! per page.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::TrainEntry;

/// One reduced group of entries, keyed by whatever the page groups on
/// (route, class, month, train).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub total_revenue: f64,
    pub avg_delay: f64,
    pub avg_occupancy_rate: f64,
}

/// Field to rank groups by, descending.
#[derive(Debug, Clone, Copy)]
pub enum RankBy {
    Revenue,
    Delay,
    OccupancyRate,
    Count,
}

/// Groups entries by `key_fn` and reduces each group to sums and averages.
/// Output order is unspecified; pass through [`top_groups`] or
/// [`sorted_by_key`] before presenting.
pub fn summarize_by<F>(entries: &[TrainEntry], key_fn: F) -> Vec<GroupSummary>
where
    F: Fn(&TrainEntry) -> String,
{
    #[derive(Default)]
    struct Acc {
        count: usize,
        revenue: f64,
        delay_sum: i64,
        occupancy_rate_sum: f64,
    }

    let mut map: HashMap<String, Acc> = HashMap::new();
    for entry in entries {
        let acc = map.entry(key_fn(entry)).or_default();
        acc.count += 1;
        acc.revenue += entry.revenue;
        acc.delay_sum += entry.delay_minutes;
        acc.occupancy_rate_sum += entry.occupancy_rate;
    }

    map.into_iter()
        .map(|(key, acc)| GroupSummary {
            key,
            count: acc.count,
            total_revenue: acc.revenue,
            avg_delay: if acc.count > 0 {
                acc.delay_sum as f64 / acc.count as f64
            } else {
                0.0
            },
            avg_occupancy_rate: if acc.count > 0 {
                acc.occupancy_rate_sum / acc.count as f64
            } else {
                0.0
            },
        })
        .collect()
}

/// Sorts groups descending by the chosen field and keeps the first `n`.
pub fn top_groups(mut groups: Vec<GroupSummary>, by: RankBy, n: usize) -> Vec<GroupSummary> {
    groups.sort_by(|a, b| {
        let ord = match by {
            RankBy::Revenue => b.total_revenue.partial_cmp(&a.total_revenue),
            RankBy::Delay => b.avg_delay.partial_cmp(&a.avg_delay),
            RankBy::OccupancyRate => b.avg_occupancy_rate.partial_cmp(&a.avg_occupancy_rate),
            RankBy::Count => return b.count.cmp(&a.count),
        };
        ord.unwrap_or(Ordering::Equal)
    });
    groups.truncate(n);
    groups
}

/// Sorts groups ascending by key. Used for month/quarter keys, where the
/// zero-padded key makes lexicographic order chronological.
pub fn sorted_by_key(mut groups: Vec<GroupSummary>) -> Vec<GroupSummary> {
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}

fn route_key(entry: &TrainEntry) -> String {
    format!("{}-{}", entry.from_city, entry.to_city)
}

fn month_key(entry: &TrainEntry) -> String {
    format!("{}-{:02}", entry.year, entry.month)
}

/// Ticket sales page: where the revenue comes from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSalesReport {
    pub top_routes_by_revenue: Vec<GroupSummary>,
    pub revenue_by_class: Vec<GroupSummary>,
    pub monthly_revenue: Vec<GroupSummary>,
}

pub fn ticket_sales_report(entries: &[TrainEntry], top_n: usize) -> TicketSalesReport {
    TicketSalesReport {
        top_routes_by_revenue: top_groups(summarize_by(entries, route_key), RankBy::Revenue, top_n),
        revenue_by_class: top_groups(
            summarize_by(entries, |e| e.class.clone()),
            RankBy::Revenue,
            usize::MAX,
        ),
        monthly_revenue: sorted_by_key(summarize_by(entries, month_key)),
    }
}

/// Train fleet page: per-train utilization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainFleetReport {
    pub fleet_utilization: Vec<GroupSummary>,
    pub class_mix: Vec<GroupSummary>,
}

pub fn train_fleet_report(entries: &[TrainEntry]) -> TrainFleetReport {
    TrainFleetReport {
        fleet_utilization: top_groups(
            summarize_by(entries, |e| e.train_id.clone()),
            RankBy::OccupancyRate,
            usize::MAX,
        ),
        class_mix: top_groups(
            summarize_by(entries, |e| e.class.clone()),
            RankBy::Count,
            usize::MAX,
        ),
    }
}

/// Remote management page: where the delays are.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteManagementReport {
    pub most_delayed_routes: Vec<GroupSummary>,
    pub delay_by_train: Vec<GroupSummary>,
}

pub fn remote_management_report(entries: &[TrainEntry], top_n: usize) -> RemoteManagementReport {
    RemoteManagementReport {
        most_delayed_routes: top_groups(summarize_by(entries, route_key), RankBy::Delay, top_n),
        delay_by_train: top_groups(
            summarize_by(entries, |e| e.train_id.clone()),
            RankBy::Delay,
            usize::MAX,
        ),
    }
}

/// Reports page: monthly and quarterly operational summaries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsReport {
    pub monthly: Vec<GroupSummary>,
    pub quarterly: Vec<GroupSummary>,
}

pub fn operations_report(entries: &[TrainEntry]) -> OperationsReport {
    OperationsReport {
        monthly: sorted_by_key(summarize_by(entries, month_key)),
        quarterly: sorted_by_key(summarize_by(entries, |e| {
            format!("{}-Q{}", e.year, e.quarter)
        })),
    }
}

/// Distinct years present in the data, ascending.
pub fn available_years(entries: &[TrainEntry]) -> Vec<i32> {
    let mut years: Vec<i32> = entries.iter().map(|e| e.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// A departure row for the dashboard's upcoming-departures panel.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingDeparture {
    pub train_id: String,
    pub train_name: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
    pub scheduled_time: String,
    pub class: String,
}

/// Departures on or after `from_date`, ordered by date then scheduled time,
/// truncated to `limit`.
pub fn upcoming_departures(
    entries: &[TrainEntry],
    from_date: NaiveDate,
    limit: usize,
) -> Vec<UpcomingDeparture> {
    let mut upcoming: Vec<&TrainEntry> = entries
        .iter()
        .filter(|e| e.departure_date >= from_date)
        .collect();
    upcoming.sort_by(|a, b| {
        (a.departure_date, &a.scheduled_time).cmp(&(b.departure_date, &b.scheduled_time))
    });

    upcoming
        .into_iter()
        .take(limit)
        .map(|e| UpcomingDeparture {
            train_id: e.train_id.clone(),
            train_name: e.train_name.clone(),
            from_city: e.from_city.clone(),
            to_city: e.to_city.clone(),
            departure_date: e.departure_date,
            scheduled_time: e.scheduled_time.clone(),
            class: e.class.clone(),
        })
        .collect()
}
