//! The summary aggregator: folds a slice of entries into per-train,
//! per-route, and per-class statistics plus monthly delay trends.
//!
//! Recomputed from scratch on every request; nothing here is cached or
//! updated incrementally.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::TrainEntry;

/// The fixed fleet roster. `trainStats` is seeded with exactly these ids;
/// journeys for trains outside the roster still count toward the global
/// totals but get no per-train row.
pub const FLEET_TRAIN_IDS: [&str; 8] = ["101", "102", "103", "104", "105", "106", "107", "108"];

/// One point of a train's monthly delay trend, keyed `YYYY-MM`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayTrendPoint {
    pub month: String,
    /// Accumulated delay minutes for the month.
    pub delay: i64,
    pub count: usize,
    pub avg_delay: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainStat {
    pub count: usize,
    pub total_revenue: f64,
    pub avg_occupancy_rate: f64,
    pub avg_delay: f64,
    /// Sorted ascending by month key; zero-padded months make the
    /// lexicographic order chronological.
    pub delay_trend: Vec<DelayTrendPoint>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPairStat {
    pub count: usize,
    pub total_revenue: f64,
    pub avg_delay: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStat {
    pub count: usize,
    pub total_revenue: f64,
    pub avg_occupancy_rate: f64,
}

/// Derived statistics for one dashboard request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_revenue: f64,
    pub average_occupancy_rate: f64,
    pub average_delay: f64,
    /// Keyed by train id, one row per roster train.
    pub train_stats: BTreeMap<String, TrainStat>,
    /// Keyed `"{from}-{to}"`.
    pub city_pair_stats: BTreeMap<String, CityPairStat>,
    /// Keyed by class label.
    pub class_stats: BTreeMap<String, ClassStat>,
}

#[derive(Default)]
struct TrainAcc {
    count: usize,
    revenue: f64,
    occupancy_rate_sum: f64,
    delay_sum: i64,
    months: BTreeMap<String, MonthAcc>,
}

#[derive(Default)]
struct MonthAcc {
    delay: i64,
    count: usize,
}

#[derive(Default)]
struct PairAcc {
    count: usize,
    revenue: f64,
    delay_sum: i64,
}

#[derive(Default)]
struct ClassAcc {
    count: usize,
    revenue: f64,
    occupancy_rate_sum: f64,
}

impl TrainAcc {
    fn finish(self) -> TrainStat {
        TrainStat {
            count: self.count,
            total_revenue: self.revenue,
            avg_occupancy_rate: if self.count > 0 {
                self.occupancy_rate_sum / self.count as f64
            } else {
                0.0
            },
            avg_delay: if self.count > 0 {
                self.delay_sum as f64 / self.count as f64
            } else {
                0.0
            },
            delay_trend: self
                .months
                .into_iter()
                .map(|(month, m)| DelayTrendPoint {
                    month,
                    delay: m.delay,
                    count: m.count,
                    avg_delay: if m.count > 0 {
                        m.delay as f64 / m.count as f64
                    } else {
                        0.0
                    },
                })
                .collect(),
        }
    }
}

impl SummaryStats {
    /// Folds a slice of entries (already filtered by the caller, e.g. by
    /// year) into summary statistics. A single accumulation pass followed
    /// by a finalize pass; every averaged field divides only when its count
    /// is non-zero.
    pub fn from_entries(entries: &[TrainEntry]) -> Self {
        let mut trains: BTreeMap<String, TrainAcc> = FLEET_TRAIN_IDS
            .iter()
            .map(|id| (id.to_string(), TrainAcc::default()))
            .collect();
        let mut pairs: BTreeMap<String, PairAcc> = BTreeMap::new();
        let mut classes: BTreeMap<String, ClassAcc> = BTreeMap::new();

        let mut revenue_total = 0.0;
        let mut occupancy_rate_sum = 0.0;
        let mut delay_sum = 0i64;

        for entry in entries {
            revenue_total += entry.revenue;
            occupancy_rate_sum += entry.occupancy_rate;
            delay_sum += entry.delay_minutes;

            // Roster trains only; anything else is absent from the map and
            // accumulates nowhere.
            if let Some(acc) = trains.get_mut(&entry.train_id) {
                acc.count += 1;
                acc.revenue += entry.revenue;
                acc.occupancy_rate_sum += entry.occupancy_rate;
                acc.delay_sum += entry.delay_minutes;

                let month_key = format!("{}-{:02}", entry.year, entry.month);
                let month = acc.months.entry(month_key).or_default();
                month.delay += entry.delay_minutes;
                month.count += 1;
            }

            let pair = pairs
                .entry(format!("{}-{}", entry.from_city, entry.to_city))
                .or_default();
            pair.count += 1;
            pair.revenue += entry.revenue;
            pair.delay_sum += entry.delay_minutes;

            let class = classes.entry(entry.class.clone()).or_default();
            class.count += 1;
            class.revenue += entry.revenue;
            class.occupancy_rate_sum += entry.occupancy_rate;
        }

        let total = entries.len();

        SummaryStats {
            total_revenue: revenue_total,
            average_occupancy_rate: if total > 0 {
                occupancy_rate_sum / total as f64
            } else {
                0.0
            },
            average_delay: if total > 0 {
                delay_sum as f64 / total as f64
            } else {
                0.0
            },
            train_stats: trains
                .into_iter()
                .map(|(id, acc)| (id, acc.finish()))
                .collect(),
            city_pair_stats: pairs
                .into_iter()
                .map(|(key, acc)| {
                    (
                        key,
                        CityPairStat {
                            count: acc.count,
                            total_revenue: acc.revenue,
                            avg_delay: if acc.count > 0 {
                                acc.delay_sum as f64 / acc.count as f64
                            } else {
                                0.0
                            },
                        },
                    )
                })
                .collect(),
            class_stats: classes
                .into_iter()
                .map(|(key, acc)| {
                    (
                        key,
                        ClassStat {
                            count: acc.count,
                            total_revenue: acc.revenue,
                            avg_occupancy_rate: if acc.count > 0 {
                                acc.occupancy_rate_sum / acc.count as f64
                            } else {
                                0.0
                            },
                        },
                    )
                })
                .collect(),
        }
    }
}
